pub mod predicate;
pub mod action;
pub mod state;
pub mod problem;
pub mod grounding;
pub mod search;
pub mod planner;

pub use predicate::{Constant, Variable, Predicate, UnboundPredicate};
pub use action::{Action, Bindings, GroundedAction};
pub use state::State;
pub use problem::PlannerProblem;
pub use search::SearchStatistics;
pub use planner::STRIPSPlanner;

use thiserror::Error;

/// Contract violations raised by the planning core.
///
/// Binding conflicts met during unification are not errors; they only prune
/// a branch and never leave the grounding engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("predicate {predicate} expects {expected} arguments, got {found}")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        found: usize,
    },

    #[error("cannot export bindings of {action}: variable binding is incomplete (missing {missing:?})")]
    IncompleteBinding {
        action: String,
        missing: Vec<String>,
    },

    #[error("search gave up after expanding {0} nodes")]
    ExpansionLimit(usize),
}
