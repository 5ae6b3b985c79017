//! STRIPS planning: a grounding engine that unifies action schemas against a
//! world state, and a uniform-cost forward search over the reachable states.
//!
//! ```
//! use strips_planner::strips::{Action, PlannerProblem, Predicate, State, STRIPSPlanner, UnboundPredicate};
//!
//! let walk = Action::new("walk", ["from", "to"])
//!     .with_pos_precondition(UnboundPredicate::new("path", ["from", "to"]))
//!     .with_pos_precondition(UnboundPredicate::new("at", ["from"]))
//!     .with_pos_effect(UnboundPredicate::new("at", ["to"]))
//!     .with_neg_effect(UnboundPredicate::new("at", ["from"]));
//! let problem = PlannerProblem::new(
//!     State::new(vec![Predicate::new("path", ["home", "park"]), Predicate::new("at", ["home"])]),
//!     State::new(vec![Predicate::new("at", ["park"])]),
//!     vec![walk],
//! );
//! let mut planner = STRIPSPlanner::new(&problem);
//! let plan = planner.forward_search().unwrap().unwrap();
//! assert_eq!(plan[0].to_string(), "walk(home,park)");
//! ```

pub mod strips;
pub mod pddl;
pub mod config;
