use std::fmt;

use super::action::Action;
use super::state::State;

/// Initial state, goal conjunction and operator schemas of one planning task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerProblem {
    pub init: State,
    pub goal: State,
    pub actions: Vec<Action>,
}

impl PlannerProblem {
    pub fn new(init: State, goal: State, actions: Vec<Action>) -> Self {
        Self { init, goal, actions }
    }
}

impl fmt::Display for PlannerProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "init: {}", self.init)?;
        writeln!(f, "goal: {}", self.goal)?;
        for action in &self.actions {
            writeln!(f, "{}", action)?;
        }
        Ok(())
    }
}
