use tracing::debug;

use crate::config::PlannerConfig;
use super::grounding::ground_actions;
use super::search::{forward_search, SearchStatistics};
use super::{Error, GroundedAction, PlannerProblem, State};

/// Forward STRIPS planner bound to one problem.
///
/// Every call to [`STRIPSPlanner::forward_search`] builds its own frontier
/// and closed set; nothing is shared between calls.
#[allow(clippy::upper_case_acronyms)]
pub struct STRIPSPlanner<'a> {
    problem: &'a PlannerProblem,
    state: State,
    config: PlannerConfig,
    statistics: SearchStatistics,
}

impl<'a> STRIPSPlanner<'a> {
    pub fn new(problem: &'a PlannerProblem) -> Self {
        Self::with_config(problem, PlannerConfig::default())
    }

    pub fn with_config(problem: &'a PlannerProblem, config: PlannerConfig) -> Self {
        Self {
            problem,
            state: problem.init.clone(),
            config,
            statistics: SearchStatistics::default(),
        }
    }

    pub fn problem(&self) -> &'a PlannerProblem {
        self.problem
    }

    /// The state used by [`STRIPSPlanner::get_applicable_actions`].
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Counters of the last search.
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Groundings of every schema applicable in the tracked state.
    pub fn get_applicable_actions(&self) -> Result<Vec<GroundedAction<'a>>, Error> {
        ground_actions(&self.problem.actions, &self.state)
    }

    /// Searches from the initial state of the problem. `Ok(None)` means the
    /// goal is unreachable.
    pub fn forward_search(&mut self) -> Result<Option<Vec<GroundedAction<'a>>>, Error> {
        self.statistics = SearchStatistics::default();
        debug!(
            atoms = self.problem.init.len(),
            goal = self.problem.goal.len(),
            schemas = self.problem.actions.len(),
            "starting forward search"
        );
        forward_search(
            &self.problem.init,
            &self.problem.goal,
            &self.problem.actions,
            self.config.search.max_expansions,
            &mut self.statistics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::STRIPSPlanner;
    use crate::config::PlannerConfig;
    use crate::strips::{Action, Error, PlannerProblem, Predicate, State, UnboundPredicate};

    fn move_action() -> Action {
        Action::new("move", ["r", "from", "to"])
            .with_pos_precondition(UnboundPredicate::new("adj", ["from", "to"]))
            .with_pos_precondition(UnboundPredicate::new("at", ["r", "from"]))
            .with_neg_precondition(UnboundPredicate::new("occ", ["to"]))
            .with_pos_effect(UnboundPredicate::new("at", ["r", "to"]))
            .with_pos_effect(UnboundPredicate::new("occ", ["to"]))
            .with_neg_effect(UnboundPredicate::new("occ", ["from"]))
            .with_neg_effect(UnboundPredicate::new("at", ["r", "from"]))
    }

    fn init() -> State {
        State::new(vec![
            Predicate::new("adj", ["loc1", "loc2"]),
            Predicate::new("adj", ["loc2", "loc1"]),
            Predicate::new("adj", ["loc1", "loc3"]),
            Predicate::new("adj", ["loc3", "loc1"]),
            Predicate::new("at", ["r1", "loc1"]),
            Predicate::new("occ", ["loc2"]),
        ])
    }

    fn problem(goal: Vec<Predicate>) -> PlannerProblem {
        PlannerProblem::new(init(), State::new(goal), vec![move_action()])
    }

    fn plan_names(planner: &mut STRIPSPlanner) -> Option<Vec<String>> {
        planner.forward_search().unwrap().map(|plan| plan.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_one_step_plan() {
        let problem = problem(vec![Predicate::new("at", ["r1", "loc3"])]);
        let mut planner = STRIPSPlanner::new(&problem);
        assert_eq!(plan_names(&mut planner), Some(vec![String::from("move(r1,loc1,loc3)")]));
    }

    #[test]
    fn test_search_is_deterministic() {
        let problem = problem(vec![Predicate::new("occ", ["loc3"]), Predicate::new("at", ["r1", "loc3"])]);
        let mut planner = STRIPSPlanner::new(&problem);
        let first = plan_names(&mut planner);
        let first_stats = planner.statistics();
        let second = plan_names(&mut planner);
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(first_stats, planner.statistics());
    }

    #[test]
    fn test_goal_already_satisfied() {
        let problem = problem(vec![Predicate::new("at", ["r1", "loc1"])]);
        let mut planner = STRIPSPlanner::new(&problem);
        assert_eq!(plan_names(&mut planner), Some(vec![]));
        assert_eq!(planner.statistics().expanded, 0);
    }

    #[test]
    fn test_empty_goal() {
        let problem = problem(vec![]);
        let mut planner = STRIPSPlanner::new(&problem);
        assert_eq!(plan_names(&mut planner), Some(vec![]));
    }

    #[test]
    fn test_nothing_grounds() {
        let problem = PlannerProblem::new(
            State::new(vec![Predicate::new("clear", ["loc1"])]),
            State::new(vec![Predicate::new("at", ["r1", "loc3"])]),
            vec![move_action()],
        );
        let mut planner = STRIPSPlanner::new(&problem);
        assert!(planner.get_applicable_actions().unwrap().is_empty());
        assert_eq!(plan_names(&mut planner), None);
        let stats = planner.statistics();
        assert_eq!(stats.expanded, 1);
        assert_eq!(stats.generated, 0);
    }

    #[test]
    fn test_applicable_actions_follow_tracked_state() {
        let problem = problem(vec![Predicate::new("at", ["r1", "loc3"])]);
        let mut planner = STRIPSPlanner::new(&problem);
        let names: Vec<String> = planner.get_applicable_actions().unwrap().iter().map(|a| a.to_string()).collect();
        assert_eq!(names, vec!["move(r1,loc1,loc3)"]);

        let moved = planner.state().apply(&planner.get_applicable_actions().unwrap()[0]).unwrap();
        planner.set_state(moved);
        let names: Vec<String> = planner.get_applicable_actions().unwrap().iter().map(|a| a.to_string()).collect();
        assert_eq!(names, vec!["move(r1,loc3,loc1)"]);
        // search still starts from the problem's initial state
        assert_eq!(plan_names(&mut planner), Some(vec![String::from("move(r1,loc1,loc3)")]));
    }

    #[test]
    fn test_expansion_budget() {
        let problem = PlannerProblem::new(init(), State::new(vec![Predicate::new("at", ["r1", "loc9"])]), vec![move_action()]);
        let mut planner = STRIPSPlanner::with_config(&problem, PlannerConfig::new().with_max_expansions(1));
        assert_eq!(planner.forward_search(), Err(Error::ExpansionLimit(1)));
    }
}
