use std::cmp::Reverse;
use std::collections::HashSet;

use priority_queue::PriorityQueue;
use tracing::{debug, info};

use super::action::{Action, GroundedAction};
use super::grounding::ground_actions;
use super::state::State;
use super::Error;

/// Counters of one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes popped from the frontier and expanded.
    pub expanded: usize,
    /// Successor nodes pushed on the frontier.
    pub generated: usize,
    /// Successors dropped because their state was already closed.
    pub pruned: usize,
}

struct Node<'a> {
    state: State,
    action: Option<GroundedAction<'a>>,
    parent: Option<usize>,
    cost: usize,
}

/// Walks parent links from `current` back to the root and returns the
/// actions in root-to-goal order.
fn reconstruct_path<'a>(nodes: &mut [Node<'a>], current: usize) -> Vec<GroundedAction<'a>> {
    let mut total_path = Vec::new();
    let mut current = Some(current);
    while let Some(idx) = current {
        let node = &mut nodes[idx];
        if let Some(action) = node.action.take() {
            total_path.push(action);
        }
        current = node.parent;
    }
    total_path.reverse();
    total_path
}

/// Uniform-cost forward search from `init` until a state satisfies `goal`.
///
/// The frontier is ordered by `(path cost, insertion sequence)`, so equal
/// cost nodes leave in the order they were generated. Every action costs 1.
/// Each node is expanded with the actions applicable in its own state.
///
/// Returns `Ok(None)` when the reachable state space holds no goal state.
pub fn forward_search<'a>(
    init: &State,
    goal: &State,
    actions: &'a [Action],
    max_expansions: Option<usize>,
    stats: &mut SearchStatistics,
) -> Result<Option<Vec<GroundedAction<'a>>>, Error> {
    let mut nodes: Vec<Node<'a>> = Vec::new();
    let mut open = PriorityQueue::new();
    let mut closed: HashSet<State> = HashSet::new();
    let mut sequence = 0usize;

    nodes.push(Node { state: init.clone(), action: None, parent: None, cost: 0 });
    open.push(0usize, Reverse((0usize, sequence)));

    while let Some((current, _)) = open.pop() {
        if nodes[current].state.satisfies(goal) {
            let plan = reconstruct_path(&mut nodes, current);
            info!(expanded = stats.expanded, generated = stats.generated, plan_length = plan.len(), "plan found");
            return Ok(Some(plan));
        }
        if closed.contains(&nodes[current].state) {
            continue;
        }
        if let Some(limit) = max_expansions {
            if stats.expanded >= limit {
                return Err(Error::ExpansionLimit(limit));
            }
        }
        closed.insert(nodes[current].state.clone());
        stats.expanded += 1;

        let cost = nodes[current].cost + 1;
        let applicable = ground_actions(actions, &nodes[current].state)?;
        debug!(node = current, cost = nodes[current].cost, applicable = applicable.len(), "expanding");

        for action in applicable {
            let successor = nodes[current].state.apply(&action)?;
            if closed.contains(&successor) {
                stats.pruned += 1;
                continue;
            }
            sequence += 1;
            nodes.push(Node { state: successor, action: Some(action), parent: Some(current), cost });
            open.push(nodes.len() - 1, Reverse((cost, sequence)));
            stats.generated += 1;
        }
    }

    info!(expanded = stats.expanded, generated = stats.generated, "no plan found");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::{forward_search, SearchStatistics};
    use crate::strips::{Action, Error, Predicate, State, UnboundPredicate};

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

    /// loc1 - loc2 - loc3 - loc4 in a line.
    fn corridor() -> State {
        let mut atoms = Vec::new();
        for (a, b) in [("loc1", "loc2"), ("loc2", "loc3"), ("loc3", "loc4")] {
            atoms.push(Predicate::new("adj", [a, b]));
            atoms.push(Predicate::new("adj", [b, a]));
        }
        atoms.push(Predicate::new("at", ["r1", "loc1"]));
        atoms.push(Predicate::new("occ", ["loc1"]));
        State::new(atoms)
    }

    #[test]
    fn test_expansion_uses_node_state() {
        let actions = vec![move_action()];
        let goal = State::new(vec![Predicate::new("at", ["r1", "loc4"])]);
        let mut stats = SearchStatistics::default();
        let plan = forward_search(&corridor(), &goal, &actions, None, &mut stats).unwrap().unwrap();
        let plan: Vec<String> = plan.iter().map(|a| a.to_string()).collect();
        // only reachable if each node grounds against the state it holds
        assert_eq!(plan, vec!["move(r1,loc1,loc2)", "move(r1,loc2,loc3)", "move(r1,loc3,loc4)"]);
        assert!(stats.expanded >= 3);
        assert!(stats.pruned > 0);
    }

    #[test]
    fn test_goal_in_init() {
        let actions = vec![move_action()];
        let goal = State::new(vec![Predicate::new("at", ["r1", "loc1"])]);
        let mut stats = SearchStatistics::default();
        let plan = forward_search(&corridor(), &goal, &actions, None, &mut stats).unwrap();
        assert_eq!(plan, Some(vec![]));
        assert_eq!(stats.expanded, 0);
    }

    #[test]
    fn test_unreachable_goal() {
        let actions = vec![move_action()];
        let goal = State::new(vec![Predicate::new("at", ["r1", "loc9"])]);
        let mut stats = SearchStatistics::default();
        let plan = forward_search(&corridor(), &goal, &actions, None, &mut stats).unwrap();
        assert_eq!(plan, None);
        // four distinct robot positions
        assert_eq!(stats.expanded, 4);
    }

    #[test]
    fn test_expansion_limit() {
        let actions = vec![move_action()];
        let goal = State::new(vec![Predicate::new("at", ["r1", "loc4"])]);
        let mut stats = SearchStatistics::default();
        let result = forward_search(&corridor(), &goal, &actions, Some(2), &mut stats);
        assert_eq!(result, Err(Error::ExpansionLimit(2)));
        assert_eq!(stats.expanded, 2);
    }
}
