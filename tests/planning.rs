use std::collections::HashSet;

use strips_planner::pddl;
use strips_planner::strips::grounding::ground_action;
use strips_planner::strips::{Action, PlannerProblem, Predicate, State, STRIPSPlanner, UnboundPredicate};

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

fn plan_strings(problem: &PlannerProblem) -> Option<Vec<String>> {
    let mut planner = STRIPSPlanner::new(problem);
    planner
        .forward_search()
        .expect("search failed")
        .map(|plan| plan.iter().map(|a| a.to_string()).collect())
}

#[test]
fn robot_reaches_free_neighbour() {
    let problem = PlannerProblem::new(
        State::new(vec![
            Predicate::new("adj", ["loc1", "loc2"]),
            Predicate::new("adj", ["loc2", "loc1"]),
            Predicate::new("adj", ["loc1", "loc3"]),
            Predicate::new("adj", ["loc3", "loc1"]),
            Predicate::new("at", ["r1", "loc1"]),
            Predicate::new("occ", ["loc2"]),
        ]),
        State::new(vec![Predicate::new("at", ["r1", "loc3"])]),
        vec![move_action()],
    );
    assert_eq!(plan_strings(&problem), Some(vec![String::from("move(r1,loc1,loc3)")]));
}

/// Two robots on a ring of four cells; each needs to reach the cell the
/// other started next to. The plan must replay step by step from init.
#[test]
fn two_robots_plan_replays() {
    let cells = ["c1", "c2", "c3", "c4"];
    let mut atoms = Vec::new();
    for i in 0..cells.len() {
        let (a, b) = (cells[i], cells[(i + 1) % cells.len()]);
        atoms.push(Predicate::new("adj", [a, b]));
        atoms.push(Predicate::new("adj", [b, a]));
    }
    atoms.push(Predicate::new("at", ["r1", "c1"]));
    atoms.push(Predicate::new("occ", ["c1"]));
    atoms.push(Predicate::new("at", ["r2", "c2"]));
    atoms.push(Predicate::new("occ", ["c2"]));
    let problem = PlannerProblem::new(
        State::new(atoms),
        State::new(vec![Predicate::new("at", ["r1", "c3"]), Predicate::new("at", ["r2", "c4"])]),
        vec![move_action()],
    );

    let mut planner = STRIPSPlanner::new(&problem);
    let plan = planner.forward_search().unwrap().expect("plan exists");
    // uniform costs make the plan shortest: each robot must cover two cells
    assert_eq!(plan.len(), 4);

    let mut state = problem.init.clone();
    for step in &plan {
        let applicable: HashSet<String> = ground_action(step.action, &state).unwrap().iter().map(|a| a.to_string()).collect();
        assert!(applicable.contains(&step.to_string()), "{} not applicable in {}", step, state);
        state = state.apply(step).unwrap();
    }
    assert!(state.satisfies(&problem.goal));
}

#[test]
fn pddl_scenario_matches_hand_built() {
    let domain = "(define (domain robots)
      (:requirements :strips :typing :negative-preconditions)
      (:types robot location)
      (:predicates (adj ?a ?b - location) (at ?r - robot ?l - location) (occ ?l - location))
      (:action move
        :parameters (?r - robot ?from ?to - location)
        :precondition (and (adj ?from ?to) (at ?r ?from) (not (occ ?to)))
        :effect (and (at ?r ?to) (occ ?to) (not (occ ?from)) (not (at ?r ?from)))))";
    let problem = "(define (problem p1) (:domain robots)
      (:objects r1 - robot loc1 loc2 loc3 - location)
      (:init (adj loc1 loc2) (adj loc2 loc1) (adj loc1 loc3) (adj loc3 loc1) (at r1 loc1) (occ loc2))
      (:goal (and (at r1 loc3))))";
    let problem = pddl::load_problem(domain, problem).unwrap();
    assert_eq!(plan_strings(&problem), Some(vec![String::from("move(r1,loc1,loc3)")]));
}

#[test]
fn blocked_robot_has_no_plan() {
    let problem = PlannerProblem::new(
        State::new(vec![
            Predicate::new("adj", ["loc1", "loc2"]),
            Predicate::new("at", ["r1", "loc1"]),
            Predicate::new("occ", ["loc2"]),
        ]),
        State::new(vec![Predicate::new("at", ["r1", "loc2"])]),
        vec![move_action()],
    );
    assert_eq!(plan_strings(&problem), None);
}
