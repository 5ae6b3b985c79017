//! Enumerates the groundings of an action schema that are applicable in a
//! state.
//!
//! Positive preconditions are unified one at a time against the atoms of the
//! same relation. Each partial binding lives on an explicit stack together
//! with the index of the next precondition to unify, so branching never
//! copies more than the binding it extends. A branch whose binding conflicts
//! with an atom is dropped on the spot.

use tracing::trace;

use super::action::{Action, GroundedAction};
use super::state::State;
use super::Error;

/// Every valid grounding of `action` whose positive preconditions hold in
/// `state` and whose negative preconditions do not.
///
/// Parameters that occur in no positive precondition can never be bound, so
/// such a schema yields nothing.
pub fn ground_action<'a>(action: &'a Action, state: &State) -> Result<Vec<GroundedAction<'a>>, Error> {
    let mut result = Vec::new();
    let mut stack = vec![(0usize, GroundedAction::new(action))];

    while let Some((next, binding)) = stack.pop() {
        if let Some(template) = action.pos_preconditions.get(next) {
            let extended: Vec<_> = state
                .atoms_named(&template.name)
                .filter_map(|atom| binding.add_binding(atom, template))
                .collect();
            // Pushed in reverse so branches are explored in state order.
            stack.extend(extended.into_iter().rev().map(|g| (next + 1, g)));
            continue;
        }

        if !binding.is_valid() {
            trace!(action = %action.name, binding = %binding, "incomplete binding discarded");
            continue;
        }
        let neg_preconditions = binding.export_bindings(&action.neg_preconditions)?;
        if let Some(atom) = neg_preconditions.iter().find(|atom| state.contains(atom)) {
            trace!(action = %binding, blocked_by = %atom, "negative precondition holds");
            continue;
        }
        trace!(action = %binding, "applicable");
        result.push(binding);
    }
    Ok(result)
}

/// Groundings of every schema in `actions`, schema by schema.
pub fn ground_actions<'a>(actions: &'a [Action], state: &State) -> Result<Vec<GroundedAction<'a>>, Error> {
    let mut result = Vec::new();
    for action in actions {
        result.extend(ground_action(action, state)?);
    }
    Ok(result)
}
