use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Bound;

use super::action::GroundedAction;
use super::predicate::Predicate;
use super::Error;

/// Closed-world set of true atoms. Equality and hashing depend only on the
/// atoms, not on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct State {
    atoms: BTreeSet<Predicate>,
}

impl State {
    pub fn new<I: IntoIterator<Item = Predicate>>(atoms: I) -> Self {
        Self { atoms: atoms.into_iter().collect() }
    }

    /// Every atom of `goal` holds here.
    pub fn satisfies(&self, goal: &State) -> bool {
        goal.atoms.is_subset(&self.atoms)
    }

    #[inline]
    pub fn contains(&self, atom: &Predicate) -> bool {
        self.atoms.contains(atom)
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Predicate> {
        self.atoms.iter()
    }

    /// Atoms whose relation name is `name`, in canonical order.
    pub fn atoms_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Predicate> + 's {
        let lower = Predicate { name: name.into(), arguments: Vec::new() };
        self.atoms
            .range((Bound::Included(lower), Bound::Unbounded))
            .take_while(move |p| &*p.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Successor state: `(atoms - neg_effects) + pos_effects`.
    ///
    /// Preconditions are not checked here; only actions handed out by the
    /// grounding engine are known to be applicable.
    pub fn apply(&self, action: &GroundedAction) -> Result<State, Error> {
        let neg_effects = action.export_bindings(&action.action.neg_effects)?;
        let pos_effects = action.export_bindings(&action.action.pos_effects)?;
        let mut atoms = self.atoms.clone();
        for atom in &neg_effects {
            atoms.remove(atom);
        }
        atoms.extend(pos_effects);
        Ok(State { atoms })
    }
}

impl FromIterator<Predicate> for State {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", atom)?;
        }
        write!(f, "}}")
    }
}
