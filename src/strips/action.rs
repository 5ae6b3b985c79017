use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::predicate::{Constant, Predicate, UnboundPredicate, Variable};
use super::Error;

/// Variable to constant assignment of a grounded action.
pub type Bindings = BTreeMap<Variable, Constant>;

/// Parameterized operator schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub name: Rc<str>,
    pub params: Vec<Variable>,
    pub pos_preconditions: Vec<UnboundPredicate>,
    pub neg_preconditions: Vec<UnboundPredicate>,
    pub pos_effects: Vec<UnboundPredicate>,
    pub neg_effects: Vec<UnboundPredicate>,
}

impl Action {
    pub fn new<N, I, V>(name: N, params: I) -> Self
    where
        N: Into<Rc<str>>,
        I: IntoIterator<Item = V>,
        V: Into<Variable>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            pos_preconditions: Vec::new(),
            neg_preconditions: Vec::new(),
            pos_effects: Vec::new(),
            neg_effects: Vec::new(),
        }
    }

    pub fn with_pos_precondition(mut self, p: UnboundPredicate) -> Self {
        self.pos_preconditions.push(p);
        self
    }

    pub fn with_neg_precondition(mut self, p: UnboundPredicate) -> Self {
        self.neg_preconditions.push(p);
        self
    }

    pub fn with_pos_effect(mut self, p: UnboundPredicate) -> Self {
        self.pos_effects.push(p);
        self
    }

    pub fn with_neg_effect(mut self, p: UnboundPredicate) -> Self {
        self.neg_effects.push(p);
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params = self.params.iter().map(|p| format!("?{}", p)).collect::<Vec<_>>().join(" ");
        write!(f, "(:action {} :parameters ({}))", self.name, params)
    }
}

/// A schema together with a (possibly partial) binding of its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroundedAction<'a> {
    pub action: &'a Action,
    pub bindings: Bindings,
}

impl<'a> GroundedAction<'a> {
    pub fn new(action: &'a Action) -> Self {
        Self { action, bindings: Bindings::new() }
    }

    pub fn with_bindings(action: &'a Action, bindings: Bindings) -> Self {
        Self { action, bindings }
    }

    /// True when the bound variables are exactly the schema parameters.
    pub fn is_valid(&self) -> bool {
        self.bindings.len() == self.action.params.len()
            && self.action.params.iter().all(|p| self.bindings.contains_key(p))
    }

    fn missing_params(&self) -> Vec<String> {
        self.action.params.iter()
            .filter(|p| !self.bindings.contains_key(*p))
            .map(|p| p.to_string())
            .collect()
    }

    /// Grounds every template in `to_modify` through the current binding.
    pub fn export_bindings(&self, to_modify: &[UnboundPredicate]) -> Result<Vec<Predicate>, Error> {
        if !self.is_valid() {
            return Err(Error::IncompleteBinding {
                action: self.action.name.to_string(),
                missing: self.missing_params(),
            });
        }
        to_modify.iter().map(|template| {
            let constants = template.variables.iter()
                .map(|var| self.bindings.get(var).cloned().ok_or_else(|| Error::IncompleteBinding {
                    action: self.action.name.to_string(),
                    missing: vec![var.to_string()],
                }))
                .collect::<Result<Vec<_>, _>>()?;
            template.instantiate(&constants)
        }).collect()
    }

    /// Tries to unify `matching` against the true atom `truth`, extending the
    /// current binding. Returns `None` when a variable is already bound to a
    /// different constant or the shapes cannot line up.
    pub fn add_binding(&self, truth: &Predicate, matching: &UnboundPredicate) -> Option<GroundedAction<'a>> {
        if truth.name != matching.name || truth.arity() != matching.arity() {
            return None;
        }
        let mut bindings = self.bindings.clone();
        for (constant, var) in truth.arguments.iter().zip(matching.variables.iter()) {
            match bindings.get(var) {
                Some(bound) if bound != constant => return None,
                Some(_) => (),
                None => { bindings.insert(var.clone(), constant.clone()); },
            }
        }
        Some(GroundedAction { action: self.action, bindings })
    }
}

impl fmt::Display for GroundedAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.action.name)?;
        for (i, p) in self.action.params.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match self.bindings.get(p) {
                Some(c) => write!(f, "{}", c)?,
                None => write!(f, "?{}", p)?,
            }
        }
        write!(f, ")")
    }
}
