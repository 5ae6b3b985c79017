use std::fmt;
use std::rc::Rc;

use super::Error;

/// Name of a concrete object of the planning domain.
pub type Constant = Rc<str>;
/// Name of an action parameter, scoped to the owning schema.
pub type Variable = Rc<str>;

/// A ground atom: relation name plus constant arguments.
///
/// Ordering is by name first, so a [`super::State`] keeps atoms of one
/// relation next to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate {
    pub name: Rc<str>,
    pub arguments: Vec<Constant>,
}

impl Predicate {
    pub fn new<N, I, C>(name: N, arguments: I) -> Self
    where
        N: Into<Rc<str>>,
        I: IntoIterator<Item = C>,
        C: Into<Constant>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

/// An atom template over schema variables. Never true or false by itself.
///
/// A variable may repeat, which constrains the matching constants to be
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnboundPredicate {
    pub name: Rc<str>,
    pub variables: Vec<Variable>,
}

impl UnboundPredicate {
    pub fn new<N, I, V>(name: N, variables: I) -> Self
    where
        N: Into<Rc<str>>,
        I: IntoIterator<Item = V>,
        V: Into<Variable>,
    {
        Self {
            name: name.into(),
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    /// Builds the ground atom with `constants` placed positionally.
    pub fn instantiate(&self, constants: &[Constant]) -> Result<Predicate, Error> {
        if constants.len() != self.variables.len() {
            return Err(Error::ArityMismatch {
                predicate: self.name.to_string(),
                expected: self.variables.len(),
                found: constants.len(),
            });
        }
        Ok(Predicate {
            name: self.name.clone(),
            arguments: constants.to_vec(),
        })
    }
}

fn write_atom<T: fmt::Display>(f: &mut fmt::Formatter, name: &str, args: &[T]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_atom(f, &self.name, &self.arguments)
    }
}

impl fmt::Display for UnboundPredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let vars: Vec<String> = self.variables.iter().map(|v| format!("?{}", v)).collect();
        write_atom(f, &self.name, &vars)
    }
}
