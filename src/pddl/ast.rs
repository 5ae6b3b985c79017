use std::fmt;

use enumset::{EnumSet, EnumSetType};

#[derive(PartialEq, Debug)]
pub enum Stmt<'a> {
    Domain(Domain<'a>),
    Problem(Problem<'a>)
}

impl<'a> Stmt<'a> {
    pub fn into_domain(self) -> Option<Domain<'a>> {
        match self {
            Stmt::Domain(d) => Some(d),
            Stmt::Problem(_) => None,
        }
    }

    pub fn into_problem(self) -> Option<Problem<'a>> {
        match self {
            Stmt::Problem(p) => Some(p),
            Stmt::Domain(_) => None,
        }
    }
}

#[derive(PartialEq, Debug)]
pub struct Problem<'a> {
    pub name: &'a str,
    pub domain: &'a str,
    pub requirements: EnumSet<Requirements>,
    pub objects: Vec<TypedList<'a>>,
    pub init: Expr<'a>,
    pub goal: Expr<'a>,
}

#[derive(PartialEq, Debug)]
pub struct Domain<'a> {
    pub name: &'a str,
    pub requirements: EnumSet<Requirements>,
    pub types: Vec<TypedList<'a>>,
    pub constants: Vec<TypedList<'a>>,
    pub predicates: Vec<Predicate<'a>>,
    pub actions: Vec<Action<'a>>,
}

#[derive(EnumSetType, Debug)]
pub enum Requirements {
    Strips,
    Typing,
    NegativePreconditions,
    DisjunctivePreconditions,
    Equality,
    ExistentialPreconditions,
    UniversalPreconditions,
    QuantifiedPreconditions,
    ConditionalEffects,
    Fluents,
    ADL,
    ActionCosts,
    DurativeActions,
    DerivedPredicates,
    TimedInitialLiterals,
    Preferences,
    Constraints
}

impl Requirements {
    pub fn from_name(name: &str) -> Option<Self> {
        use Requirements::*;
        match name.to_ascii_lowercase().as_str() {
            "strips" => Some(Strips),
            "typing" => Some(Typing),
            "negative-preconditions" => Some(NegativePreconditions),
            "disjunctive-preconditions" => Some(DisjunctivePreconditions),
            "equality" => Some(Equality),
            "existential-preconditions" => Some(ExistentialPreconditions),
            "universal-preconditions" => Some(UniversalPreconditions),
            "quantified-preconditions" => Some(QuantifiedPreconditions),
            "conditional-effects" => Some(ConditionalEffects),
            "fluents" => Some(Fluents),
            "adl" => Some(ADL),
            "action-costs" => Some(ActionCosts),
            "durative-actions" => Some(DurativeActions),
            "derived-predicates" => Some(DerivedPredicates),
            "timed-initial-literals" => Some(TimedInitialLiterals),
            "preferences" => Some(Preferences),
            "constraints" => Some(Constraints),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        use Requirements::*;
        match self {
            Strips => "strips",
            Typing => "typing",
            NegativePreconditions => "negative-preconditions",
            DisjunctivePreconditions => "disjunctive-preconditions",
            Equality => "equality",
            ExistentialPreconditions => "existential-preconditions",
            UniversalPreconditions => "universal-preconditions",
            QuantifiedPreconditions => "quantified-preconditions",
            ConditionalEffects => "conditional-effects",
            Fluents => "fluents",
            ADL => "adl",
            ActionCosts => "action-costs",
            DurativeActions => "durative-actions",
            DerivedPredicates => "derived-predicates",
            TimedInitialLiterals => "timed-initial-literals",
            Preferences => "preferences",
            Constraints => "constraints",
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Term<'a> {
    Variable(&'a str),
    Name(&'a str),
}

#[derive(PartialEq, Debug)]
pub enum Expr<'a> {
    And(Vec<Expr<'a>>),
    Not(Box<Expr<'a>>),
    Literal{name: &'a str, terms: Vec<Term<'a>>}
}

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "?{}", v),
            Term::Name(s) => write!(f, "{}", s),
        }
    }
}

/// Same `name(a,b)` shape as [`crate::strips::Predicate`].
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::And(group) => {
                let parts: Vec<String> = group.iter().map(|e| e.to_string()).collect();
                write!(f, "and({})", parts.join(","))
            },
            Expr::Not(inner) => write!(f, "not({})", inner),
            Expr::Literal{name, terms} => {
                let args: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
                write!(f, "{}({})", name, args.join(","))
            },
        }
    }
}

#[derive(PartialEq, Debug)]
pub struct Action<'a> {
    pub name: &'a str,
    pub parameters: Vec<TypedList<'a>>,
    pub precondition: Option<Expr<'a>>,
    pub effect: Option<Expr<'a>>
}

#[derive(PartialEq, Debug)]
pub struct Predicate<'a> {
    pub name: &'a str,
    pub variables: Vec<TypedList<'a>>
}

/// `a b - kind`. Untyped entries get the kind `object`.
#[derive(PartialEq, Debug)]
pub struct TypedList<'a> {
    pub identifiers: Vec<&'a str>,
    pub kind: &'a str,
}
