//! Turns parsed PDDL into a [`PlannerProblem`].
//!
//! Typing is compiled away into static unary atoms: every object gets one
//! atom per type it belongs to (its declared type, each ancestor, and
//! `object`), and typed parameters gain a positive precondition on their
//! type. Untyped parameters only gain `object(?x)` when no other positive
//! precondition mentions them, so the grounding engine can still bind them.
//!
//! Every literal of a relation declared in `:predicates` must match the
//! declared arity.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use enumset::{enum_set, EnumSet};
use tracing::debug;

use super::ast::{self, Expr, Requirements, Term, TypedList};
use super::Error;
use crate::strips::{Action, Constant, PlannerProblem, Predicate, State, UnboundPredicate, Variable};

const ROOT_TYPE: &str = "object";

fn supported_requirements() -> EnumSet<Requirements> {
    enum_set!(Requirements::Strips | Requirements::Typing | Requirements::NegativePreconditions)
}

fn check_requirements(requirements: EnumSet<Requirements>) -> Result<(), Error> {
    match (requirements - supported_requirements()).iter().next() {
        Some(r) => Err(Error::Unsupported(format!("requirement :{}", r.name()))),
        None => Ok(()),
    }
}

/// Type name to parent type name, from the domain's `:types`.
struct TypeHierarchy<'a> {
    parents: HashMap<&'a str, &'a str>,
}

impl<'a> TypeHierarchy<'a> {
    fn new(types: &[TypedList<'a>]) -> Self {
        let mut parents = HashMap::new();
        for TypedList { identifiers, kind } in types {
            for identifier in identifiers {
                if *identifier != ROOT_TYPE {
                    parents.insert(*identifier, *kind);
                }
            }
        }
        Self { parents }
    }

    fn is_known(&self, kind: &str) -> bool {
        kind == ROOT_TYPE
            || self.parents.contains_key(kind)
            || self.parents.values().any(|parent| *parent == kind)
    }

    /// `kind` followed by its ancestors, always ending with `object`.
    fn ancestors(&self, kind: &'a str) -> Result<Vec<&'a str>, Error> {
        if !self.is_known(kind) {
            return Err(Error::UnknownType(kind.to_string()));
        }
        let mut result = vec![kind];
        let mut current = kind;
        while let Some(parent) = self.parents.get(current) {
            if result.contains(parent) {
                break;
            }
            result.push(*parent);
            current = *parent;
        }
        if !result.contains(&ROOT_TYPE) {
            result.push(ROOT_TYPE);
        }
        Ok(result)
    }
}

/// Declared arity of every predicate in the domain's `:predicates`.
///
/// Relations the domain does not declare are not checked.
struct Signatures<'a> {
    arities: HashMap<&'a str, usize>,
}

impl<'a> Signatures<'a> {
    fn new(predicates: &[ast::Predicate<'a>]) -> Self {
        let arities = predicates.iter()
            .map(|p| (p.name, p.variables.iter().map(|list| list.identifiers.len()).sum::<usize>()))
            .collect();
        Self { arities }
    }

    fn check(&self, context: &str, name: &str, found: usize) -> Result<(), Error> {
        match self.arities.get(name) {
            Some(&expected) if expected != found => Err(Error::ArityMismatch {
                context: context.to_string(),
                predicate: name.to_string(),
                expected,
                found,
            }),
            _ => Ok(()),
        }
    }
}

fn ground_literal(context: &str, signatures: &Signatures, name: &str, terms: &[Term]) -> Result<Predicate, Error> {
    signatures.check(context, name, terms.len())?;
    let arguments = terms.iter().map(|term| match term {
        Term::Name(s) => Ok(Constant::from(*s)),
        Term::Variable(v) => Err(Error::VariableInGroundAtom {
            context: context.to_string(),
            variable: v.to_string(),
        }),
    }).collect::<Result<Vec<_>, _>>()?;
    Ok(Predicate::new(name, arguments))
}

/// Flattens a conjunction of positive atoms; negation is rejected.
fn ground_conjunction(context: &str, signatures: &Signatures, expr: &Expr, out: &mut Vec<Predicate>) -> Result<(), Error> {
    match expr {
        Expr::And(group) => group.iter().try_for_each(|e| ground_conjunction(context, signatures, e, out)),
        Expr::Literal { name, terms } => {
            out.push(ground_literal(context, signatures, name, terms)?);
            Ok(())
        },
        Expr::Not(inner) => Err(Error::NegativeLiteral {
            context: context.to_string(),
            literal: inner.to_string(),
        }),
    }
}

/// Positive and negative templates of one precondition or effect.
#[derive(Default)]
struct Literals {
    positive: Vec<UnboundPredicate>,
    negative: Vec<UnboundPredicate>,
}

struct SchemaLowering<'s> {
    action: &'s str,
    params: &'s HashMap<&'s str, Variable>,
    signatures: &'s Signatures<'s>,
}

impl<'s> SchemaLowering<'s> {
    fn template(&self, name: &str, terms: &[Term]) -> Result<UnboundPredicate, Error> {
        self.signatures.check(&format!("action {}", self.action), name, terms.len())?;
        let variables = terms.iter().map(|term| match term {
            Term::Variable(v) => self.params.get(v).cloned().ok_or_else(|| Error::UndeclaredVariable {
                action: self.action.to_string(),
                variable: v.to_string(),
            }),
            Term::Name(c) => Err(Error::ConstantInSchema {
                action: self.action.to_string(),
                constant: c.to_string(),
            }),
        }).collect::<Result<Vec<_>, _>>()?;
        Ok(UnboundPredicate::new(name, variables))
    }

    fn collect(&self, expr: &Expr, out: &mut Literals) -> Result<(), Error> {
        match expr {
            Expr::And(group) => group.iter().try_for_each(|e| self.collect(e, out)),
            Expr::Literal { name, terms } => {
                out.positive.push(self.template(name, terms)?);
                Ok(())
            },
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Literal { name, terms } => {
                    out.negative.push(self.template(name, terms)?);
                    Ok(())
                },
                other => Err(Error::Unsupported(format!("nested expression not({}) in action {}", other, self.action))),
            },
        }
    }
}

fn lower_action<'a>(
    action: &ast::Action<'a>,
    hierarchy: &TypeHierarchy<'a>,
    signatures: &Signatures<'a>,
    negative_preconditions: bool,
) -> Result<Action, Error> {
    let mut typed_params = Vec::new();
    for TypedList { identifiers, kind } in &action.parameters {
        hierarchy.ancestors(*kind)?;
        for identifier in identifiers {
            typed_params.push((Variable::from(*identifier), *kind));
        }
    }
    let params: HashMap<&str, Variable> = action.parameters.iter()
        .flat_map(|list| list.identifiers.iter())
        .map(|identifier| (*identifier, Variable::from(*identifier)))
        .collect();
    let lowering = SchemaLowering { action: action.name, params: &params, signatures };

    let mut precondition = Literals::default();
    if let Some(expr) = &action.precondition {
        lowering.collect(expr, &mut precondition)?;
    }
    if !precondition.negative.is_empty() && !negative_preconditions {
        return Err(Error::Unsupported(format!(
            "negative precondition in action {} without :negative-preconditions", action.name
        )));
    }
    let mut effect = Literals::default();
    if let Some(expr) = &action.effect {
        lowering.collect(expr, &mut effect)?;
    }

    let bound_by_precondition: HashSet<Variable> = precondition.positive.iter()
        .flat_map(|p| p.variables.iter().cloned())
        .collect();
    for (param, kind) in &typed_params {
        if *kind != ROOT_TYPE || !bound_by_precondition.contains(param) {
            precondition.positive.push(UnboundPredicate::new(*kind, vec![param.clone()]));
        }
    }

    Ok(Action {
        name: Rc::from(action.name),
        params: typed_params.into_iter().map(|(param, _)| param).collect(),
        pos_preconditions: precondition.positive,
        neg_preconditions: precondition.negative,
        pos_effects: effect.positive,
        neg_effects: effect.negative,
    })
}

/// Builds the planning task of `problem` over `domain`.
pub fn lower<'a>(domain: &ast::Domain<'a>, problem: &ast::Problem<'a>) -> Result<PlannerProblem, Error> {
    if !problem.domain.eq_ignore_ascii_case(domain.name) {
        return Err(Error::DomainMismatch {
            expected: domain.name.to_string(),
            found: problem.domain.to_string(),
        });
    }
    let requirements = domain.requirements | problem.requirements;
    check_requirements(requirements)?;
    let hierarchy = TypeHierarchy::new(&domain.types);
    let signatures = Signatures::new(&domain.predicates);

    let mut init = Vec::new();
    for TypedList { identifiers, kind } in domain.constants.iter().chain(problem.objects.iter()) {
        for type_name in hierarchy.ancestors(*kind)? {
            for identifier in identifiers {
                init.push(Predicate::new(type_name, [*identifier]));
            }
        }
    }
    ground_conjunction("init", &signatures, &problem.init, &mut init)?;

    let mut goal = Vec::new();
    ground_conjunction("goal", &signatures, &problem.goal, &mut goal)?;

    let negative_preconditions = requirements.contains(Requirements::NegativePreconditions);
    let actions = domain.actions.iter()
        .map(|action| lower_action(action, &hierarchy, &signatures, negative_preconditions))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(domain = domain.name, problem = problem.name, init = init.len(), goal = goal.len(), actions = actions.len(), "lowered problem");
    Ok(PlannerProblem::new(State::new(init), State::new(goal), actions))
}
