//! Reader for the STRIPS subset of PDDL.
//!
//! Supports `:strips`, `:typing` and `:negative-preconditions`. Anything
//! else is parsed where the grammar allows it and rejected when the problem
//! is lowered into a [`PlannerProblem`].

pub mod tokens;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod lower;

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::strips::PlannerProblem;
use parser::Parser;
use tokens::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Span(Span),
    EOF,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Span(span) => write!(f, "line:{} col:{}", span.line, span.col),
            Position::EOF => write!(f, "end of file"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{pos} {message}")]
pub struct ParseError {
    pub pos: Position,
    pub message: String,
}

impl ParseError {
    pub fn new(pos: Position, message: impl Into<String>) -> Self {
        Self { pos, message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("expected a {expected} definition")]
    UnexpectedStatement { expected: &'static str },

    #[error("unsupported {0}")]
    Unsupported(String),

    #[error("unknown type {0}")]
    UnknownType(String),

    #[error("action {action} uses constant {constant}; only parameters may appear in a schema")]
    ConstantInSchema { action: String, constant: String },

    #[error("action {action} uses undeclared variable ?{variable}")]
    UndeclaredVariable { action: String, variable: String },

    #[error("{context} contains variable ?{variable}")]
    VariableInGroundAtom { context: String, variable: String },

    #[error("{context}: predicate {predicate} expects {expected} arguments, got {found}")]
    ArityMismatch {
        context: String,
        predicate: String,
        expected: usize,
        found: usize,
    },

    #[error("{context} contains negative literal {literal}")]
    NegativeLiteral { context: String, literal: String },

    #[error("problem is defined for domain {found}, loaded domain is {expected}")]
    DomainMismatch { expected: String, found: String },

    #[error("In file included from {path}:\n{source}")]
    FromFile {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parses the first definition in `code`, which must be a domain.
pub fn parse_domain(code: &str) -> Result<ast::Domain<'_>, Error> {
    match Parser::new(code).next() {
        Some(stmt) => stmt?.into_domain().ok_or(Error::UnexpectedStatement { expected: "domain" }),
        None => Err(Error::UnexpectedStatement { expected: "domain" }),
    }
}

/// Parses the first definition in `code`, which must be a problem.
pub fn parse_problem(code: &str) -> Result<ast::Problem<'_>, Error> {
    match Parser::new(code).next() {
        Some(stmt) => stmt?.into_problem().ok_or(Error::UnexpectedStatement { expected: "problem" }),
        None => Err(Error::UnexpectedStatement { expected: "problem" }),
    }
}

/// Builds a planning task from domain and problem source text.
pub fn load_problem(domain_code: &str, problem_code: &str) -> Result<PlannerProblem, Error> {
    let domain = parse_domain(domain_code)?;
    let problem = parse_problem(problem_code)?;
    lower::lower(&domain, &problem)
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io { path: path.display().to_string(), source })
}

/// Builds a planning task from a domain file and a problem file.
pub fn load_files(domain_path: impl AsRef<Path>, problem_path: impl AsRef<Path>) -> Result<PlannerProblem, Error> {
    let domain_path = domain_path.as_ref();
    let problem_path = problem_path.as_ref();
    let domain_code = read(domain_path)?;
    let problem_code = read(problem_path)?;
    let in_file = |path: &Path| {
        let path = path.display().to_string();
        move |e: Error| Error::FromFile { path, source: Box::new(e) }
    };
    let domain = parse_domain(&domain_code).map_err(in_file(domain_path))?;
    let problem = parse_problem(&problem_code).map_err(in_file(problem_path))?;
    lower::lower(&domain, &problem).map_err(in_file(problem_path))
}
