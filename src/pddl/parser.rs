use enumset::EnumSet;

use super::ast::{self, Stmt, Term, TypedList};
use super::lexer::Lexer;
use super::tokens::{Token, TokenKind, KeywordToken};
use super::{ParseError, Position};

/// Parses the STRIPS subset of PDDL: domains with types, constants,
/// predicates and actions, and problems with objects, init and goal.
pub struct Parser<'a> {
    lexer: std::iter::Peekable<Lexer<'a>>,
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Stmt<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lexer.peek()?;
        let r = self.root();
        if r.is_err() {
            // Nothing sensible follows a broken definition.
            self.lexer.by_ref().for_each(drop);
        }
        Some(r)
    }
}

const EXPECTED_IDENTIFIER: &str = "Expected identifier.";
const EXPECTED_COLON: &str = "Expected ':'.";
const EXPECTED_OPEN_PARENTHESIS: &str = "Expected '('.";
const EXPECTED_CLOSE_PARENTHESIS: &str = "Expected matched ')'.";

macro_rules! expect {
    ($input:expr, {$($p:pat => $b:expr$(,)?)+}, $err:expr) => {
        match $input {
            $($p => $b,)+
            Some(Ok(Token{span, kind})) => Err(ParseError::new(Position::Span(span), format!("{} Got '{}'.", $err, kind))),
            Some(Err(e)) => Err(e),
            None => Err(ParseError::new(Position::EOF, $err)),
        }
    };
}

impl<'a> Parser<'a> {
    pub fn new(code: &'a str) -> Self {
        let lexer = Lexer::<'a>::new(code).peekable();
        Self{lexer}
    }

    fn identifier(&mut self) -> Result<&'a str, ParseError> {
        use TokenKind::Identifier;
        expect!(self.lexer.next(), {Some(Ok(Token{kind: Identifier(s), ..})) => Ok(s)}, EXPECTED_IDENTIFIER)
    }

    fn open(&mut self) -> Result<(), ParseError> {
        expect!(self.lexer.next(), {Some(Ok(Token{kind: TokenKind::OpenParenthesis, ..})) => Ok(())}, EXPECTED_OPEN_PARENTHESIS)
    }

    fn close(&mut self) -> Result<(), ParseError> {
        expect!(self.lexer.next(), {Some(Ok(Token{kind: TokenKind::CloseParenthesis, ..})) => Ok(())}, EXPECTED_CLOSE_PARENTHESIS)
    }

    fn colon(&mut self) -> Result<(), ParseError> {
        expect!(self.lexer.next(), {Some(Ok(Token{kind: TokenKind::Colon, ..})) => Ok(())}, EXPECTED_COLON)
    }

    fn next_is(&mut self, kind: TokenKind<'a>) -> bool {
        self.lexer.next_if(|t| matches!(t, Ok(Token{kind: k, ..}) if *k == kind)).is_some()
    }

    fn peek_is_open(&mut self) -> bool {
        matches!(self.lexer.peek(), Some(Ok(Token{kind: TokenKind::OpenParenthesis, ..})))
    }

    fn problem(&mut self) -> Result<Stmt<'a>, ParseError> {
        use TokenKind::Keyword;
        use KeywordToken::*;
        let name = self.identifier()?;
        self.close()?;
        let mut domain = None;
        let mut requirements = EnumSet::empty();
        let mut objects = Vec::new();
        let mut init = None;
        let mut goal = None;
        while self.next_is(TokenKind::OpenParenthesis) {
            self.colon()?;
            expect!(self.lexer.next(), {
                Some(Ok(Token{kind: Keyword(Domain), ..})) => { domain = Some(self.identifier()?); Ok(()) },
                Some(Ok(Token{kind: Keyword(Requirements), ..})) => { requirements = self.requirements()?; Ok(()) },
                Some(Ok(Token{kind: Keyword(Objects), ..})) => { objects = self.typed_list(false)?; Ok(()) },
                Some(Ok(Token{kind: Keyword(Init), ..})) => { init = Some(self.and()?); Ok(()) }, // force it to use a vector of Expressions
                Some(Ok(Token{kind: Keyword(Goal), ..})) => { goal = Some(self.expr()?); Ok(()) },
            }, "Expected :domain, :requirements, :objects, :init or :goal.")?;
            self.close()?;
        }
        let missing = |section: &str| ParseError::new(Position::EOF, format!("Problem {} has no :{} section.", name, section));
        let domain = domain.ok_or_else(|| missing("domain"))?;
        let init = init.ok_or_else(|| missing("init"))?;
        let goal = goal.ok_or_else(|| missing("goal"))?;
        Ok(Stmt::Problem(ast::Problem{name, domain, requirements, objects, init, goal}))
    }

    fn literal(&mut self, name: &'a str) -> Result<ast::Expr<'a>, ParseError> {
        use TokenKind::{Identifier, QuestionMark};
        let mut terms = Vec::new();
        loop {
            match self.lexer.peek() {
                Some(Ok(Token{kind: QuestionMark, ..})) => {
                    self.lexer.next();
                    terms.push(Term::Variable(self.identifier()?));
                },
                Some(Ok(Token{kind: Identifier(s), ..})) => {
                    terms.push(Term::Name(*s));
                    self.lexer.next();
                },
                _ => break,
            }
        }
        Ok(ast::Expr::Literal{name, terms})
    }

    fn not(&mut self) -> Result<ast::Expr<'a>, ParseError> {
        Ok(ast::Expr::Not(Box::new(self.expr()?)))
    }

    fn and(&mut self) -> Result<ast::Expr<'a>, ParseError> {
        let mut group = Vec::new();
        while self.peek_is_open() {
            group.push(self.expr()?)
        }
        Ok(ast::Expr::And(group))
    }

    fn expr(&mut self) -> Result<ast::Expr<'a>, ParseError> {
        use TokenKind::{Keyword, Identifier};
        use KeywordToken::{And, Not};
        self.open()?;
        let result = expect!(self.lexer.next(), {
            Some(Ok(Token{kind: Keyword(And), ..})) => self.and(),
            Some(Ok(Token{kind: Keyword(Not), ..})) => self.not(),
            Some(Ok(Token{kind: Identifier(s), ..})) => self.literal(s),
        }, "Expected expression.")?;
        self.close()?;
        Ok(result)
    }

    fn action(&mut self) -> Result<ast::Action<'a>, ParseError> {
        use TokenKind::Keyword;
        use KeywordToken::{Parameters, Precondition, Effect};
        let name = self.identifier()?;
        let mut parameters = Vec::new();
        let mut precondition = None;
        let mut effect = None;
        while self.next_is(TokenKind::Colon) {
            expect!(self.lexer.next(), {
                Some(Ok(Token{kind: Keyword(Parameters), ..})) => {
                    self.open()?;
                    parameters = self.typed_list(true)?;
                    self.close()
                },
                Some(Ok(Token{kind: Keyword(Precondition), ..})) => { precondition = Some(self.expr()?); Ok(()) },
                Some(Ok(Token{kind: Keyword(Effect), ..})) => { effect = Some(self.expr()?); Ok(()) },
            }, "Expected :parameters, :precondition or :effect.")?;
        }
        Ok(ast::Action{name, parameters, precondition, effect})
    }

    fn predicates(&mut self) -> Result<Vec<ast::Predicate<'a>>, ParseError> {
        let mut predicates = Vec::new();
        while self.next_is(TokenKind::OpenParenthesis) {
            let name = self.identifier()?;
            let variables = self.typed_list(true)?;
            predicates.push(ast::Predicate{name, variables});
            self.close()?;
        }
        Ok(predicates)
    }

    /// `x y - kind z - other w`; trailing untyped entries are `object`.
    /// With `variables` set every entry must be written `?name`.
    fn typed_list(&mut self, variables: bool) -> Result<Vec<TypedList<'a>>, ParseError> {
        use TokenKind::{Identifier, QuestionMark};
        let mut result = Vec::new();
        let mut identifiers = Vec::new();
        loop {
            if variables {
                if !self.next_is(QuestionMark) {
                    break;
                }
                identifiers.push(self.identifier()?);
            } else {
                match self.lexer.next_if(|t| matches!(t, Ok(Token{kind: Identifier(_), ..}))) {
                    Some(Ok(Token{kind: Identifier(s), ..})) => identifiers.push(s),
                    _ => break,
                }
            }
            if self.next_is(TokenKind::Minus) {
                let kind = self.identifier()?;
                result.push(TypedList{identifiers: std::mem::take(&mut identifiers), kind});
            }
        }
        if !identifiers.is_empty() {
            result.push(TypedList{identifiers, kind: "object"});
        }
        Ok(result)
    }

    fn requirements(&mut self) -> Result<EnumSet<ast::Requirements>, ParseError> {
        use TokenKind::Identifier;
        let mut r = EnumSet::empty();
        while self.next_is(TokenKind::Colon) {
            expect!(self.lexer.next(), {
                Some(Ok(Token{kind: Identifier(s), span})) => match ast::Requirements::from_name(s) {
                    Some(req) => { r.insert(req); Ok(()) },
                    None => Err(ParseError::new(Position::Span(span), format!("Unknown requirement :{}.", s))),
                },
            }, "Expected requirements.")?;
        }
        Ok(r)
    }

    fn domain(&mut self) -> Result<Stmt<'a>, ParseError> {
        use TokenKind::Keyword;
        use KeywordToken::*;
        let name = self.identifier()?;
        self.close()?;
        let mut requirements = EnumSet::empty();
        let mut types = Vec::new();
        let mut constants = Vec::new();
        let mut predicates = Vec::new();
        let mut actions = Vec::new();
        while self.next_is(TokenKind::OpenParenthesis) {
            self.colon()?;
            expect!(self.lexer.next(), {
                Some(Ok(Token{kind: Keyword(Requirements), ..})) => { requirements = self.requirements()?; Ok(()) },
                Some(Ok(Token{kind: Keyword(Types), ..})) => { types = self.typed_list(false)?; Ok(()) },
                Some(Ok(Token{kind: Keyword(Constants), ..})) => { constants = self.typed_list(false)?; Ok(()) },
                Some(Ok(Token{kind: Keyword(Predicates), ..})) => { predicates = self.predicates()?; Ok(()) },
                Some(Ok(Token{kind: Keyword(Action), ..})) => { actions.push(self.action()?); Ok(()) },
            }, "Expected :requirements, :types, :constants, :predicates, or :action.")?;
            self.close()?;
        }
        Ok(Stmt::Domain(ast::Domain{name, requirements, types, constants, predicates, actions}))
    }

    fn root(&mut self) -> Result<Stmt<'a>, ParseError> {
        use KeywordToken::*;
        use TokenKind::Keyword;

        self.open()?;
        expect!(self.lexer.next(), {Some(Ok(Token{kind: Keyword(Define), ..})) => Ok(())}, "Expected 'define'.")?;
        self.open()?;
        let body = expect!(self.lexer.next(), {
            Some(Ok(Token{kind: Keyword(Domain), ..})) => self.domain(),
            Some(Ok(Token{kind: Keyword(Problem), ..})) => self.problem(),
        }, "Expected 'domain' or 'problem'.")?;
        self.close()?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use enumset::{EnumSet, enum_set};

    use super::Parser;
    use crate::pddl::ast::{Stmt, Domain, Problem, Requirements, TypedList, Predicate, Action, Expr, Term};
    use crate::pddl::tokens::Span;
    use crate::pddl::Position;

    #[test]
    fn test_domain() {
        let code = "(define (domain test) (:requirements :strips :typing) (:types hand - object water - beverage) (:predicates (warm ?o - object)) (:action test :parameters (?h - hand ?b - beverage) :precondition (cold ?h) :effect (warm ?b)))";
        let mut parser = Parser::new(code);
        assert_eq!(parser.next(), Some(Ok(Stmt::Domain(Domain{
            name: "test",
            requirements: enum_set!(Requirements::Strips | Requirements::Typing),
            types: vec![TypedList{identifiers: vec!["hand"], kind: "object"},
                        TypedList{identifiers: vec!["water"], kind: "beverage"}],
            constants: vec![],
            predicates: vec![Predicate{name: "warm", variables: vec![TypedList{identifiers: vec!["o"], kind: "object"}]}],
            actions: vec![Action{
                name: "test",
                parameters: vec![TypedList{identifiers: vec!["h"], kind: "hand"}, TypedList{identifiers: vec!["b"], kind: "beverage"}],
                precondition: Some(Expr::Literal{name: "cold", terms: vec![Term::Variable("h")]}),
                effect: Some(Expr::Literal{name: "warm", terms: vec![Term::Variable("b")]})
            }]
        }))));
        assert_eq!(parser.next(), None);
    }

    #[test]
    fn test_untyped_action() {
        let code = "(define (domain move) (:predicates (adj ?a ?b)) (:action move :parameters (?r ?from ?to) :precondition (and (adj ?from ?to) (not (occ ?to))) :effect (and (at ?r ?to) (not (at ?r ?from)))))";
        let domain = Parser::new(code).next().unwrap().unwrap().into_domain().unwrap();
        assert_eq!(domain.predicates, vec![Predicate{name: "adj", variables: vec![TypedList{identifiers: vec!["a", "b"], kind: "object"}]}]);
        let action = &domain.actions[0];
        assert_eq!(action.parameters, vec![TypedList{identifiers: vec!["r", "from", "to"], kind: "object"}]);
        assert_eq!(action.precondition, Some(Expr::And(vec![
            Expr::Literal{name: "adj", terms: vec![Term::Variable("from"), Term::Variable("to")]},
            Expr::Not(Box::new(Expr::Literal{name: "occ", terms: vec![Term::Variable("to")]})),
        ])));
    }

    #[test]
    fn test_problem() {
        let code = "(define (problem test) (:domain barman) (:objects shaker1 - shaker glass1 glass2) (:init (ontable shaker1)) (:goal (and (contains shot1 cocktail1))))";
        let mut parser = Parser::new(code);
        assert_eq!(parser.next(), Some(Ok(Stmt::Problem(Problem{
            name: "test",
            domain: "barman",
            requirements: EnumSet::empty(),
            objects: vec![TypedList{identifiers: vec!["shaker1"], kind: "shaker"},
                          TypedList{identifiers: vec!["glass1", "glass2"], kind: "object"}],
            init: Expr::And(vec![Expr::Literal{name: "ontable", terms: vec![Term::Name("shaker1")]}]),
            goal: Expr::And(vec![Expr::Literal{name: "contains", terms: vec![Term::Name("shot1"), Term::Name("cocktail1")]}])
        }))))
    }

    #[test]
    fn test_missing_parenthesis() {
        let code = "(define (domain test) (:predicates (warm ?o)";
        let err = Parser::new(code).next().unwrap().unwrap_err();
        assert_eq!(err.pos, Position::EOF);
    }

    #[test]
    fn test_unknown_requirement() {
        let code = "(define (domain test) (:requirements :teleportation))";
        let err = Parser::new(code).next().unwrap().unwrap_err();
        assert_eq!(err.pos, Position::Span(Span::new(1, 39, 13)));
    }

    #[test]
    fn test_problem_without_goal() {
        let code = "(define (problem p) (:domain d) (:init (at a)))";
        let err = Parser::new(code).next().unwrap().unwrap_err();
        assert!(err.message.contains(":goal"));
    }
}
