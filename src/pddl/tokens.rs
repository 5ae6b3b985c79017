use std::fmt;

/// Source location of a token. Lines and columns start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
    pub len: usize,
}

impl Span {
    pub fn new(line: usize, col: usize, len: usize) -> Self {
        Self { line, col, len }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeywordToken {
    Define,
    Domain,
    Problem,
    Requirements,
    Types,
    Constants,
    Predicates,
    Action,
    Parameters,
    Precondition,
    Effect,
    Objects,
    Init,
    Goal,
    And,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    OpenParenthesis,
    CloseParenthesis,
    Colon,
    QuestionMark,
    Minus,
    Keyword(KeywordToken),
    Identifier(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub span: Span,
    pub kind: TokenKind<'a>,
}

impl fmt::Display for KeywordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use KeywordToken::*;
        let s = match self {
            Define => "define",
            Domain => "domain",
            Problem => "problem",
            Requirements => "requirements",
            Types => "types",
            Constants => "constants",
            Predicates => "predicates",
            Action => "action",
            Parameters => "parameters",
            Precondition => "precondition",
            Effect => "effect",
            Objects => "objects",
            Init => "init",
            Goal => "goal",
            And => "and",
            Not => "not",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self {
            OpenParenthesis => write!(f, "("),
            CloseParenthesis => write!(f, ")"),
            Colon => write!(f, ":"),
            QuestionMark => write!(f, "?"),
            Minus => write!(f, "-"),
            Keyword(k) => write!(f, "{}", k),
            Identifier(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
