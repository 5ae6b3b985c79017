use std::iter::Peekable;
use std::str::CharIndices;

use super::tokens::{Token, Span, TokenKind, KeywordToken};
use super::{ParseError, Position};
use TokenKind::*;

pub struct Lexer<'a> {
    text: &'a str,
    it: Peekable<CharIndices<'a>>,
    line: usize, // current source line, used for error reporting by Tokens
    col: usize, // current source column, used for error reporting by Tokens
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            it: text.char_indices().peekable(),
            line: 1,
            col: 1,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (offset, c) = self.next_char()?;
            let token = match c {
                '(' => Ok(Token{span: Span::new(self.line, self.col, 1), kind: OpenParenthesis}),
                ')' => Ok(Token{span: Span::new(self.line, self.col, 1), kind: CloseParenthesis}),
                ':' => Ok(Token{span: Span::new(self.line, self.col, 1), kind: Colon}),
                '?' => Ok(Token{span: Span::new(self.line, self.col, 1), kind: QuestionMark}),
                '-' => Ok(Token{span: Span::new(self.line, self.col, 1), kind: Minus}),
                c if c.is_whitespace() => {
                    self.col += 1;
                    continue;
                }
                c if c.is_alphabetic() || c == '_' => Ok(self.identifier(offset)),
                _ => Err(ParseError::new(Position::Span(Span::new(self.line, self.col, 1)), format!("Unexpected character {:?}.", c))),
            };
            match &token {
                Ok(t) => self.col += t.span.len,
                Err(_) => self.col += 1,
            }
            return Some(token);
        }
    }
}

impl<'a> Lexer<'a> {
    fn next_char(&mut self) -> Option<(usize, char)> {
        loop {
            match self.it.next() {
                // Newline handler:
                Some((_, '\n')) => { self.col = 1; self.line += 1; },

                // Comments:
                Some((_, ';')) => while self.it.next_if(|(_, c)| *c != '\n').is_some() {},
                c => return c,
            }
        }
    }

    fn identifier(&mut self, offset: usize) -> Token<'a> {
        let mut len = 1;
        while self.it.next_if(|(_, c)| c.is_alphanumeric() || *c == '_' || *c == '-').is_some() { len += 1; }
        let slice = match self.it.peek() {
            Some((identifier_end, _)) => &self.text[offset..*identifier_end],
            None => &self.text[offset..],
        };
        let keyword = match slice.to_ascii_lowercase().as_str() {
            "define" => Some(KeywordToken::Define),
            "domain" => Some(KeywordToken::Domain),
            "problem" => Some(KeywordToken::Problem),
            "requirements" => Some(KeywordToken::Requirements),
            "types" => Some(KeywordToken::Types),
            "constants" => Some(KeywordToken::Constants),
            "predicates" => Some(KeywordToken::Predicates),
            "action" => Some(KeywordToken::Action),
            "parameters" => Some(KeywordToken::Parameters),
            "precondition" => Some(KeywordToken::Precondition),
            "effect" => Some(KeywordToken::Effect),
            "objects" => Some(KeywordToken::Objects),
            "init" => Some(KeywordToken::Init),
            "goal" => Some(KeywordToken::Goal),
            "and" => Some(KeywordToken::And),
            "not" => Some(KeywordToken::Not),
            _ => None,
        };
        let kind = match keyword {
            Some(k) => Keyword(k),
            None => Identifier(slice),
        };
        Token{span: Span::new(self.line, self.col, len), kind}
    }
}
