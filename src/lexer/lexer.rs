use std::{collections::HashMap, rc::Rc};

use tracing::{debug, trace, warn};

use crate::{
    errors::{
        errors::{Error, ErrorImpl},
        reporter::{Diagnostics, Reporter},
    },
    Position, Span,
};

use super::tokens::{Literal, Token, TokenKind, RESERVED_LOOKUP};

pub type Keywords = HashMap<&'static str, TokenKind>;

/// Cursor over one source text. `start` marks the first byte of the token
/// being recognised, `current` the next unread byte; both always sit on
/// char boundaries and `start <= current <= source.len()`.
pub struct Scanner<'a> {
    source: &'a str,
    keywords: &'a Keywords,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
    errors: usize,
    file: Rc<String>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Scanner<'a> {
        Scanner::with_keywords(source, file, &RESERVED_LOOKUP)
    }

    pub fn with_keywords(source: &'a str, file: Option<String>, keywords: &'a Keywords) -> Scanner<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Scanner {
            source,
            keywords,
            tokens: vec![],
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            errors: 0,
            file: file_name,
        }
    }

    /// Scans the whole source. Lexical errors go to `reporter` and scanning
    /// resumes after the offending input, so the result always ends in `EOF`.
    pub fn scan(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        while !self.at_eof() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token(reporter);
        }

        self.start = self.current;
        self.start_line = self.line;
        self.push(TokenKind::EOF, None, reporter);

        debug!(
            file = %self.file,
            tokens = self.tokens.len(),
            errors = self.errors,
            lines = self.line,
            "scan finished"
        );

        self.tokens
    }

    fn scan_token(&mut self, reporter: &mut dyn Reporter) {
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '(' => self.push(TokenKind::LeftParen, None, reporter),
            ')' => self.push(TokenKind::RightParen, None, reporter),
            '{' => self.push(TokenKind::LeftBrace, None, reporter),
            '}' => self.push(TokenKind::RightBrace, None, reporter),
            ',' => self.push(TokenKind::Comma, None, reporter),
            '.' => self.push(TokenKind::Dot, None, reporter),
            '-' => self.push(TokenKind::Minus, None, reporter),
            '+' => self.push(TokenKind::Plus, None, reporter),
            ';' => self.push(TokenKind::Semicolon, None, reporter),
            '*' => self.push(TokenKind::Star, None, reporter),

            '!' => {
                let kind = if self.matches('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.push(kind, None, reporter);
            }
            '=' => {
                let kind = if self.matches('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.push(kind, None, reporter);
            }
            '<' => {
                let kind = if self.matches('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.push(kind, None, reporter);
            }
            '>' => {
                let kind = if self.matches('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.push(kind, None, reporter);
            }

            '/' => {
                if self.matches('/') {
                    self.line_comment();
                } else {
                    self.push(TokenKind::Slash, None, reporter);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string(reporter),
            c if is_digit(c) => self.number(reporter),
            c if is_alpha(c) => self.identifier(reporter),

            character => self.error(reporter, ErrorImpl::UnexpectedCharacter { character }, self.start),
        }
    }

    fn line_comment(&mut self) {
        self.advance_while(|c| c != '\n');
        trace!(line = self.line, comment = self.lexeme(), "skipped comment");
    }

    fn string(&mut self, reporter: &mut dyn Reporter) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.at_eof() {
            self.error(reporter, ErrorImpl::UnterminatedString, self.current);
            return;
        }

        // Closing quote.
        self.advance();

        let value = &self.source[self.start + 1..self.current - 1];
        self.push(TokenKind::String, Some(Literal::String(value.to_string())), reporter);
    }

    fn number(&mut self, reporter: &mut dyn Reporter) {
        self.advance_while(is_digit);

        if self.peek() == Some('.') && self.peek_next().is_some_and(is_digit) {
            self.advance();
            self.advance_while(is_digit);
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(value) => self.push(TokenKind::Number, Some(Literal::Number(value)), reporter),
            Err(_) => self.error(
                reporter,
                ErrorImpl::NumberParseError {
                    token: text.to_string(),
                },
                self.start,
            ),
        }
    }

    fn identifier(&mut self, reporter: &mut dyn Reporter) {
        self.advance_while(is_alpha_numeric);

        let kind = self
            .keywords
            .get(self.lexeme())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        self.push(kind, None, reporter);
    }

    fn push(&mut self, kind: TokenKind, literal: Option<Literal>, reporter: &mut dyn Reporter) {
        let lexeme = self.lexeme().to_string();

        match Token::new(kind, lexeme, literal, self.start_line, self.span()) {
            Ok(token) => {
                trace!(kind = %token.kind(), lexeme = token.lexeme(), line = token.line(), "token");
                self.tokens.push(token);
            }
            Err(error) => self.report(reporter, error),
        }
    }

    fn error(&mut self, reporter: &mut dyn Reporter, error: ErrorImpl, offset: usize) {
        let error = Error::new(error, self.position(offset), self.line);
        self.report(reporter, error);
    }

    fn report(&mut self, reporter: &mut dyn Reporter, error: Error) {
        warn!(file = %self.file, "{}", error);
        self.errors += 1;
        reporter.report(error);
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn position(&self, offset: usize) -> Position {
        Position(offset, Rc::clone(&self.file))
    }

    fn span(&self) -> Span {
        Span {
            start: self.position(self.start),
            end: self.position(self.current),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }

        self.current += expected.len_utf8();
        true
    }

    fn at_eof(&self) -> bool {
        self.current >= self.source.len()
    }
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

/// Scans `source` and returns its tokens together with every lexical error
/// found along the way.
pub fn tokenize(source: &str, file: Option<String>) -> (Vec<Token>, Vec<Error>) {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source, file).scan(&mut diagnostics);

    (tokens, diagnostics.take())
}
