use std::{fmt::Display, io};

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    line: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, line: usize) -> Self {
        Error {
            internal_error: error_impl,
            position,
            line,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// Line the error was reported on. Zero for errors that are not tied to
    /// a place in the source, such as I/O failures.
    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Lexical errors are recovered from while scanning; everything else
    /// stops the current operation.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnexpectedCharacter { .. }
                | ErrorImpl::UnterminatedString
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidToken { .. } => "InvalidToken",
            ErrorImpl::UnreadableFile { .. } => "UnreadableFile",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { character } => ErrorTip::Suggestion(format!(
                "`{}` is not part of the language, remove it or put it inside a string",
                character
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"` to the string"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it a valid decimal literal?",
                token
            )),
            ErrorImpl::InvalidToken { .. } => ErrorTip::None,
            ErrorImpl::UnreadableFile { .. } => ErrorTip::Suggestion(String::from(
                "check that the file exists and is readable",
            )),
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "Error: {}", self.internal_error)
        } else {
            write!(f, "[line {}] Error: {}", self.line, self.internal_error)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::new(
            ErrorImpl::Io {
                reason: error.to_string(),
            },
            Position::null(),
            0,
        )
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unexpected character {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },
    #[error("could not read {path:?}: {reason}")]
    UnreadableFile { path: String, reason: String },
    #[error("i/o error: {reason}")]
    Io { reason: String },
}
