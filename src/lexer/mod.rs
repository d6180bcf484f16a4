//! Lexical analysis module.
//!
//! This module contains the scanner that converts Lox source text into a
//! flat sequence of tokens. It handles:
//!
//! - One and two character operators, preferring the longer match
//! - Recognition of keywords, identifiers, string and number literals
//! - Line tracking for diagnostics
//! - Skipping comments and whitespace, and recovering from bad input

pub mod lexer;
pub mod tokens;
