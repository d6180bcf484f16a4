//! Integration tests for end-to-end scanning.
//!
//! These tests drive the public API the way the `lox` binary does: whole
//! programs through `tokenize`, and files and prompt sessions through the
//! `Lox` runner.

use std::{fs, io::Cursor};

use lox::{
    errors::errors::ErrorImpl,
    lexer::{
        lexer::tokenize,
        tokens::{Literal, TokenKind},
    },
    runner::Lox,
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = r#"// Counts down and greets.
class Greeter {
  greet(name) {
    print "Hello, " + name + "!";
  }
}

fun countdown(n) {
  while (n >= 0) {
    if (n != 0 and n <= 10.5) print n;
    n = n - 1;
  }
  return nil;
}

var g = Greeter();
g.greet("world");
countdown(3);
"#;

#[test]
fn test_scan_full_program() {
    let (tokens, errors) = tokenize(PROGRAM, Some("program.lox".to_string()));
    assert!(errors.is_empty());

    let keywords: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind().is_keyword())
        .map(|token| token.lexeme())
        .collect();
    assert_eq!(
        keywords,
        vec!["class", "print", "fun", "while", "if", "and", "print", "return", "nil", "var"]
    );

    let strings: Vec<&Literal> = tokens
        .iter()
        .filter(|token| token.kind() == TokenKind::String)
        .filter_map(|token| token.literal())
        .collect();
    assert_eq!(
        strings,
        vec![
            &Literal::String("Hello, ".to_string()),
            &Literal::String("!".to_string()),
            &Literal::String("world".to_string()),
        ]
    );

    let numbers: Vec<&Literal> = tokens
        .iter()
        .filter(|token| token.kind() == TokenKind::Number)
        .filter_map(|token| token.literal())
        .collect();
    assert_eq!(
        numbers,
        vec![
            &Literal::Number(0.0),
            &Literal::Number(0.0),
            &Literal::Number(10.5),
            &Literal::Number(1.0),
            &Literal::Number(3.0),
        ]
    );

    let class = &tokens[0];
    assert_eq!(class.kind(), TokenKind::Class);
    assert_eq!(class.line(), 2);

    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind(), TokenKind::EOF);
    assert_eq!(eof.line(), 19);
    assert!(tokens.windows(2).all(|pair| pair[0].line() <= pair[1].line()));
}

#[test]
fn test_scan_reports_every_error_and_keeps_going() {
    let source = "var a = 1 ^ 2;\nvar b = ~3;\nprint \"never closed";
    let (tokens, errors) = tokenize(source, None);

    let reported: Vec<(usize, &ErrorImpl)> = errors
        .iter()
        .map(|error| (error.get_line(), error.get_impl()))
        .collect();
    assert_eq!(
        reported,
        vec![
            (1, &ErrorImpl::UnexpectedCharacter { character: '^' }),
            (2, &ErrorImpl::UnexpectedCharacter { character: '~' }),
            (3, &ErrorImpl::UnterminatedString),
        ]
    );

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Print,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_run_file_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.lox");
    fs::write(&path, "print 1;\n").unwrap();

    let mut lox = Lox::new(true);
    let mut out = Vec::new();
    let outcome = lox.run_file(&path, &mut out).unwrap();

    assert!(!outcome.had_error);
    assert_eq!(outcome.tokens.len(), 4);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Print print null\nNumber 1 1.0\nSemicolon ; null\nEOF  null\n"
    );
}

#[test]
fn test_run_file_with_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.lox");
    fs::write(&path, "var x = 1;\nvar y = @;\n").unwrap();

    let mut lox = Lox::new(false);
    let mut out = Vec::new();
    let outcome = lox.run_file(&path, &mut out).unwrap();

    assert!(outcome.had_error);
    assert_eq!(outcome.tokens.last().map(|token| token.kind()), Some(TokenKind::EOF));

    let rendered = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].starts_with("[line 2] Error: Unexpected character '@'"));
    assert_eq!(lines[1], "-> broken.lox");
    assert_eq!(lines[3], "2 | var y = @;");
    assert_eq!(lines[4], "  | --------^");
}

#[test]
fn test_run_file_resets_error_flag_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.lox");
    let clean = dir.path().join("clean.lox");
    fs::write(&broken, "\"open").unwrap();
    fs::write(&clean, "nil").unwrap();

    let mut lox = Lox::new(false);
    let mut out = Vec::new();

    assert!(lox.run_file(&broken, &mut out).unwrap().had_error);
    assert!(!lox.run_file(&clean, &mut out).unwrap().had_error);
}

#[test]
fn test_run_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.lox");

    let mut lox = Lox::new(false);
    let mut out = Vec::new();
    let error = lox.run_file(&path, &mut out).unwrap_err();

    assert_eq!(error.get_error_name(), "UnreadableFile");
    assert!(!error.is_lexical());
    assert!(out.is_empty());
}

#[test]
fn test_prompt_session() {
    let input = "help\nvar x = 2;\n\"oops\nexit\nprint x;\n";
    let mut lox = Lox::new(false);
    let mut out = Vec::new();
    lox.run_prompt(Cursor::new(input), &mut out).unwrap();

    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.starts_with("> No help from here.. YET!\n> Var var null\n"));
    assert!(rendered.contains("Number 2 2.0\n"));
    assert!(rendered.contains("[line 1] Error: Unterminated string"));
    assert!(!rendered.contains("Print"));
    assert!(lox.had_error());
}
