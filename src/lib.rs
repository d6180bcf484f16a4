#![allow(clippy::module_inception)]

use std::{io::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod runner;

/// Byte offset into a source, tagged with the name of the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub usize, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line holding byte `pos` of `content`.
///
/// Returns the 1-based line number, the line's text and the offset of the
/// position within that line. The offset one past the end of `content` is
/// valid and lands on the last line (or on a fresh empty line when the
/// content ends in a newline).
pub fn get_line_at_position(content: &str, pos: usize) -> Option<(usize, String, usize)> {

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) || (end == pos && !line.ends_with('\n')) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    (pos == start).then_some((line_number, String::new(), 0))
}

/// Writes `error` followed by the offending source line and a caret under
/// the reported position.
pub fn display_error(error: &Error, source: &str, out: &mut dyn Write) -> std::io::Result<()> {
    /*
        [line 1] Error: Unexpected character '@'
        -> main.lox
          |
        1 | var a = @;
          | --------^
    */

    match error.get_tip() {
        ErrorTip::None => writeln!(out, "{}", error)?,
        tip => writeln!(out, "{} ({})", error, tip)?,
    }

    let position = error.get_position();
    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return Ok(());
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    writeln!(out, "-> {}", position.1)?;
    writeln!(out, "{:>padding$}", "|")?;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    writeln!(out, "{} | {}", line_string, line_text_removed.trim_end())?;

    // Echo tabs so the caret stays under the same column.
    let before = &line_text[removed_whitespace.min(line_pos)..line_pos];
    let marker: String = before
        .chars()
        .map(|c| if c == '\t' { '\t' } else { '-' })
        .collect();

    writeln!(out, "{:>padding$} {}^", "|", marker)
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
