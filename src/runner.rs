//! Drivers that feed source text to the scanner.
//!
//! A [`Lox`] session scans either a whole file or one prompt line at a time,
//! prints what it found and keeps a had-error flag for the caller. The flag
//! covers a single unit of input: it is cleared before every file run and
//! before every prompt line, so an error on one line never leaks into the
//! verdict for the next.

use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    display_error,
    errors::{
        errors::{Error, ErrorImpl},
        reporter::Diagnostics,
    },
    lexer::{lexer::Scanner, tokens::Token},
    Position,
};

pub const PROMPT: &str = "> ";
pub const EXIT_COMMAND: &str = "exit";
pub const HELP_COMMAND: &str = "help";
pub const HELP_MESSAGE: &str = "No help from here.. YET!";
pub const EXIT_NOTICE: &str = "Exiting because of an unexpected error";

/// Result of scanning one file.
#[derive(Debug)]
pub struct RunOutcome {
    pub tokens: Vec<Token>,
    pub had_error: bool,
}

impl RunOutcome {
    /// Writes the notice printed before leaving a run that had errors.
    pub fn write_exit_notice(&self, out: &mut dyn Write) -> Result<(), Error> {
        if self.had_error {
            writeln!(out, "{}", EXIT_NOTICE)?;
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Lox {
    diagnostics: Diagnostics,
    print_tokens: bool,
}

impl Lox {
    /// `print_tokens` controls whether file runs dump their tokens; prompt
    /// lines always do.
    pub fn new(print_tokens: bool) -> Self {
        Lox {
            diagnostics: Diagnostics::new(),
            print_tokens,
        }
    }

    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Scans one unit of source. Errors accumulate until the next run resets
    /// them.
    pub fn run(&mut self, source: &str, file: Option<String>) -> Vec<Token> {
        Scanner::new(source, file).scan(&mut self.diagnostics)
    }

    pub fn run_file(&mut self, path: &Path, out: &mut dyn Write) -> Result<RunOutcome, Error> {
        let source = fs::read_to_string(path).map_err(|error| {
            Error::new(
                ErrorImpl::UnreadableFile {
                    path: path.display().to_string(),
                    reason: error.to_string(),
                },
                Position::null(),
                0,
            )
        })?;

        self.diagnostics.reset();

        let file = path.file_name().map(|name| name.to_string_lossy().into_owned());
        let tokens = self.run(&source, file);

        if self.print_tokens {
            for token in &tokens {
                writeln!(out, "{}", token)?;
            }
        }

        self.write_diagnostics(&source, out)?;

        debug!(
            path = %path.display(),
            tokens = tokens.len(),
            errors = self.diagnostics.len(),
            "file run finished"
        );

        Ok(RunOutcome {
            tokens,
            had_error: self.had_error(),
        })
    }

    /// Reads lines from `input` until end of input or `exit`, scanning each
    /// one and printing its tokens. `help` prints a short message instead.
    /// Bytes that are not UTF-8 become U+FFFD and are reported by the scanner.
    pub fn run_prompt(&mut self, mut input: impl BufRead, out: &mut dyn Write) -> Result<(), Error> {
        let mut buffer = Vec::new();

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }

            let text = String::from_utf8_lossy(&buffer).into_owned();
            let line = text.strip_suffix('\n').unwrap_or(text.as_str());
            let line = line.strip_suffix('\r').unwrap_or(line);

            match line {
                EXIT_COMMAND => break,
                HELP_COMMAND => {
                    writeln!(out, "{}", HELP_MESSAGE)?;
                    continue;
                }
                _ => {}
            }

            self.diagnostics.reset();

            let tokens = self.run(line, None);
            for token in &tokens {
                writeln!(out, "{}", token)?;
            }

            self.write_diagnostics(line, out)?;
        }

        debug!("prompt closed");
        Ok(())
    }

    fn write_diagnostics(&self, source: &str, out: &mut dyn Write) -> Result<(), Error> {
        for error in self.diagnostics.errors() {
            debug!(
                name = error.get_error_name(),
                lexical = error.is_lexical(),
                line = error.get_line(),
                "writing diagnostic"
            );
            display_error(error, source, out)?;
        }

        Ok(())
    }
}
