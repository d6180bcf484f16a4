//! Diagnostic sinks for errors found while scanning.
//!
//! The scanner never stops on a lexical error. It hands each one to a
//! [`Reporter`] and keeps going, leaving it to the caller to decide what a
//! run with errors means.

use super::errors::Error;

pub trait Reporter {
    fn report(&mut self, error: Error);
}

/// Collects every reported error, in report order.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Forget everything reported so far.
    pub fn reset(&mut self) {
        self.errors.clear();
    }

    pub fn take(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, error: Error) {
        self.errors.push(error);
    }
}
