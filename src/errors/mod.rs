//! Error types and error reporting for the scanner.
//!
//! This module defines the errors raised while turning source text into
//! tokens. It includes:
//!
//! - Error structures carrying a source position and line
//! - Specific error variants for lexical, construction and I/O failures
//! - Helpful suggestions attached to each error
//! - The `Reporter` seam the scanner uses to hand off diagnostics

pub mod errors;
pub mod reporter;
