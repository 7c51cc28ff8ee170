//! Positional error reporting for the lexer
//!
//! The [`ErrorManager`] records every problem found while tokenizing one
//! source buffer and renders each as a source excerpt with a caret under the
//! offending column. Recording is append-only, so once an error has been seen
//! the manager reports errors for the rest of its life.

pub mod error_manager;

pub use error_manager::{Diagnostic, DiagnosticKind, ErrorManager};
