use crate::logging::{codes, Code};

/// Whole-run lexer failures.
///
/// Individual problems are reported through the diagnostics channel while
/// scanning continues; this error only says that at least one was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Tokenization failed with {error_count} error(s)")]
    TokenizationFailed { error_count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            LexerError::TokenizationFailed { .. } => codes::lexical::TOKENIZATION_FAILED,
        }
    }

    pub fn error_count(&self) -> usize {
        match self {
            LexerError::TokenizationFailed { error_count } => *error_count,
        }
    }
}
