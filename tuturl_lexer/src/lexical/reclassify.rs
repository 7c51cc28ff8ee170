//! Promotion of known function names from Identifier to Function

use crate::tokens::{KnownFunctions, Token, TokenType};

/// Rebuild the sequence with every known-name Identifier turned into a Function.
///
/// Idempotent: Function tokens are never demoted and nothing else changes.
pub fn reclassify(tokens: Vec<Token>, known: &KnownFunctions) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| {
            if token.is(TokenType::Identifier) && known.contains(token.value()) {
                token.into_function()
            } else {
                token
            }
        })
        .collect()
}
