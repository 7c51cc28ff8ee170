//! Token types for tuturl lexical analysis
//!
//! Scanning turns source text into [`Token`] values tagged with a
//! [`TokenType`] and a line/column position. The finished sequence is held in
//! a [`TokenStream`], which always ends with exactly one EOF token.
//!
//! ## Token Types
//!
//! - `Identifier` - a run of ASCII letters
//! - `Number` - a run of ASCII digits (no sign, no decimal point)
//! - `String` - a quoted literal, quotes included in the value
//! - `Operator` - a run of `+ - * / =` characters, glued into one token
//! - `EOL` / `EOF` - line and input terminators
//! - `Function` - an identifier found in the [`KnownFunctions`] set; only
//!   produced by reclassification, never by the scanner

pub mod known_functions;
pub mod token;
pub mod token_stream;

pub use known_functions::KnownFunctions;
pub use token::{Token, TokenType};
pub use token_stream::TokenStream;

pub use crate::utils::Position;
