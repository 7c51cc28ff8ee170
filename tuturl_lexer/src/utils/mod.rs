//! Shared primitive types used across the lexer

pub mod position;

pub use position::Position;
