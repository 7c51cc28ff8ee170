//! Character classes driving lexeme dispatch.
//!
//! The scanner tests these in declaration order; the classes are disjoint.

pub const OPERATOR_CHARS: [char; 5] = ['+', '-', '*', '/', '='];

pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_eol_char(ch: char) -> bool {
    ch == '\n'
}

pub fn is_quote_char(ch: char) -> bool {
    ch == '"' || ch == '\''
}

pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(&ch)
}

/// Skipped silently; `\n` never reaches this check
pub fn is_skippable_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}
