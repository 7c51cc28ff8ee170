//! Classified lexemes with their source coordinates
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal value carried by end-of-line tokens
pub const EOL_VALUE: &str = "EOL";

/// Literal value carried by the end-of-file sentinel
pub const EOF_VALUE: &str = "EOF";

/// Closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenType {
    Identifier,
    Number,
    String,
    Operator,
    #[serde(rename = "EOL")]
    Eol,
    #[serde(rename = "EOF")]
    Eof,
    Function,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Identifier => "Identifier",
            TokenType::Number => "Number",
            TokenType::String => "String",
            TokenType::Operator => "Operator",
            TokenType::Eol => "EOL",
            TokenType::Eof => "EOF",
            TokenType::Function => "Function",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified lexeme.
///
/// Fields are fixed at construction. `column` is the 0-based column of the
/// lexeme's last character; for EOL it is the column just past the newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    kind: TokenType,
    value: String,
    line: u32,
    column: u32,
}

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>, line: u32, column: u32) -> Self {
        let value = value.into();
        debug_assert!(!value.is_empty(), "tokens never carry empty values");
        Self {
            kind,
            value,
            line,
            column,
        }
    }

    pub fn eol(line: u32, column: u32) -> Self {
        Self::new(TokenType::Eol, EOL_VALUE, line, column)
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenType::Eof, EOF_VALUE, line, column)
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }

    /// The only permitted type change: Identifier becomes Function.
    ///
    /// Any other kind, including an existing Function, comes back unchanged.
    pub fn into_function(self) -> Token {
        match self.kind {
            TokenType::Identifier => Token {
                kind: TokenType::Function,
                ..self
            },
            _ => self,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token: {} | Type: {} | Line: {} | Column: {}",
            self.value, self.kind, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let kinds = [
            TokenType::Identifier,
            TokenType::Number,
            TokenType::String,
            TokenType::Operator,
            TokenType::Eol,
            TokenType::Eof,
            TokenType::Function,
        ];
        let names: Vec<_> = kinds.iter().map(TokenType::to_string).collect();
        assert_eq!(
            names,
            ["Identifier", "Number", "String", "Operator", "EOL", "EOF", "Function"]
        );
    }

    #[test]
    fn test_into_function_promotes_identifier_only() {
        let promoted = Token::new(TokenType::Identifier, "print", 3, 4).into_function();
        assert_eq!(promoted.kind(), TokenType::Function);
        assert_eq!(promoted.value(), "print");
        assert_eq!(promoted.position(), Position::new(3, 4));

        let number = Token::new(TokenType::Number, "5", 1, 0);
        assert_eq!(number.clone().into_function(), number);

        assert_eq!(promoted.clone().into_function(), promoted);
    }

    #[test]
    fn test_sentinels() {
        let eof = Token::eof(2, 0);
        assert!(eof.is(TokenType::Eof));
        assert_eq!(eof.value(), "EOF");
        assert_eq!(Token::eol(1, 2).value(), "EOL");
    }

    #[test]
    fn test_display_matches_trace_format() {
        let token = Token::new(TokenType::Operator, "+=", 1, 3);
        assert_eq!(
            token.to_string(),
            "Token: += | Type: Operator | Line: 1 | Column: 3"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Token::eol(1, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "EOL", "value": "EOL", "line": 1, "column": 2})
        );
    }
}
