//! Adjacency rules checked over the reclassified token sequence

use crate::diagnostics::DiagnosticKind;
use crate::tokens::{KnownFunctions, Token, TokenType};

/// A rule violation, located at `tokens[index]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub kind: DiagnosticKind,
    pub index: usize,
    pub expected: TokenType,
}

/// Walk each token with its successor and collect violations in order.
///
/// 1. A Function must be a known name directly followed by an Identifier;
///    otherwise the successor is blamed, expecting an Identifier.
/// 2. An Identifier directly followed by another Identifier blames the second,
///    expecting an Operator.
///
/// A Function with no successor at all blames itself.
pub fn validate(tokens: &[Token], known: &KnownFunctions) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let next = tokens.get(index + 1);

        match token.kind() {
            TokenType::Function => {
                let well_formed = known.contains(token.value())
                    && next.is_some_and(|n| n.is(TokenType::Identifier));
                if !well_formed {
                    violations.push(Violation {
                        kind: DiagnosticKind::MalformedFunctionUsage,
                        index: if next.is_some() { index + 1 } else { index },
                        expected: TokenType::Identifier,
                    });
                }
            }
            TokenType::Identifier if next.is_some_and(|n| n.is(TokenType::Identifier)) => {
                violations.push(Violation {
                    kind: DiagnosticKind::MissingOperator,
                    index: index + 1,
                    expected: TokenType::Operator,
                });
            }
            _ => {}
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenType, value: &str, column: u32) -> Token {
        Token::new(kind, value, 1, column)
    }

    #[test]
    fn test_function_followed_by_identifier_passes() {
        let tokens = [
            token(TokenType::Function, "print", 4),
            token(TokenType::Identifier, "x", 6),
            Token::eof(1, 6),
        ];
        assert!(validate(&tokens, &KnownFunctions::default()).is_empty());
    }

    #[test]
    fn test_function_followed_by_number_blames_number() {
        let tokens = [
            token(TokenType::Function, "print", 4),
            token(TokenType::Number, "5", 6),
            Token::eof(1, 6),
        ];
        let violations = validate(&tokens, &KnownFunctions::default());
        assert_eq!(
            violations,
            [Violation {
                kind: DiagnosticKind::MalformedFunctionUsage,
                index: 1,
                expected: TokenType::Identifier,
            }]
        );
    }

    #[test]
    fn test_unknown_function_name_is_rejected() {
        let tokens = [
            token(TokenType::Function, "shout", 4),
            token(TokenType::Identifier, "x", 6),
            Token::eof(1, 6),
        ];
        let violations = validate(&tokens, &KnownFunctions::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].index, 1);
    }

    #[test]
    fn test_function_at_end_blames_eof() {
        let tokens = [token(TokenType::Function, "print", 4), Token::eof(1, 4)];
        let violations = validate(&tokens, &KnownFunctions::default());
        assert_eq!(violations[0].index, 1);
    }

    #[test]
    fn test_function_without_successor_blames_itself() {
        let tokens = [token(TokenType::Function, "print", 4)];
        let violations = validate(&tokens, &KnownFunctions::default());
        assert_eq!(violations[0].index, 0);
    }

    #[test]
    fn test_adjacent_identifiers_blame_second() {
        let tokens = [
            token(TokenType::Identifier, "foo", 2),
            token(TokenType::Identifier, "bar", 6),
            token(TokenType::Identifier, "baz", 10),
            Token::eof(1, 10),
        ];
        let violations = validate(&tokens, &KnownFunctions::default());
        let blamed: Vec<_> = violations.iter().map(|v| v.index).collect();
        assert_eq!(blamed, [1, 2]);
        assert!(violations
            .iter()
            .all(|v| v.kind == DiagnosticKind::MissingOperator
                && v.expected == TokenType::Operator));
    }

    #[test]
    fn test_other_pairs_accepted() {
        let tokens = [
            token(TokenType::Number, "1", 0),
            token(TokenType::Number, "2", 2),
            token(TokenType::Operator, "==", 4),
            token(TokenType::Operator, "+", 6),
            token(TokenType::Identifier, "a", 8),
            Token::eol(1, 9),
            token(TokenType::Identifier, "b", 0),
            Token::eof(2, 0),
        ];
        assert!(validate(&tokens, &KnownFunctions::default()).is_empty());
    }
}
