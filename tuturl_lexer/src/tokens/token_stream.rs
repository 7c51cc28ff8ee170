//! Finished token sequences
//!
//! A `TokenStream` owns the tokens of one source buffer and guarantees that
//! the last token is the single EOF sentinel.

use crate::tokens::token::{Token, TokenType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wrap a token sequence, appending an EOF sentinel if it lacks one.
    ///
    /// Any EOF token that is not last is dropped so exactly one remains.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let trailing_eof = match tokens.last() {
            Some(last) if last.is(TokenType::Eof) => tokens.pop(),
            _ => None,
        };
        tokens.retain(|token| !token.is(TokenType::Eof));

        let eof = trailing_eof.unwrap_or_else(|| match tokens.last() {
            Some(last) => Token::eof(last.line(), last.column()),
            None => Token::eof(1, 0),
        });
        tokens.push(eof);

        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Number of tokens including EOF
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the stream holds only the EOF sentinel
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn eof(&self) -> &Token {
        // new() guarantees a trailing EOF
        &self.tokens[self.tokens.len() - 1]
    }

    pub fn count_of(&self, kind: TokenType) -> usize {
        self.tokens.iter().filter(|token| token.is(kind)).count()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
