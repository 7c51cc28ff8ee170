//! Character scanner and the scan → reclassify → validate driver

use super::chars::{
    is_eol_char, is_identifier_char, is_number_char, is_operator_char, is_quote_char,
    is_skippable_whitespace,
};
use super::error::LexerError;
use super::reclassify::reclassify;
use super::validation::validate;
use crate::config::runtime::LexicalPreferences;
use crate::diagnostics::ErrorManager;
use crate::logging::{self, codes, LogEvent};
use crate::tokens::{KnownFunctions, Token, TokenStream, TokenType};
use crate::utils::Position;
use crate::{log_debug, log_error, log_info, log_success};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters gathered over one tokenizer run
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    /// Per-type counts of scanned tokens, before reclassification
    pub tokens_by_type: BTreeMap<TokenType, usize>,
    pub invalid_characters: usize,
    pub unterminated_strings: usize,
    pub reclassified_identifiers: usize,
    pub violations: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, detailed: bool) {
        self.total_tokens += 1;
        if detailed {
            *self.tokens_by_type.entry(token.kind()).or_insert(0) += 1;
        }
    }

    pub fn count_of(&self, kind: TokenType) -> usize {
        self.tokens_by_type.get(&kind).copied().unwrap_or(0)
    }
}

pub struct Tokenizer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character
    cursor: usize,
    line: u32,
    column: u32,
    known_functions: &'a KnownFunctions,
    finished: bool,
    metrics: LexicalMetrics,
    log_token_listing: bool,
    collect_detailed_metrics: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str, known_functions: &'a KnownFunctions) -> Self {
        Self {
            source,
            cursor: 0,
            line: 1,
            column: 0,
            known_functions,
            finished: false,
            metrics: LexicalMetrics::default(),
            log_token_listing: true,
            collect_detailed_metrics: true,
        }
    }

    /// Same as `new`, with the logging and metrics switches taken from `preferences`.
    ///
    /// The known-function set is passed separately so it can be shared.
    pub fn with_preferences(
        source: &'a str,
        known_functions: &'a KnownFunctions,
        preferences: &LexicalPreferences,
    ) -> Self {
        Self {
            log_token_listing: preferences.log_token_listing,
            collect_detailed_metrics: preferences.collect_detailed_metrics,
            ..Self::new(source, known_functions)
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    fn current_char(&self) -> Option<char> {
        self.source[self.cursor..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.cursor += ch.len_utf8();
        self.column += 1;
        Some(ch)
    }

    fn consume_while(&mut self, class: fn(char) -> bool) {
        while self.current_char().is_some_and(class) {
            self.advance();
        }
    }

    /// Token spanning `start..cursor`, stamped with the column of its last character
    fn lexeme(&self, kind: TokenType, start: usize) -> Token {
        Token::new(
            kind,
            &self.source[start..self.cursor],
            self.line,
            self.column.saturating_sub(1),
        )
    }

    /// Scan one lexeme.
    ///
    /// Invalid characters and whitespace are consumed in place without
    /// producing a token. The EOF token is returned exactly once; every call
    /// after that yields `None`.
    pub fn next_token(&mut self, errors: &mut ErrorManager<'_>) -> Option<Token> {
        loop {
            if self.finished {
                return None;
            }

            let start = self.cursor;
            let Some(ch) = self.current_char() else {
                self.finished = true;
                let eof = Token::eof(self.line, self.column.saturating_sub(1));
                self.metrics.record_token(&eof, self.collect_detailed_metrics);
                return Some(eof);
            };

            let token = if is_identifier_char(ch) {
                self.consume_while(is_identifier_char);
                self.lexeme(TokenType::Identifier, start)
            } else if is_number_char(ch) {
                self.consume_while(is_number_char);
                self.lexeme(TokenType::Number, start)
            } else if is_eol_char(ch) {
                self.advance();
                let eol = Token::eol(self.line, self.column);
                self.line += 1;
                self.column = 0;
                eol
            } else if is_quote_char(ch) {
                self.scan_string(ch, start)
            } else if is_operator_char(ch) {
                self.consume_while(is_operator_char);
                self.lexeme(TokenType::Operator, start)
            } else {
                if !is_skippable_whitespace(ch) {
                    self.metrics.invalid_characters += 1;
                    errors.report_invalid_character(ch, Position::new(self.line, self.column));
                }
                self.advance();
                continue;
            };

            self.metrics.record_token(&token, self.collect_detailed_metrics);
            return Some(token);
        }
    }

    /// Opening quote through the matching closing quote, quotes included.
    ///
    /// Reaching the end of input first still yields the partial literal.
    fn scan_string(&mut self, quote: char, start: usize) -> Token {
        let opened_at = Position::new(self.line, self.column);
        self.advance();

        let mut terminated = false;
        while let Some(ch) = self.advance() {
            if ch == quote {
                terminated = true;
                break;
            }
        }

        if !terminated {
            self.metrics.unterminated_strings += 1;
            if logging::debug_enabled() {
                logging::dispatch_event(
                    LogEvent::debug_with_code(
                        codes::lexical::UNTERMINATED_STRING,
                        "String literal reaches end of input without a closing quote",
                    )
                    .with_position(opened_at),
                );
            }
        }

        self.lexeme(TokenType::String, start)
    }

    /// Raw classification pass, ending with the EOF token
    pub fn scan(&mut self, errors: &mut ErrorManager<'_>) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token(errors) {
            tokens.push(token);
        }
        tokens
    }

    pub fn tokenize(self, errors: &mut ErrorManager<'_>) -> Result<TokenStream, LexerError> {
        self.tokenize_with_metrics(errors).0
    }

    /// Scan, reclassify and validate, then fold the recorded diagnostics into
    /// the outcome. Metrics are returned whether or not the run failed.
    pub fn tokenize_with_metrics(
        mut self,
        errors: &mut ErrorManager<'_>,
    ) -> (Result<TokenStream, LexerError>, LexicalMetrics) {
        log_info!("Tokenizing file content", "bytes" => self.source.len());

        let scanned = self.scan(errors);
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "tokens" => scanned.len(),
            "invalid_characters" => self.metrics.invalid_characters
        );

        log_info!("Updating tokens");
        let identifiers_before = count_kind(&scanned, TokenType::Identifier);
        let tokens = reclassify(scanned, self.known_functions);
        self.metrics.reclassified_identifiers =
            identifiers_before - count_kind(&tokens, TokenType::Identifier);
        log_success!(codes::success::TOKENS_RECLASSIFIED, "Tokens updated",
            "functions" => self.metrics.reclassified_identifiers
        );

        let violations = validate(&tokens, self.known_functions);
        self.metrics.violations = violations.len();
        for violation in &violations {
            errors.report_token_error(
                violation.kind,
                &tokens[violation.index],
                Some(violation.expected),
            );
        }

        if errors.has_errors() {
            let error = LexerError::TokenizationFailed {
                error_count: errors.error_count(),
            };
            log_error!(error.error_code(), &error.to_string(),
                "invalid_characters" => self.metrics.invalid_characters,
                "violations" => self.metrics.violations
            );
            return (Err(error), self.metrics);
        }

        log_success!(codes::success::LEXICAL_VALIDATION_PASSED, "Lexical validation passed",
            "tokens" => tokens.len()
        );

        if self.log_token_listing {
            for token in &tokens {
                log_debug!(&token.to_string());
            }
        }

        (Ok(TokenStream::new(tokens)), self.metrics)
    }
}

fn count_kind(tokens: &[Token], kind: TokenType) -> usize {
    tokens.iter().filter(|t| t.is(kind)).count()
}
