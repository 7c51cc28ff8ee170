//! Lexical analysis for tuturl source text
//!
//! A run has three passes over one buffer: character scanning, promotion of
//! known function names, and adjacency validation. Problems found along the
//! way are recorded in an `ErrorManager`; the run fails as a whole if any
//! were recorded, and no partial token stream is returned.

pub mod chars;
pub mod error;
pub mod reclassify;
pub mod tokenizer;
pub mod validation;

use crate::config::compile_time::lexical::MAX_RENDERED_DIAGNOSTICS;
use crate::config::runtime::LexicalPreferences;
use crate::diagnostics::{Diagnostic, ErrorManager};
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{KnownFunctions, TokenStream};
use crate::log_debug;

pub use error::LexerError;
pub use reclassify::reclassify;
pub use tokenizer::{LexicalMetrics, Tokenizer};
pub use validation::{validate, Violation};

/// Token stream of a successful run with the counters gathered on the way
#[derive(Debug, Clone)]
pub struct LexicalAnalysis {
    pub tokens: TokenStream,
    pub metrics: LexicalMetrics,
}

/// Everything a run produced, whether or not it failed
#[derive(Debug)]
pub struct LexicalOutcome {
    pub result: Result<TokenStream, LexerError>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: LexicalMetrics,
}

impl LexicalOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_analysis(self) -> Result<LexicalAnalysis, LexerError> {
        let metrics = self.metrics;
        self.result
            .map(|tokens| LexicalAnalysis { tokens, metrics })
    }
}

pub fn tokenize(source: &str, known_functions: &KnownFunctions) -> Result<TokenStream, LexerError> {
    let mut errors = ErrorManager::new(source);
    Tokenizer::new(source, known_functions).tokenize(&mut errors)
}

/// Run the tokenizer and keep its diagnostics and metrics
pub fn analyze(source: &str, known_functions: &KnownFunctions) -> LexicalOutcome {
    let mut errors = ErrorManager::new(source);
    let (result, metrics) = Tokenizer::new(source, known_functions).tokenize_with_metrics(&mut errors);
    LexicalOutcome {
        result,
        diagnostics: errors.into_diagnostics(),
        metrics,
    }
}

pub fn analyze_with_preferences(source: &str, preferences: &LexicalPreferences) -> LexicalOutcome {
    let known_functions: KnownFunctions = preferences.known_functions.iter().cloned().collect();
    let mut errors = ErrorManager::new(source);
    let (result, metrics) = Tokenizer::with_preferences(source, &known_functions, preferences)
        .tokenize_with_metrics(&mut errors);
    LexicalOutcome {
        result,
        diagnostics: errors.into_diagnostics(),
        metrics,
    }
}

/// Tokenize the contents of a file read by the file processor
pub fn tokenize_file_result(
    file_result: &FileProcessingResult,
    preferences: &LexicalPreferences,
) -> Result<LexicalAnalysis, LexerError> {
    log_debug!("Starting lexical analysis",
        "file" => file_result.metadata.path.display(),
        "chars" => file_result.char_count(),
        "lines" => file_result.metadata.line_count
    );

    analyze_with_preferences(&file_result.source, preferences).into_analysis()
}

/// Check that every lexical code has registry metadata
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::INVALID_CHARACTER,
        codes::lexical::UNTERMINATED_STRING,
        codes::lexical::MALFORMED_FUNCTION_USAGE,
        codes::lexical::MISSING_OPERATOR,
        codes::lexical::TOKENIZATION_FAILED,
    ];

    for code in lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code
            ));
        }
    }

    log_debug!("Lexical limits loaded",
        "max_rendered_diagnostics" => MAX_RENDERED_DIAGNOSTICS
    );

    Ok(())
}
