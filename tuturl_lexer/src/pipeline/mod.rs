//! File → tokens, with per-file logging context

mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;

use crate::config::runtime::{LexicalPreferences, RuntimeConfig};
use crate::file_processor::FileProcessor;
use crate::logging::{self, codes};
use crate::{log_info, log_success};
use std::path::Path;
use std::time::Instant;

/// Read and tokenize one file with preferences from the environment
pub fn process_file(file_path: &Path) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

pub fn process_file_with_config(
    file_path: &Path,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let display = file_path.display().to_string();

    logging::with_file_context(file_path.to_path_buf(), 0, || {
        log_info!("Starting tuturl lexical pipeline", "file" => display);

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;
        let analysis = crate::lexical::tokenize_file_result(&file_result, &config.lexical)?;

        let result = PipelineResult {
            tokens: analysis.tokens,
            file_metadata: Some(file_result.metadata),
            lexical_metrics: analysis.metrics,
            processing_duration: start_time.elapsed(),
        };
        result.log_success(&display);

        Ok(result)
    })
}

/// Tokenize an in-memory buffer; no file context is set
pub fn process_source(
    source: &str,
    preferences: &LexicalPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let analysis = crate::lexical::analyze_with_preferences(source, preferences).into_analysis()?;

    let result = PipelineResult {
        tokens: analysis.tokens,
        file_metadata: None,
        lexical_metrics: analysis.metrics,
        processing_duration: start_time.elapsed(),
    };
    result.log_success("<memory>");

    Ok(result)
}

/// Check every stage's code registrations before any file is read
pub fn validate_pipeline() -> Result<(), String> {
    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;

    log_success!(codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 2
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::LexerError;
    use crate::tokens::TokenType;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn preferences() -> LexicalPreferences {
        LexicalPreferences {
            known_functions: vec!["print".to_string()],
            log_token_listing: false,
            collect_detailed_metrics: true,
        }
    }

    #[test]
    fn test_process_source_success() {
        let result = process_source("x = 1\nprint x\n", &preferences()).unwrap();

        assert_eq!(result.token_count(), 8);
        assert!(result.file_metadata.is_none());
        assert_eq!(result.tokens.count_of(TokenType::Function), 1);
        assert_eq!(result.lexical_metrics.count_of(TokenType::Eol), 2);
    }

    #[test]
    fn test_process_source_failure() {
        let result = process_source("foo bar", &preferences());
        assert_matches!(
            result,
            Err(PipelineError::LexicalAnalysis(LexerError::TokenizationFailed { error_count: 1 }))
        );
    }

    #[test]
    fn test_process_file_end_to_end() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.tuturl");
        fs::write(&file_path, "total = a + b\nprint total\n").unwrap();

        let mut config = RuntimeConfig::default();
        config.lexical = preferences();
        let result = process_file_with_config(&file_path, &config).unwrap();

        assert!(result.file_metadata.as_ref().is_some_and(|m| m.line_count == 2));
        assert_eq!(result.tokens.eof().line(), 3);
    }

    #[test]
    fn test_process_missing_file() {
        let result = process_file(Path::new("does/not/exist.tuturl"));
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
        if let Err(error) = result {
            assert_eq!(error.error_code().as_str(), "E005");
            assert_eq!(error.stage(), "file processing");
        }
    }

    #[test]
    fn test_output_json() {
        let result = process_source("a + 1", &preferences()).unwrap();
        let json = PipelineOutput::new(&result).to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["token_count"], 4);
        assert_eq!(value["tokens"][0]["type"], "Identifier");
        assert_eq!(value["tokens"][3]["type"], "EOF");
        assert!(value.get("file").is_none());
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }
}
