use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::log_success;
use crate::logging::codes;
use crate::tokens::TokenStream;
use std::time::Duration;

/// Tokens of one file with everything measured while producing them
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub tokens: TokenStream,
    pub file_metadata: Option<FileMetadata>,
    pub lexical_metrics: LexicalMetrics,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn log_success(&self, source_name: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let tokens_per_sec = if seconds > 0.0 {
            self.token_count() as f64 / seconds
        } else {
            0.0
        };

        log_success!(codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Lexical pipeline succeeded",
            "source" => source_name,
            "tokens" => self.token_count(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "tokens_per_sec" => format!("{:.0}", tokens_per_sec)
        );
    }
}
