use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::Configuration(e) => e.error_code(),
            PipelineError::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Short stage label for one-line reports
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::FileProcessing(_) => "file processing",
            PipelineError::LexicalAnalysis(_) => "lexical analysis",
            PipelineError::Configuration(_) => "configuration",
            PipelineError::Pipeline { .. } => "pipeline",
        }
    }
}
