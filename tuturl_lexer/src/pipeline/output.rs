use super::PipelineResult;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use serde::Serialize;

/// JSON document printed by `tuturl --json`
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub token_count: usize,
    pub tokens: &'a [Token],
    pub metrics: &'a LexicalMetrics,
}

impl<'a> PipelineOutput<'a> {
    pub fn new(result: &'a PipelineResult) -> Self {
        Self {
            file: result
                .file_metadata
                .as_ref()
                .map(|metadata| metadata.path.display().to_string()),
            token_count: result.token_count(),
            tokens: result.tokens.tokens(),
            metrics: &result.lexical_metrics,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
