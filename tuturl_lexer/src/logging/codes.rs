//! Error and success codes with their classification metadata
//!
//! Every code emitted through the logging channel is declared here together
//! with the metadata the collector and the CLI use to classify it.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Stable identifier attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Behavioral metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR004");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Codes raised while scanning and validating the token stream
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_FUNCTION_USAGE: Code = Code::new("E022");
    pub const MISSING_OPERATOR: Code = Code::new("E023");
    pub const TOKENIZATION_FAILED: Code = Code::new("E024");
}

pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const LEXICAL_VALIDATION_PASSED: Code = Code::new("I021");
    pub const TOKENS_RECLASSIFIED: Code = Code::new("I022");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        use Severity::*;

        let entries = [
            ErrorMetadata::new(
                "ERR001",
                "System",
                Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Critical,
                false,
                true,
                "Logging or runtime initialization failure",
                "Check environment configuration",
            ),
            ErrorMetadata::new(
                "ERR004",
                "System",
                High,
                false,
                true,
                "Runtime configuration could not be loaded",
                "Check the configuration file path and TOML syntax",
            ),
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Medium,
                false,
                true,
                "Source file not found at specified path",
                "Check the file path and ensure the file exists",
            ),
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Low,
                true,
                false,
                "File does not have the .tuturl extension",
                "Rename the file or disable the extension requirement",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Split the source or build with a larger limit profile",
            ),
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Medium,
                false,
                true,
                "File is empty",
                "Provide a source file with content",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Medium,
                false,
                true,
                "File is not valid UTF-8",
                "Re-save the source as UTF-8",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Medium,
                false,
                true,
                "I/O error while reading file",
                "Retry, then check the underlying storage",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Medium,
                false,
                true,
                "Path is not a regular file",
                "Point the tool at a source file, not a directory",
            ),
            ErrorMetadata::new(
                "E020",
                "Lexical",
                High,
                true,
                false,
                "Character does not start any token",
                "Remove the character or quote it inside a string",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Low,
                true,
                false,
                "String literal reaches end of input without a closing quote",
                "Add the matching closing quote",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                High,
                true,
                false,
                "Function name is not followed by an identifier argument",
                "Pass an identifier directly after the function name",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                High,
                true,
                false,
                "Two identifiers appear without an operator between them",
                "Insert an operator between the identifiers",
            ),
            ErrorMetadata::new(
                "E024",
                "Lexical",
                High,
                false,
                true,
                "Tokenization recorded one or more errors",
                "Fix the reported diagnostics and run again",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Success codes carry no metadata; they are recognised by prefix
pub fn is_success_code(code: &str) -> bool {
    code.starts_with('I')
}
