pub mod config;
pub mod diagnostics;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;
pub mod utils;

pub use diagnostics::{Diagnostic, DiagnosticKind, ErrorManager};
pub use lexical::{tokenize, LexerError, LexicalMetrics, Tokenizer};
pub use pipeline::{PipelineError, PipelineOutput, PipelineResult};
pub use tokens::{KnownFunctions, Token, TokenStream, TokenType};
