use crate::config::compile_time::lexical::MAX_RENDERED_DIAGNOSTICS;
use crate::logging::{self, codes, Code, LogEvent};
use crate::tokens::{Token, TokenType};
use crate::utils::Position;
use serde::Serialize;
use std::fmt;

/// Width of the `Line N:` gutter, including the `| ` separator
const GUTTER_WIDTH: usize = 12;

const ERROR_PREFIX: &str = "[  ERROR  ] ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A character that starts no token and is not whitespace
    InvalidCharacter,
    /// A function not directly followed by an identifier
    MalformedFunctionUsage,
    /// Two identifiers with nothing between them
    MissingOperator,
}

impl DiagnosticKind {
    pub fn code(&self) -> Code {
        match self {
            DiagnosticKind::InvalidCharacter => codes::lexical::INVALID_CHARACTER,
            DiagnosticKind::MalformedFunctionUsage => codes::lexical::MALFORMED_FUNCTION_USAGE,
            DiagnosticKind::MissingOperator => codes::lexical::MISSING_OPERATOR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidCharacter => "invalid character",
            DiagnosticKind::MalformedFunctionUsage => "malformed function usage",
            DiagnosticKind::MissingOperator => "missing operator",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded problem, anchored at the lexeme it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub lexeme: String,
    pub position: Position,
    pub expected: Option<TokenType>,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        let subject = match self.kind {
            DiagnosticKind::InvalidCharacter => "Invalid character",
            _ => "Invalid token",
        };
        format!(
            "{}: {} at line: {} and column: {}",
            subject, self.lexeme, self.position.line, self.position.column
        )
    }

    pub fn expected_message(&self) -> Option<String> {
        self.expected
            .map(|expected| format!("Expected token: {}", expected))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Collects diagnostics for one source buffer and renders them against it
#[derive(Debug)]
pub struct ErrorManager<'src> {
    source: &'src str,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> ErrorManager<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            diagnostics: Vec::new(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Record an error located at `token`.
    ///
    /// Reporting never touches the token stream; it only appends to the
    /// diagnostics list and emits the rendered report.
    pub fn report_token_error(
        &mut self,
        kind: DiagnosticKind,
        token: &Token,
        expected: Option<TokenType>,
    ) {
        self.record(Diagnostic {
            kind,
            lexeme: token.value().to_string(),
            position: token.position(),
            expected,
        });
    }

    /// Record a character that no lexeme rule accepts
    pub fn report_invalid_character(&mut self, ch: char, position: Position) {
        self.record(Diagnostic {
            kind: DiagnosticKind::InvalidCharacter,
            lexeme: ch.to_string(),
            position,
            expected: None,
        });
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        let index = self.diagnostics.len();

        if index < MAX_RENDERED_DIAGNOSTICS {
            self.emit(&diagnostic);
        } else if index == MAX_RENDERED_DIAGNOSTICS {
            logging::dispatch_event(
                LogEvent::warning("Further diagnostics suppressed")
                    .with_context("limit", &MAX_RENDERED_DIAGNOSTICS.to_string()),
            );
        }

        self.diagnostics.push(diagnostic);
    }

    fn emit(&self, diagnostic: &Diagnostic) {
        let rendered = self.render(diagnostic);
        let expected = diagnostic
            .expected
            .map(|t| t.to_string())
            .unwrap_or_default();

        let mut context = vec![("lexeme", diagnostic.lexeme.as_str())];
        if !expected.is_empty() {
            context.push(("expected", expected.as_str()));
        }

        logging::log_error_with_context(
            diagnostic.kind.code(),
            &diagnostic.message(),
            Some(diagnostic.position),
            Some(&rendered),
            context,
        );
    }

    /// Source line, caret line, blank line, then the error messages
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let Position { line, column } = diagnostic.position;

        let mut out = String::new();
        out.push_str(&format_gutter(line));
        out.push_str(self.line_text(line));
        out.push('\n');

        out.push_str(&" ".repeat(GUTTER_WIDTH + column as usize));
        out.push_str("~\n\n");

        out.push_str(ERROR_PREFIX);
        out.push_str(&diagnostic.message());

        if let Some(expected) = diagnostic.expected_message() {
            out.push('\n');
            out.push_str(ERROR_PREFIX);
            out.push_str(&expected);
        }

        out
    }

    /// Text of a 1-based line without its trailing whitespace.
    ///
    /// Leading whitespace is kept so the caret column lines up.
    fn line_text(&self, line: u32) -> &'src str {
        let index = (line as usize).saturating_sub(1);
        self.source
            .split('\n')
            .nth(index)
            .map(str::trim_end)
            .unwrap_or("")
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// `Line N:` padded so that the `| ` separator ends at the gutter width
fn format_gutter(line: u32) -> String {
    let label = format!("Line {}:", line);
    let pad = (GUTTER_WIDTH - 2).saturating_sub(label.len());
    format!("{}{}| ", label, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::analyze;
    use crate::logging::service::create_test_logger;
    use crate::logging::{LogLevel, LoggingService, MemoryLogger};
    use crate::tokens::KnownFunctions;
    use std::path::PathBuf;
    use std::sync::{Arc, OnceLock};

    fn ident(value: &str, line: u32, column: u32) -> Token {
        Token::new(TokenType::Identifier, value, line, column)
    }

    #[test]
    fn test_gutter_width() {
        assert_eq!(format_gutter(1), "Line 1:   | ");
        assert_eq!(format_gutter(42), "Line 42:  | ");
        assert_eq!(format_gutter(1000), "Line 1000:| ");
        assert_eq!(format_gutter(12345), "Line 12345:| ");
    }

    #[test]
    fn test_flag_is_monotonic() {
        let mut errors = ErrorManager::new("foo bar");
        assert!(!errors.has_errors());

        errors.report_token_error(
            DiagnosticKind::MissingOperator,
            &ident("bar", 1, 6),
            Some(TokenType::Operator),
        );
        assert!(errors.has_errors());

        errors.report_invalid_character('@', Position::new(1, 0));
        assert!(errors.has_errors());
        assert_eq!(errors.error_count(), 2);
    }

    #[test]
    fn test_render_missing_operator() {
        let mut errors = ErrorManager::new("foo bar\n");
        errors.report_token_error(
            DiagnosticKind::MissingOperator,
            &ident("bar", 1, 6),
            Some(TokenType::Operator),
        );

        let rendered = errors.render(&errors.diagnostics()[0]);
        let expected = [
            "Line 1:   | foo bar",
            "                  ~",
            "",
            "[  ERROR  ] Invalid token: bar at line: 1 and column: 6",
            "[  ERROR  ] Expected token: Operator",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_caret_sits_under_reported_column() {
        let source = "x\n  print 5";
        let mut errors = ErrorManager::new(source);
        errors.report_token_error(
            DiagnosticKind::MalformedFunctionUsage,
            &Token::new(TokenType::Number, "5", 2, 8),
            Some(TokenType::Identifier),
        );

        let rendered = errors.render(&errors.diagnostics()[0]);
        let mut lines = rendered.lines();
        let source_line = lines.next().unwrap();
        let caret_line = lines.next().unwrap();

        assert_eq!(source_line, "Line 2:   |   print 5");
        let caret = caret_line.find('~').unwrap();
        assert_eq!(&source_line[caret..caret + 1], "5");
    }

    #[test]
    fn test_render_invalid_character_has_no_expected_line() {
        let mut errors = ErrorManager::new("a @ b");
        errors.report_invalid_character('@', Position::new(1, 2));

        let diagnostic = &errors.diagnostics()[0];
        assert_eq!(
            diagnostic.message(),
            "Invalid character: @ at line: 1 and column: 2"
        );
        assert!(diagnostic.expected_message().is_none());

        let rendered = errors.render(diagnostic);
        assert!(rendered.ends_with("[  ERROR  ] Invalid character: @ at line: 1 and column: 2"));
        assert!(!rendered.contains("Expected token"));
    }

    #[test]
    fn test_render_past_last_line_uses_empty_text() {
        let mut errors = ErrorManager::new("print\n");
        errors.report_token_error(
            DiagnosticKind::MalformedFunctionUsage,
            &Token::eof(2, 0),
            Some(TokenType::Identifier),
        );

        let rendered = errors.render(&errors.diagnostics()[0]);
        assert!(rendered.starts_with("Line 2:   | \n"));
        assert!(rendered.contains("Invalid token: EOF at line: 2 and column: 0"));
    }

    #[test]
    fn test_all_diagnostics_recorded_past_render_limit() {
        let source = "@".repeat(MAX_RENDERED_DIAGNOSTICS + 3);
        let mut errors = ErrorManager::new(&source);
        for column in 0..source.len() as u32 {
            errors.report_invalid_character('@', Position::new(1, column));
        }
        assert_eq!(errors.error_count(), MAX_RENDERED_DIAGNOSTICS + 3);
    }

    /// The global logger is process-wide, so the tests that observe the
    /// logging channel share one capture installed on first use.
    fn captured_events() -> &'static Arc<MemoryLogger> {
        static CAPTURE: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
        CAPTURE.get_or_init(|| {
            let logger = create_test_logger();
            let service = LoggingService::new(logger.clone(), LogLevel::Warning);
            logging::init_global_logging_with_service(Arc::new(service))
                .expect("no other test installs a global logger");
            logger
        })
    }

    /// Events raised under `file`; other tests log to the same capture
    fn events_for(logger: &MemoryLogger, file: &str) -> Vec<LogEvent> {
        logger
            .get_events()
            .into_iter()
            .filter(|event| event.context.get("file").map(String::as_str) == Some(file))
            .collect()
    }

    #[test]
    fn test_reports_reach_logging_channel() {
        let logger = captured_events();
        let outcome = logging::with_file_context(PathBuf::from("channel.tuturl"), 1, || {
            analyze("a @ b", &KnownFunctions::default())
        });
        assert!(!outcome.is_success());

        let events = events_for(logger, "channel.tuturl");

        let invalid: Vec<_> = events
            .iter()
            .filter(|e| e.code == codes::lexical::INVALID_CHARACTER)
            .collect();
        assert_eq!(invalid.len(), 1);
        assert!(invalid[0].is_error());
        assert_eq!(invalid[0].message, "Invalid character: @ at line: 1 and column: 2");
        assert_eq!(invalid[0].position, Some(Position::new(1, 2)));
        assert_eq!(
            invalid[0].snippet.as_deref(),
            Some(
                format!(
                    "Line 1:   | a @ b\n{}~\n\n[  ERROR  ] Invalid character: @ at line: 1 and column: 2",
                    " ".repeat(GUTTER_WIDTH + 2)
                )
                .as_str()
            )
        );
        assert_eq!(invalid[0].context.get("lexeme").map(String::as_str), Some("@"));
        assert!(!invalid[0].context.contains_key("expected"));

        let missing: Vec<_> = events
            .iter()
            .filter(|e| e.code == codes::lexical::MISSING_OPERATOR)
            .collect();
        assert_eq!(missing.len(), 1);
        assert!(missing[0].is_error());
        assert_eq!(missing[0].position, Some(Position::new(1, 4)));
        assert_eq!(
            missing[0].snippet.as_deref(),
            Some(
                format!(
                    "Line 1:   | a @ b\n{}~\n\n\
                     [  ERROR  ] Invalid token: b at line: 1 and column: 4\n\
                     [  ERROR  ] Expected token: Operator",
                    " ".repeat(GUTTER_WIDTH + 4)
                )
                .as_str()
            )
        );
        assert_eq!(missing[0].context.get("lexeme").map(String::as_str), Some("b"));
        assert_eq!(
            missing[0].context.get("expected").map(String::as_str),
            Some("Operator")
        );

        assert!(events.iter().all(|e| !e.is_warning()));
    }

    #[test]
    fn test_render_limit_emits_single_suppression_warning() {
        let logger = captured_events();
        let source = "@".repeat(MAX_RENDERED_DIAGNOSTICS + 5);
        let outcome = logging::with_file_context(PathBuf::from("flood.tuturl"), 2, || {
            analyze(&source, &KnownFunctions::default())
        });
        assert_eq!(outcome.diagnostics.len(), MAX_RENDERED_DIAGNOSTICS + 5);

        let events = events_for(logger, "flood.tuturl");

        let rendered = events
            .iter()
            .filter(|e| e.code == codes::lexical::INVALID_CHARACTER)
            .count();
        assert_eq!(rendered, MAX_RENDERED_DIAGNOSTICS);

        let warnings: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Further diagnostics suppressed");
        assert_eq!(
            warnings[0].context.get("limit"),
            Some(&MAX_RENDERED_DIAGNOSTICS.to_string())
        );
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(DiagnosticKind::InvalidCharacter.code().as_str(), "E020");
        assert_eq!(DiagnosticKind::MalformedFunctionUsage.code().as_str(), "E022");
        assert_eq!(DiagnosticKind::MissingOperator.code().as_str(), "E023");
    }
}
