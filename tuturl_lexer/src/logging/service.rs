//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use crate::config::runtime::LoggingPreferences;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level-filtering front for a single logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Service built from the installed runtime preferences
    pub fn with_config() -> Self {
        Self::from_preferences(&config::current_preferences())
    }

    /// With console output disabled events are dropped at the backend, so
    /// per-file collection and the cargo-style summary are unaffected.
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let min_level = preferences.min_log_level.to_events_log_level();
        let logger: Arc<dyn Logger> = if !preferences.enable_console_logging {
            Arc::new(NullLogger)
        } else if preferences.use_structured_logging {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Human-readable console output
///
/// Events that carry a rendered source snippet print the snippet verbatim,
/// since it already contains the full diagnostic report.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }

        let text = match &event.snippet {
            Some(snippet) => snippet.clone(),
            None => event.format(),
        };
        match event.level {
            LogLevel::Error => eprintln!("{}", text),
            _ => println!("{}", text),
        }
    }
}

/// One JSON object per line
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }

        let line = event.format_json().unwrap_or_else(|_| event.format());
        match event.level {
            LogLevel::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// Discards every event
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// In-memory event sink for tests, bounded by the compile-time buffer size
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        // A poisoned buffer still holds valid events
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_info() && e.code == code)
    }

    pub fn get_summary(&self) -> EventSummary {
        let events = self.lock();

        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();

        let max_events = config::get_error_buffer_size().max(1);
        if events.len() >= max_events {
            let remove_count = events.len() + 1 - max_events;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

pub fn create_test_logger() -> Arc<MemoryLogger> {
    Arc::new(MemoryLogger::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_console_logger_prints_without_panicking() {
        let logger = ConsoleLogger::new(LogLevel::Debug);
        logger.log(&LogEvent::info("plain"));
        logger.log(
            &LogEvent::error(codes::lexical::MISSING_OPERATOR, "Invalid token: b")
                .with_snippet("Line 1:   | a b"),
        );
    }

    #[test]
    fn test_structured_logger() {
        let logger = StructuredLogger::new(LogLevel::Debug);
        logger.log(
            &LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "missing")
                .with_context("key", "value"),
        );
    }

    #[test]
    fn test_memory_logger() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::info("Message 1"));
        logger.log(&LogEvent::error(
            codes::lexical::INVALID_CHARACTER,
            "Invalid character: @",
        ));

        assert_eq!(logger.event_count(), 2);
        assert_eq!(logger.get_errors().len(), 1);
        assert!(logger.has_error_with_code(codes::lexical::INVALID_CHARACTER));
        assert_eq!(
            logger
                .get_events_with_code(codes::lexical::INVALID_CHARACTER)
                .len(),
            1
        );

        let summary = logger.get_summary();
        assert_eq!(summary.total_count, 2);
        assert!(summary.has_errors());
        assert_eq!(summary.info_count, 1);

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_memory_logger_is_bounded() {
        let logger = MemoryLogger::new();
        let capacity = config::get_error_buffer_size();
        for i in 0..capacity + 5 {
            logger.log(&LogEvent::debug(&format!("event {}", i)));
        }
        assert_eq!(logger.event_count(), capacity);
        assert_eq!(logger.get_events()[0].message, "event 5");
    }

    #[test]
    fn test_console_disabled_drops_events() {
        let preferences = LoggingPreferences {
            use_structured_logging: false,
            enable_console_logging: false,
            min_log_level: crate::config::runtime::LogLevel::Debug,
            enable_cargo_style_output: true,
        };
        let service = LoggingService::from_preferences(&preferences);

        assert_eq!(service.min_level(), LogLevel::Debug);
        assert!(service.should_log(LogLevel::Debug));
        service.log_error(codes::system::INTERNAL_ERROR, "dropped");
        service.log_debug("dropped");
    }

    #[test]
    fn test_console_disabled_still_collects_per_file() {
        use crate::logging::collector::ErrorCollector;
        use std::path::PathBuf;

        let preferences = LoggingPreferences {
            enable_console_logging: false,
            ..LoggingPreferences::default()
        };
        let service = LoggingService::from_preferences(&preferences);
        let collector = ErrorCollector::new();
        let path = PathBuf::from("quiet.tuturl");

        let event = LogEvent::error(codes::lexical::MISSING_OPERATOR, "Invalid token: b");
        service.log_event(event.clone());
        collector.record_event(&path, event);

        assert_eq!(collector.get_file_errors(&path).len(), 1);
        assert!(crate::logging::collector::format_cargo_style_errors(&collector)
            .contains("E023"));
    }

    #[test]
    fn test_memory_logger_at_capacity_keeps_newest() {
        let logger = MemoryLogger::new();
        let capacity = config::get_error_buffer_size();
        for i in 0..capacity {
            logger.log(&LogEvent::debug(&format!("event {}", i)));
        }
        logger.log(&LogEvent::info("newest"));

        let events = logger.get_events();
        assert_eq!(events.len(), capacity);
        assert_eq!(events[capacity - 1].message, "newest");
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_debug("Debug message");
        service.log_info("Info message");
        service.log_success(codes::success::TOKENIZATION_COMPLETE, "done");
        service.log_error(codes::system::INTERNAL_ERROR, "Error message");

        assert_eq!(logger.event_count(), 1);
        assert!(logger.has_error_with_code(codes::system::INTERNAL_ERROR));
        assert!(!service.should_log(LogLevel::Info));
    }
}
