//! Per-file event collection with cargo-style summaries

use super::config::get_max_log_events_per_file;
use super::events::LogEvent;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

/// Error and warning events grouped by the file that produced them
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
        }
    }

    /// Record an event; past the per-file limit a single overflow warning is kept
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = lock(&self.file_events);
        let file_events = events.entry(file_path.to_path_buf()).or_default();

        let limit = get_max_log_events_per_file();
        if file_events.len() < limit {
            file_events.push(event);
        } else if file_events.len() == limit {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                limit
            )));
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        lock(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.get_file_events(file_path)
            .into_iter()
            .filter(|e| e.is_error())
            .collect()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.file_events).clone()
    }

    pub fn file_elapsed(&self, file_path: &Path) -> Option<Duration> {
        lock(&self.file_contexts)
            .get(file_path)
            .map(FileProcessingContext::elapsed)
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.file_events);
        let contexts = lock(&self.file_contexts);

        let mut summary = ProcessingSummary {
            total_files: contexts.len().max(events.len()),
            ..Default::default()
        };

        for file_events in events.values() {
            if file_events.iter().any(LogEvent::is_error) {
                summary.failed_files += 1;
            }
            summary.total_errors += file_events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += file_events.iter().filter(|e| e.is_warning()).count();
        }
        summary.successful_files = summary.total_files - summary.failed_files;

        summary
    }

    pub fn total_event_count(&self) -> usize {
        lock(&self.file_events).values().map(Vec::len).sum()
    }

    pub fn clear(&self) {
        lock(&self.file_events).clear();
        lock(&self.file_contexts).clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Render collected events the way cargo reports compiler diagnostics
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let reportable: Vec<_> = events
            .iter()
            .filter(|e| e.is_error() || e.is_warning())
            .collect();
        if reportable.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in reportable {
            let kind = if event.is_error() { "error" } else { "warning" };
            let location = event
                .position
                .map(|p| format!(" --> {}:{}:{}", file_path.display(), p.line, p.column))
                .unwrap_or_default();

            output.push_str(&format!(
                "{}[{}]: {}{}\n",
                kind,
                event.code.as_str(),
                event.message,
                location
            ));

            for (key, value) in &event.context {
                if key != "file" && key != "file_id" {
                    output.push_str(&format!("  = {}: {}\n", key, value));
                }
            }

            if event.is_error() {
                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_record_and_summarize() {
        let collector = ErrorCollector::new();
        let broken = PathBuf::from("broken.tuturl");
        let clean = PathBuf::from("clean.tuturl");

        collector.record_file_context(FileProcessingContext::new(broken.clone(), 0));
        collector.record_file_context(FileProcessingContext::new(clean.clone(), 1));
        collector.record_event(
            &broken,
            LogEvent::error(codes::lexical::MISSING_OPERATOR, "Invalid token: b"),
        );
        collector.record_event(&broken, LogEvent::warning("unterminated string"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
        assert_eq!(collector.get_file_errors(&broken).len(), 1);
        assert!(collector.file_elapsed(&clean).is_some());
    }

    #[test]
    fn test_per_file_limit_adds_single_overflow_warning() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("noisy.tuturl");

        let limit = get_max_log_events_per_file();
        for _ in 0..limit + 10 {
            collector.record_event(&path, LogEvent::error(codes::lexical::INVALID_CHARACTER, "x"));
        }

        let events = collector.get_file_events(&path);
        assert_eq!(events.len(), limit + 1);
        assert!(events.last().is_some_and(LogEvent::is_warning));
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("main.tuturl");
        collector.record_event(
            &path,
            LogEvent::error(codes::lexical::MISSING_OPERATOR, "Invalid token: bar")
                .with_position(Position::new(1, 6))
                .with_context("expected", "Operator"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking main.tuturl..."));
        assert!(output.contains("error[E023]: Invalid token: bar --> main.tuturl:1:6"));
        assert!(output.contains("  = expected: Operator"));
        assert!(output.contains("  = help: Insert an operator"));
        assert!(output.ends_with("Total errors: 1\n"));

        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
    }
}
