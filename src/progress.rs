//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce la progress bar e le statistiche del batch.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking statistiche di conversione (convertiti, falliti, già H.264)
//! - Report finale con i conteggi e i byte scritti
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:02:15] [========================================] 3/3 (100%) Converting 3/3: clip.mkv
//! ```
//!
//! ## Report finale:
//! Il messaggio finale riporta sempre quanti file sono falliti, così un batch
//! con errori non viene scambiato per un batch pulito.

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages the progress bar of a batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// A bar that never draws
    pub fn hidden(total_files: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_files);
        Self { bar }
    }

    /// True when nothing the bar prints reaches a terminal
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Move the bar to the number of finished files
    pub fn set_position(&self, completed: u64) {
        self.bar.set_position(completed);
    }

    /// Set a custom message without incrementing
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Print a line above the bar
    pub fn println(&self, line: &str) {
        self.bar.println(line);
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for a conversion session
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchStats {
    pub total: usize,
    pub converted: usize,
    pub failed: usize,
    pub already_target: usize,
    pub bytes_written: u64,
    pub percentage: f64,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_converted(&mut self, output_size: Option<u64>) {
        self.converted += 1;
        self.bytes_written += output_size.unwrap_or(0);
    }

    pub fn add_failed(&mut self) {
        self.failed += 1;
    }

    pub fn add_already_target(&mut self) {
        self.already_target += 1;
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Conversion completed | Converted: {} | Failed: {} | Already H.264: {} | Written: {}",
            self.converted,
            self.failed,
            self.already_target,
            FileManager::format_size(self.bytes_written)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = BatchStats::new();
        stats.add_converted(Some(2048));
        stats.add_converted(None);
        stats.add_failed();
        stats.add_already_target();

        assert_eq!(stats.converted, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.already_target, 1);
        assert_eq!(stats.bytes_written, 2048);
        assert!(stats.has_failures());
    }

    #[test]
    fn test_hidden_bar_reports_hidden() {
        let manager = ProgressManager::hidden(3);
        assert!(manager.is_hidden());
        manager.set_position(3);
        manager.finish("done");
    }

    #[test]
    fn test_summary_mentions_failures() {
        let mut stats = BatchStats::new();
        stats.add_converted(Some(1024));
        stats.add_failed();
        let summary = stats.format_summary();
        assert!(summary.contains("Converted: 1"));
        assert!(summary.contains("Failed: 1"));
        assert!(summary.contains("1.00 KB"));
    }
}
