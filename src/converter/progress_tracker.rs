//! # Progress Tracking Module
//!
//! Consuma gli eventi del convertitore e li presenta all'utente.
//! Gestisce sia output JSON che progress bar tradizionale.
//!
//! Quando la progress bar non disegna (stderr non è un terminale), le righe
//! per file e il riepilogo finale vengono scritti come testo semplice.

use crate::{
    events::ConverterEvent,
    progress::{BatchStats, ProgressManager},
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedReceiver;

/// Renders converter events and keeps the batch statistics
pub struct ProgressTracker {
    json_output: bool,
    bar: Option<ProgressManager>,
    /// Destination of human-mode lines the bar cannot show
    plain: Box<dyn Write + Send>,
    plain_only: bool,
    already_target: Vec<PathBuf>,
    stats: BatchStats,
}

impl ProgressTracker {
    pub fn new(json_output: bool) -> Self {
        Self {
            json_output,
            bar: None,
            plain: Box::new(io::stderr()),
            plain_only: false,
            already_target: Vec::new(),
            stats: BatchStats::new(),
        }
    }

    /// Human-mode tracker without a bar, writing every line to `writer`
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            plain: Box::new(writer),
            plain_only: true,
            ..Self::new(false)
        }
    }

    /// Gestisce un singolo evento, aggiornando statistiche e output
    pub fn handle(&mut self, event: &ConverterEvent) {
        if self.json_output {
            event.emit();
        }

        match event {
            ConverterEvent::Queued { .. } => {}
            ConverterEvent::AlreadyTarget { path } => {
                self.stats.add_already_target();
                self.already_target.push(path.clone());
            }
            ConverterEvent::Started { total, .. } => {
                self.stats.total = *total;
                if !self.json_output {
                    self.bar = Some(if self.plain_only {
                        ProgressManager::hidden(*total as u64)
                    } else {
                        ProgressManager::new(*total as u64)
                    });
                }
            }
            ConverterEvent::FileStarted { index, total, source } => {
                self.with_bar(|bar| {
                    bar.set_message(&format!("Converting {}/{}: {}", index, total, file_name(source)))
                });
            }
            ConverterEvent::FileConverted { source, output, output_size, .. } => {
                self.stats.add_converted(*output_size);
                self.line(&format!("✅ {} -> {}", file_name(source), output.display()));
            }
            ConverterEvent::FileFailed { source, error, .. } => {
                self.stats.add_failed();
                self.line(&format!("❌ Error converting {}: {}", file_name(source), error));
            }
            ConverterEvent::Progress { completed, percentage, .. } => {
                self.stats.percentage = *percentage;
                self.with_bar(|bar| bar.set_position(*completed as u64));
            }
            ConverterEvent::Completed { .. } => {
                let summary = self.stats.format_summary();
                match self.bar.take() {
                    Some(bar) if !bar.is_hidden() => bar.finish(&summary),
                    Some(_) => self.write_plain(&summary),
                    None => {}
                }
            }
        }
    }

    /// Consuma gli eventi fino alla chiusura del canale
    pub async fn drive(&mut self, mut events: UnboundedReceiver<ConverterEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(&event);
        }
    }

    /// Notice for files skipped because they already are H.264
    pub fn already_target_notice(&self) -> Option<String> {
        let names: Vec<String> = self.already_target.iter().map(|p| file_name(p)).collect();
        match names.len() {
            0 => None,
            1 => Some(format!(
                "The file {} is already in H.264 format. It has been skipped.",
                names[0]
            )),
            _ => Some(format!(
                "The following files are already in H.264 format: {}. They have been skipped.",
                names.join(", ")
            )),
        }
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressManager)) {
        if let Some(ref bar) = self.bar {
            f(bar);
        }
    }

    /// Per-file line in human mode: above the bar, or plain text when it is hidden
    fn line(&mut self, text: &str) {
        match self.bar.as_ref().map(ProgressManager::is_hidden) {
            Some(false) => self.with_bar(|bar| bar.println(text)),
            Some(true) => self.write_plain(text),
            None => {}
        }
    }

    fn write_plain(&mut self, text: &str) {
        // Nowhere left to report a broken stderr
        let _ = writeln!(self.plain, "{}", text);
        let _ = self.plain.flush();
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
