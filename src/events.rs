//! # Converter Events Module
//!
//! Questo modulo definisce i messaggi emessi durante selezione e conversione.
//!
//! ## Responsabilità:
//! - Gli eventi viaggiano dal task di conversione in background verso la CLI
//!   tramite canale `tokio::sync::mpsc` (nessuno stato condiviso mutabile)
//! - Serializzazione JSON (un oggetto per riga) per uso programmatico
//!
//! ## Tipi di messaggi:
//! - `queued` / `already_target`: esito della selezione di un file
//! - `started`: inizio batch con totale file e preset
//! - `file_started`: inizio conversione di un file
//! - `file_converted` / `file_failed`: esito di un file
//! - `progress`: percentuale dopo ogni file (anche se fallito)
//! - `completed`: fine batch, emesso una sola volta

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConverterEvent {
    Queued {
        path: PathBuf,
    },

    AlreadyTarget {
        path: PathBuf,
    },

    Started {
        total: usize,
        output_dir: PathBuf,
        quality: String,
        crf: u8,
    },

    FileStarted {
        index: usize,
        total: usize,
        source: PathBuf,
    },

    FileConverted {
        source: PathBuf,
        output: PathBuf,
        output_size: Option<u64>,
        duration_seconds: f64,
    },

    FileFailed {
        source: PathBuf,
        output: PathBuf,
        error: String,
    },

    Progress {
        completed: usize,
        total: usize,
        percentage: f64,
    },

    Completed {
        total: usize,
        converted: usize,
        failed: usize,
    },
}

impl ConverterEvent {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di progresso
    pub fn progress(completed: usize, total: usize) -> Self {
        Self::Progress {
            completed,
            total,
            percentage: progress_percent(completed, total),
        }
    }
}

/// Percentage of the batch done after `completed` of `total` files
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed as f64 * 100.0 / total as f64
}
