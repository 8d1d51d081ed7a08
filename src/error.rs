//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom della libreria.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare gli errori possibili
//! - Conserva l'output diagnostico di ffmpeg quando una conversione fallisce
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (spawn del processo, directory di output, etc.)
//! - `ConversionFailed`: ffmpeg è uscito con status diverso da zero
//! - `Timeout`: ffmpeg non ha terminato entro il timeout configurato
//! - `EmptyQueue`: Conversione avviata senza file in coda
//!
//! ## Esempio:
//! ```rust,ignore
//! if !output.status.success() {
//!     return Err(ConvertError::ConversionFailed { path, code, stderr });
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for batch conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("FFmpeg error converting {}: {stderr}", path.display())]
    ConversionFailed {
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("FFmpeg timed out after {secs}s converting {}", path.display())]
    Timeout { path: PathBuf, secs: u64 },

    #[error("No files queued for conversion")]
    EmptyQueue,
}
