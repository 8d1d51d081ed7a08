//! # Converter Module
//!
//! Modulo che separa le responsabilità della conversione in sottomoduli:
//! - `batch_converter`: Orchestratore sequenziale del batch
//! - `transcoder`: Invocazione di ffmpeg per un singolo file
//! - `progress_tracker`: Rendering degli eventi (progress bar o JSON)
//! - `path_resolver`: Calcolo centralizzato dei path di output

pub mod batch_converter;
pub mod transcoder;
pub mod progress_tracker;
pub mod path_resolver;

pub use batch_converter::{BatchConverter, BatchReport, BatchSettings, FileOutcome};
pub use transcoder::{ConversionJob, FfmpegTranscoder, Transcode};
pub use progress_tracker::ProgressTracker;
pub use path_resolver::PathResolver;
