//! # H.264 Batch Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `tool_resolver`: Ricerca di ffmpeg/ffprobe (PATH, directory note, nome nudo)
//! - `probe`: Classificazione del codec del primo stream video con ffprobe
//! - `queue`: Coda ordinata dei file da convertire, senza duplicati
//! - `converter`: Conversione sequenziale con ffmpeg e reporting del progresso
//! - `session`: Stato esplicito della sessione (config + coda)
//! - `quality`: Preset di qualità e relativi valori CRF
//! - `config`: Configurazione e validazione parametri
//! - `events`: Eventi emessi verso la UI (progress bar o JSON)
//! - `error`: Tipi di errore custom
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use h264_batch_converter::{Config, Session, FfprobeClassifier, FfmpegTranscoder, ResolvedTools};
//!
//! let tools = ResolvedTools::global();
//! let classifier = FfprobeClassifier::new(tools.ffprobe.clone(), &TargetCodec::H264);
//! let mut session = Session::new(Config::default());
//! session.add_files(paths, &classifier).await;
//! let (handle, events) = session.start(Arc::new(FfmpegTranscoder::new(tools.ffmpeg.clone(), None)))?;
//! ```

pub mod utils;
pub mod config;
pub mod error;
pub mod events;
pub mod file_manager;
pub mod quality;
pub mod target;
pub mod tool_resolver;
pub mod probe;
pub mod queue;
pub mod converter;
pub mod progress;
pub mod session;

pub use config::Config;
pub use error::ConvertError;
pub use events::ConverterEvent;
pub use quality::QualityPreset;
pub use target::TargetCodec;
pub use tool_resolver::{ResolvedTools, ToolLocator};
pub use probe::{CodecProbe, Decision, FfprobeClassifier, ProbeResult};
pub use queue::{AddOutcome, JobQueue, PendingFile};
pub use converter::{BatchConverter, BatchReport, ConversionJob, FfmpegTranscoder, ProgressTracker, Transcode};
pub use session::Session;
