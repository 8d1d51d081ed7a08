//! # Codec Probe Module
//!
//! Questo modulo determina se un file video è già nel codec di destinazione.
//!
//! ## Responsabilità:
//! - Invoca ffprobe sul primo stream video con output JSON
//! - Interpreta `codec_name` confrontandolo (case-insensitive) con gli alias del target
//! - Restituisce un risultato tri-stato: `AlreadyTarget`, `NeedsConversion`, `Undetermined`
//! - Mappa esplicitamente `Undetermined` su `NeedsConversion` (fail-open)
//!
//! ## Invocazione:
//! ```text
//! ffprobe -v error -select_streams v:0 -show_entries stream=codec_name -of json <file>
//! ```
//!
//! ## Output atteso:
//! ```json
//! { "streams": [ { "codec_name": "hevc" } ] }
//! ```
//!
//! ## Fail-open:
//! Errori di spawn, JSON malformato o stream mancanti producono `Undetermined`:
//! il file viene messo in coda per la conversione e il dettaglio va nei log.

use crate::target::TargetCodec;
use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Outcome of probing a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// First video stream already uses the target codec
    AlreadyTarget { codec: String },
    /// First video stream uses some other codec
    NeedsConversion { codec: String },
    /// The prober could not tell
    Undetermined { reason: String },
}

/// Queue decision derived from a [`ProbeResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    AlreadyTarget,
    NeedsConversion,
}

impl ProbeResult {
    /// Undetermined files are converted rather than silently skipped
    pub fn decision(&self) -> Decision {
        match self {
            Self::AlreadyTarget { .. } => Decision::AlreadyTarget,
            Self::NeedsConversion { .. } | Self::Undetermined { .. } => Decision::NeedsConversion,
        }
    }
}

/// Anything able to tell the codec of a file's first video stream
pub trait CodecProbe: Send + Sync {
    fn probe<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, ProbeResult>;
}

#[derive(Deserialize, Debug)]
struct FFProbeJsonOutput {
    #[serde(default)]
    streams: Vec<FFProbeJsonStream>,
}

#[derive(Deserialize, Debug)]
struct FFProbeJsonStream {
    codec_name: Option<String>,
}

/// Classify raw ffprobe JSON output against a target codec
pub fn parse_probe_output(stdout: &str, target: &TargetCodec) -> ProbeResult {
    let parsed: FFProbeJsonOutput = match serde_json::from_str(stdout) {
        Ok(parsed) => parsed,
        Err(e) => {
            return ProbeResult::Undetermined {
                reason: format!("malformed ffprobe output: {}", e),
            }
        }
    };

    let Some(stream) = parsed.streams.first() else {
        return ProbeResult::Undetermined {
            reason: "no video stream reported".to_string(),
        };
    };

    match stream.codec_name.as_deref() {
        Some(codec) if target.matches(codec) => ProbeResult::AlreadyTarget {
            codec: codec.to_string(),
        },
        Some(codec) if !codec.trim().is_empty() => ProbeResult::NeedsConversion {
            codec: codec.to_string(),
        },
        _ => ProbeResult::Undetermined {
            reason: "video stream has no codec name".to_string(),
        },
    }
}

/// Codec probe backed by the external ffprobe executable
#[derive(Debug, Clone)]
pub struct FfprobeClassifier {
    ffprobe: PathBuf,
    target: &'static TargetCodec,
}

impl FfprobeClassifier {
    pub fn new(ffprobe: PathBuf, target: &'static TargetCodec) -> Self {
        Self { ffprobe, target }
    }

    async fn run_probe(&self, path: &Path) -> ProbeResult {
        debug!("Probing codec: {}", path.display());

        let output = Command::new(&self.ffprobe)
            .args([
                "-v", "error",
                "-select_streams", "v:0",
                "-show_entries", "stream=codec_name",
                "-of", "json",
            ])
            .arg(path)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return ProbeResult::Undetermined {
                    reason: format!("failed to execute {}: {}", self.ffprobe.display(), e),
                }
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let result = parse_probe_output(&stdout, self.target);

        if let ProbeResult::Undetermined { reason } = &result {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "Error checking codec of {}: {} {}",
                path.display(),
                reason,
                stderr.trim()
            );
        } else {
            debug!("Probe result for {}: {:?}", path.display(), result);
        }

        result
    }
}

impl CodecProbe for FfprobeClassifier {
    fn probe<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, ProbeResult> {
        self.run_probe(path).boxed()
    }
}
