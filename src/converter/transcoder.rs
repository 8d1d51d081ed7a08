//! # Transcoder Module
//!
//! Questo modulo esegue la conversione di un singolo file con FFmpeg.
//!
//! ## Responsabilità:
//! - Costruzione della lista argomenti di ffmpeg a partire da `ConversionJob`
//! - Esecuzione del processo con output catturato
//! - Classificazione dell'esito tramite exit status
//! - Timeout opzionale (default: nessuno, il processo può durare a piacere)
//!
//! ## Argomenti ffmpeg:
//! ```text
//! -i <input> -c:v libx264 -crf <q> -profile:v main -level 4.0 -pix_fmt yuv420p
//! -c:a aac -b:a 192k -movflags +faststart -preset medium -y <output>
//! ```
//!
//! ## Controllo qualità (CRF):
//! - 18: Alta qualità, file grandi
//! - 23: Bilanciato (default)
//! - 28: File piccoli

use crate::args;
use crate::error::ConvertError;
use crate::target::TargetCodec;
use futures::future::{BoxFuture, FutureExt};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// One ffmpeg invocation, created right before the transcoder runs
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub output: PathBuf,
    pub crf: u8,
    pub target: &'static TargetCodec,
}

impl ConversionJob {
    /// Encoder flags between the input and the output path
    pub fn encoder_args(&self) -> Vec<String> {
        let target = self.target;
        args![
            "-c:v", target.encoder,
            "-crf", self.crf,
            "-profile:v", target.profile,
            "-level", target.level,
            "-pix_fmt", target.pixel_format,
            "-c:a", target.audio_codec,
            "-b:a", target.audio_bitrate,
            "-movflags", "+faststart",
            "-preset", target.speed_preset,
            "-y",
        ]
    }

    /// Full argument list passed to ffmpeg
    pub fn command_args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("-i"), self.source.clone().into_os_string()];
        args.extend(self.encoder_args().into_iter().map(OsString::from));
        args.push(self.output.clone().into_os_string());
        args
    }
}

/// Anything able to run a [`ConversionJob`] to completion
pub trait Transcode: Send + Sync {
    fn transcode<'a>(&'a self, job: &'a ConversionJob) -> BoxFuture<'a, Result<(), ConvertError>>;
}

/// Transcoder backed by the external ffmpeg executable
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg: PathBuf,
    timeout: Option<Duration>,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg: PathBuf, timeout: Option<Duration>) -> Self {
        Self { ffmpeg, timeout }
    }

    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        debug!(
            "🎬 Converting video: {} (CRF: {})",
            job.source.display(),
            job.crf
        );

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(job.command_args())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| ConvertError::Timeout {
                    path: job.source.clone(),
                    secs: limit.as_secs(),
                })??,
            None => cmd.output().await?,
        };

        if !output.status.success() {
            return Err(ConvertError::ConversionFailed {
                path: job.source.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Transcode for FfmpegTranscoder {
    fn transcode<'a>(&'a self, job: &'a ConversionJob) -> BoxFuture<'a, Result<(), ConvertError>> {
        self.run(job).boxed()
    }
}
