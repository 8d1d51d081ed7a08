//! # Batch Converter Orchestrator
//!
//! Orchestratore che converte la coda un file alla volta.
//!
//! ## Responsabilità:
//! - Crea un `ConversionJob` per ogni file, subito prima di invocare ffmpeg
//! - Un fallimento non interrompe il batch: i file rimanenti vengono comunque tentati
//! - Progresso `100 * i / n` dopo ogni file, anche se fallito
//! - Un unico evento `Completed` alla fine, con conteggio successi/fallimenti
//!
//! Gli eventi viaggiano su canale `mpsc`: l'orchestratore non tocca mai lo
//! stato di visualizzazione.

use crate::{
    config::Config,
    converter::{
        path_resolver::PathResolver,
        transcoder::{ConversionJob, Transcode},
    },
    events::ConverterEvent,
    file_manager::FileManager,
    quality::QualityPreset,
    queue::PendingFile,
    target::TargetCodec,
};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Parameters shared by every file of a batch
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub output_dir: PathBuf,
    pub quality: QualityPreset,
    pub target: &'static TargetCodec,
}

impl BatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            quality: config.quality,
            target: &TargetCodec::H264,
        }
    }

    /// Build the job for one queued file
    pub fn job_for(&self, file: &PendingFile) -> ConversionJob {
        ConversionJob {
            source: file.source().to_path_buf(),
            output: PathResolver::get_output_path(file, &self.output_dir, self.target),
            crf: self.quality.crf(),
            target: self.target,
        }
    }
}

/// Result of one file of the batch
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub job: ConversionJob,
    /// Diagnostic text when the conversion failed
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-file outcomes of a finished batch, in queue order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.converted()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Sequential orchestrator over a snapshot of the queue
pub struct BatchConverter;

impl BatchConverter {
    /// Convert every file in order, reporting through `events`
    pub async fn run<T>(
        files: &[PendingFile],
        settings: &BatchSettings,
        transcoder: &T,
        events: &UnboundedSender<ConverterEvent>,
    ) -> BatchReport
    where
        T: Transcode + ?Sized,
    {
        let total = files.len();
        let mut report = BatchReport::default();

        info!(
            "Starting conversion of {} files to {} (quality: {}, CRF {})",
            total,
            settings.output_dir.display(),
            settings.quality,
            settings.quality.crf()
        );
        Self::send(events, ConverterEvent::Started {
            total,
            output_dir: settings.output_dir.clone(),
            quality: settings.quality.label().to_string(),
            crf: settings.quality.crf(),
        });

        // Not fatal: each file then fails with ffmpeg's own error
        if let Err(e) = PathResolver::ensure_output_dir(&settings.output_dir).await {
            warn!("Failed to create output directory {}: {}", settings.output_dir.display(), e);
        }

        for (index, file) in files.iter().enumerate() {
            let job = settings.job_for(file);

            Self::send(events, ConverterEvent::FileStarted {
                index: index + 1,
                total,
                source: job.source.clone(),
            });

            let start_time = std::time::Instant::now();
            let result = transcoder.transcode(&job).await;
            let duration = start_time.elapsed();

            let outcome = match result {
                Ok(()) => {
                    debug!(
                        "Converted {} in {:.1}s",
                        file.display_name(),
                        duration.as_secs_f64()
                    );
                    let output_size = FileManager::file_size(&job.output).await.ok();
                    Self::send(events, ConverterEvent::FileConverted {
                        source: job.source.clone(),
                        output: job.output.clone(),
                        output_size,
                        duration_seconds: duration.as_secs_f64(),
                    });
                    FileOutcome { job, error: None }
                }
                Err(e) => {
                    warn!("Conversion failed for {}: {}", file.display_name(), e);
                    let message = e.to_string();
                    Self::send(events, ConverterEvent::FileFailed {
                        source: job.source.clone(),
                        output: job.output.clone(),
                        error: message.clone(),
                    });
                    FileOutcome { job, error: Some(message) }
                }
            };

            report.outcomes.push(outcome);
            Self::send(events, ConverterEvent::progress(index + 1, total));
        }

        Self::send(events, ConverterEvent::Completed {
            total,
            converted: report.converted(),
            failed: report.failed(),
        });

        report
    }

    fn send(events: &UnboundedSender<ConverterEvent>, event: ConverterEvent) {
        // The receiver may be gone if the caller stopped listening
        let _ = events.send(event);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ConvertError;
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    /// Transcoder that fails every source whose name contains "bad"
    #[derive(Default)]
    pub(crate) struct ScriptedTranscoder {
        pub seen: Mutex<Vec<ConversionJob>>,
    }

    impl Transcode for ScriptedTranscoder {
        fn transcode<'a>(&'a self, job: &'a ConversionJob) -> BoxFuture<'a, Result<(), ConvertError>> {
            self.seen.lock().unwrap().push(job.clone());
            let result = if job.source.to_string_lossy().contains("bad") {
                Err(ConvertError::ConversionFailed {
                    path: job.source.clone(),
                    code: Some(1),
                    stderr: "Invalid data found when processing input".to_string(),
                })
            } else {
                Ok(())
            };
            async move { result }.boxed()
        }
    }

    fn settings(dir: &TempDir, quality: QualityPreset) -> BatchSettings {
        BatchSettings {
            output_dir: dir.path().join("out"),
            quality,
            target: &TargetCodec::H264,
        }
    }

    fn files(names: &[&str]) -> Vec<PendingFile> {
        names.iter().map(|n| PendingFile::new(PathBuf::from(n))).collect()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ConverterEvent>) -> Vec<ConverterEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn percentages(events: &[ConverterEvent]) -> Vec<f64> {
        events
            .iter()
            .filter_map(|e| match e {
                ConverterEvent::Progress { percentage, .. } => Some(*percentage),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_progress_after_each_file() {
        let dir = TempDir::new().unwrap();
        let transcoder = ScriptedTranscoder::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let queue = files(&["/v/a.mkv", "/v/b.mkv", "/v/c.mkv", "/v/d.mkv"]);
        let report = BatchConverter::run(&queue, &settings(&dir, QualityPreset::Medium), &transcoder, &tx).await;

        assert_eq!(report.converted(), 4);
        assert_eq!(percentages(&drain(&mut rx)), vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let dir = TempDir::new().unwrap();
        let transcoder = ScriptedTranscoder::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let queue = files(&["/v/bad.mkv", "/v/good.mkv"]);
        let report = BatchConverter::run(&queue, &settings(&dir, QualityPreset::Medium), &transcoder, &tx).await;

        assert_eq!(transcoder.seen.lock().unwrap().len(), 2);
        assert_eq!(report.converted(), 1);
        assert_eq!(report.failed(), 1);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.job.source, PathBuf::from("/v/bad.mkv"));
        assert!(failure.error.as_deref().unwrap().contains("Invalid data"));

        let events = drain(&mut rx);
        let progress = percentages(&events);
        assert_eq!(progress, vec![50.0, 100.0]);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));

        assert!(events.iter().any(|e| matches!(e, ConverterEvent::FileFailed { source, .. } if source == &PathBuf::from("/v/bad.mkv"))));
        assert_eq!(
            events.last(),
            Some(&ConverterEvent::Completed { total: 2, converted: 1, failed: 1 })
        );
    }

    #[tokio::test]
    async fn test_jobs_use_preset_and_output_dir() {
        let dir = TempDir::new().unwrap();
        let transcoder = ScriptedTranscoder::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let settings = settings(&dir, QualityPreset::High);

        BatchConverter::run(&files(&["/a/b/clip.mkv"]), &settings, &transcoder, &tx).await;

        let seen = transcoder.seen.lock().unwrap();
        assert_eq!(seen[0].crf, 18);
        assert_eq!(seen[0].output, dir.path().join("out").join("clip_h264.mp4"));
        assert!(dir.path().join("out").is_dir());
    }

    #[tokio::test]
    async fn test_single_completion_event() {
        let dir = TempDir::new().unwrap();
        let transcoder = ScriptedTranscoder::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        BatchConverter::run(&files(&["/v/a.mkv", "/v/bad.mkv"]), &settings(&dir, QualityPreset::Low), &transcoder, &tx).await;

        let events = drain(&mut rx);
        let completed = events.iter().filter(|e| matches!(e, ConverterEvent::Completed { .. })).count();
        assert_eq!(completed, 1);
        assert!(matches!(events.first(), Some(ConverterEvent::Started { total: 2, crf: 28, .. })));
    }

    #[tokio::test]
    async fn test_closed_receiver_is_harmless() {
        let dir = TempDir::new().unwrap();
        let transcoder = ScriptedTranscoder::default();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let report = BatchConverter::run(&files(&["/v/a.mkv"]), &settings(&dir, QualityPreset::Medium), &transcoder, &tx).await;
        assert_eq!(report.converted(), 1);
    }
}
