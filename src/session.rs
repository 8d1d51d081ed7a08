//! # Session Module
//!
//! Questo modulo raccoglie lo stato di una sessione di conversione.
//!
//! ## Responsabilità:
//! - Possiede configurazione (directory di output, preset di qualità) e coda
//! - Aggiunge file alla coda classificandoli con un `CodecProbe`
//! - Avvia il batch su un task tokio in background
//! - Restituisce il canale degli eventi: la UI legge, non condivide stato
//!
//! ## Esempio:
//! ```rust,ignore
//! let mut session = Session::new(config);
//! session.add_files(paths, &classifier).await;
//! let (handle, events) = session.start(Arc::new(transcoder))?;
//! ```

use crate::{
    config::Config,
    converter::{BatchConverter, BatchReport, BatchSettings, Transcode},
    error::ConvertError,
    events::ConverterEvent,
    probe::{CodecProbe, Decision},
    quality::QualityPreset,
    queue::{AddOutcome, JobQueue},
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::info;

/// Explicit session state passed to the converter
#[derive(Debug)]
pub struct Session {
    config: Config,
    queue: JobQueue,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            queue: JobQueue::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn set_output_dir(&mut self, output_dir: PathBuf) {
        info!("Output directory: {}", output_dir.display());
        self.config.output_dir = output_dir;
    }

    pub fn set_quality(&mut self, quality: QualityPreset) {
        info!("Quality: {} (CRF {})", quality, quality.crf());
        self.config.quality = quality;
    }

    /// Classify and queue files
    pub async fn add_files<P>(&mut self, paths: Vec<PathBuf>, probe: &P) -> AddOutcome
    where
        P: CodecProbe + ?Sized,
    {
        self.queue.add(paths, probe).await
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Events describing an [`AddOutcome`], in the order the files were handled
    pub fn selection_events(outcome: &AddOutcome) -> Vec<ConverterEvent> {
        outcome
            .handled
            .iter()
            .map(|(path, decision)| match decision {
                Decision::AlreadyTarget => ConverterEvent::AlreadyTarget { path: path.clone() },
                Decision::NeedsConversion => ConverterEvent::Queued { path: path.clone() },
            })
            .collect()
    }

    /// Run the queued files on a background task
    pub fn start<T>(
        &self,
        transcoder: Arc<T>,
    ) -> Result<(JoinHandle<BatchReport>, UnboundedReceiver<ConverterEvent>), ConvertError>
    where
        T: Transcode + 'static,
    {
        if self.queue.is_empty() {
            return Err(ConvertError::EmptyQueue);
        }

        let files = self.queue.pending().to_vec();
        let settings = BatchSettings::from_config(&self.config);
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            BatchConverter::run(&files, &settings, transcoder.as_ref(), &tx).await
        });

        Ok((handle, rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::batch_converter::tests::ScriptedTranscoder;
    use crate::queue::tests::NameProbe;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        Session::new(Config {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_start_with_empty_queue_fails() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        let result = session.start(Arc::new(ScriptedTranscoder::default()));
        assert!(matches!(result, Err(ConvertError::EmptyQueue)));
    }

    #[tokio::test]
    async fn test_background_batch_reports_over_channel() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        session.set_quality(QualityPreset::MediumLow);

        let paths = vec![
            PathBuf::from("/v/a.mkv"),
            PathBuf::from("/v/done_h264.mp4"),
            PathBuf::from("/v/bad.avi"),
        ];
        let outcome = session.add_files(paths, &NameProbe::default()).await;
        assert_eq!(outcome.added.len(), 2);

        let transcoder = Arc::new(ScriptedTranscoder::default());
        let (handle, mut rx) = session.start(transcoder.clone()).unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        let report = handle.await.unwrap();

        assert_eq!(report.converted(), 1);
        assert_eq!(report.failed(), 1);
        assert!(transcoder.seen.lock().unwrap().iter().all(|job| job.crf == 26));
        assert!(matches!(events.last(), Some(ConverterEvent::Completed { total: 2, .. })));
    }

    #[tokio::test]
    async fn test_clear_then_start_fails() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        session.add_files(vec![PathBuf::from("/v/a.mkv")], &NameProbe::default()).await;
        assert_eq!(session.queue().len(), 1);

        session.clear();
        assert!(session.start(Arc::new(ScriptedTranscoder::default())).is_err());
    }

    #[tokio::test]
    async fn test_selection_events_follow_submission_order() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let paths = vec![
            PathBuf::from("/v/first_h264.mp4"),
            PathBuf::from("/v/a.mkv"),
            PathBuf::from("/v/second_h264.mp4"),
            PathBuf::from("/v/a.mkv"),
        ];
        let outcome = session.add_files(paths, &NameProbe::default()).await;

        let events = Session::selection_events(&outcome);
        assert_eq!(
            events,
            vec![
                ConverterEvent::AlreadyTarget { path: PathBuf::from("/v/first_h264.mp4") },
                ConverterEvent::Queued { path: PathBuf::from("/v/a.mkv") },
                ConverterEvent::AlreadyTarget { path: PathBuf::from("/v/second_h264.mp4") },
            ]
        );
    }

    #[test]
    fn test_set_output_dir() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        session.set_output_dir(PathBuf::from("/srv/converted"));
        assert_eq!(session.config().output_dir, PathBuf::from("/srv/converted"));
    }
}
