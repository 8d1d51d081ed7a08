//! # Job Queue Module
//!
//! Questo modulo gestisce la coda ordinata dei file da convertire.
//!
//! ## Responsabilità:
//! - Classifica ogni nuovo file tramite `CodecProbe`
//! - Accoda i file che richiedono conversione, nell'ordine di selezione
//! - Tiene traccia dei file già nel codec di destinazione (solo informativo)
//! - Sopprime i duplicati per uguaglianza esatta del path (nessuna normalizzazione)
//!
//! ## Invarianti:
//! - Un path non compare mai due volte in coda
//! - Un path già classificato non viene riclassificato fino a `clear()`
//! - Ogni path nuovo finisce esattamente in coda oppure nella lista skip

use crate::probe::{CodecProbe, Decision};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file waiting for conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    source: PathBuf,
    base_name: String,
}

impl PendingFile {
    pub fn new(source: PathBuf) -> Self {
        let base_name = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string_lossy().into_owned());

        Self { source, base_name }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File name without its extension
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// File name for display
    pub fn display_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.base_name.clone())
    }
}

/// What happened to the paths passed to [`JobQueue::add`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Newly queued for conversion
    pub added: Vec<PathBuf>,
    /// Already in the target codec, not queued
    pub already_target: Vec<PathBuf>,
    /// Seen before since the last clear, ignored
    pub duplicates: Vec<PathBuf>,
    /// Every new path with its decision, in submission order
    pub handled: Vec<(PathBuf, Decision)>,
}

/// Ordered, duplicate-free queue of files to convert
#[derive(Debug, Default)]
pub struct JobQueue {
    pending: Vec<PendingFile>,
    already_target: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and enqueue candidate paths
    pub async fn add<P, I>(&mut self, paths: I, probe: &P) -> AddOutcome
    where
        P: CodecProbe + ?Sized,
        I: IntoIterator<Item = PathBuf>,
    {
        let mut outcome = AddOutcome::default();

        for path in paths {
            if self.seen.contains(&path) {
                debug!("Ignoring duplicate: {}", path.display());
                outcome.duplicates.push(path);
                continue;
            }

            let result = probe.probe(&path).await;
            self.seen.insert(path.clone());
            let decision = result.decision();
            outcome.handled.push((path.clone(), decision));

            match decision {
                Decision::AlreadyTarget => {
                    info!("⏩ Already H.264, not queued: {}", path.display());
                    self.already_target.push(path.clone());
                    outcome.already_target.push(path);
                }
                Decision::NeedsConversion => {
                    debug!("Queued: {} ({:?})", path.display(), result);
                    self.pending.push(PendingFile::new(path.clone()));
                    outcome.added.push(path);
                }
            }
        }

        outcome
    }

    /// Empty the queue and all skip bookkeeping
    pub fn clear(&mut self) {
        self.pending.clear();
        self.already_target.clear();
        self.seen.clear();
    }

    pub fn pending(&self) -> &[PendingFile] {
        &self.pending
    }

    pub fn already_target(&self) -> &[PathBuf] {
        &self.already_target
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
