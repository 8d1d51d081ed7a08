//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path di output:
//! `<output_dir>/<nome_base>_<codec>.<contenitore>`.

use crate::{error::ConvertError, queue::PendingFile, target::TargetCodec};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Calcola il path di output per un file in coda
    pub fn get_output_path(file: &PendingFile, output_dir: &Path, target: &TargetCodec) -> PathBuf {
        let filename = format!("{}_{}.{}", file.base_name(), target.name, target.container);
        let result = output_dir.join(filename);
        debug!("Resolved output path: {} -> {}", file.source().display(), result.display());
        result
    }

    /// Crea la directory di output se necessario
    pub async fn ensure_output_dir(output_dir: &Path) -> Result<(), ConvertError> {
        tokio::fs::create_dir_all(output_dir).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_derivation() {
        let file = PendingFile::new(PathBuf::from("/a/b/clip.mkv"));
        let output = PathResolver::get_output_path(&file, Path::new("/out"), &TargetCodec::H264);
        assert_eq!(output, PathBuf::from("/out/clip_h264.mp4"));
    }

    #[test]
    fn test_output_path_keeps_inner_dots() {
        let file = PendingFile::new(PathBuf::from("/a/holiday.2023.mov"));
        let output = PathResolver::get_output_path(&file, Path::new("/out"), &TargetCodec::H264);
        assert_eq!(output, PathBuf::from("/out/holiday.2023_h264.mp4"));
    }

    #[tokio::test]
    async fn test_ensure_output_dir_creates_nested() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("converted").join("h264");
        PathResolver::ensure_output_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // Already existing is fine
        PathResolver::ensure_output_dir(&nested).await.unwrap();
    }
}
