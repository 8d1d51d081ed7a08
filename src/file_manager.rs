//! # File Management Module
//!
//! Questo modulo gestisce la selezione dei file da convertire.
//!
//! ## Responsabilità:
//! - Espansione degli argomenti: i file passano così come sono, le directory
//!   vengono esplorate ricorsivamente alla ricerca di video
//! - Determinazione del tipo di file tramite estensione
//! - Formattazione human-readable delle dimensioni
//!
//! ## Formati video riconosciuti nelle directory:
//! MP4, MKV, AVI, MOV, FLV, WebM
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::expand_inputs(&[PathBuf::from("/path/to/videos")]);
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mkv", "avi", "mov", "flv", "webm"];

/// Manages file discovery and small file utilities
pub struct FileManager;

impl FileManager {
    /// Check if a file is a video by extension
    pub fn is_video(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Find all video files below a directory, sorted for a stable queue order
    pub fn find_video_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| Self::is_video(path))
            .collect();

        files.sort();
        files
    }

    /// Turn command line inputs into candidate files, preserving argument order.
    ///
    /// Plain files are kept whatever their extension; missing paths are
    /// dropped with a warning.
    pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for input in inputs {
            if input.is_dir() {
                let found = Self::find_video_files(input);
                debug!("Found {} video files in {}", found.len(), input.display());
                files.extend(found);
            } else if input.is_file() {
                files.push(input.clone());
            } else {
                warn!("Skipping missing input: {}", input.display());
            }
        }

        files
    }

    /// Size of a file in bytes
    pub async fn file_size(path: &Path) -> Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_video() {
        assert!(FileManager::is_video(Path::new("/a/b/clip.mkv")));
        assert!(FileManager::is_video(Path::new("CLIP.MOV")));
        assert!(FileManager::is_video(Path::new("x.flv")));
        assert!(!FileManager::is_video(Path::new("notes.txt")));
        assert!(!FileManager::is_video(Path::new("README")));
    }

    #[test]
    fn test_expand_inputs() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("season1");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("b.mkv"), b"").unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"").unwrap();
        std::fs::write(dir.path().join("cover.jpg"), b"").unwrap();

        let loose = TempDir::new().unwrap();
        let odd_file = loose.path().join("recording.ts");
        std::fs::write(&odd_file, b"").unwrap();

        let inputs = vec![
            odd_file.clone(),
            dir.path().to_path_buf(),
            loose.path().join("missing.mkv"),
        ];
        let files = FileManager::expand_inputs(&inputs);

        assert_eq!(
            files,
            vec![odd_file, dir.path().join("a.mp4"), nested.join("b.mkv")]
        );
    }

    #[tokio::test]
    async fn test_file_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.mp4");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();
        tokio_test::assert_ok!(FileManager::file_size(&path).await);
        assert_eq!(FileManager::file_size(&path).await.unwrap(), 2048);
        assert!(FileManager::file_size(&dir.path().join("nope")).await.is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
