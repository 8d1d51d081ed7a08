//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione della sessione di conversione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di conversione
//! - Fornisce validazione dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `output_dir`: Directory di output (default: cartella Video dell'utente)
//! - `quality`: Preset di qualità (default: Medium (Balanced), CRF 23)
//! - `timeout_secs`: Timeout per singola conversione (default: nessuno)
//! - `json_output`: Eventi JSON su stdout invece della progress bar
//!
//! ## Validazione:
//! - Controlla che `output_dir` non sia vuota
//! - Controlla che `output_dir`, se esiste, sia una directory
//! - Controlla che il timeout, se presente, sia > 0
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     quality: QualityPreset::High,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::quality::QualityPreset;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a conversion session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory that receives converted files
    pub output_dir: PathBuf,
    /// Quality preset applied to every file of the batch
    pub quality: QualityPreset,
    /// Per-file ffmpeg timeout in seconds (None = wait forever)
    pub timeout_secs: Option<u64>,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            quality: QualityPreset::default(),
            timeout_secs: None,
            json_output: false,
        }
    }
}

impl Config {
    /// The user's videos directory, or `~/Videos` when the platform has none
    pub fn default_output_dir() -> PathBuf {
        dirs::video_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Videos")))
            .unwrap_or_else(|| PathBuf::from("Videos"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Output directory must not be empty"));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("Timeout must be greater than 0 seconds"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.quality, QualityPreset::Medium);
        assert_eq!(config.quality.crf(), 23);
        assert!(config.timeout_secs.is_none());
        assert!(config.timeout().is_none());
        assert!(!config.json_output);
        assert!(!config.output_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_config_validation() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config {
            output_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.timeout_secs = Some(30);
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

        config.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_dir_must_be_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("not_a_dir.txt");
        std::fs::write(&file_path, b"x").unwrap();

        let config = Config {
            output_dir: file_path,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // Missing directories are created when the batch starts
        let config = Config {
            output_dir: temp_dir.path().join("later"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config {
            output_dir: PathBuf::from("/srv/out"),
            quality: QualityPreset::Low,
            timeout_secs: Some(600),
            json_output: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(loaded.quality, QualityPreset::Low);
        assert_eq!(loaded.timeout_secs, Some(600));
        assert!(loaded.json_output);
    }
}
