//! # Quality Presets Module
//!
//! Questo modulo definisce i cinque preset di qualità disponibili.
//!
//! ## Responsabilità:
//! - Mappa ogni etichetta leggibile su un valore CRF per libx264
//! - Risolve l'etichetta scelta dall'utente (anche con alias brevi)
//! - Fallback al preset bilanciato (CRF 23) per etichette sconosciute
//!
//! ## Preset (CRF più basso = qualità più alta, file più grande):
//! - `High (Large File)`: 18
//! - `Medium-High`: 21
//! - `Medium (Balanced)`: 23 (default)
//! - `Medium-Low`: 26
//! - `Low (Small File)`: 28

use serde::{Deserialize, Serialize};
use std::fmt;

/// CRF used when a label does not match any preset
pub const FALLBACK_CRF: u8 = 23;

/// Fixed quality presets, ordered from highest to lowest quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    High,
    MediumHigh,
    #[default]
    Medium,
    MediumLow,
    Low,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 5] = [
        QualityPreset::High,
        QualityPreset::MediumHigh,
        QualityPreset::Medium,
        QualityPreset::MediumLow,
        QualityPreset::Low,
    ];

    /// Human-readable label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High (Large File)",
            Self::MediumHigh => "Medium-High",
            Self::Medium => "Medium (Balanced)",
            Self::MediumLow => "Medium-Low",
            Self::Low => "Low (Small File)",
        }
    }

    /// Constant rate factor passed to the encoder
    pub fn crf(&self) -> u8 {
        match self {
            Self::High => 18,
            Self::MediumHigh => 21,
            Self::Medium => 23,
            Self::MediumLow => 26,
            Self::Low => 28,
        }
    }

    /// Short alias accepted on the command line
    pub fn alias(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::MediumHigh => "medium-high",
            Self::Medium => "medium",
            Self::MediumLow => "medium-low",
            Self::Low => "low",
        }
    }

    /// Look up a preset by its exact label or by its short alias (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL.into_iter().find(|preset| {
            preset.label() == trimmed || preset.alias().eq_ignore_ascii_case(trimmed)
        })
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// CRF for a label, falling back to [`FALLBACK_CRF`] when the label is unknown
pub fn crf_for_label(label: &str) -> u8 {
    QualityPreset::from_label(label)
        .map(|preset| preset.crf())
        .unwrap_or(FALLBACK_CRF)
}
