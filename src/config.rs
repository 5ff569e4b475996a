use std::path::Path;

use serde::Deserialize;

use crate::error::{OutlineError, Result};

/// How to treat numbering deeper than three levels, e.g. "1.2.3.4 Detail".
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeepNumbering {
    /// No numeric rule fires; the line falls through to the markdown and
    /// upper-case rules.
    #[default]
    Unclassified,
    /// Treat the line as H3.
    Clamp,
}

/// Thresholds for the upper-case short-line fallback. These are tuned
/// against real documents rather than derived.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FallbackThresholds {
    pub min_words: usize,
    pub max_words: usize,
    /// Exclusive upper bound on the character count.
    pub max_chars: usize,
}

impl Default for FallbackThresholds {
    fn default() -> Self {
        Self {
            min_words: 2,
            max_words: 8,
            max_chars: 80,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutlineConfig {
    /// Font-size difference still considered the title size.
    pub title_font_tolerance: f64,
    pub deep_numbering: DeepNumbering,
    pub fallback: FallbackThresholds,
    /// Drop leading section numbers ("1.", "2.3") from heading text.
    pub strip_section_numbers: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            title_font_tolerance: 0.5,
            deep_numbering: DeepNumbering::default(),
            fallback: FallbackThresholds::default(),
            strip_section_numbers: false,
        }
    }
}

impl OutlineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: OutlineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.title_font_tolerance.is_finite() || self.title_font_tolerance <= 0.0 {
            return Err(OutlineError::Config(format!(
                "title_font_tolerance must be a positive number, got {}",
                self.title_font_tolerance
            )));
        }
        if self.fallback.min_words > self.fallback.max_words {
            return Err(OutlineError::Config(format!(
                "fallback.min_words ({}) exceeds fallback.max_words ({})",
                self.fallback.min_words, self.fallback.max_words
            )));
        }
        Ok(())
    }
}
