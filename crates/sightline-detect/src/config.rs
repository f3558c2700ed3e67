//! Detection thresholds.
//!
//! Every number the visibility classifier compares against lives here so a
//! deployment can tune it from a TOML file:
//!
//! ```toml
//! min_contrast = 1.2
//! max_offset_px = 500.0
//! ```
//!
//! Keys that are absent keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a [`DetectionConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML, or a value has the wrong type.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Thresholds for the visibility checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Accumulated opacity at or below this is hidden.
    pub min_opacity: f64,
    /// Contrast ratios below this are hidden.
    pub min_contrast: f64,
    /// Offsets (`left`, margins, `text-indent`, ...) with a larger magnitude
    /// push text off screen.
    pub max_offset_px: f64,
    /// Font sizes below this are unreadable.
    pub min_font_size_px: f64,
    /// `filter: opacity()` at or below this percentage is hidden.
    pub max_filter_opacity_percent: f64,
    /// `filter: blur()` radii above this are unreadable.
    pub max_blur_px: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_opacity: 0.01,
            min_contrast: 1.05,
            max_offset_px: 1000.0,
            min_font_size_px: 3.0,
            max_filter_opacity_percent: 5.0,
            max_blur_px: 10.0,
        }
    }
}

impl DetectionConfig {
    /// Load thresholds from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file can't be read and
    /// [`ConfigError::Parse`] if it isn't a valid configuration.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse thresholds from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or a value has the
    /// wrong type.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DetectionConfig::from_toml("").unwrap(), DetectionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DetectionConfig::from_toml("min_contrast = 1.5\nmax_blur_px = 4.0").unwrap();
        assert!((config.min_contrast - 1.5).abs() < f64::EPSILON);
        assert!((config.max_blur_px - 4.0).abs() < f64::EPSILON);
        assert!((config.max_offset_px - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(DetectionConfig::from_toml("min_contrast = \"high\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sightline.toml");
        std::fs::write(&path, "min_font_size_px = 6.0\n").unwrap();
        let config = DetectionConfig::load_from_file(&path).unwrap();
        assert!((config.min_font_size_px - 6.0).abs() < f64::EPSILON);

        let missing = DetectionConfig::load_from_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
