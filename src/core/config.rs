//! Loader configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::font::FontOptions;

/// Errors reading a configuration or manifest document
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid RON for the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Asset loader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory relative asset paths are opened from
    pub root: Option<PathBuf>,
    /// Options used by `load_font`
    pub font: FontOptions,
}

impl LoaderConfig {
    /// Set the asset root directory
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Set the default font options
    #[must_use]
    pub fn with_font_options(mut self, font: FontOptions) -> Self {
        self.font = font;
        self
    }

    /// Parse a configuration from RON text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Read a RON configuration file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}
