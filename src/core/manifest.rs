//! Batch load descriptions
//!
//! A manifest names every asset an application wants resident, grouped by
//! category, so a whole set can be loaded in one call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::ConfigError;
use crate::font::FontOptions;

/// One named asset to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Registry key
    pub name: String,
    /// File to load
    pub path: String,
}

/// One named font to load, optionally with its own options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontEntry {
    /// Registry key
    pub name: String,
    /// File to load
    pub path: String,
    /// Overrides the loader's default font options
    #[serde(default)]
    pub options: Option<FontOptions>,
}

/// Everything to load, per category, in load order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Texture entries
    pub textures: Vec<ManifestEntry>,
    /// Buffered audio entries
    pub audio_clips: Vec<ManifestEntry>,
    /// Streamed audio entries
    pub audio_streams: Vec<ManifestEntry>,
    /// Font entries
    pub fonts: Vec<FontEntry>,
}

impl AssetManifest {
    /// Total number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len() + self.audio_clips.len() + self.audio_streams.len() + self.fonts.len()
    }

    /// Whether the manifest lists nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a manifest from RON text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid manifest.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Read a RON manifest file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid manifest.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}
