//! Font face parsing and configuration

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ttf_parser::{Face, name_id};

use crate::assets::AssetError;

/// How glyph metrics are snapped to the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hinting {
    /// Keep fractional metrics
    #[default]
    None,
    /// Round vertical metrics only
    Vertical,
    /// Round horizontal and vertical metrics
    Full,
}

impl Hinting {
    /// Apply to a horizontal metric
    #[must_use]
    pub fn round_x(self, value: f32) -> f32 {
        match self {
            Self::Full => value.round(),
            Self::None | Self::Vertical => value,
        }
    }

    /// Apply to a vertical metric
    #[must_use]
    pub fn round_y(self, value: f32) -> f32 {
        match self {
            Self::None => value,
            Self::Vertical | Self::Full => value.round(),
        }
    }
}

/// Face and layout configuration for loading a font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Font size in points
    pub size: f32,
    /// Resolution the size is interpreted at
    pub dpi: f32,
    /// Metric snapping
    pub hinting: Hinting,
    /// Rune sets the layout covers; ASCII when empty
    pub rune_sets: Vec<Vec<char>>,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            size: 12.0,
            dpi: 72.0,
            hinting: Hinting::None,
            rune_sets: Vec::new(),
        }
    }
}

impl FontOptions {
    /// Set the size in points
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the resolution
    #[must_use]
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the hinting mode
    #[must_use]
    pub fn with_hinting(mut self, hinting: Hinting) -> Self {
        self.hinting = hinting;
        self
    }

    /// Add a rune set to the layout
    #[must_use]
    pub fn with_rune_set(mut self, runes: impl IntoIterator<Item = char>) -> Self {
        self.rune_sets.push(runes.into_iter().collect());
        self
    }

    /// Pixels per em at this size and resolution
    #[must_use]
    pub fn pixels_per_em(&self) -> f32 {
        self.size * self.dpi / 72.0
    }
}

/// A parsed font face at a fixed size
///
/// Keeps the raw font bytes so the full `ttf_parser::Face` can be
/// re-borrowed for shaping or rasterising.
#[derive(Debug, Clone)]
pub struct FontFace {
    data: Arc<[u8]>,
    family: Option<String>,
    units_per_em: u16,
    glyph_count: u16,
    scale: f32,
    hinting: Hinting,
    ascent: f32,
    descent: f32,
    line_gap: f32,
}

impl FontFace {
    /// Parse the first face in `data`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the bytes are not a TrueType/OpenType font.
    pub fn parse(data: Vec<u8>, options: &FontOptions) -> Result<Self, AssetError> {
        let data: Arc<[u8]> = data.into();
        let face = Face::parse(&data, 0)?;

        let units_per_em = face.units_per_em();
        let scale = options.pixels_per_em() / f32::from(units_per_em.max(1));
        let hinting = options.hinting;
        let family = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::FAMILY)
            .find_map(|name| name.to_string());

        Ok(Self {
            family,
            units_per_em,
            glyph_count: face.number_of_glyphs(),
            scale,
            hinting,
            ascent: hinting.round_y(f32::from(face.ascender()) * scale),
            descent: hinting.round_y(f32::from(face.descender()) * scale),
            line_gap: hinting.round_y(f32::from(face.line_gap()) * scale),
            data,
        })
    }

    /// Re-borrow the parsed face
    ///
    /// # Errors
    ///
    /// Only fails if the stored bytes stopped parsing, which cannot happen
    /// for a face built by [`FontFace::parse`].
    pub fn face(&self) -> Result<Face<'_>, AssetError> {
        Ok(Face::parse(&self.data, 0)?)
    }

    /// Raw font file bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Family name from the naming table
    #[must_use]
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Design units per em
    #[must_use]
    pub const fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Number of glyphs in the face
    #[must_use]
    pub const fn glyph_count(&self) -> u16 {
        self.glyph_count
    }

    /// Pixels per design unit
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Metric snapping the face was loaded with
    #[must_use]
    pub const fn hinting(&self) -> Hinting {
        self.hinting
    }

    /// Distance from baseline to the top of the line, in pixels
    #[must_use]
    pub const fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Distance from baseline to the bottom of the line (negative), in pixels
    #[must_use]
    pub const fn descent(&self) -> f32 {
        self.descent
    }

    /// Baseline-to-baseline distance, in pixels
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}
