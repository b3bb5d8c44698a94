//! Font assets
//!
//! Parses TrueType faces with `ttf-parser` and derives a glyph layout for
//! the configured rune sets.

mod layout;
mod face;
mod rect;

use std::io::Read;

pub use layout::{Glyph, GlyphLayout, ascii};
pub use face::{FontFace, FontOptions, Hinting};
pub use rect::GlyphFrame;

use crate::assets::{AssetError, AssetKind, BoxedSource, Category, CollisionPolicy, Payload};

/// A parsed font face and its glyph layout
#[derive(Debug, Clone)]
pub struct FontAsset {
    /// Face at the configured size
    face: FontFace,
    /// Layout of the configured runes
    layout: GlyphLayout,
}

impl FontAsset {
    /// Parse a font from its full file contents.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the bytes are not a valid font.
    pub fn from_bytes(bytes: Vec<u8>, options: &FontOptions) -> Result<Self, AssetError> {
        let face = FontFace::parse(bytes, options)?;
        let layout = GlyphLayout::build(&face.face()?, &face, &options.rune_sets);
        Ok(Self { face, layout })
    }

    /// The parsed face
    #[must_use]
    pub const fn face(&self) -> &FontFace {
        &self.face
    }

    /// The glyph layout
    #[must_use]
    pub const fn layout(&self) -> &GlyphLayout {
        &self.layout
    }
}

impl Payload for FontAsset {
    const CATEGORY: Category = Category::Font;
    const ON_COLLISION: CollisionPolicy = CollisionPolicy::LastWriteWins;

    type Options = FontOptions;

    fn accept(kind: AssetKind) -> Option<AssetKind> {
        (kind == AssetKind::TtfFont).then_some(kind)
    }

    fn decode(
        kind: AssetKind,
        mut source: BoxedSource,
        options: &FontOptions,
    ) -> Result<Self, AssetError> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        drop(source);

        let font = Self::from_bytes(bytes, options)?;
        log::trace!(
            "Parsed {kind} face with {} laid out glyphs",
            font.layout.len()
        );
        Ok(font)
    }
}
