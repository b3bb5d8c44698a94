//! Typed in-memory registry for game media assets
//!
//! This crate provides:
//! - Extension based classification of asset files
//! - PNG/JPEG textures decoded with `image`
//! - Buffered clips and open streams for MP3/WAV audio via `rodio`
//! - TrueType fonts with a glyph layout via `ttf-parser`
//! - One name-keyed registry per category behind the [`AssetLoader`](core::AssetLoader) facade

pub mod assets;
pub mod audio;
pub mod core;
pub mod font;
pub mod texture;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use glam;
pub use image;
pub use rodio;
pub use ttf_parser;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::assets::{
        AssetError, AssetKind, AssetResource, Category, CollisionPolicy, DecodeError, Payload,
        Registry, classify,
    };
    pub use crate::audio::{AudioClipAsset, AudioStreamAsset, SampleFormat};
    pub use crate::core::{AssetLoader, AssetManifest, AssetRef, LoaderConfig};
    pub use crate::font::{FontAsset, FontOptions, GlyphLayout, Hinting};
    pub use crate::texture::TextureAsset;
}
