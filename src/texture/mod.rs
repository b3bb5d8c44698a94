//! Texture assets
//!
//! Decodes PNG (and, with the `jpeg` feature, JPEG) images into owned
//! RGBA bitmaps ready for GPU upload.

mod picture;

pub use picture::TextureAsset;
