//! Texture payload and image decode adapter

use std::io::BufReader;

use image::{GenericImageView, ImageFormat, RgbaImage};

use crate::assets::{AssetError, AssetKind, BoxedSource, Category, CollisionPolicy, Payload};

/// A decoded texture
///
/// Holds the full RGBA8 bitmap in memory; no external resource needs
/// releasing.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    /// The decoded pixels
    picture: RgbaImage,
}

impl TextureAsset {
    /// Wrap an already decoded image
    #[must_use]
    pub fn from_image(img: &image::DynamicImage) -> Self {
        Self {
            picture: img.to_rgba8(),
        }
    }

    /// Decode a texture from raw bytes of the given kind.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the bytes are not a valid image of that
    /// format, or the format is not compiled in.
    pub fn from_bytes(bytes: &[u8], kind: AssetKind) -> Result<Self, AssetError> {
        let img = image::load_from_memory_with_format(bytes, image_format(kind)?)?;
        Ok(Self::from_image(&img))
    }

    /// The decoded RGBA8 picture
    #[must_use]
    pub const fn picture(&self) -> &RgbaImage {
        &self.picture
    }

    /// Raw RGBA8 bytes, row-major
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        self.picture.as_raw()
    }

    /// Get texture width
    #[must_use]
    pub fn width(&self) -> u32 {
        self.picture.width()
    }

    /// Get texture height
    #[must_use]
    pub fn height(&self) -> u32 {
        self.picture.height()
    }

    /// Get texture dimensions as (width, height)
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.picture.dimensions()
    }

    /// Whether the picture has no pixels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

fn image_format(kind: AssetKind) -> Result<ImageFormat, AssetError> {
    match kind {
        AssetKind::PngImage => Ok(ImageFormat::Png),
        AssetKind::JpegImage => Ok(ImageFormat::Jpeg),
        _ => Err(AssetError::UnsupportedAssetType {
            kind,
            category: Category::Texture,
        }),
    }
}

impl Payload for TextureAsset {
    const CATEGORY: Category = Category::Texture;
    const ON_COLLISION: CollisionPolicy = CollisionPolicy::RejectOnCollision;

    type Options = ();

    fn accept(kind: AssetKind) -> Option<AssetKind> {
        matches!(kind, AssetKind::PngImage | AssetKind::JpegImage).then_some(kind)
    }

    fn decode(kind: AssetKind, source: BoxedSource, _options: &()) -> Result<Self, AssetError> {
        let img = image::load(BufReader::new(source), image_format(kind)?)?;
        log::trace!("Decoded {kind} texture {:?}", img.dimensions());
        Ok(Self::from_image(&img))
    }
}
