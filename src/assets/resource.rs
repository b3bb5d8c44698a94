//! The uniform resource envelope and the closed set of payloads it carries

use std::io::{Read, Seek};

use super::error::AssetError;
use super::kind::{AssetKind, Category};

/// A readable, seekable byte source handed to the decoders
pub trait MediaSource: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> MediaSource for T {}

/// An owned, type-erased [`MediaSource`]
pub type BoxedSource = Box<dyn MediaSource>;

/// What a registry does when `load` is called with a name it already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The new asset silently replaces the old one
    LastWriteWins,
    /// The load fails with [`AssetError::AssetAlreadyExists`] and nothing changes
    RejectOnCollision,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::texture::TextureAsset {}
    impl Sealed for crate::audio::AudioClipAsset {}
    impl Sealed for crate::audio::AudioStreamAsset {}
    impl Sealed for crate::font::FontAsset {}
}

/// Decoded data for one media family.
///
/// Implemented by exactly four types: [`TextureAsset`](crate::texture::TextureAsset),
/// [`AudioClipAsset`](crate::audio::AudioClipAsset),
/// [`AudioStreamAsset`](crate::audio::AudioStreamAsset) and
/// [`FontAsset`](crate::font::FontAsset). The trait is sealed.
pub trait Payload: sealed::Sealed + Sized {
    /// Registry this payload lives in
    const CATEGORY: Category;

    /// Behaviour on a duplicate name
    const ON_COLLISION: CollisionPolicy;

    /// Extra decoder configuration (`()` when there is none)
    type Options;

    /// Map a classified kind onto the kind this payload is tagged with,
    /// or `None` if this category cannot decode it.
    fn accept(kind: AssetKind) -> Option<AssetKind>;

    /// Decode the payload from an opened source.
    ///
    /// `kind` has already passed through [`Payload::accept`].
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed content, or the I/O error of
    /// the underlying source.
    fn decode(kind: AssetKind, source: BoxedSource, options: &Self::Options)
    -> Result<Self, AssetError>;
}

/// A named, loaded asset together with where it came from.
///
/// The kind always agrees with the payload type: the only ways to build
/// one are a successful registry load or [`AssetResource::new`], which
/// checks the pairing.
#[derive(Debug, Clone)]
pub struct AssetResource<P: Payload> {
    kind: AssetKind,
    name: String,
    path: String,
    data: P,
}

impl<P: Payload> AssetResource<P> {
    /// Wrap an already decoded payload.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::UnsupportedAssetType`] if `kind` is not a kind
    /// this payload type is ever tagged with.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        kind: AssetKind,
        data: P,
    ) -> Result<Self, AssetError> {
        if P::accept(kind) != Some(kind) {
            return Err(AssetError::UnsupportedAssetType {
                kind,
                category: P::CATEGORY,
            });
        }
        Ok(Self::from_parts(kind, name.into(), path.into(), data))
    }

    pub(crate) fn from_parts(kind: AssetKind, name: String, path: String, data: P) -> Self {
        Self {
            kind,
            name,
            path,
            data,
        }
    }

    /// Media type of the payload
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Lookup key within the registry
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path the asset was loaded from, as given.
    ///
    /// A path that is not valid UTF-8 is stored lossily, with invalid
    /// sequences replaced by U+FFFD.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The decoded payload
    #[must_use]
    pub const fn data(&self) -> &P {
        &self.data
    }

    /// Mutable access to the payload (reading or closing a stream)
    pub fn data_mut(&mut self) -> &mut P {
        &mut self.data
    }

    /// Take the payload out of the envelope
    #[must_use]
    pub fn into_data(self) -> P {
        self.data
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureAsset;

    fn texture() -> TextureAsset {
        TextureAsset::from_image(&image::DynamicImage::new_rgba8(2, 2))
    }

    #[test]
    fn test_new_checks_kind() {
        let resource =
            AssetResource::new("bg", "art/bg.png", AssetKind::PngImage, texture()).unwrap();
        assert_eq!(resource.kind(), AssetKind::PngImage);
        assert_eq!(resource.name(), "bg");
        assert_eq!(resource.path(), "art/bg.png");
        assert_eq!(resource.data().width(), 2);

        let err = AssetResource::new("bg", "art/bg.png", AssetKind::Mp3Audio, texture()).unwrap_err();
        assert!(matches!(
            err,
            AssetError::UnsupportedAssetType {
                kind: AssetKind::Mp3Audio,
                category: Category::Texture,
            }
        ));
    }

    #[test]
    fn test_accept_tables() {
        use crate::audio::{AudioClipAsset, AudioStreamAsset};
        use crate::font::FontAsset;

        for kind in AssetKind::ALL {
            let accepted = [
                TextureAsset::accept(kind).is_some(),
                AudioClipAsset::accept(kind).is_some(),
                AudioStreamAsset::accept(kind).is_some(),
                FontAsset::accept(kind).is_some(),
            ];
            assert!(accepted.iter().any(|&a| a), "{kind} has no category");
        }
        assert_eq!(
            AudioStreamAsset::accept(AssetKind::Mp3Audio),
            Some(AssetKind::Mp3AudioStream)
        );
        assert_eq!(AudioClipAsset::accept(AssetKind::Mp3AudioStream), None);
    }

    #[test]
    fn test_into_data() {
        let resource =
            AssetResource::new("bg", "bg.png", AssetKind::PngImage, texture()).unwrap();
        assert_eq!(resource.into_data().height(), 2);
    }
}
