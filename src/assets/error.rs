//! Error taxonomy for asset loading
//!
//! Only `load` style operations fail. Lookups, enumeration and removal
//! signal absence through `Option`/`bool` instead.

use thiserror::Error;

use super::kind::{AssetKind, Category};

/// Errors returned when loading or constructing an asset
#[derive(Debug, Error)]
pub enum AssetError {
    /// The path's extension is not in the classification table
    #[error("invalid file format: {raw_extension:?}")]
    InvalidFileFormat {
        /// Extension as it appeared in the path (empty if there was none)
        raw_extension: String,
    },
    /// The kind was recognised but this category has no decoder for it
    #[error("unsupported asset type {kind} for {category} assets")]
    UnsupportedAssetType {
        /// The classified kind
        kind: AssetKind,
        /// The registry that refused it
        category: Category,
    },
    /// A reject-on-collision registry already holds this name
    #[error("asset already exists: {name}")]
    AssetAlreadyExists {
        /// The colliding name
        name: String,
    },
    /// The source could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The content could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl AssetError {
    /// Whether this error came from the filesystem rather than the content
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Failures reported by the media decoders
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Image container could not be decoded
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    /// Audio codec header or packet was invalid
    #[error("audio: {0}")]
    Audio(#[from] rodio::decoder::DecoderError),
    /// Seeking an audio stream failed
    #[error("audio seek: {0}")]
    Seek(#[from] rodio::source::SeekError),
    /// The decoder reported a sample format that cannot be played
    #[error("audio: {0}")]
    InvalidSampleFormat(&'static str),
    /// The audio stream was already closed
    #[error("audio stream is closed")]
    StreamClosed,
    /// Font file could not be parsed
    #[error("font: {0}")]
    Font(#[from] ttf_parser::FaceParsingError),
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(DecodeError::Image(err))
    }
}

impl From<rodio::decoder::DecoderError> for AssetError {
    fn from(err: rodio::decoder::DecoderError) -> Self {
        Self::Decode(DecodeError::Audio(err))
    }
}

impl From<rodio::source::SeekError> for AssetError {
    fn from(err: rodio::source::SeekError) -> Self {
        Self::Decode(DecodeError::Seek(err))
    }
}

impl From<ttf_parser::FaceParsingError> for AssetError {
    fn from(err: ttf_parser::FaceParsingError) -> Self {
        Self::Decode(DecodeError::Font(err))
    }
}
