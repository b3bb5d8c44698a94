//! Asset kind classification
//!
//! Maps a file path's extension onto the media type it is decoded as.

use std::fmt;
use std::path::Path;

use super::error::AssetError;

/// Media type and sub-format of a loaded asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// PNG image
    PngImage,
    /// JPEG image
    JpegImage,
    /// MP3 audio, fully buffered
    Mp3Audio,
    /// WAV audio, fully buffered
    WavAudio,
    /// MP3 audio, read on demand
    Mp3AudioStream,
    /// WAV audio, read on demand
    WavAudioStream,
    /// TrueType font
    TtfFont,
}

impl AssetKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 7] = [
        Self::PngImage,
        Self::JpegImage,
        Self::Mp3Audio,
        Self::WavAudio,
        Self::Mp3AudioStream,
        Self::WavAudioStream,
        Self::TtfFont,
    ];

    /// The MIME-like tag of this kind, e.g. `image/png`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PngImage => "image/png",
            Self::JpegImage => "image/jpeg",
            Self::Mp3Audio => "audio/mp3",
            Self::WavAudio => "audio/wav",
            Self::Mp3AudioStream => "audio/mp3-stream",
            Self::WavAudioStream => "audio/wav-stream",
            Self::TtfFont => "font/ttf",
        }
    }

    /// Look up the kind for a raw file extension (without the dot).
    ///
    /// Matching ignores ASCII case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::PngImage),
            "jpeg" | "jpg" => Some(Self::JpegImage),
            "mp3" => Some(Self::Mp3Audio),
            "wav" => Some(Self::WavAudio),
            "ttf" => Some(Self::TtfFont),
            _ => None,
        }
    }

    /// The streaming counterpart of a buffered audio kind.
    ///
    /// Stream kinds map to themselves; non-audio kinds have no counterpart.
    #[must_use]
    pub const fn streaming(self) -> Option<Self> {
        match self {
            Self::Mp3Audio | Self::Mp3AudioStream => Some(Self::Mp3AudioStream),
            Self::WavAudio | Self::WavAudioStream => Some(Self::WavAudioStream),
            _ => None,
        }
    }

    /// Codec hint handed to the audio decoder
    #[must_use]
    pub const fn codec_hint(&self) -> Option<&'static str> {
        match self {
            Self::Mp3Audio | Self::Mp3AudioStream => Some("mp3"),
            Self::WavAudio | Self::WavAudioStream => Some("wav"),
            _ => None,
        }
    }

    /// Whether this kind is read on demand rather than buffered
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self, Self::Mp3AudioStream | Self::WavAudioStream)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four registries an asset can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Decoded images
    Texture,
    /// Fully buffered audio
    AudioClip,
    /// On-demand audio
    AudioStream,
    /// Parsed fonts with glyph layouts
    Font,
}

impl Category {
    /// All categories, in facade lookup order
    pub const ALL: [Self; 4] = [Self::Texture, Self::AudioClip, Self::AudioStream, Self::Font];

    /// Human readable name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::AudioClip => "audio clip",
            Self::AudioStream => "audio stream",
            Self::Font => "font",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a path by its extension.
///
/// Only the final extension of the file name counts, so `archive.tar.png`
/// is a PNG and `./sprites/hero.png` is not confused by the leading dot.
/// The filesystem is never touched.
///
/// # Errors
///
/// Returns [`AssetError::InvalidFileFormat`] carrying the raw extension
/// (empty when the path has none) if it is not in the table.
pub fn classify(path: impl AsRef<Path>) -> Result<AssetKind, AssetError> {
    let raw = path
        .as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    let kind = AssetKind::from_extension(&raw).ok_or(AssetError::InvalidFileFormat {
        raw_extension: raw,
    })?;
    log::trace!("Classified {} as {kind}", path.as_ref().display());
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_table() {
        assert_eq!(classify("art/bg.png").unwrap(), AssetKind::PngImage);
        assert_eq!(classify("art/bg.jpg").unwrap(), AssetKind::JpegImage);
        assert_eq!(classify("art/bg.jpeg").unwrap(), AssetKind::JpegImage);
        assert_eq!(classify("music/theme.mp3").unwrap(), AssetKind::Mp3Audio);
        assert_eq!(classify("sfx/hit.wav").unwrap(), AssetKind::WavAudio);
        assert_eq!(classify("fonts/sans.ttf").unwrap(), AssetKind::TtfFont);
    }

    #[test]
    fn test_classify_uses_last_extension() {
        assert_eq!(classify("./sprites/hero.png").unwrap(), AssetKind::PngImage);
        assert_eq!(classify("packs/v1.2/hero.PNG").unwrap(), AssetKind::PngImage);
        assert_eq!(classify("backup.png.wav").unwrap(), AssetKind::WavAudio);
    }

    #[test]
    fn test_classify_unknown_extension() {
        match classify("img.gif") {
            Err(AssetError::InvalidFileFormat { raw_extension }) => assert_eq!(raw_extension, "gif"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_extension() {
        match classify("fonts/README") {
            Err(AssetError::InvalidFileFormat { raw_extension }) => assert!(raw_extension.is_empty()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_streaming_retag() {
        assert_eq!(AssetKind::Mp3Audio.streaming(), Some(AssetKind::Mp3AudioStream));
        assert_eq!(AssetKind::WavAudio.streaming(), Some(AssetKind::WavAudioStream));
        assert_eq!(AssetKind::PngImage.streaming(), None);
        assert!(AssetKind::WavAudioStream.is_stream());
        assert!(!AssetKind::WavAudio.is_stream());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(AssetKind::Mp3AudioStream.to_string(), "audio/mp3-stream");
        assert_eq!(AssetKind::TtfFont.as_str(), "font/ttf");
        for kind in AssetKind::ALL {
            assert!(kind.as_str().contains('/'));
        }
    }
}
