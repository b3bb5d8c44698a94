//! Fully buffered audio clips

use std::time::Duration;

use rodio::buffer::SamplesBuffer;

use crate::assets::{AssetError, AssetKind, BoxedSource, Category, CollisionPolicy, Payload};

use super::format::{SampleFormat, open_decoder};

/// An audio clip decoded entirely into memory
///
/// The source file is closed as soon as decoding finishes, so the clip
/// stays playable no matter what happens to the file afterwards.
#[derive(Debug, Clone)]
pub struct AudioClipAsset {
    /// The buffered samples, cheap to clone
    buffer: SamplesBuffer,
    /// Number of interleaved samples in the buffer
    len: usize,
    /// Sample layout
    format: SampleFormat,
}

impl AudioClipAsset {
    /// Buffer already decoded interleaved samples
    ///
    /// # Errors
    ///
    /// Returns a decode error if the format has zero channels or sample rate.
    pub fn from_samples(format: SampleFormat, samples: Vec<f32>) -> Result<Self, AssetError> {
        if format.channels == 0 || format.sample_rate == 0 {
            return Err(crate::assets::DecodeError::InvalidSampleFormat(
                "zero channels or sample rate",
            )
            .into());
        }
        let len = samples.len();
        Ok(Self {
            buffer: SamplesBuffer::new(format.channels, format.sample_rate, samples),
            len,
            format,
        })
    }

    /// Sample layout of the buffer
    #[must_use]
    pub const fn format(&self) -> SampleFormat {
        self.format
    }

    /// A fresh playable source positioned at the start of the clip.
    ///
    /// Every call shares the same sample memory.
    #[must_use]
    pub fn source(&self) -> SamplesBuffer {
        self.buffer.clone()
    }

    /// Number of interleaved samples
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the clip has no samples
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of frames (samples per channel)
    #[must_use]
    pub fn frames(&self) -> usize {
        self.len / usize::from(self.format.channels)
    }

    /// Playback length
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.format.duration_of(self.len)
    }
}

impl Payload for AudioClipAsset {
    const CATEGORY: Category = Category::AudioClip;
    const ON_COLLISION: CollisionPolicy = CollisionPolicy::LastWriteWins;

    type Options = ();

    fn accept(kind: AssetKind) -> Option<AssetKind> {
        matches!(kind, AssetKind::Mp3Audio | AssetKind::WavAudio).then_some(kind)
    }

    fn decode(kind: AssetKind, source: BoxedSource, _options: &()) -> Result<Self, AssetError> {
        let decoder = open_decoder(kind, source)?;
        let format = SampleFormat::of(&decoder)?;
        // Draining consumes the decoder, which closes the file
        let samples: Vec<f32> = decoder.collect();
        log::trace!("Buffered {} samples of {kind}", samples.len());
        Self::from_samples(format, samples)
    }
}
