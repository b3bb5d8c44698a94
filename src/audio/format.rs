//! Sample format and the shared decoder setup

use std::io::{Seek, SeekFrom};
use std::time::Duration;

use rodio::Source;
use rodio::decoder::DecoderBuilder;

use crate::assets::{AssetError, AssetKind, BoxedSource, DecodeError};

use super::stream::StreamDecoder;

/// Layout of decoded samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFormat {
    /// Frames per second
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
    /// Bits per decoded sample
    pub bits_per_sample: u16,
}

impl SampleFormat {
    /// Decoded samples are always 32-bit floats
    pub const DECODED_BITS: u16 = 32;

    /// Read the format off an opened decoder
    pub(crate) fn of(decoder: &impl Source) -> Result<Self, AssetError> {
        let format = Self {
            sample_rate: decoder.sample_rate(),
            channels: decoder.channels(),
            bits_per_sample: Self::DECODED_BITS,
        };
        if format.channels == 0 {
            return Err(DecodeError::InvalidSampleFormat("zero channels").into());
        }
        if format.sample_rate == 0 {
            return Err(DecodeError::InvalidSampleFormat("zero sample rate").into());
        }
        Ok(format)
    }

    /// Bytes used by one interleaved frame
    #[must_use]
    pub const fn frame_bytes(&self) -> usize {
        self.channels as usize * (self.bits_per_sample as usize / 8)
    }

    /// Duration of `samples` interleaved samples in this format
    #[must_use]
    pub fn duration_of(&self, samples: usize) -> Duration {
        let frames = samples as u64 / u64::from(self.channels.max(1));
        Duration::from_nanos(frames * 1_000_000_000 / u64::from(self.sample_rate.max(1)))
    }
}

/// Open a seekable decoder for an audio kind over `source`.
///
/// The byte length is measured up front so the decoder can seek and
/// report durations.
pub(crate) fn open_decoder(
    kind: AssetKind,
    mut source: BoxedSource,
) -> Result<StreamDecoder, AssetError> {
    let byte_len = source.seek(SeekFrom::End(0))?;
    source.rewind()?;

    let mut builder = DecoderBuilder::new()
        .with_data(source)
        .with_byte_len(byte_len)
        .with_seekable(true);
    if let Some(hint) = kind.codec_hint() {
        builder = builder.with_hint(hint);
    }
    Ok(builder.build()?)
}
