//! Audio streams read from the open file on demand

use std::fmt;
use std::time::Duration;

use rodio::{Decoder, Source};

use crate::assets::{
    AssetError, AssetKind, BoxedSource, Category, CollisionPolicy, DecodeError, Payload,
};

use super::format::{SampleFormat, open_decoder};

/// Decoder type held by an open stream
pub type StreamDecoder = Decoder<BoxedSource>;

/// An audio stream that keeps its source file open
///
/// Samples are pulled on demand and the stream can seek. The registry never
/// closes it: call [`AudioStreamAsset::close`] once playback is done.
/// Dropping the asset releases the file handle as well.
pub struct AudioStreamAsset {
    /// Open decoder, `None` once closed
    decoder: Option<StreamDecoder>,
    /// Sample layout
    format: SampleFormat,
    /// Total length, when the container reports it
    total_duration: Option<Duration>,
}

impl AudioStreamAsset {
    /// Wrap an already opened decoder
    ///
    /// # Errors
    ///
    /// Returns a decode error if the decoder reports an unusable format.
    pub fn from_decoder(decoder: StreamDecoder) -> Result<Self, AssetError> {
        let format = SampleFormat::of(&decoder)?;
        let total_duration = decoder.total_duration();
        Ok(Self {
            decoder: Some(decoder),
            format,
            total_duration,
        })
    }

    /// Sample layout of the stream
    #[must_use]
    pub const fn format(&self) -> SampleFormat {
        self.format
    }

    /// Total length, if known
    #[must_use]
    pub const fn total_duration(&self) -> Option<Duration> {
        self.total_duration
    }

    /// Check if the stream has been closed
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.decoder.is_none()
    }

    /// The open decoder, to feed a sink or read directly
    pub fn source_mut(&mut self) -> Option<&mut StreamDecoder> {
        self.decoder.as_mut()
    }

    /// Give up the open decoder, leaving the asset closed
    pub fn take_source(&mut self) -> Option<StreamDecoder> {
        self.decoder.take()
    }

    /// Pull up to `buf.len()` interleaved samples.
    ///
    /// Returns the number written; 0 at the end of the stream or once closed.
    pub fn read(&mut self, buf: &mut [f32]) -> usize {
        let Some(decoder) = self.decoder.as_mut() else {
            return 0;
        };
        let mut written = 0;
        for (slot, sample) in buf.iter_mut().zip(decoder) {
            *slot = sample;
            written += 1;
        }
        written
    }

    /// Seek to `pos` from the start of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::StreamClosed`] after [`AudioStreamAsset::close`],
    /// or the decoder's seek error.
    pub fn seek(&mut self, pos: Duration) -> Result<(), AssetError> {
        let decoder = self.decoder.as_mut().ok_or(DecodeError::StreamClosed)?;
        decoder.try_seek(pos)?;
        Ok(())
    }

    /// Release the decoder and its file handle.
    ///
    /// Closing an already closed stream is a no-op.
    pub fn close(&mut self) {
        if self.decoder.take().is_some() {
            log::trace!("Closed audio stream");
        }
    }
}

impl fmt::Debug for AudioStreamAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStreamAsset")
            .field("format", &self.format)
            .field("total_duration", &self.total_duration)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Payload for AudioStreamAsset {
    const CATEGORY: Category = Category::AudioStream;
    const ON_COLLISION: CollisionPolicy = CollisionPolicy::LastWriteWins;

    type Options = ();

    fn accept(kind: AssetKind) -> Option<AssetKind> {
        kind.streaming()
    }

    fn decode(kind: AssetKind, source: BoxedSource, _options: &()) -> Result<Self, AssetError> {
        Self::from_decoder(open_decoder(kind, source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Registry;
    use crate::test_support::fixture;

    #[test]
    fn test_load_stream_retags_kind() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        let stream = streams.load("theme", fixture("audio.wav")).unwrap();

        assert_eq!(stream.kind(), AssetKind::WavAudioStream);
        assert_eq!(stream.data().format().sample_rate, 8000);
        assert!(!stream.data().is_closed());
    }

    #[test]
    fn test_stream_reads_on_demand_and_seeks() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        streams.load("theme", fixture("stereo.wav")).unwrap();
        let stream = streams.get_mut("theme").unwrap().data_mut();

        let mut buf = [0.0_f32; 64];
        assert_eq!(stream.read(&mut buf), 64);
        assert!(stream.source_mut().is_some());

        stream.seek(Duration::ZERO).unwrap();
        assert!(stream.read(&mut buf) > 0);
    }

    #[test]
    fn test_load_mp3_stream() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        let stream = streams.load("theme", fixture("silence.mp3")).unwrap();
        assert_eq!(stream.kind(), AssetKind::Mp3AudioStream);

        let stream = streams.get_mut("theme").unwrap().data_mut();
        let mut buf = [0.0_f32; 256];
        assert!(stream.read(&mut buf) > 0);
        assert!(stream.seek(Duration::ZERO).is_ok());
        assert!(stream.read(&mut buf) > 0);
    }

    #[test]
    fn test_stream_last_write_wins() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        assert_eq!(streams.collision_policy(), CollisionPolicy::LastWriteWins);

        streams.load("theme", fixture("audio.wav")).unwrap();
        let stream = streams.load("theme", fixture("silence.mp3")).unwrap();
        assert_eq!(stream.kind(), AssetKind::Mp3AudioStream);
        assert_eq!(stream.path(), fixture("silence.mp3"));
        assert_eq!(streams.len(), 1);
    }

    #[test]
    fn test_close_stream() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        streams.load("theme", fixture("audio.wav")).unwrap();

        let mut removed = streams.remove("theme").unwrap();
        let stream = removed.data_mut();
        stream.close();
        assert!(stream.is_closed());

        let mut buf = [0.0_f32; 8];
        assert_eq!(stream.read(&mut buf), 0);
        assert!(matches!(
            stream.seek(Duration::ZERO),
            Err(AssetError::Decode(DecodeError::StreamClosed))
        ));
        // Closing twice is harmless
        stream.close();
    }

    #[test]
    fn test_stream_rejects_non_audio() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        let err = streams.load("label", fixture("sans.ttf")).unwrap_err();
        assert!(matches!(
            err,
            AssetError::UnsupportedAssetType {
                category: Category::AudioStream,
                ..
            }
        ));
    }

    #[test]
    fn test_debug_output() {
        let mut streams = Registry::<AudioStreamAsset>::new();
        let stream = streams.load("theme", fixture("audio.wav")).unwrap();
        let debug = format!("{:?}", stream.data());
        assert!(debug.contains("closed: false"));
    }
}
