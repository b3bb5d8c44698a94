//! Audio assets
//!
//! Built on top of the rodio decoders. Supports MP3 and WAV, either fully
//! buffered in memory (clips) or pulled from the open file on demand
//! (streams).

mod clip;
mod format;
mod stream;

pub use clip::AudioClipAsset;
pub use format::SampleFormat;
pub use stream::{AudioStreamAsset, StreamDecoder};
