//! FLAC encoding for archived recordings
//!
//! Mono, 16-bit, at whatever rate the microphone delivered.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

use crate::domain::recording::{AudioClip, AudioData, AudioMimeType};

const BITS_PER_SAMPLE: usize = 16;

const CHANNELS: usize = 1;

/// FLAC encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Nothing to encode")]
    Empty,

    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),
}

/// Encode mono i16 PCM at `sample_rate` to FLAC bytes
pub fn encode_to_flac(pcm_samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodingError> {
    if pcm_samples.is_empty() {
        return Err(EncodingError::Empty);
    }

    // flacenc works on i32
    let samples: Vec<i32> = pcm_samples.iter().map(|&s| s as i32).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(&samples, CHANNELS, BITS_PER_SAMPLE, sample_rate as usize);

    let stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| EncodingError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| EncodingError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}

/// Encode a captured clip
pub fn encode_clip(clip: &AudioClip) -> Result<AudioData, EncodingError> {
    let bytes = encode_to_flac(clip.samples(), clip.sample_rate())?;
    Ok(AudioData::new(bytes, AudioMimeType::Flac))
}
