//! Recording infrastructure module
//!
//! Audio-mode sessions hand back raw PCM; this module encodes it to FLAC and
//! keeps it on disk.

mod archive;
mod flac_encoder;

pub use archive::{AudioArchive, ArchiveError};
pub use flac_encoder::{encode_clip, encode_to_flac, EncodingError};
