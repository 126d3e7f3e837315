//! Audio Container Module
//!
//! Raw access to simplified PCM WAV files: a fixed 44-byte header followed by
//! little-endian 16-bit samples. The header is carried as opaque bytes.

pub mod header;
pub mod samples;

pub use header::{WavHeader, HeaderSizes, rewrite_sizes, HEADER_SIZE, RIFF_SIZE_OFFSET, DATA_SIZE_OFFSET};
pub use samples::{SampleReader, SampleWriter, samples_to_bytes, bytes_to_samples, BYTES_PER_SAMPLE};
