//! Fixed-size WAV header block and the post-write size rewriter

use std::io::{Read, Seek, SeekFrom, Write};
use log::debug;
use crate::error::{WavFxError, Result};

/// Size of the canonical PCM WAV header in bytes
pub const HEADER_SIZE: usize = 44;
/// Offset of the RIFF chunk size field (file length minus 8)
pub const RIFF_SIZE_OFFSET: u64 = 4;
/// Offset of the data subchunk size field
pub const DATA_SIZE_OFFSET: u64 = 40;

/// Opaque 44-byte header. Only the two size fields are ever interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    bytes: [u8; HEADER_SIZE],
}

impl WavHeader {
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => WavFxError::header(format!(
                "Source is shorter than the {}-byte header", HEADER_SIZE
            )),
            _ => WavFxError::io(format!("Unable to read header: {}", e)),
        })?;
        Ok(Self { bytes })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.bytes)
            .map_err(|e| WavFxError::io(format!("Unable to write header: {}", e)))
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    pub fn riff_chunk_size(&self) -> u32 {
        self.field(RIFF_SIZE_OFFSET as usize)
    }

    pub fn data_chunk_size(&self) -> u32 {
        self.field(DATA_SIZE_OFFSET as usize)
    }

    fn field(&self, offset: usize) -> u32 {
        let mut le = [0u8; 4];
        le.copy_from_slice(&self.bytes[offset..offset + 4]);
        u32::from_le_bytes(le)
    }
}

/// Size fields written by [`rewrite_sizes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSizes {
    pub total_length: u64,
    pub riff_chunk_size: u32,
    pub data_chunk_size: u32,
}

impl HeaderSizes {
    pub fn for_length(total_length: u64) -> Result<Self> {
        if total_length < HEADER_SIZE as u64 {
            return Err(WavFxError::header(format!(
                "Output is {} bytes, smaller than the header", total_length
            )));
        }
        let riff_chunk_size = u32::try_from(total_length - 8)
            .map_err(|_| WavFxError::header(format!(
                "Output of {} bytes does not fit 32-bit size fields", total_length
            )))?;
        let data_chunk_size = u32::try_from(total_length - HEADER_SIZE as u64)
            .map_err(|_| WavFxError::header(format!(
                "Output of {} bytes does not fit 32-bit size fields", total_length
            )))?;

        Ok(Self { total_length, riff_chunk_size, data_chunk_size })
    }
}

/// Patch both size fields of an already-written output in place.
///
/// Must run after every sample has been written. Leaves the cursor at the end.
pub fn rewrite_sizes<W: Write + Seek>(out: &mut W) -> Result<HeaderSizes> {
    let total_length = out.seek(SeekFrom::End(0))?;
    let sizes = HeaderSizes::for_length(total_length)?;

    out.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
    out.write_all(&sizes.riff_chunk_size.to_le_bytes())?;
    out.seek(SeekFrom::Start(DATA_SIZE_OFFSET))?;
    out.write_all(&sizes.data_chunk_size.to_le_bytes())?;
    out.seek(SeekFrom::End(0))?;
    out.flush()?;

    debug!("Header sizes rewritten: riff={} data={} (total {} bytes)",
           sizes.riff_chunk_size, sizes.data_chunk_size, total_length);
    Ok(sizes)
}
