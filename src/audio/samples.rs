//! Little-endian 16-bit sample streams

use std::io::{ErrorKind, Read, Write};
use crate::error::{WavFxError, Result};

pub const BYTES_PER_SAMPLE: usize = 2;

/// Sequential reader of 16-bit samples.
///
/// A trailing fragment shorter than the requested unit ends the stream; its
/// length is kept in `dropped_bytes`.
#[derive(Debug)]
pub struct SampleReader<R> {
    inner: R,
    samples_read: u64,
    dropped_bytes: usize,
}

impl<R: Read> SampleReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, samples_read: 0, dropped_bytes: 0 }
    }

    pub fn read_sample(&mut self) -> Result<Option<i16>> {
        let mut buf = [0u8; BYTES_PER_SAMPLE];
        if !self.fill(&mut buf)? {
            return Ok(None);
        }
        self.samples_read += 1;
        Ok(Some(i16::from_le_bytes(buf)))
    }

    /// Read one interleaved (left, right) pair
    pub fn read_pair(&mut self) -> Result<Option<(i16, i16)>> {
        let mut buf = [0u8; 2 * BYTES_PER_SAMPLE];
        if !self.fill(&mut buf)? {
            return Ok(None);
        }
        self.samples_read += 2;
        Ok(Some((
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
        )))
    }

    pub fn samples_read(&self) -> u64 {
        self.samples_read
    }

    pub fn dropped_bytes(&self) -> usize {
        self.dropped_bytes
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fill `buf` completely, or return false at end of stream.
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(WavFxError::io(format!("Unable to read audio data: {}", e))),
            }
        }
        if filled == buf.len() {
            Ok(true)
        } else {
            self.dropped_bytes += filled;
            Ok(false)
        }
    }
}

/// Sequential writer of 16-bit samples
#[derive(Debug)]
pub struct SampleWriter<W> {
    inner: W,
    samples_written: u64,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, samples_written: 0 }
    }

    pub fn write_sample(&mut self, sample: i16) -> Result<()> {
        self.inner.write_all(&sample.to_le_bytes())
            .map_err(|e| WavFxError::io(format!("Unable to write audio data: {}", e)))?;
        self.samples_written += 1;
        Ok(())
    }

    pub fn write_pair(&mut self, left: i16, right: i16) -> Result<()> {
        let mut buf = [0u8; 2 * BYTES_PER_SAMPLE];
        buf[..2].copy_from_slice(&left.to_le_bytes());
        buf[2..].copy_from_slice(&right.to_le_bytes());
        self.inner.write_all(&buf)
            .map_err(|e| WavFxError::io(format!("Unable to write audio data: {}", e)))?;
        self.samples_written += 2;
        Ok(())
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
            .map_err(|e| WavFxError::io(format!("Unable to flush audio data: {}", e)))
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Serialize samples as little-endian bytes
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Parse little-endian bytes into samples; a trailing odd byte is ignored
pub fn bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes.chunks_exact(BYTES_PER_SAMPLE)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_samples() {
        let bytes = samples_to_bytes(&[1, -2, i16::MAX, i16::MIN]);
        let mut reader = SampleReader::new(Cursor::new(bytes));

        let mut got = Vec::new();
        while let Some(s) = reader.read_sample().unwrap() {
            got.push(s);
        }
        assert_eq!(got, vec![1, -2, i16::MAX, i16::MIN]);
        assert_eq!(reader.samples_read(), 4);
        assert_eq!(reader.dropped_bytes(), 0);
    }

    #[test]
    fn test_odd_trailing_byte_is_dropped() {
        let mut bytes = samples_to_bytes(&[7, 8]);
        bytes.push(0xAB);
        let mut reader = SampleReader::new(Cursor::new(bytes));

        assert_eq!(reader.read_sample().unwrap(), Some(7));
        assert_eq!(reader.read_sample().unwrap(), Some(8));
        assert_eq!(reader.read_sample().unwrap(), None);
        assert_eq!(reader.dropped_bytes(), 1);
    }

    #[test]
    fn test_read_pairs_drops_unpaired_sample() {
        let bytes = samples_to_bytes(&[10, 20, 30, 40, 50]);
        let mut reader = SampleReader::new(Cursor::new(bytes));

        assert_eq!(reader.read_pair().unwrap(), Some((10, 20)));
        assert_eq!(reader.read_pair().unwrap(), Some((30, 40)));
        assert_eq!(reader.read_pair().unwrap(), None);
        assert_eq!(reader.samples_read(), 4);
        assert_eq!(reader.dropped_bytes(), 2);
    }

    #[test]
    fn test_writer_counts_and_encodes() {
        let mut writer = SampleWriter::new(Vec::new());
        writer.write_sample(-1).unwrap();
        writer.write_pair(256, 3).unwrap();
        assert_eq!(writer.samples_written(), 3);
        assert_eq!(writer.into_inner(), vec![0xff, 0xff, 0x00, 0x01, 0x03, 0x00]);
    }

    #[test]
    fn test_byte_helpers() {
        assert_eq!(bytes_to_samples(&[0x34, 0x12, 0x01]), vec![0x1234]);
        assert_eq!(samples_to_bytes(&[0x1234]), vec![0x34, 0x12]);
    }
}
