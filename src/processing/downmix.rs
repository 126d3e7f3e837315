//! Stereo difference downmix (vocal removal)
//!
//! Each (left, right) pair becomes `(d, d)` with `d = (left - right) / 2`.
//! Content panned to the center cancels; the rest survives as mono.

use std::io::{Read, Write};
use log::debug;
use crate::audio::{SampleReader, SampleWriter};
use crate::error::Result;

/// Counters from one downmix pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownmixStats {
    pub pairs: u64,
    pub dropped_bytes: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DownmixFilter;

impl DownmixFilter {
    pub fn new() -> Self {
        Self
    }

    /// Half the channel difference, truncated toward zero. Always fits in i16.
    pub fn downmix_pair(left: i16, right: i16) -> i16 {
        ((left as i32 - right as i32) / 2) as i16
    }

    pub fn process_stream<R: Read, W: Write>(
        &self,
        reader: &mut SampleReader<R>,
        writer: &mut SampleWriter<W>,
    ) -> Result<DownmixStats> {
        let mut stats = DownmixStats::default();

        while let Some((left, right)) = reader.read_pair()? {
            let mono = Self::downmix_pair(left, right);
            writer.write_pair(mono, mono)?;
            stats.pairs += 1;
        }

        stats.dropped_bytes = reader.dropped_bytes();
        if stats.dropped_bytes > 0 {
            debug!("Discarded {} trailing bytes of an incomplete stereo pair", stats.dropped_bytes);
        }
        Ok(stats)
    }

    /// In-memory variant over interleaved samples
    pub fn process_samples(&self, interleaved: &[i16]) -> Vec<i16> {
        interleaved.chunks_exact(2)
            .flat_map(|pair| {
                let mono = Self::downmix_pair(pair[0], pair[1]);
                [mono, mono]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Cursor;
    use crate::audio::{samples_to_bytes, bytes_to_samples};

    #[test]
    fn test_pairs_scenario() {
        let filter = DownmixFilter::new();
        let out = filter.process_samples(&[1000, 1000, 500, -500]);
        assert_eq!(out, vec![0, 0, 500, 500]);
    }

    #[test]
    fn test_extremes_fit() {
        assert_eq!(DownmixFilter::downmix_pair(i16::MAX, i16::MIN), i16::MAX);
        assert_eq!(DownmixFilter::downmix_pair(i16::MIN, i16::MAX), -i16::MAX);
        assert_eq!(DownmixFilter::downmix_pair(-3, 0), -1);
        assert_eq!(DownmixFilter::downmix_pair(3, 0), 1);
    }

    #[test]
    fn test_random_pairs() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let left: i16 = rng.r#gen();
            let right: i16 = rng.r#gen();
            let d = DownmixFilter::downmix_pair(left, right);
            assert_eq!(d as i32, (left as i32 - right as i32) / 2);
            assert_eq!(DownmixFilter::downmix_pair(left, left), 0);
        }
    }

    #[test]
    fn test_odd_sample_count() {
        let filter = DownmixFilter::new();
        let out = filter.process_samples(&[10, 2, 8, 4, 99]);
        assert_eq!(out, vec![4, 4, 2, 2]);
    }

    #[test]
    fn test_process_stream() {
        let bytes = samples_to_bytes(&[1000, 1000, 500, -500, 7]);
        let mut reader = SampleReader::new(Cursor::new(bytes));
        let mut writer = SampleWriter::new(Vec::new());

        let stats = DownmixFilter::new().process_stream(&mut reader, &mut writer).unwrap();
        assert_eq!(stats.pairs, 2);
        assert_eq!(stats.dropped_bytes, 2);
        assert_eq!(bytes_to_samples(&writer.into_inner()), vec![0, 0, 500, 500]);
    }
}
