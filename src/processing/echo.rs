//! Echo mixer built on a circular delay line

use std::io::{Read, Write};
use log::debug;
use crate::audio::{SampleReader, SampleWriter};
use crate::config::validate_echo_params;
use crate::error::{WavFxError, Result};

/// Fixed-capacity ring of the most recent raw input samples.
///
/// Read and write share one cursor: the slot under the cursor is read before
/// it is overwritten.
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<i16>,
    index: usize,
}

impl DelayLine {
    pub fn new(delay: usize) -> Result<Self> {
        if delay == 0 {
            return Err(WavFxError::config("Delay must be greater than 0"));
        }
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(delay)
            .map_err(|e| WavFxError::resource(format!(
                "Failed to allocate echo buffer of {} samples: {}", delay, e
            )))?;
        buffer.resize(delay, 0);
        Ok(Self { buffer, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Store `sample` and return the one it displaced (`len()` samples old).
    pub fn exchange(&mut self, sample: i16) -> i16 {
        let delayed = std::mem::replace(&mut self.buffer[self.index], sample);
        self.advance();
        delayed
    }

    /// Yield every buffered sample oldest-first, one full cycle of the cursor.
    pub fn drain(&mut self) -> impl Iterator<Item = i16> + '_ {
        (0..self.buffer.len()).map(move |_| {
            let delayed = self.buffer[self.index];
            self.advance();
            delayed
        })
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.buffer.len();
    }
}

/// Counters from one echo pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoStats {
    pub input_samples: u64,
    pub tail_samples: u64,
    pub output_samples: u64,
    pub dropped_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct EchoMixer {
    delay_line: DelayLine,
    volume_scale: f32,
}

impl EchoMixer {
    pub fn new(delay: usize, volume_scale: f32) -> Result<Self> {
        validate_echo_params(delay, volume_scale)?;
        Ok(Self {
            delay_line: DelayLine::new(delay)?,
            volume_scale,
        })
    }

    pub fn delay(&self) -> usize {
        self.delay_line.len()
    }

    pub fn volume_scale(&self) -> f32 {
        self.volume_scale
    }

    /// Attenuate a delayed sample. `as` saturates and truncates toward zero.
    fn scale(&self, echo: i16) -> i16 {
        (echo as f32 / self.volume_scale) as i16
    }

    /// Mix one dry sample with the echo of the sample `delay` positions back.
    pub fn mix(&mut self, sample: i16) -> i16 {
        let echo = self.delay_line.exchange(sample);
        let mixed = sample as i32 + self.scale(echo) as i32;
        mixed.clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }

    /// Scaled residue of the delay line, `delay` samples long.
    pub fn tail(&mut self) -> Vec<i16> {
        let volume_scale = self.volume_scale;
        self.delay_line.drain()
            .map(|echo| (echo as f32 / volume_scale) as i16)
            .collect()
    }

    pub fn process_stream<R: Read, W: Write>(
        &mut self,
        reader: &mut SampleReader<R>,
        writer: &mut SampleWriter<W>,
    ) -> Result<EchoStats> {
        let mut stats = EchoStats::default();

        while let Some(sample) = reader.read_sample()? {
            writer.write_sample(self.mix(sample))?;
            stats.input_samples += 1;
        }
        debug!("Echo main pass: {} samples", stats.input_samples);

        for sample in self.tail() {
            writer.write_sample(sample)?;
            stats.tail_samples += 1;
        }
        debug!("Echo tail flushed: {} samples", stats.tail_samples);

        stats.output_samples = stats.input_samples + stats.tail_samples;
        stats.dropped_bytes = reader.dropped_bytes();
        Ok(stats)
    }

    /// In-memory variant of [`process_stream`](Self::process_stream)
    pub fn process_samples(&mut self, input: &[i16]) -> Vec<i16> {
        let mut output = Vec::with_capacity(input.len() + self.delay());
        output.extend(input.iter().map(|&s| self.mix(s)));
        output.extend(self.tail());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Cursor;
    use crate::audio::{samples_to_bytes, bytes_to_samples};

    #[test]
    fn test_delay_line_exchange() {
        let mut line = DelayLine::new(3).unwrap();
        assert_eq!(line.exchange(1), 0);
        assert_eq!(line.exchange(2), 0);
        assert_eq!(line.exchange(3), 0);
        assert_eq!(line.exchange(4), 1);
        assert_eq!(line.exchange(5), 2);
        // Holds [4, 5, 3], cursor at 2
        assert_eq!(line.drain().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_invalid_params() {
        assert!(DelayLine::new(0).is_err());
        assert!(EchoMixer::new(0, 4.0).is_err());
        assert!(EchoMixer::new(10, 0.0).is_err());
        assert!(EchoMixer::new(10, f32::INFINITY).is_err());
    }

    #[test]
    fn test_impulse_scenario() {
        let mut mixer = EchoMixer::new(2, 2.0).unwrap();
        let out = mixer.process_samples(&[100, 0, 0, 0]);
        // The line ends holding the last two dry samples, both zero
        assert_eq!(out, vec![100, 0, 50, 0, 0, 0]);
    }

    #[test]
    fn test_tail_for_input_shorter_than_delay() {
        let mut mixer = EchoMixer::new(3, 2.0).unwrap();
        let out = mixer.process_samples(&[100, 200]);
        assert_eq!(out, vec![100, 200, 0, 50, 100]);
    }

    #[test]
    fn test_output_length_and_dry_prefix() {
        let mut rng = rand::thread_rng();
        for &delay in &[1usize, 5, 64] {
            let input: Vec<i16> = (0..200).map(|_| rng.gen_range(-1000..1000)).collect();
            let mut mixer = EchoMixer::new(delay, 3.0).unwrap();
            let out = mixer.process_samples(&input);

            assert_eq!(out.len(), input.len() + delay);
            assert_eq!(&out[..delay], &input[..delay]);
        }
    }

    #[test]
    fn test_tail_is_scaled_last_inputs() {
        let input: Vec<i16> = (1..=10).map(|x| x * 100).collect();
        let delay = 4;
        let mut mixer = EchoMixer::new(delay, 3.0).unwrap();
        let out = mixer.process_samples(&input);

        let tail = &out[input.len()..];
        for k in 0..delay {
            let expected = (input[input.len() - delay + k] as f32 / 3.0) as i16;
            assert_eq!(tail[k], expected);
        }
    }

    #[test]
    fn test_echo_is_of_dry_signal() {
        // A wet feedback loop would make sample 4 pick up 2x attenuation of sample 0
        let mut mixer = EchoMixer::new(2, 2.0).unwrap();
        let out = mixer.process_samples(&[1000, 0, 0, 0, 0, 0]);
        assert_eq!(out, vec![1000, 0, 500, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_saturation() {
        let mut mixer = EchoMixer::new(1, 0.25).unwrap();
        let out = mixer.process_samples(&[i16::MAX, i16::MAX, i16::MIN, i16::MIN]);
        // Scaled echo saturates before the sum is clamped
        assert_eq!(out, vec![i16::MAX, i16::MAX, -1, i16::MIN, i16::MIN]);

        let mut mixer = EchoMixer::new(1, 0.5).unwrap();
        let out = mixer.process_samples(&[30000]);
        assert_eq!(out, vec![30000, i16::MAX]);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut mixer = EchoMixer::new(1, 2.0).unwrap();
        let out = mixer.process_samples(&[-3, 0]);
        assert_eq!(out, vec![-3, -1, 0]);
    }

    #[test]
    fn test_adversarial_inputs_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let delay = rng.gen_range(1..16);
            let volume_scale = rng.gen_range(0.01f32..1.0);
            let input: Vec<i16> = (0..256)
                .map(|_| if rng.gen_bool(0.5) { i16::MAX - rng.gen_range(0..8) } else { i16::MIN + rng.gen_range(0..8) })
                .collect();

            let mut mixer = EchoMixer::new(delay, volume_scale).unwrap();
            let out = mixer.process_samples(&input);
            assert_eq!(out.len(), input.len() + delay);

            // Same-sign pairs at the rails must stay pinned to the rail
            for i in delay..input.len() {
                let (dry, echo) = (input[i], input[i - delay]);
                if dry > 0 && echo > 0 {
                    assert_eq!(out[i], i16::MAX);
                } else if dry < 0 && echo < 0 {
                    assert_eq!(out[i], i16::MIN);
                }
            }
        }
    }

    #[test]
    fn test_process_stream_matches_in_memory() {
        let input: Vec<i16> = (0..50).map(|i| (i * 37 % 200 - 100) as i16).collect();
        let mut bytes = samples_to_bytes(&input);
        bytes.push(0x01);

        let mut reader = SampleReader::new(Cursor::new(bytes));
        let mut writer = SampleWriter::new(Vec::new());
        let stats = EchoMixer::new(7, 4.0).unwrap()
            .process_stream(&mut reader, &mut writer).unwrap();

        assert_eq!(stats.input_samples, 50);
        assert_eq!(stats.tail_samples, 7);
        assert_eq!(stats.output_samples, 57);
        assert_eq!(stats.dropped_bytes, 1);

        let expected = EchoMixer::new(7, 4.0).unwrap().process_samples(&input);
        assert_eq!(bytes_to_samples(&writer.into_inner()), expected);
    }
}
