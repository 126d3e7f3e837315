//! File-level pipelines: header transfer, sample transform, header fix-up

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use log::{debug, info, warn};
use crate::audio::{rewrite_sizes, HeaderSizes, SampleReader, SampleWriter, WavHeader};
use crate::config::{EchoConfig, VocalConfig};
use crate::error::{WavFxError, Result};
use super::{DownmixFilter, DownmixStats, EchoMixer, EchoStats};

#[derive(Debug, Clone)]
pub struct ProcessingResult<S> {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub processing_time: Duration,
    pub stats: S,
    /// Present only when the header was rewritten
    pub header_sizes: Option<HeaderSizes>,
}

fn open_source(path: &Path) -> Result<(BufReader<File>, WavHeader)> {
    let file = File::open(path)
        .map_err(|e| WavFxError::io(format!("Unable to open source file {}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);
    let header = WavHeader::read_from(&mut reader)?;
    debug!("Read header from {}", path.display());
    Ok((reader, header))
}

fn create_dest(path: &Path, header: &WavHeader) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| WavFxError::io(format!("Unable to open destination file {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    header.write_to(&mut writer)?;
    debug!("Copied header to {}", path.display());
    Ok(writer)
}

fn warn_dropped(dropped_bytes: usize) {
    if dropped_bytes > 0 {
        warn!("Ignored {} trailing bytes that do not form a complete frame", dropped_bytes);
    }
}

/// Echo tool pipeline
#[derive(Debug)]
pub struct EchoProcessor {
    config: EchoConfig,
}

impl EchoProcessor {
    pub fn new(config: EchoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    pub fn run(&self) -> Result<ProcessingResult<EchoStats>> {
        self.process_file(&self.config.input_path, &self.config.output_path)
    }

    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<ProcessingResult<EchoStats>> {
        let start_time = Instant::now();
        info!("Adding echo: delay={} samples, volume_scale={}", self.config.delay, self.config.volume_scale);

        let (reader, header) = open_source(input_path)?;
        // Delay line must exist before the destination is created
        let mut mixer = EchoMixer::new(self.config.delay, self.config.volume_scale)?;
        let writer = create_dest(output_path, &header)?;

        let mut reader = SampleReader::new(reader);
        let mut writer = SampleWriter::new(writer);
        let stats = mixer.process_stream(&mut reader, &mut writer)?;
        writer.flush()?;
        warn_dropped(stats.dropped_bytes);

        let mut file = writer.into_inner().into_inner()
            .map_err(|e| WavFxError::io(format!("Unable to flush destination file: {}", e.error())))?;
        let header_sizes = rewrite_sizes(&mut file)?;
        file.sync_all()?;

        let processing_time = start_time.elapsed();
        info!("Wrote {} samples ({} input + {} tail) to {} in {:.3}s",
              stats.output_samples, stats.input_samples, stats.tail_samples,
              output_path.display(), processing_time.as_secs_f64());

        Ok(ProcessingResult {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            processing_time,
            stats,
            header_sizes: Some(header_sizes),
        })
    }
}

/// Vocal-removal tool pipeline. Output length equals input length, so the
/// copied header stays valid.
#[derive(Debug)]
pub struct VocalRemover {
    config: VocalConfig,
    filter: DownmixFilter,
}

impl VocalRemover {
    pub fn new(config: VocalConfig) -> Self {
        Self { config, filter: DownmixFilter::new() }
    }

    pub fn run(&self) -> Result<ProcessingResult<DownmixStats>> {
        self.process_file(&self.config.input_path, &self.config.output_path)
    }

    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<ProcessingResult<DownmixStats>> {
        let start_time = Instant::now();
        info!("Removing vocals from {}", input_path.display());

        let (reader, header) = open_source(input_path)?;
        let writer = create_dest(output_path, &header)?;

        let mut reader = SampleReader::new(reader);
        let mut writer = SampleWriter::new(writer);
        let stats = self.filter.process_stream(&mut reader, &mut writer)?;
        writer.flush()?;
        warn_dropped(stats.dropped_bytes);

        let processing_time = start_time.elapsed();
        info!("Wrote {} stereo pairs to {} in {:.3}s",
              stats.pairs, output_path.display(), processing_time.as_secs_f64());

        Ok(ProcessingResult {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            processing_time,
            stats,
            header_sizes: None,
        })
    }
}
