//! Command line arguments and run configuration for both filters

use crate::error::{WavFxError, Result};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DELAY: usize = 8000;
pub const DEFAULT_VOLUME_SCALE: f32 = 4.0;

#[derive(Debug, Clone, Parser)]
#[command(name = "addecho", about = "Add an echo to a 16-bit PCM WAV file", version)]
pub struct EchoArgs {
    #[arg(short = 'd', long = "delay", default_value_t = DEFAULT_DELAY as i64, allow_negative_numbers = true, help = "Echo delay (number of samples)")]
    pub delay: i64,

    #[arg(short = 'v', long = "volume-scale", default_value_t = DEFAULT_VOLUME_SCALE, allow_negative_numbers = true, help = "Divisor applied to the delayed signal")]
    pub volume_scale: f32,

    #[arg(long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(value_name = "SOURCE", help = "Source WAV file")]
    pub source: PathBuf,

    #[arg(value_name = "DEST", help = "Destination WAV file")]
    pub dest: PathBuf,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "remvocals", about = "Remove center-panned vocals from a stereo 16-bit PCM WAV file", version)]
pub struct VocalArgs {
    #[arg(long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(value_name = "SOURCE", help = "Source WAV file")]
    pub source: PathBuf,

    #[arg(value_name = "DEST", help = "Destination WAV file")]
    pub dest: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EchoConfig {
    pub delay: usize,
    pub volume_scale: f32,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub verbose: bool,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            volume_scale: DEFAULT_VOLUME_SCALE,
            input_path: PathBuf::from("input.wav"),
            output_path: PathBuf::from("output.wav"),
            verbose: false,
        }
    }
}

impl EchoConfig {
    /// Build a validated config from parsed arguments
    pub fn from_args(args: EchoArgs) -> Result<Self> {
        if args.delay <= 0 {
            return Err(WavFxError::config(format!(
                "Delay must be greater than 0, got {}", args.delay
            )));
        }
        let delay = usize::try_from(args.delay)
            .map_err(|_| WavFxError::config(format!("Delay too large: {}", args.delay)))?;

        let config = Self {
            delay,
            volume_scale: args.volume_scale,
            input_path: args.source,
            output_path: args.dest,
            verbose: args.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_echo_params(self.delay, self.volume_scale)
    }
}

/// Checks shared by the config layer and `EchoMixer::new`.
pub fn validate_echo_params(delay: usize, volume_scale: f32) -> Result<()> {
    if delay == 0 {
        return Err(WavFxError::config("Delay must be greater than 0"));
    }
    if !volume_scale.is_finite() {
        return Err(WavFxError::config(format!(
            "Volume scale must be a finite number, got {}", volume_scale
        )));
    }
    if volume_scale <= 0.0 {
        return Err(WavFxError::config(format!(
            "Volume scale must be greater than 0, got {}", volume_scale
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocalConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub verbose: bool,
}

impl VocalConfig {
    pub fn from_args(args: VocalArgs) -> Self {
        Self {
            input_path: args.source,
            output_path: args.dest,
            verbose: args.verbose,
        }
    }
}
