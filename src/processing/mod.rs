//! Sample Transform Pipeline

pub mod echo;
pub mod downmix;
pub mod processor;

pub use echo::{DelayLine, EchoMixer, EchoStats};
pub use downmix::{DownmixFilter, DownmixStats};
pub use processor::{EchoProcessor, VocalRemover, ProcessingResult};
