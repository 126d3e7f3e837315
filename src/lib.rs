//! WavFx - Echo and vocal-removal filters for 16-bit PCM WAV files
//!
//! Both filters stream samples in a single pass between a 44-byte header
//! copied from the source and the destination file.

pub mod audio;
pub mod config;
pub mod error;
pub mod processing;

pub use config::{EchoArgs, EchoConfig, VocalArgs, VocalConfig};
pub use error::{WavFxError, Result};
pub use processing::{EchoProcessor, VocalRemover};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Log to stderr at info level, or debug when `verbose`
pub fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok();
}

pub fn get_library_info() -> LibraryInfo {
    LibraryInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)
    }
}
