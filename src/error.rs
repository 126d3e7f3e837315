//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum WavFxError {
    #[error("Config error: {message}")]
    Config { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
    #[error("Header error: {message}")]
    Header { message: String },
    #[error("Resource error: {message}")]
    Resource { message: String },
}

impl WavFxError {
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
    pub fn header<S: Into<String>>(msg: S) -> Self { Self::Header { message: msg.into() } }
    pub fn resource<S: Into<String>>(msg: S) -> Self { Self::Resource { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, WavFxError>;

impl From<std::io::Error> for WavFxError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}
