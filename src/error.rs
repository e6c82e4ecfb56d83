// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Store(StoreError),
}

/// Specific error types for remote-store operations.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// The server could not be reached (DNS, connect, TLS, timeout).
    Unreachable(String),

    /// The server answered with a non-success status.
    Status(u16),

    /// The requested record does not exist.
    NotFound,

    /// The response body could not be decoded.
    Decode(String),

    /// An upload was rejected or interrupted.
    Upload(String),

    /// Generic error with raw message
    Other(String),
}

impl StoreError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StoreError::Unreachable(_) => "error-store-unreachable",
            StoreError::Status(_) => "error-store-status",
            StoreError::NotFound => "error-store-not-found",
            StoreError::Decode(_) => "error-store-decode",
            StoreError::Upload(_) => "error-store-upload",
            StoreError::Other(_) => "error-store-general",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unreachable(msg) => write!(f, "Server unreachable: {}", msg),
            StoreError::Status(code) => write!(f, "Server returned status {}", code),
            StoreError::NotFound => write!(f, "Record not found"),
            StoreError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            StoreError::Upload(msg) => write!(f, "Upload failed: {}", msg),
            StoreError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            StoreError::Unreachable(err.to_string())
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Status(status.as_u16())
        } else {
            StoreError::Other(err.to_string())
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Store(e) => write!(f, "Store Error: {}", e),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
