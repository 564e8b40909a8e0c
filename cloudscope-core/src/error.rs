//! Error types for cloudscope

use thiserror::Error;

/// Main error type for cloudscope operations
#[derive(Error, Debug)]
pub enum Error {
    /// An incoming point-cloud message violated the expected layout
    /// contract. The frame is dropped; the previously published frame
    /// stays visible.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
