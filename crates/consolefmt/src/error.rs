//! Error types for the console formatting engine.

use std::io;

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the console engine and its sinks.
///
/// Configuration errors surface synchronously at the point of misuse; sink
/// write failures pass through from the underlying destination unchanged and
/// are never retried here.
#[derive(Debug, Error)]
pub enum Error {
    /// The wrap point must leave at least one content column per line.
    #[error("wrap width must be at least 1, got {0}")]
    InvalidWrapWidth(usize),

    /// A style token name did not match any known token.
    #[error("unknown style token: {0:?}")]
    UnknownStyle(String),

    /// The underlying sink failed to accept bytes.
    #[error("sink write error: {0}")]
    Sink(#[from] io::Error),
}
