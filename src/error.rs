//! Error types for multi-get.
//!
//! Sizing and planning failures are fatal and surface as [`FetchError`].
//! Per-chunk transport failures are data: they travel inside a
//! [`ChunkResult`](crate::worker::ChunkResult) as a [`ChunkError`] so that
//! sibling chunks keep running.
use crate::request::ByteRange;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("content length unavailable: {0}")]
    SizeUnavailable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("chunk {index} (bytes {range}) failed: {reason}")]
    ChunkFailed {
        index: usize,
        range: ByteRange,
        reason: ChunkError,
    },

    #[error("failed to open {} for write: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Failures raised while the assembler writes chunk buffers to the sink.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to size output to {len} bytes: {source}")]
    Allocate {
        len: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to write chunk {index} (bytes {range}): {source}")]
    Chunk {
        index: usize,
        range: ByteRange,
        #[source]
        source: io::Error,
    },

    #[error("failed to flush output: {0}")]
    Flush(#[source] io::Error),

    #[error("output is incomplete, missing {}", MissingList(.0))]
    MissingChunks(Vec<MissingChunk>),
}

/// A chunk that could not be written because its fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingChunk {
    pub index: usize,
    pub range: ByteRange,
}

struct MissingList<'a>(&'a [MissingChunk]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "chunk {} (bytes {})", chunk.index, chunk.range)?;
        }
        Ok(())
    }
}

/// Why a single chunk fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkErrorKind {
    Connect,
    Timeout,
    Status(u16),
    Body,
    LengthMismatch { expected: u64, actual: u64 },
    /// The worker task ended without producing a result (panicked or was cancelled).
    Aborted,
    Other,
}

/// Structured per-chunk failure: a kind for programmatic checks plus the
/// transport's own message for the diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ChunkError {
    pub kind: ChunkErrorKind,
    pub message: String,
}

impl ChunkError {
    pub fn new(kind: ChunkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ChunkError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            ChunkErrorKind::Timeout
        } else if e.is_connect() {
            ChunkErrorKind::Connect
        } else if let Some(status) = e.status() {
            ChunkErrorKind::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            ChunkErrorKind::Body
        } else {
            ChunkErrorKind::Other
        };
        Self::new(kind, e.to_string())
    }
}
