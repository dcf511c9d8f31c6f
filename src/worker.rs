use crate::error::{ChunkError, ChunkErrorKind, FetchError};
use crate::request::ByteRange;
use reqwest::header::RANGE;

/// Upper bound on the buffer reserved before the first body byte arrives.
const MAX_PREALLOC: u64 = 8 << 20;

/// Outcome of one chunk's fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkStatus {
    Ok,
    Failed(ChunkError),
}

/// The bytes (or failure) produced by exactly one worker.
#[derive(Debug, Clone)]
pub struct ChunkResult {
    /// Position of the chunk in the planned range list.
    pub index: usize,
    pub range: ByteRange,
    pub bytes: Vec<u8>,
    pub status: ChunkStatus,
}

impl ChunkResult {
    pub fn ok(index: usize, range: ByteRange, bytes: Vec<u8>) -> Self {
        Self {
            index,
            range,
            bytes,
            status: ChunkStatus::Ok,
        }
    }

    pub fn failed(index: usize, range: ByteRange, reason: ChunkError) -> Self {
        Self {
            index,
            range,
            bytes: Vec::new(),
            status: ChunkStatus::Failed(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, ChunkStatus::Ok)
    }

    /// The failure as a reportable error, or `None` for a successful chunk.
    pub fn error(&self) -> Option<FetchError> {
        match &self.status {
            ChunkStatus::Ok => None,
            ChunkStatus::Failed(reason) => Some(FetchError::ChunkFailed {
                index: self.index,
                range: self.range,
                reason: reason.clone(),
            }),
        }
    }
}

/// Fetches a single byte range of `url` into memory.
///
/// Never returns an error: transport problems become a
/// [`ChunkStatus::Failed`] result so sibling chunks are unaffected.
pub async fn download_chunk(
    index: usize,
    range: ByteRange,
    url: &str,
    client: &reqwest::Client,
) -> ChunkResult {
    tracing::debug!(index, range = %range, "requesting range");

    let buffer = Vec::with_capacity(initial_capacity(range));

    match fetch_range(range, url, client, buffer).await {
        Ok(bytes) => {
            tracing::debug!(index, len = bytes.len(), "chunk complete");
            ChunkResult::ok(index, range, bytes)
        }
        Err(reason) => {
            tracing::debug!(index, range = %range, %reason, "chunk failed");
            ChunkResult::failed(index, range, reason)
        }
    }
}

/// Reserves the whole range for typical chunks; larger ones grow as the
/// body streams in rather than allocating everything up front.
fn initial_capacity(range: ByteRange) -> usize {
    range.len().min(MAX_PREALLOC) as usize
}

async fn fetch_range(
    range: ByteRange,
    url: &str,
    client: &reqwest::Client,
    mut buffer: Vec<u8>,
) -> Result<Vec<u8>, ChunkError> {
    let mut response = client
        .get(url)
        .header(RANGE, range.header_value())
        .send()
        .await?
        .error_for_status()?;

    while let Some(bytes) = response.chunk().await? {
        buffer.extend_from_slice(&bytes);
    }

    let actual = buffer.len() as u64;
    if actual != range.len() {
        return Err(ChunkError::new(
            ChunkErrorKind::LengthMismatch {
                expected: range.len(),
                actual,
            },
            format!(
                "expected {} bytes, received {} (status {})",
                range.len(),
                actual,
                response.status()
            ),
        ));
    }

    Ok(buffer)
}
