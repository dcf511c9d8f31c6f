//! Request and range types shared by every stage of a download.
use crate::error::FetchError;
use std::fmt;

/// An inclusive byte range `start..=end` within the remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// The first byte offset (0-based).
    pub start: u64,
    /// The last byte offset, inclusive.
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "empty byte range {start}-{end}");
        Self { start, end }
    }

    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always `false`: a range covers at least its start byte.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Value for the HTTP `Range` request header.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A validated download request: fetch the first `total_size` bytes of
/// `url` split across `chunk_count` concurrent range requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    total_size: u64,
    chunk_count: u64,
}

impl FetchRequest {
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPlan`] when `total_size` or `chunk_count` is zero.
    pub fn new(
        url: impl Into<String>,
        total_size: u64,
        chunk_count: u64,
    ) -> Result<Self, FetchError> {
        if total_size == 0 {
            return Err(FetchError::InvalidPlan("total size must be greater than 0".into()));
        }
        if chunk_count == 0 {
            return Err(FetchError::InvalidPlan("chunk count must be at least 1".into()));
        }
        Ok(Self {
            url: url.into(),
            total_size,
            chunk_count,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn chunk_count(&self) -> u64 {
        self.chunk_count
    }
}
