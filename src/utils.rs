//! Utility helpers for the command-line layer.
//!
//! Byte-size parsing, output filename derivation and request defaults.
use crate::error::FetchError;
use crate::request::FetchRequest;
use percent_encoding::percent_decode_str;
use sanitize_filename::sanitize;
use thiserror::Error;
use url::Url;

pub const MIB: u64 = 1 << 20;
pub const DEFAULT_CHUNKS: u64 = 4;
pub const DEFAULT_TOTAL: u64 = DEFAULT_CHUNKS * MIB;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid byte size {0:?}: expected digits with an optional k, K, M or G suffix")]
pub struct ParseSizeError(pub String);

/// Parses a byte count such as `512`, `64k`, `4M` or `1G`.
///
/// `k` and `K` both mean KiB; `M` is MiB and `G` is GiB.
pub fn parse_byte_size(input: &str) -> Result<u64, ParseSizeError> {
    let err = || ParseSizeError(input.to_string());
    let trimmed = input.trim();

    let (digits, shift) = match trimmed.char_indices().last() {
        Some((i, 'k' | 'K')) => (&trimmed[..i], 10),
        Some((i, 'M')) => (&trimmed[..i], 20),
        Some((i, 'G')) => (&trimmed[..i], 30),
        Some(_) => (trimmed, 0),
        None => return Err(err()),
    };

    let value: u64 = digits.parse().map_err(|_| err())?;
    value.checked_mul(1 << shift).ok_or_else(err)
}

/// Extracts a clean filename from a URL.
///
/// 1. Parses the URL.
/// 2. Extracts the last segment of the path.
/// 3. URL-decodes it (converts %20 to space, etc.).
/// 4. Sanitizes it to remove characters invalid for the OS.
/// 5. Falls back to "output.bin" if no valid filename is found.
pub fn get_filename_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .map(|mut s| s.next_back().unwrap_or("").to_string())
        })
        .map(|s| percent_decode_str(&s).decode_utf8_lossy().to_string())
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "output.bin".to_string())
}

/// Default output name: `<file>_chunk=<n>_total=<bytes>`.
pub fn default_output_name(url: &str, chunk_count: u64, total_size: u64) -> String {
    format!(
        "{}_chunk={}_total={}",
        get_filename_from_url(url),
        chunk_count,
        total_size
    )
}

/// Fills in the defaults for unspecified values and clamps the total to
/// the probed size of the resource.
///
/// A requested total of 0 means "unspecified", as does a chunk count of 0.
///
/// # Errors
///
/// Propagates [`FetchRequest::new`] validation failures.
pub fn resolve_request(
    url: &str,
    total: Option<u64>,
    chunks: Option<u64>,
    remote_size: u64,
) -> Result<FetchRequest, FetchError> {
    let chunk_count = match chunks.filter(|&n| n > 0) {
        Some(n) => n,
        None => {
            tracing::info!("Default {} threads", DEFAULT_CHUNKS);
            DEFAULT_CHUNKS
        }
    };

    let total_size = total.filter(|&n| n > 0).unwrap_or(DEFAULT_TOTAL);
    if total_size > remote_size {
        tracing::debug!(requested = total_size, remote_size, "clamping total to resource size");
    }

    FetchRequest::new(url, total_size.min(remote_size), chunk_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte_size_suffixes() {
        assert_eq!(parse_byte_size("512"), Ok(512));
        assert_eq!(parse_byte_size("64k"), Ok(64 * 1024));
        assert_eq!(parse_byte_size("64K"), Ok(64 * 1024));
        assert_eq!(parse_byte_size("4M"), Ok(4 * MIB));
        assert_eq!(parse_byte_size("1G"), Ok(1 << 30));
    }

    #[test]
    fn test_parse_byte_size_rejects_garbage() {
        assert!(parse_byte_size("").is_err());
        assert!(parse_byte_size("M").is_err());
        assert!(parse_byte_size("12m").is_err());
        assert!(parse_byte_size("1.5G").is_err());
        assert!(parse_byte_size("-4").is_err());
        assert!(parse_byte_size("99999999999999G").is_err());
    }

    #[test]
    fn test_filename_extraction() {
        assert_eq!(
            get_filename_from_url("https://example.com/archive.zip"),
            "archive.zip"
        );

        // With query parameters (should ignore ?id=123)
        assert_eq!(
            get_filename_from_url("https://example.com/image.png?id=123&quality=high"),
            "image.png"
        );

        assert_eq!(
            get_filename_from_url("https://example.com/my%20vacation%20photo.jpg"),
            "my vacation photo.jpg"
        );

        assert_eq!(get_filename_from_url("https://example.com/"), "output.bin");
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output_name("http://host/384MB.jar", 4, 4194304),
            "384MB.jar_chunk=4_total=4194304"
        );
    }

    #[test]
    fn test_resolve_request_defaults_and_clamp() {
        let req = resolve_request("http://host/f", None, None, 10 * MIB).unwrap();
        assert_eq!(req.chunk_count(), DEFAULT_CHUNKS);
        assert_eq!(req.total_size(), DEFAULT_TOTAL);

        let req = resolve_request("http://host/f", Some(8 * MIB), Some(2), 1000).unwrap();
        assert_eq!(req.total_size(), 1000);
        assert_eq!(req.chunk_count(), 2);

        let req = resolve_request("http://host/f", Some(0), Some(0), 100).unwrap();
        assert_eq!(req.total_size(), 100);
        assert_eq!(req.chunk_count(), DEFAULT_CHUNKS);
    }
}
