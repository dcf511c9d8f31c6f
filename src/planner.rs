//! Splits a byte span into contiguous ranges, one per chunk.
use crate::error::FetchError;
use crate::request::ByteRange;

/// Divides `total_size` bytes into at most `chunk_count` contiguous ranges.
///
/// Every range is `ceil(total_size / chunk_count)` bytes long except the
/// last one, which ends at `total_size - 1` and may be shorter. When the
/// rounded-up chunk size would push trailing chunks past the end (e.g. 10
/// bytes over 6 chunks), those empty chunks are dropped rather than
/// emitted as invalid ranges, so fewer than `chunk_count` ranges come back.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPlan`] if either argument is zero.
pub fn plan(total_size: u64, chunk_count: u64) -> Result<Vec<ByteRange>, FetchError> {
    if total_size == 0 {
        return Err(FetchError::InvalidPlan("total size must be greater than 0".into()));
    }
    if chunk_count == 0 {
        return Err(FetchError::InvalidPlan("chunk count must be at least 1".into()));
    }

    let base = total_size.div_ceil(chunk_count);
    let mut ranges = Vec::with_capacity(chunk_count.min(total_size) as usize);

    for i in 0..chunk_count {
        let start = i * base;
        if start >= total_size {
            break;
        }

        let end = if i == chunk_count - 1 {
            total_size - 1
        } else {
            (start + base).min(total_size) - 1
        };

        ranges.push(ByteRange::new(start, end));
    }

    if ranges.len() as u64 != chunk_count {
        tracing::debug!(
            requested = chunk_count,
            planned = ranges.len(),
            "chunk count reduced to avoid empty trailing ranges"
        );
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(ranges: &[ByteRange], total_size: u64) {
        assert_eq!(ranges.first().map(|r| r.start), Some(0));
        assert_eq!(ranges.last().map(|r| r.end), Some(total_size - 1));
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start, "gap or overlap in {ranges:?}");
        }
        assert_eq!(ranges.iter().map(ByteRange::len).sum::<u64>(), total_size);
    }

    #[test]
    fn test_plan_ten_bytes_three_chunks() {
        // base = ceil(10 / 3) = 4, last chunk clamped
        let ranges = plan(10, 3).unwrap();
        assert_eq!(
            ranges,
            vec![
                ByteRange::new(0, 3),
                ByteRange::new(4, 7),
                ByteRange::new(8, 9),
            ]
        );
    }

    #[test]
    fn test_plan_even_split() {
        let ranges = plan(100, 4).unwrap();
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.len() == 25));
        assert_covers(&ranges, 100);
    }

    #[test]
    fn test_plan_last_chunk_never_exceeds_base() {
        for total in 1..=64u64 {
            for chunks in 1..=16u64 {
                let ranges = plan(total, chunks).unwrap();
                let base = total.div_ceil(chunks);
                assert!(ranges.len() as u64 <= chunks);
                assert!(ranges.iter().all(|r| r.len() <= base));
                assert_covers(&ranges, total);
            }
        }
    }

    #[test]
    fn test_plan_more_chunks_than_bytes() {
        let ranges = plan(3, 8).unwrap();
        assert_eq!(
            ranges,
            vec![
                ByteRange::new(0, 0),
                ByteRange::new(1, 1),
                ByteRange::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_plan_drops_empty_trailing_chunk() {
        // base = 2 would give chunk 5 the range 10-9
        let ranges = plan(10, 6).unwrap();
        assert_eq!(ranges.len(), 5);
        assert_covers(&ranges, 10);
    }

    #[test]
    fn test_plan_single_chunk() {
        assert_eq!(plan(4 << 20, 1).unwrap(), vec![ByteRange::new(0, (4 << 20) - 1)]);
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(plan(10 << 20, 7).unwrap(), plan(10 << 20, 7).unwrap());
    }

    #[test]
    fn test_plan_rejects_zero() {
        assert!(matches!(plan(0, 4), Err(FetchError::InvalidPlan(_))));
        assert!(matches!(plan(10, 0), Err(FetchError::InvalidPlan(_))));
    }
}
