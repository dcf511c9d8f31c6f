//! Writes fetched chunks to the output in range order.
//!
//! Each chunk is written at its own start offset, so a failed chunk leaves
//! a zero-filled hole instead of shifting the chunks after it. The write
//! still goes ahead when chunks are missing; the call then fails with
//! [`WriteError::MissingChunks`] naming every hole.
use crate::coordinator::FetchOutcome;
use crate::error::{FetchError, MissingChunk, WriteError};
use crate::worker::ChunkStatus;
use std::io::SeekFrom;
use std::path::Path;
use tokio::io::{AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt, BufWriter};

/// Writes every successful chunk of `outcome` into `sink`.
///
/// The caller is expected to have sized `sink` to `outcome.total_size`;
/// [`assemble_to_path`] does this for files.
///
/// # Errors
///
/// * [`WriteError::Chunk`] / [`WriteError::Flush`] on I/O failure.
/// * [`WriteError::MissingChunks`] if any chunk failed to download. The
///   successful chunks have been written by then.
pub async fn assemble<W>(outcome: FetchOutcome, sink: &mut W) -> Result<(), WriteError>
where
    W: AsyncWrite + AsyncSeek + Unpin,
{
    let mut results = outcome.results;
    results.sort_by_key(|r| r.index);

    let mut writer = BufWriter::new(sink);
    let mut missing = Vec::new();

    for result in results {
        match result.status {
            ChunkStatus::Ok => {
                let io = async {
                    writer.seek(SeekFrom::Start(result.range.start)).await?;
                    writer.write_all(&result.bytes).await
                };
                io.await.map_err(|source| WriteError::Chunk {
                    index: result.index,
                    range: result.range,
                    source,
                })?;
            }
            ChunkStatus::Failed(_) => missing.push(MissingChunk {
                index: result.index,
                range: result.range,
            }),
        }
    }

    writer.flush().await.map_err(WriteError::Flush)?;

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WriteError::MissingChunks(missing))
    }
}

/// Creates (or truncates) the file at `path`, sizes it to the requested
/// total and assembles `outcome` into it.
///
/// # Errors
///
/// Returns [`FetchError::SinkUnavailable`] if the file cannot be opened,
/// otherwise any [`WriteError`] from [`assemble`].
pub async fn assemble_to_path(outcome: FetchOutcome, path: &Path) -> Result<(), FetchError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|source| FetchError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let len = outcome.total_size;
    file.set_len(len)
        .await
        .map_err(|source| WriteError::Allocate { len, source })?;

    assemble(outcome, &mut file).await?;
    file.sync_all().await.map_err(WriteError::Flush)?;

    tracing::info!(path = %path.display(), bytes = len, "output written");
    Ok(())
}
