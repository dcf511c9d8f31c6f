//! Fork-join fan-out of chunk workers.
//!
//! The coordinator plans the ranges for a [`FetchRequest`], spawns one
//! task per range, waits for every task to finish, and hands back a
//! [`FetchOutcome`] with the results ordered by chunk index. Nothing is
//! written to disk here; that is the assembler's job.
use crate::error::{ChunkError, ChunkErrorKind, FetchError};
use crate::planner;
use crate::request::FetchRequest;
use crate::worker::{ChunkResult, download_chunk};
use futures_util::future::join_all;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Aggregate status of a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    AllOk,
    PartialFailure,
    TotalFailure,
}

/// Every chunk result of a request plus the overall status.
#[derive(Debug)]
pub struct FetchOutcome {
    pub status: OutcomeStatus,
    /// Results in ascending index order.
    pub results: Vec<ChunkResult>,
    /// Total bytes the request asked for.
    pub total_size: u64,
    /// Set when planning failed and nothing was fetched.
    pub plan_error: Option<FetchError>,
}

impl FetchOutcome {
    /// Builds an outcome from worker results, deriving the status.
    pub fn from_results(total_size: u64, mut results: Vec<ChunkResult>) -> Self {
        results.sort_by_key(|r| r.index);

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        let status = if failed == 0 && !results.is_empty() {
            OutcomeStatus::AllOk
        } else if failed < results.len() {
            OutcomeStatus::PartialFailure
        } else {
            OutcomeStatus::TotalFailure
        };

        Self {
            status,
            results,
            total_size,
            plan_error: None,
        }
    }

    fn plan_failed(total_size: u64, error: FetchError) -> Self {
        Self {
            status: OutcomeStatus::TotalFailure,
            results: Vec::new(),
            total_size,
            plan_error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::AllOk
    }

    /// One [`FetchError::ChunkFailed`] per failed chunk, in index order.
    pub fn failures(&self) -> Vec<FetchError> {
        self.results.iter().filter_map(ChunkResult::error).collect()
    }
}

/// Launches one concurrent [`download_chunk`] per planned range.
#[derive(Debug, Clone)]
pub struct FetchCoordinator {
    client: reqwest::Client,
    max_concurrency: Option<NonZeroUsize>,
}

impl FetchCoordinator {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_concurrency: None,
        }
    }

    /// Caps how many range requests are in flight at once.
    ///
    /// `None` (the default) runs every chunk at the same time.
    pub fn with_max_concurrency(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    pub async fn run(&self, request: &FetchRequest) -> FetchOutcome {
        let ranges = match planner::plan(request.total_size(), request.chunk_count()) {
            Ok(ranges) => ranges,
            Err(e) => return FetchOutcome::plan_failed(request.total_size(), e),
        };

        tracing::info!(
            url = request.url(),
            total_size = request.total_size(),
            chunks = ranges.len(),
            "starting ranged download"
        );

        let semaphore = self
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        let mut tasks = Vec::with_capacity(ranges.len());

        for (index, range) in ranges.iter().copied().enumerate() {
            let client = self.client.clone();
            let url = request.url().to_string();
            let semaphore = semaphore.clone();

            let task = tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                download_chunk(index, range, &url, &client).await
            });

            tasks.push(task);
        }

        let results = join_all(tasks)
            .await
            .into_iter()
            .zip(ranges)
            .enumerate()
            .map(|(index, (joined, range))| match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(index, error = %e, "chunk task aborted");
                    ChunkResult::failed(
                        index,
                        range,
                        ChunkError::new(ChunkErrorKind::Aborted, e.to_string()),
                    )
                }
            })
            .collect();

        let outcome = FetchOutcome::from_results(request.total_size(), results);
        tracing::info!(status = ?outcome.status, "all chunks finished");
        outcome
    }
}
