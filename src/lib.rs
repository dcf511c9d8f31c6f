//! # multi-get
//!
//! `multi-get` downloads a byte span of a remote file as several
//! concurrent HTTP range requests and reassembles the pieces in order.
//!
//! The pipeline is:
//! - [`probe::probe`] reads the resource size with a HEAD request.
//! - [`planner::plan`] splits the requested span into contiguous ranges.
//! - [`FetchCoordinator`] fetches every range concurrently into memory.
//! - [`assembler::assemble_to_path`] writes the chunks to disk by offset.

pub mod args;
pub mod assembler;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod planner;
pub mod probe;
pub mod request;
pub mod utils;
pub mod worker;

pub use args::Args;
pub use coordinator::{FetchCoordinator, FetchOutcome, OutcomeStatus};
pub use error::{ChunkError, ChunkErrorKind, FetchError, WriteError};
pub use request::{ByteRange, FetchRequest};
pub use worker::{ChunkResult, ChunkStatus, download_chunk};
