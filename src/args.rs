use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Downloads the first N bytes of a URL as concurrent range requests
/// and stitches them back together in order.
#[derive(Parser, Debug)]
#[command(name = "multi-get", author, version, about, long_about = None)]
pub struct Args {
    /// The URL of the file to download.
    #[arg(short, long)]
    pub url: String,

    /// Output file. Defaults to "<name>_chunk=<n>_total=<bytes>".
    #[arg(short, long)]
    pub ofile: Option<PathBuf>,

    /// Number of chunks, each fetched by its own worker.
    #[arg(short, long)]
    pub threads: Option<u64>,

    /// Bytes to download from the start of the resource (e.g. 512, 64k, 4M, 1G).
    #[arg(short = 'b', long, value_parser = parse_size)]
    pub total: Option<u64>,

    /// Maximum number of range requests in flight at once.
    #[arg(long)]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_size(s: &str) -> Result<u64, String> {
    crate::utils::parse_byte_size(s).map_err(|e| e.to_string())
}
