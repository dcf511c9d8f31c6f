use anyhow::{Context, Result};
use clap::Parser;
use multi_get::config::Settings;
use multi_get::probe::{self, ClientOptions};
use multi_get::{Args, FetchCoordinator, assembler, utils};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet);

    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring config file: {e:#}");
        Settings::default()
    });

    let total = match args.total {
        Some(total) => Some(total),
        None => settings
            .total
            .as_deref()
            .map(utils::parse_byte_size)
            .transpose()
            .context("invalid `total` in config file")?,
    };
    let threads = args.threads.or(settings.threads);
    let max_concurrency = args
        .max_concurrency
        .or(settings.max_concurrency.and_then(NonZeroUsize::new));

    let client = probe::build_client(&ClientOptions {
        user_agent: settings.user_agent,
        timeout: settings.timeout_secs.map(Duration::from_secs),
    })?;

    let remote_size = probe::probe(&args.url, &client)
        .await
        .with_context(|| format!("failed to size {}", args.url))?;
    tracing::debug!(remote_size, "resource size");

    let request = utils::resolve_request(&args.url, total, threads, remote_size)?;

    let output: PathBuf = match args.ofile {
        Some(path) => path,
        None => {
            let name =
                utils::default_output_name(&args.url, request.chunk_count(), request.total_size());
            tracing::info!("Default output file \"{}\"", name);
            PathBuf::from(name)
        }
    };

    let mut outcome = FetchCoordinator::new(client)
        .with_max_concurrency(max_concurrency)
        .run(&request)
        .await;

    if let Some(e) = outcome.plan_error.take() {
        return Err(e.into());
    }

    for failure in outcome.failures() {
        eprintln!("{}", failure);
    }

    assembler::assemble_to_path(outcome, &output)
        .await
        .with_context(|| format!("download of {} is incomplete", args.url))?;

    Ok(())
}
