//! Resource sizing and HTTP client construction.
use crate::error::FetchError;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("multi-get/", env!("CARGO_PKG_VERSION"));

const TCP_KEEPALIVE: Duration = Duration::from_secs(60);

/// Transport knobs shared by the size probe and every chunk request.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub user_agent: Option<String>,
    /// Overall per-request timeout. `None` keeps the transport default (no timeout).
    pub timeout: Option<Duration>,
}

/// Builds the client that is cloned into every worker.
///
/// # Errors
///
/// Returns [`FetchError::Transport`] if the TLS backend cannot be initialized.
pub fn build_client(options: &ClientOptions) -> Result<Client, FetchError> {
    let mut builder = Client::builder()
        .user_agent(
            options
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        )
        .tcp_keepalive(TCP_KEEPALIVE);

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))
}

/// Fetches the Content-Length of a resource using a HEAD request.
///
/// The body is never downloaded.
///
/// # Errors
///
/// * [`FetchError::Transport`] if the request fails or the server answers
///   with a non-success status.
/// * [`FetchError::SizeUnavailable`] if the `Content-Length` header is
///   missing, unparseable, or zero.
pub async fn probe(url: &str, client: &Client) -> Result<u64, FetchError> {
    let response = client
        .head(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::Transport(format!(
            "Request failed. Status Code: {}",
            response.status()
        )));
    }

    let content_length = content_length(response.headers())?;

    tracing::debug!(url, content_length, "probed resource size");
    Ok(content_length)
}

/// Reads a usable resource size from response headers.
fn content_length(headers: &HeaderMap) -> Result<u64, FetchError> {
    let raw = headers.get(CONTENT_LENGTH).ok_or_else(|| {
        FetchError::SizeUnavailable("Content-Length not found in response header".into())
    })?;

    let len = raw
        .to_str()
        .map_err(|e| FetchError::SizeUnavailable(e.to_string()))?
        .trim()
        .parse::<u64>()
        .map_err(|e| FetchError::SizeUnavailable(format!("invalid Content-Length: {e}")))?;

    if len == 0 {
        return Err(FetchError::SizeUnavailable("Content-Length is 0".into()));
    }
    Ok(len)
}
