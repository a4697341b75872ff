//! Retrieval of the tabular resources over HTTP.

use crate::error::{ConnectomeError, Result};

/// Fetch a resource body as text.
///
/// Connection failures, timeouts, and non-success statuses are all reported
/// as `ConnectomeError::Transport`.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let transport = |source| ConnectomeError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(transport)?;
    let body = response.text().await.map_err(transport)?;

    tracing::debug!(url, bytes = body.len(), "Fetched resource");
    Ok(body)
}
