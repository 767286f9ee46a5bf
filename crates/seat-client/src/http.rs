//! Shared HTTP plumbing for the service clients.
//!
//! Status-code checks live here (429 with `Retry-After` parsing, non-success
//! → [`ClientError::Api`]) so each client only builds requests and maps
//! responses.

use std::time::Duration;

use crate::error::ClientError;

/// Header carrying the caller's idempotency key on mutating requests.
pub const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

const USER_AGENT: &str = concat!("seatplan/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` with the shared user agent and a timeout.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Join `base` and `path` with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`], reading
///   `Retry-After` as seconds (60 if absent or unparseable).
/// - **Non-success status** → [`ClientError::Api`] with the status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        tracing::warn!(url = %resp.url(), retry_after, "service rate limited the request");
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        tracing::warn!(url = %resp.url(), status, "service returned an error");
        return Err(ClientError::Api {
            status,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a JSON body, reporting malformed payloads as [`ClientError::Parse`].
pub async fn read_json(resp: reqwest::Response) -> Result<serde_json::Value, ClientError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}
