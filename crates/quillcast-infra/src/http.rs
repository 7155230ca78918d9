//! Shared HTTP client construction.
//!
//! Adapters never build their own ambient client: the process constructs
//! one client here and injects it into every adapter that speaks HTTP
//! (search, LLM providers). The configured bound caps idle pooled
//! connections per host; reqwest has no cap on in-flight connections, so
//! concurrency is bounded by the callers (node execution is sequential
//! within a run).

use std::time::Duration;

/// Per-request timeout for capability calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the process-wide HTTP client.
///
/// `max_connections` comes from
/// [`RuntimeConfig::max_connections`](quillcast_types::config::RuntimeConfig)
/// and bounds the idle connections kept pooled per host.
pub fn shared_http_client(max_connections: u32) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(max_connections as usize)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_configured_bound() {
        assert!(shared_http_client(10).is_ok());
        assert!(shared_http_client(1).is_ok());
    }
}
