//! Best-effort collector health probing
//!
//! Tries a fixed, ordered list of candidate endpoints and stops at the first
//! 200. Synchronous by design: this is an interactive diagnostic for
//! operators, never part of the death or tick path.

use std::time::Duration;

use crate::config::CollectorConfig;
use crate::error::Error;

use super::dispatcher::build_client;

/// Candidate paths, probed in order. The empty path is the bare base URL.
pub const PROBE_PATHS: [&str; 3] = ["/health", "/ping", ""];

/// Connect timeout for probe GETs.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Total request timeout for probe GETs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a health probe.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// True when some candidate answered 200
    pub ok: bool,
    /// Which candidate succeeded, or the last-seen failure
    pub detail: String,
}

impl ProbeReport {
    fn fail(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Probe the configured collector, blocking the calling thread.
///
/// Candidates are tried in [`PROBE_PATHS`] order with the `authkey` header
/// when configured; the first 200 wins and no further candidates are tried.
/// When every candidate fails, the report carries the last-seen status code
/// or error text — it does not distinguish "unreachable" from "returned an
/// error".
pub fn probe(config: &CollectorConfig) -> ProbeReport {
    let Some(base_url) = &config.base_url else {
        return ProbeReport::fail("no collector configured");
    };

    let client = match build_client(config, CONNECT_TIMEOUT, REQUEST_TIMEOUT) {
        Ok(client) => client,
        Err(e) => return ProbeReport::fail(e.to_string()),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            return ProbeReport::fail(
                Error::Collector(format!("failed to create runtime: {}", e)).to_string(),
            )
        }
    };

    runtime.block_on(probe_candidates(&client, base_url))
}

async fn probe_candidates(client: &reqwest::Client, base_url: &str) -> ProbeReport {
    let mut last_failure = "no response".to_string();

    for path in PROBE_PATHS {
        let url = format!("{}{}", base_url, path);
        match client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                if status == reqwest::StatusCode::OK {
                    tracing::debug!(%url, "Collector probe succeeded");
                    return ProbeReport {
                        ok: true,
                        detail: format!("GET {} -> 200", url),
                    };
                }
                last_failure = format!("GET {} -> {}", url, status.as_u16());
            }
            Err(e) => {
                last_failure = format!("GET {} failed: {}", url, e);
            }
        }
    }

    tracing::debug!(detail = %last_failure, "Collector probe failed");
    ProbeReport::fail(format!("no candidate responded 200 ({})", last_failure))
}
