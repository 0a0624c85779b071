//! Asynchronous payload delivery
//!
//! A fixed pool of two workers drains a queue of serialized payloads and
//! POSTs them to the collector. Callers never block on the network and never
//! observe delivery outcome: a slow or unreachable collector must not stall
//! death handling or the host's tick loop. Failed deliveries are logged and
//! dropped — no retry, no dead-letter queue.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use tokio::sync::{mpsc, Mutex};

use crate::config::CollectorConfig;
use crate::error::{Error, Result};

/// Number of concurrent delivery workers.
const WORKER_COUNT: usize = 2;

/// Connect timeout for delivery POSTs.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Total request timeout for delivery POSTs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One queued delivery: an already-serialized body bound for an endpoint.
struct Job {
    body: String,
    endpoint: &'static str,
}

/// Fire-and-forget delivery pool for collector POSTs.
///
/// The queue is unbounded; submissions beyond the two in-flight requests
/// simply wait their turn. Each request carries its own timeouts, so a stuck
/// call occupies one worker slot until the timeout fires.
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Job>,
    runtime: tokio::runtime::Runtime,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl Dispatcher {
    /// Create a dispatcher for the configured collector.
    ///
    /// Returns `Ok(None)` when no base URL is configured — the caller treats
    /// that as a permanent no-op, never as an error.
    pub fn new(config: &CollectorConfig) -> Result<Option<Self>> {
        let Some(base_url) = config.base_url.clone() else {
            return Ok(None);
        };

        let client = build_client(config, CONNECT_TIMEOUT, REQUEST_TIMEOUT)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(WORKER_COUNT)
            .thread_name("diocles-post")
            .enable_all()
            .build()
            .map_err(|e| Error::Collector(format!("failed to create runtime: {}", e)))?;

        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));

        let mut workers = Vec::with_capacity(WORKER_COUNT);
        for _ in 0..WORKER_COUNT {
            let client = client.clone();
            let base_url = base_url.clone();
            let rx = Arc::clone(&rx);
            workers.push(runtime.spawn(async move {
                loop {
                    // Hold the lock only for the receive; posting happens
                    // with the queue free for the other worker.
                    let job = { rx.lock().await.recv().await };
                    match job {
                        Some(job) => send_post(&client, &base_url, job).await,
                        None => break,
                    }
                }
            }));
        }

        Ok(Some(Self {
            tx,
            runtime,
            workers,
        }))
    }

    /// Enqueue a payload for delivery to `base_url + endpoint`.
    ///
    /// Returns immediately; serialization failure (a data-model bug) and a
    /// closed queue are logged, never surfaced.
    pub fn dispatch<T: Serialize>(&self, payload: &T, endpoint: &'static str) {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(endpoint, error = %e, "Failed to serialize payload");
                return;
            }
        };

        if self.tx.send(Job { body, endpoint }).is_err() {
            tracing::debug!(endpoint, "Dispatcher shut down, dropping payload");
        }
    }

    /// Close the queue and give in-flight and queued deliveries up to
    /// `grace` to finish.
    ///
    /// Workers drain whatever is queued once the channel closes; waiting on
    /// their join handles is what guarantees the drain actually happened
    /// before the runtime goes away. On timeout the remaining deliveries
    /// are dropped.
    pub fn shutdown(self, grace: Duration) {
        let Self {
            tx,
            runtime,
            workers,
        } = self;

        drop(tx);

        let drained = runtime.block_on(async {
            tokio::time::timeout(grace, async {
                for worker in workers {
                    let _ = worker.await;
                }
            })
            .await
            .is_ok()
        });

        if !drained {
            tracing::warn!("Dispatcher drain timed out, dropping queued payloads");
        }

        runtime.shutdown_background();
    }
}

/// Build an HTTP client with the collector's default headers and timeouts.
///
/// Shared with the health prober, which uses shorter timeouts.
pub(crate) fn build_client(
    config: &CollectorConfig,
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(auth_key) = &config.auth_key {
        headers.insert(
            "authkey",
            HeaderValue::from_str(auth_key)
                .map_err(|e| Error::Config(format!("invalid authkey: {}", e)))?,
        );
    }

    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Collector(format!("failed to create HTTP client: {}", e)))
}

/// POST one job; only the status code is read, the body is discarded.
async fn send_post(client: &reqwest::Client, base_url: &str, job: Job) {
    let url = format!("{}{}", base_url, job.endpoint);

    match client.post(&url).body(job.body).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                tracing::debug!(%url, status = status.as_u16(), "Delivered payload");
            } else {
                tracing::warn!(%url, status = status.as_u16(), "Collector rejected payload");
            }
        }
        Err(e) => {
            tracing::warn!(%url, error = %e, "Failed to POST to collector");
        }
    }
}
