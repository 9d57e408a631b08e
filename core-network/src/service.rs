//! # Network Fetch Service
//!
//! Single-shot HTTP GETs gated by the [`ReachabilityMonitor`] snapshot.
//!
//! 1. The URL must parse and use `http` or `https`, else
//!    [`NetworkError::InvalidUrl`] without touching the transport.
//! 2. An unsatisfied path fails fast with
//!    [`NetworkError::MonitorNotConfigured`] (no path observed yet) or
//!    [`NetworkError::NetworkUnavailable`]. Under
//!    [`ReachabilityPolicy::Advisory`] this is only logged.
//! 3. One request, no retry. Transport failure, timeout and cancellation
//!    become [`NetworkError::EmptyResponse`] with the cause attached.
//! 4. Anything but HTTP 200 is [`NetworkError::InternalServerError`].
//!
//! The reachability check and the request are not atomic; the transport
//! call has the final say.

use crate::error::{NetworkError, Result, TransportError};
use crate::reachability::ReachabilityMonitor;
use bridge_traits::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use core_runtime::config::{CoreConfig, ReachabilityPolicy, DEFAULT_REQUEST_TIMEOUT};
use core_runtime::decode::decode_json;
use core_runtime::logging::redact_query;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub request_timeout: Duration,
    pub reachability_policy: ReachabilityPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            reachability_policy: ReachabilityPolicy::default(),
        }
    }
}

impl From<&CoreConfig> for FetchConfig {
    fn from(config: &CoreConfig) -> Self {
        Self {
            request_timeout: config.request_timeout,
            reachability_policy: config.reachability_policy,
        }
    }
}

pub struct NetworkService {
    http: Arc<dyn HttpClient>,
    reachability: Arc<ReachabilityMonitor>,
    config: FetchConfig,
}

impl NetworkService {
    pub fn new(
        http: Arc<dyn HttpClient>,
        reachability: Arc<ReachabilityMonitor>,
        config: FetchConfig,
    ) -> Self {
        Self {
            http,
            reachability,
            config,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn reachability(&self) -> &Arc<ReachabilityMonitor> {
        &self.reachability
    }

    /// GET `url` and return the body of a 200 response
    #[instrument(skip(self, url), fields(url = redact_query(url)))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        self.execute(url, None).await
    }

    /// Like [`fetch`](Self::fetch), resolving to
    /// `EmptyResponse(TransportError::Cancelled)` once `cancel` fires
    #[instrument(skip(self, url, cancel), fields(url = redact_query(url)))]
    pub async fn fetch_with_cancel(&self, url: &str, cancel: &CancellationToken) -> Result<Bytes> {
        self.execute(url, Some(cancel)).await
    }

    /// GET `url` and decode the 200 body as JSON
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;

        decode_json(&body).map_err(|e| {
            warn!(
                url = redact_query(url),
                path = %e.path(),
                error = e.description(),
                "Failed to decode response"
            );
            NetworkError::JsonParse(e)
        })
    }

    async fn execute(&self, url: &str, cancel: Option<&CancellationToken>) -> Result<Bytes> {
        let url = parse_url(url)?;
        self.check_reachability()?;

        if cancel.is_some_and(|token| token.is_cancelled()) {
            return Err(TransportError::Cancelled.into());
        }

        let request = HttpRequest::get(url.as_str()).timeout(self.config.request_timeout);
        let response = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Fetch cancelled");
                    return Err(TransportError::Cancelled.into());
                }
                response = self.send(request) => response?,
            },
            None => self.send(request).await?,
        };

        if !response.is_ok() {
            warn!(status = response.status, "Fetch failed with HTTP status");
            return Err(NetworkError::InternalServerError {
                code: response.status,
            });
        }

        debug!(bytes = response.body.len(), "Fetch succeeded");
        Ok(response.body)
    }

    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let limit = self.config.request_timeout;

        match timeout(limit, self.http.execute(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                warn!(error = %e, "Transport failure");
                Err(TransportError::Bridge(e))
            }
            Err(_) => {
                warn!(timeout_ms = limit.as_millis() as u64, "Fetch timed out");
                Err(TransportError::TimedOut(limit))
            }
        }
    }

    fn check_reachability(&self) -> Result<()> {
        let state = self.reachability.snapshot();
        if state.is_reachable() {
            return Ok(());
        }

        let error = if state.is_initial() {
            NetworkError::MonitorNotConfigured
        } else {
            NetworkError::NetworkUnavailable {
                reason: state.unsatisfied_reason,
            }
        };

        match self.config.reachability_policy {
            ReachabilityPolicy::FailFast => {
                debug!(status = ?state.status, "Refusing fetch on unsatisfied path");
                Err(error)
            }
            ReachabilityPolicy::Advisory => {
                warn!(status = ?state.status, error = %error, "Path not satisfied, fetching anyway");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for NetworkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkService")
            .field("http", &"HttpClient { ... }")
            .field("reachability", &self.reachability)
            .field("config", &self.config)
            .finish()
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let invalid = || NetworkError::InvalidUrl(redact_query(raw).to_string());

    if raw.trim().is_empty() {
        return Err(invalid());
    }

    let url = Url::parse(raw).map_err(|e| {
        debug!(error = %e, "Rejected malformed URL");
        invalid()
    })?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => {
            debug!(scheme, "Rejected URL");
            Err(invalid())
        }
    }
}
