//! Per-client rate limiting middleware backed by a keyed `governor` limiter.

use std::fmt;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use companyhub_core::config::RateLimitConfig;
use companyhub_core::error::AppError;

use crate::state::AppState;

/// Header advertising the configured request budget.
pub const RATE_LIMIT_HEADER: &str = "x-rate-limit-limit";

/// Request limiter keyed by client address.
pub struct ClientRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    /// Requests allowed per period.
    requests: u32,
    /// Length of the period.
    period: Duration,
}

impl fmt::Debug for ClientRateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRateLimiter")
            .field("requests", &self.requests)
            .field("period", &self.period)
            .finish()
    }
}

impl ClientRateLimiter {
    /// Allow `requests` per `period` for each client, all usable as a burst.
    pub fn new(requests: NonZeroU32, period: Duration) -> Self {
        let replenish = (period / requests.get()).max(Duration::from_millis(1));
        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(requests))
            .allow_burst(requests);

        Self {
            limiter: RateLimiter::keyed(quota),
            requests: requests.get(),
            period,
        }
    }

    /// Build the limiter described by configuration; `None` when disabled.
    pub fn from_config(config: &RateLimitConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let requests = NonZeroU32::new(config.requests)?;
        Some(Self::new(
            requests,
            Duration::from_secs(config.period_seconds.max(1)),
        ))
    }

    /// Take one request from the client's budget.
    ///
    /// On refusal returns how long the client should wait.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&client.to_string())
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// `X-Rate-Limit-Limit` value, e.g. `30/60s`.
    pub fn describe(&self) -> String {
        format!("{}/{}s", self.requests, self.period.as_secs())
    }

    /// Drop state for clients that are back to a full budget.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}

/// Identify the client: first `X-Forwarded-For` entry, else the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Whole seconds for `Retry-After`, rounded up and never zero.
pub fn retry_after_secs(wait: Duration) -> u64 {
    (wait.as_secs() + u64::from(wait.subsec_nanos() > 0)).max(1)
}

/// Rejects clients over budget with 429 and `Retry-After`.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(limiter) = state.rate_limiter.clone() else {
        return next.run(request).await;
    };

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(request.headers(), peer);
    let limit = HeaderValue::from_str(&limiter.describe()).ok();

    let mut response = match limiter.check(&client) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            let retry_after = retry_after_secs(wait);
            tracing::warn!(client = %client, retry_after, "Rate limit exceeded");

            let mut response = AppError::rate_limited(format!(
                "API calls quota exceeded! Maximum admitted {}.",
                limiter.describe()
            ))
            .into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    };

    if let Some(limit) = limit {
        response.headers_mut().insert(RATE_LIMIT_HEADER, limit);
    }
    response
}
