//! HTTP response caching with validation headers.
//!
//! Successful GET responses are stored in the cache provider keyed by a
//! request fingerprint and served back with `Cache-Control`, `ETag` and
//! `Last-Modified`. A successful mutation invalidates every stored response.
//! A GET whose handler overlapped an invalidation is served but not stored.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{
    ACCEPT, AUTHORIZATION, CACHE_CONTROL, ETAG, IF_NONE_MATCH, LAST_MODIFIED,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use companyhub_cache::keys;
use companyhub_core::traits::cache::CacheProvider;

use crate::extractors::version::API_VERSION_HEADER;
use crate::state::AppState;

/// Invalidation counter for the response cache.
#[derive(Debug, Default)]
pub struct CacheGeneration(AtomicU64);

impl CacheGeneration {
    /// The current generation.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Start a new generation, returning it.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// A stored response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
    etag: String,
    last_modified: String,
}

/// Stable fingerprint of everything that can change a GET response.
pub fn fingerprint(method: &Method, uri: &str, headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    let mut hasher = Sha256::new();
    hasher.update(method.as_str());
    hasher.update(b"\n");
    hasher.update(uri);
    hasher.update(b"\n");
    hasher.update(header(ACCEPT.as_str()));
    hasher.update(b"\n");
    hasher.update(header(API_VERSION_HEADER));
    hasher.update(b"\n");
    hasher.update(header(AUTHORIZATION.as_str()));
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Strong entity tag for a body.
pub fn entity_tag(body: &[u8]) -> String {
    format!("\"{}\"", URL_SAFE_NO_PAD.encode(Sha256::digest(body)))
}

fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|value| {
        value
            .split(',')
            .map(|tag| tag.trim().trim_start_matches("W/"))
            .any(|tag| tag == "*" || tag == etag)
    })
}

fn http_date() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

fn is_mutation(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Serves, stores and invalidates cached responses.
pub async fn response_cache(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let settings = &state.config.cache;
    if !settings.response_cache_enabled {
        return next.run(request).await;
    }

    let method = request.method().clone();
    if method != Method::GET {
        let response = next.run(request).await;
        if is_mutation(&method) && response.status().is_success() {
            invalidate(&state).await;
        }
        return response;
    }

    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let key = keys::response(&fingerprint(&method, &uri, request.headers()));
    let if_none_match = request
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let max_age = settings.response_ttl_seconds;

    match state.cache.get(&key).await {
        Ok(Some(raw)) => match serde_json::from_str::<CachedResponse>(&raw) {
            Ok(cached) => {
                tracing::debug!(path = %uri, "Response served from cache");
                return replay(cached, if_none_match.as_deref(), max_age);
            }
            Err(e) => tracing::warn!(error = %e, "Discarding unreadable cached response"),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Response cache lookup failed"),
    }

    let generation = state.cache_generation.current();
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let etag = entity_tag(&bytes);
    let last_modified = http_date();
    set_validators(&mut parts.headers, &etag, &last_modified, max_age);

    match std::str::from_utf8(&bytes) {
        Ok(text) if bytes.len() <= settings.max_cached_body_bytes => {
            let cached = CachedResponse {
                status: parts.status.as_u16(),
                headers: parts
                    .headers
                    .iter()
                    .filter_map(|(name, value)| {
                        Some((name.as_str().to_string(), value.to_str().ok()?.to_string()))
                    })
                    .collect(),
                body: text.to_string(),
                etag: etag.clone(),
                last_modified: last_modified.clone(),
            };
            store(&state, &key, &cached, Duration::from_secs(max_age), generation).await;
        }
        _ => tracing::debug!(path = %uri, size = bytes.len(), "Response not cacheable"),
    }

    if etag_matches(if_none_match.as_deref(), &etag) {
        return not_modified(&parts.headers);
    }
    Response::from_parts(parts, Body::from(bytes))
}

fn set_validators(headers: &mut HeaderMap, etag: &str, last_modified: &str, max_age: u64) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={max_age}")) {
        headers.insert(CACHE_CONTROL, value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert(ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(last_modified) {
        headers.insert(LAST_MODIFIED, value);
    }
}

fn replay(cached: CachedResponse, if_none_match: Option<&str>, max_age: u64) -> Response {
    let mut headers = HeaderMap::new();
    for (name, value) in &cached.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.append(name, value);
        }
    }
    set_validators(&mut headers, &cached.etag, &cached.last_modified, max_age);

    if etag_matches(if_none_match, &cached.etag) {
        return not_modified(&headers);
    }

    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);
    let mut response = (status, cached.body).into_response();
    *response.headers_mut() = headers;
    response
}

fn not_modified(headers: &HeaderMap) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    for name in [ETAG, CACHE_CONTROL, LAST_MODIFIED] {
        if let Some(value) = headers.get(&name) {
            response.headers_mut().insert(name, value.clone());
        }
    }
    response
}

/// Store `cached` unless the cache was invalidated after `generation` was read.
async fn store(
    state: &AppState,
    key: &str,
    cached: &CachedResponse,
    ttl: Duration,
    generation: u64,
) {
    if state.cache_generation.current() != generation {
        tracing::debug!("Response cache invalidated during request, not storing");
        return;
    }

    let stored = match serde_json::to_string(cached) {
        Ok(json) => state.cache.set(key, &json, ttl).await,
        Err(e) => Err(e.into()),
    };
    if let Err(e) = stored {
        tracing::warn!(error = %e, "Failed to store response in cache");
        return;
    }

    // An invalidation may have run between the check and the insert.
    if state.cache_generation.current() != generation {
        if let Err(e) = state.cache.delete(key).await {
            tracing::warn!(error = %e, "Failed to drop stale cached response");
        }
    }
}

async fn invalidate(state: &AppState) {
    let generation = state.cache_generation.advance();
    tracing::trace!(generation, "Advancing response cache generation");
    match state.cache.delete_pattern(&keys::response_pattern()).await {
        Ok(removed) => tracing::debug!(removed, "Response cache invalidated"),
        Err(e) => tracing::warn!(error = %e, "Failed to invalidate response cache"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::routing::get;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use companyhub_core::config::AppConfig;
    use companyhub_database::{MemoryStore, RepositoryManager};

    use super::*;

    fn state() -> AppState {
        let mut config = AppConfig::default();
        config.auth.argon2_memory_kib = 8;
        config.auth.argon2_iterations = 1;
        AppState::new(config, RepositoryManager::memory(MemoryStore::seeded()))
            .expect("state")
    }

    fn cached(body: &str) -> CachedResponse {
        CachedResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
            etag: entity_tag(body.as_bytes()),
            last_modified: http_date(),
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_store_skipped_after_invalidation() {
        let state = state();
        let key = keys::response("stale");
        let ttl = Duration::from_secs(60);

        let generation = state.cache_generation.current();
        invalidate(&state).await;
        store(&state, &key, &cached("[]"), ttl, generation).await;
        assert!(state.cache.get(&key).await.unwrap().is_none());

        let generation = state.cache_generation.current();
        store(&state, &key, &cached("[]"), ttl, generation).await;
        assert!(state.cache.get(&key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_write_during_slow_get_is_not_masked() {
        let state = state();
        let version = Arc::new(AtomicU64::new(0));
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let read = {
            let (version, entered, release) = (version.clone(), entered.clone(), release.clone());
            move || async move {
                let seen = version.load(Ordering::SeqCst);
                if seen == 0 {
                    entered.notify_one();
                    release.notified().await;
                }
                seen.to_string()
            }
        };
        let write = {
            let version = version.clone();
            move || async move {
                version.fetch_add(1, Ordering::SeqCst);
                StatusCode::NO_CONTENT
            }
        };
        let app = Router::new()
            .route("/items", get(read).post(write))
            .layer(axum::middleware::from_fn_with_state(state, response_cache));

        let request = |method: &str| {
            axum::http::Request::builder()
                .method(method)
                .uri("/items")
                .body(Body::empty())
                .unwrap()
        };

        let slow = tokio::spawn(app.clone().oneshot(request("GET")));
        entered.notified().await;
        let written = app.clone().oneshot(request("POST")).await.unwrap();
        assert_eq!(written.status(), StatusCode::NO_CONTENT);
        release.notify_one();

        let first = slow.await.unwrap().unwrap();
        assert_eq!(body_text(first).await, "0");

        let second = app.oneshot(request("GET")).await.unwrap();
        assert_eq!(body_text(second).await, "1");
    }

    #[test]
    fn test_fingerprint_depends_on_accept_and_token() {
        let mut headers = HeaderMap::new();
        let base = fingerprint(&Method::GET, "/api/companies", &headers);

        headers.insert(ACCEPT, HeaderValue::from_static("text/csv"));
        let csv = fingerprint(&Method::GET, "/api/companies", &headers);
        assert_ne!(base, csv);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer other"));
        assert_ne!(csv, fingerprint(&Method::GET, "/api/companies", &headers));
    }

    #[test]
    fn test_etag_matching() {
        let etag = entity_tag(b"[]");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert!(etag_matches(Some(&etag), &etag));
        assert!(etag_matches(Some(&format!("W/{etag}, \"x\"")), &etag));
        assert!(!etag_matches(Some("\"x\""), &etag));
        assert!(!etag_matches(None, &etag));
    }
}
