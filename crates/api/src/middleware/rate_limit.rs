//! Per-API-key rate limiting.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;

use crate::app::AppState;
use crate::extractors::api_key::ApiKeyAuth;

/// Limiter shared across requests, keyed by API key ID.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<i64>,
    clock: DefaultClock,
    rate_limit_per_minute: NonZeroU32,
}

impl RateLimiterState {
    pub fn new(rate_limit_per_minute: NonZeroU32) -> Self {
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(rate_limit_per_minute)),
            clock: DefaultClock::default(),
            rate_limit_per_minute,
        }
    }

    /// Allows the request or returns the seconds to wait, at least 1.
    pub fn check(&self, key_id: i64) -> Result<(), u64> {
        self.limiter.check_key(&key_id).map_err(|not_until| {
            not_until
                .wait_time_from(self.clock.now())
                .as_secs()
                .max(1)
        })
    }

    pub fn limit(&self) -> u32 {
        self.rate_limit_per_minute.get()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("tracked_keys", &self.limiter.len())
            .finish()
    }
}

/// Applies the per-key limit. Must run after `require_admin`.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key_id = match req.extensions().get::<ApiKeyAuth>() {
        Some(auth) => auth.api_key_id,
        None => return next.run(req).await,
    };

    if let Some(ref rate_limiter) = state.rate_limiter {
        if let Err(retry_after) = rate_limiter.check(key_id) {
            tracing::warn!(api_key_id = key_id, retry_after, "Rate limit exceeded");
            return rate_limited_response(rate_limiter.limit(), retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "success": false,
        "error": "rate_limited",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retryAfter": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(limit: u32) -> RateLimiterState {
        RateLimiterState::new(NonZeroU32::new(limit).unwrap())
    }

    #[test]
    fn test_rate_limiter_allows_within_quota() {
        let state = state(5);
        for i in 0..5 {
            assert!(state.check(42).is_ok(), "request {} should be allowed", i);
        }
        assert!(state.check(42).is_err());
    }

    #[test]
    fn test_rate_limiter_retry_after_at_least_one_second() {
        let state = state(1);
        assert!(state.check(1).is_ok());
        assert!(state.check(1).unwrap_err() >= 1);
    }

    #[test]
    fn test_rate_limiter_keys_are_independent() {
        let state = state(1);
        assert!(state.check(1).is_ok());
        assert!(state.check(2).is_ok());
        assert!(state.check(1).is_err());
        assert!(state.check(2).is_err());
        assert!(state.check(3).is_ok());
    }

    #[test]
    fn test_rate_limiter_state_debug() {
        let debug = format!("{:?}", state(100));
        assert!(debug.contains("rate_limit_per_minute"));
        assert!(debug.contains("100"));
    }

    #[test]
    fn test_rate_limited_response_format() {
        let response = rate_limited_response(100, 60);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "60");
    }
}
