//! Admin authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::crypto::extract_key_prefix;
use tracing::warn;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::api_key::ApiKeyAuth;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Requires a valid admin API key in `X-API-Key`.
///
/// The authenticated key is stored in request extensions for the rate
/// limiter and the handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let api_key = match req.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(key) => key.to_string(),
        None => {
            return ApiError::Unauthorized("Invalid or missing API key".to_string()).into_response()
        }
    };

    match ApiKeyAuth::validate(&state.pool, &api_key, state.clock.now()).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => {
            warn!(
                key_prefix = extract_key_prefix(&api_key).unwrap_or("-"),
                path = %req.uri().path(),
                "Rejected admin API key"
            );
            err.into_response()
        }
    }
}
