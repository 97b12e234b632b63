use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use domain::services::{Clock, SystemClock};
use sqlx::PgPool;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{administrators, health, houses, officers, patrol_stats};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_app_with_clock(config, pool, Arc::new(SystemClock))
}

/// Builds the router with an explicit clock, so tests can pin "now".
pub fn create_app_with_clock(config: Config, pool: PgPool, clock: Arc<dyn Clock>) -> Router {
    let config = Arc::new(config);

    // rate_limit_per_minute = 0 disables limiting
    let rate_limiter = NonZeroU32::new(config.security.rate_limit_per_minute)
        .map(|limit| Arc::new(RateLimiterState::new(limit)));

    let state = AppState {
        pool,
        config: config.clone(),
        clock,
        rate_limiter,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Admin routes: require_admin is the outermost route layer so the rate
    // limiter sees the authenticated key.
    let admin_routes = Router::new()
        .route(
            "/api/admin/patrol-stats",
            get(patrol_stats::get_patrol_statistics),
        )
        .route(
            "/api/admin/patrolStats",
            get(patrol_stats::get_patrol_statistics),
        )
        .route("/api/admin/officers", get(officers::list_officers))
        .route(
            "/api/admin/officers/:officer_id",
            get(officers::get_officer)
                .put(officers::update_officer_status)
                .delete(officers::delete_officer),
        )
        .route("/api/admin/houses", get(houses::list_houses))
        .route(
            "/api/admin/houses/:house_id",
            get(houses::get_house)
                .put(houses::reinstate_house)
                .delete(houses::remove_house),
        )
        .route(
            "/api/admin/administrators",
            post(administrators::create_administrator),
        )
        .route(
            "/api/admin/administrators/:admin_id",
            delete(administrators::delete_administrator),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
