use crate::config::Config;
use crate::services::account_service::AccountService;
use crate::services::shift_service::ShiftService;
use crate::services::stats_service::StatsService;
use crate::storage::DbPool;
use crate::storage::shift_repo::ShiftRepository;
use crate::storage::user_repo::UserRepository;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Json, Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod schemas;
pub mod shifts;
pub mod stats;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub shift_service: ShiftService,
    pub account_service: AccountService,
    pub stats_service: StatsService,
}

impl AppState {
    /// Wires repositories and services on top of a pool.
    #[must_use]
    pub fn new(config: Config, pool: DbPool) -> Self {
        let shift_repo = ShiftRepository::new(pool.clone());
        let user_repo = UserRepository::new(pool);
        Self {
            shift_service: ShiftService::new(shift_repo.clone()),
            account_service: AccountService::new(config.auth.clone(), user_repo.clone()),
            stats_service: StatsService::new(shift_repo, user_repo),
            config,
        }
    }
}

/// Configures and returns the application router.
///
/// # Panics
/// Panics if the rate limiter configuration cannot be constructed.
pub fn app_router(state: AppState) -> Router {
    let std_interval_ns = 1_000_000_000 / state.config.rate_limit.per_second.max(1);
    let standard_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(std_interval_ns))
            .burst_size(state.config.rate_limit.burst)
            .finish()
            .expect("Failed to build standard rate limiter config"),
    );

    // Credential tier: stricter limits for the password-hashing endpoints.
    let auth_interval_ns = 1_000_000_000 / state.config.rate_limit.auth_per_second.max(1);
    let auth_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(auth_interval_ns))
            .burst_size(state.config.rate_limit.auth_burst)
            .finish()
            .expect("Failed to build auth rate limiter config"),
    );

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/createUser", post(auth::create_user))
        .layer(GovernorLayer::new(auth_conf));

    let api_routes = Router::new()
        .route("/healthCheck", get(health::health_check))
        .route("/createEntry", post(shifts::create_entry))
        .route("/completeEntry", post(shifts::complete_entry))
        .route("/listEntries", get(shifts::list_entries))
        .route("/getStats", get(stats::get_stats))
        .layer(GovernorLayer::new(standard_conf));

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .merge(auth_routes.merge(api_routes))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(from_fn_with_state(state.clone(), middleware::cors))
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            middleware::MakeRequestUuidOrHeader,
        ))
        .with_state(state)
}

/// The original functions answered wrong methods with a JSON body; axum's
/// default 405 is empty, so the fallback restores the body shape.
async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": "METHOD_NOT_ALLOWED", "message": "method not allowed" })))
}
