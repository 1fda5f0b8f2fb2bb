//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::assistant::DatasetProvider;
use crate::domains::auth::JwtService;
use crate::domains::quota::GuestQuota;
use crate::server::middleware::{jwt_auth_middleware, session_middleware};
use crate::server::routes::{health_handler, try_prompt_handler, try_status_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<DatasetProvider>,
    pub quota: Arc<GuestQuota>,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = state.jwt_service.clone();

    // Transport rate limit for the prompt endpoint: 20 requests per minute
    // per client IP (burst of 20, one token back every 3 seconds). This is
    // separate from the guest quota, which is a business rule.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(3)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    Router::new()
        // Prompt endpoint with transport rate limiting
        .route("/ai/try", post(try_prompt_handler).layer(rate_limit_layer))
        .route("/ai/try-status", get(try_status_handler))
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(middleware::from_fn(session_middleware)) // Guest session cookie
        .layer(Extension(state)) // Add shared state
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
