//! Middleware stack for the API server
//!
//! Request ids, request tracing, timeouts, compression, CORS and a global
//! rate limit.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use teamhub_common::{CorsConfig, RateLimitConfig};
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Settings for [`apply_middleware`]
#[derive(Debug, Clone)]
pub struct MiddlewareConfig<'a> {
    pub rate_limit: &'a RateLimitConfig,
    pub cors: &'a CorsConfig,
    pub is_production: bool,
    pub request_timeout: Duration,
}

/// Apply the middleware stack to the API router.
///
/// Outermost first: rate limit, request id, propagation, trace, timeout,
/// compression, CORS.
pub fn apply_middleware(router: Router<AppState>, config: &MiddlewareConfig<'_>) -> Router<AppState> {
    let router = router
        .layer(create_cors_layer_from_config(config.cors, config.is_production))
        .layer(CompressionLayer::new())
        // 503 Service Unavailable on timeout
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            config.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ));

    // Rate limit is global (not per-IP); one token replenishes every period
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_period_ms(config.rate_limit.requests_per_second))
        .burst_size(config.rate_limit.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    match governor_conf {
        Some(conf) => router.layer(GovernorLayer {
            config: Arc::new(conf),
        }),
        None => {
            tracing::warn!(
                requests_per_second = config.rate_limit.requests_per_second,
                burst = config.rate_limit.burst,
                "Rate limiting disabled: invalid configuration"
            );
            router
        }
    }
}

fn replenish_period_ms(requests_per_second: u32) -> u64 {
    (1000 / u64::from(requests_per_second.max(1))).max(1)
}

/// Origins a browser may call from
#[derive(Debug, PartialEq, Eq)]
enum OriginPolicy {
    /// Development without configured origins
    Any,
    List(Vec<HeaderValue>),
}

fn origin_policy(config: &CorsConfig, is_production: bool) -> OriginPolicy {
    if config.allowed_origins.is_empty() && !is_production {
        return OriginPolicy::Any;
    }

    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    OriginPolicy::List(origins)
}

fn create_cors_layer_from_config(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id]);

    match origin_policy(config, is_production) {
        OriginPolicy::Any => {
            tracing::warn!("CORS allows any origin; set CORS_ALLOWED_ORIGINS outside development");
            layer.allow_origin(Any)
        }
        OriginPolicy::List(origins) => {
            if origins.is_empty() {
                tracing::warn!("CORS has no allowed origins; browser requests will be blocked");
            } else {
                tracing::info!(count = origins.len(), "CORS origins configured");
            }
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}
