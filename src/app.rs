//! Application router: routes plus the middleware stack.

use crate::config::ServerConfig;
use crate::docs::docs_routes;
use crate::error::ConfigError;
use crate::routes::{common_routes, product_routes};
use crate::state::AppState;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub const API_BASE: &str = "/api/productos";

/// Request bodies above this size are rejected with 413.
const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Build the full router. Layers apply bottom-up: CORS sees the request first.
pub fn build_app(state: AppState, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(config.frontend_url.as_deref())?;

    Ok(Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .nest(API_BASE, product_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors))
}

/// Only `frontend_url` may call the API when set; otherwise any origin.
/// Responses to other origins carry no `Access-Control-Allow-Origin`.
fn build_cors_layer(frontend_url: Option<&str>) -> Result<CorsLayer, ConfigError> {
    let origin = match frontend_url {
        Some(url) => {
            let value = HeaderValue::from_str(url).map_err(|_| ConfigError::InvalidVar {
                var: "FRONTEND_URL",
                value: url.to_string(),
            })?;
            AllowOrigin::list([value])
        }
        None => AllowOrigin::any(),
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]))
}
