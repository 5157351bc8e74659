use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, warn};

use super::AppState;
use super::docs::{self, OPENAPI_PATH};
use super::handlers::{flights, health};
use crate::config::app::ServerConfig;

/// Builds the CORS layer. An empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Builds the axum router with all routes, middleware, and shared state.
///
/// Flight routes answer with and without a trailing slash.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let flight_routes = Router::new()
        .route(
            "/flights",
            get(flights::list_flights).post(flights::create_flight),
        )
        .route(
            "/flights/",
            get(flights::list_flights).post(flights::create_flight),
        )
        .route("/flights/search", post(flights::search))
        .route("/flights/search/", post(flights::search))
        .route(
            "/flights/:id",
            get(flights::get_flight)
                .delete(flights::delete_flight)
                .patch(flights::update_flight),
        );

    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/readyz", get(health::readiness_check))
        .route(OPENAPI_PATH, get(docs::openapi_json))
        .merge(flight_routes)
        .layer(cors_layer(&server.allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
