use axum::Json;
use utoipa::OpenApi;

use super::ErrorBody;
use super::handlers::{flights, health};
use crate::core::flight::{DateInput, FareInput, FlightDraft, FlightPatch};
use crate::core::search::SearchRequest;
use crate::entities::flight;

/// Path the OpenAPI document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for the flight service
#[derive(OpenApi)]
#[openapi(
    info(title = "Flight Service", description = "Flight CRUD and route search"),
    paths(
        flights::list_flights,
        flights::create_flight,
        flights::get_flight,
        flights::delete_flight,
        flights::update_flight,
        flights::search,
        health::health_check,
        health::readiness_check,
    ),
    components(schemas(
        flight::Model,
        FlightDraft,
        FlightPatch,
        FareInput,
        DateInput,
        SearchRequest,
        ErrorBody,
    )),
    tags(
        (name = "flights", description = "Flight records and search"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
