use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use futures::TryStreamExt;
use tracing::{info, instrument};

use crate::api::{ApiError, AppState, ErrorBody};
use crate::core::{
    flight::{self as flight_store, FlightDraft, FlightPatch},
    search::{SearchRequest, search_flights},
};
use crate::entities::flight;
use crate::errors::Error;

/// Confirmation body for a successful create.
pub const FLIGHT_ADDED: &str = "Flight added!";
/// Confirmation body for a successful delete.
pub const FLIGHT_DELETED: &str = "Flight deleted.";
/// Confirmation body for a successful update.
pub const FLIGHT_UPDATED: &str = "Flight updated!";

/// Unwraps a JSON body, turning decoding failures into validation errors.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        ApiError(Error::Validation {
            message: rejection.body_text(),
        })
    })
}

fn parse_flight_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError(Error::Validation {
            message: format!("invalid flight id: {raw}"),
        })
    })
}

/// Lists every flight.
#[utoipa::path(
    get,
    path = "/flights",
    tag = "flights",
    responses(
        (status = 200, description = "All stored flights", body = Vec<flight::Model>),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn list_flights(
    State(state): State<AppState>,
) -> Result<Json<Vec<flight::Model>>, ApiError> {
    let flights: Vec<flight::Model> = flight_store::find_all_flights(&state.database)
        .await?
        .try_collect()
        .await?;
    Ok(Json(flights))
}

/// Creates a flight. The new record's location is returned in the `Location` header.
#[utoipa::path(
    post,
    path = "/flights",
    tag = "flights",
    request_body = FlightDraft,
    responses(
        (status = 201, description = "Flight added", body = String, content_type = "application/json",
            headers(("location" = String, description = "Path of the new flight"))),
        (status = 400, description = "Missing or invalid field", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_flight(
    State(state): State<AppState>,
    payload: Result<Json<FlightDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = json_body(payload)?;
    let created = flight_store::create_flight(&state.database, draft).await?;

    info!(id = created.id, "flight added via API");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/flights/{}", created.id))],
        Json(FLIGHT_ADDED),
    ))
}

/// Fetches one flight.
#[utoipa::path(
    get,
    path = "/flights/{id}",
    tag = "flights",
    params(("id" = i64, Path, description = "Flight id")),
    responses(
        (status = 200, description = "The flight", body = flight::Model),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No flight with this id", body = ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<flight::Model>, ApiError> {
    let flight_id = parse_flight_id(&id)?;
    let flight = flight_store::find_flight_by_id(&state.database, flight_id).await?;
    Ok(Json(flight))
}

/// Deletes one flight.
#[utoipa::path(
    delete,
    path = "/flights/{id}",
    tag = "flights",
    params(("id" = i64, Path, description = "Flight id")),
    responses(
        (status = 200, description = "Flight deleted", body = String, content_type = "application/json"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No flight with this id", body = ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let flight_id = parse_flight_id(&id)?;
    flight_store::delete_flight_by_id(&state.database, flight_id).await?;
    Ok(Json(FLIGHT_DELETED))
}

/// Applies a partial update to one flight.
#[utoipa::path(
    patch,
    path = "/flights/{id}",
    tag = "flights",
    params(("id" = i64, Path, description = "Flight id")),
    request_body = FlightPatch,
    responses(
        (status = 200, description = "Flight updated", body = String, content_type = "application/json"),
        (status = 400, description = "Invalid id or field", body = ErrorBody),
        (status = 404, description = "No flight with this id", body = ErrorBody)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FlightPatch>, JsonRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let flight_id = parse_flight_id(&id)?;
    let patch = json_body(payload)?;
    flight_store::update_flight_by_id(&state.database, flight_id, patch).await?;
    Ok(Json(FLIGHT_UPDATED))
}

/// Searches flights by route and departure day.
#[utoipa::path(
    post,
    path = "/flights/search",
    tag = "flights",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Flights on the route within 24 hours of the date", body = Vec<flight::Model>),
        (status = 400, description = "Missing or invalid criteria", body = ErrorBody)
    )
)]
#[instrument(skip(state, payload))]
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<flight::Model>>, ApiError> {
    let request = json_body(payload)?;
    let flights = search_flights(&state.database, request).await?;
    Ok(Json(flights))
}
