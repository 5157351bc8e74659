//! Route search - turns a `{from, to, date}` request into a store query.

use crate::{
    core::{
        date::{parse_flight_date, search_window},
        flight::{find_flights_in_range, required_text},
    },
    entities::flight,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;

/// Search criteria as sent by clients.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Origin airport code, matched exactly
    #[serde(default)]
    pub from: Option<String>,
    /// Destination airport code, matched exactly
    #[serde(default)]
    pub to: Option<String>,
    /// Departure day (`2020-09-05`) or the instant the 24 hour window starts at
    #[serde(default)]
    pub date: Option<String>,
}

/// Returns flights on the requested route departing within 24 hours of the requested date.
///
/// A bare date searches that whole UTC calendar day. A timestamp searches the
/// 24 hours starting at that instant.
///
/// # Errors
/// Returns [`Error::MissingField`](crate::errors::Error::MissingField) or
/// [`Error::InvalidDate`](crate::errors::Error::InvalidDate) for bad criteria,
/// or a database error if the query fails.
#[instrument(skip(db))]
pub async fn search_flights(
    db: &DatabaseConnection,
    request: SearchRequest,
) -> Result<Vec<flight::Model>> {
    let origin = required_text(request.from, "from")?;
    let destination = required_text(request.to, "to")?;
    let start = parse_flight_date(&required_text(request.date, "date")?)?;
    let (start, end) = search_window(start);

    find_flights_in_range(db, &origin, &destination, start, end).await
}
