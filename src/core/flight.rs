//! Flight store - Handles all flight persistence operations.
//!
//! This module provides functions for creating, listing, retrieving, updating,
//! deleting and searching flights. Every function takes the database handle
//! explicitly; there is no process-wide connection. Input arrives as loosely
//! typed drafts and patches (all fields optional) and is validated here, so the
//! same rules apply whether a flight comes from the HTTP API or from seed data.

use crate::{
    core::date::parse_flight_date,
    entities::{Flight, flight},
    errors::{Error, Result},
};
use chrono::{DateTime, SubsecRound, Utc};
use futures::{Stream, TryStreamExt};
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

/// A fare as sent by clients: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FareInput {
    /// A JSON number
    Number(f64),
    /// A string holding a number, e.g. `"4000"`
    Text(String),
}

impl FareInput {
    /// Converts the input into a finite, non-negative fare.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFare`] if the value is not a number, is negative, or is not finite.
    pub fn to_fare(&self) -> Result<f64> {
        let fare = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().map_err(|_| Error::InvalidFare {
                value: text.clone(),
            })?,
        };

        if !fare.is_finite() || fare < 0.0 {
            return Err(Error::InvalidFare {
                value: fare.to_string(),
            });
        }
        Ok(fare)
    }
}

/// A departure date as sent by clients: a date string or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch, e.g. `1599264000000`
    Millis(i64),
    /// A bare date, naive date-time or RFC 3339 timestamp
    Text(String),
}

impl DateInput {
    /// Converts the input into a UTC timestamp with whole-second precision.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] for blank text and [`Error::InvalidDate`]
    /// for text that does not parse or milliseconds out of range.
    pub fn to_date(&self) -> Result<DateTime<Utc>> {
        match self {
            Self::Millis(millis) => DateTime::from_timestamp_millis(*millis)
                .map(|date| date.trunc_subsecs(0))
                .ok_or_else(|| Error::InvalidDate {
                    value: millis.to_string(),
                }),
            Self::Text(text) => parse_flight_date(&required_text(Some(text.clone()), "date")?),
        }
    }
}

/// An unvalidated flight, as received from a client or a seed file.
///
/// Every field is optional so that a missing field produces a precise
/// [`Error::MissingField`] instead of a generic decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct FlightDraft {
    /// Operating airline
    #[serde(default, rename = "airlines")]
    pub airline: Option<String>,
    /// Flight number
    #[serde(default)]
    pub name: Option<String>,
    /// Origin airport code
    #[serde(default, rename = "from")]
    pub origin: Option<String>,
    /// Destination airport code
    #[serde(default, rename = "to")]
    pub destination: Option<String>,
    /// Departure date or timestamp
    #[serde(default)]
    pub date: Option<DateInput>,
    /// Ticket price
    #[serde(default)]
    pub fare: Option<FareInput>,
}

/// A flight that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFlight {
    /// Operating airline
    pub airline: String,
    /// Flight number
    pub name: String,
    /// Origin airport code
    pub origin: String,
    /// Destination airport code
    pub destination: String,
    /// Departure time
    pub date: DateTime<Utc>,
    /// Ticket price
    pub fare: f64,
}

/// A partial update. Absent fields are left unchanged; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct FlightPatch {
    /// New airline
    #[serde(default, rename = "airlines")]
    pub airline: Option<String>,
    /// New flight number
    #[serde(default)]
    pub name: Option<String>,
    /// New origin
    #[serde(default, rename = "from")]
    pub origin: Option<String>,
    /// New destination
    #[serde(default, rename = "to")]
    pub destination: Option<String>,
    /// New departure date
    #[serde(default)]
    pub date: Option<DateInput>,
    /// New fare
    #[serde(default)]
    pub fare: Option<FareInput>,
}

/// Trims a required text field, treating absent and blank values alike.
pub(crate) fn required_text(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(Error::MissingField { field })
}

impl FlightDraft {
    /// Checks that all six fields are present and well-formed.
    ///
    /// Text fields are trimmed and must not be blank, the date must parse and
    /// the fare must be a finite, non-negative number.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`], [`Error::InvalidDate`] or [`Error::InvalidFare`]
    /// for the first field that fails.
    pub fn validate(self) -> Result<NewFlight> {
        let airline = required_text(self.airline, "airlines")?;
        let name = required_text(self.name, "name")?;
        let origin = required_text(self.origin, "from")?;
        let destination = required_text(self.destination, "to")?;
        let date = self
            .date
            .ok_or(Error::MissingField { field: "date" })?
            .to_date()?;
        let fare = self
            .fare
            .ok_or(Error::MissingField { field: "fare" })?
            .to_fare()?;

        Ok(NewFlight {
            airline,
            name,
            origin,
            destination,
            date,
            fare,
        })
    }
}

impl FlightPatch {
    /// Applies the provided fields onto an active model, validating each one.
    fn apply_to(self, flight: &mut flight::ActiveModel) -> Result<()> {
        if let Some(airline) = self.airline {
            flight.airline = Set(required_text(Some(airline), "airlines")?);
        }
        if let Some(name) = self.name {
            flight.name = Set(required_text(Some(name), "name")?);
        }
        if let Some(origin) = self.origin {
            flight.origin = Set(required_text(Some(origin), "from")?);
        }
        if let Some(destination) = self.destination {
            flight.destination = Set(required_text(Some(destination), "to")?);
        }
        if let Some(date) = self.date {
            flight.date = Set(date.to_date()?);
        }
        if let Some(fare) = self.fare {
            flight.fare = Set(fare.to_fare()?);
        }
        Ok(())
    }
}

/// Validates a draft and inserts it, returning the stored flight with its generated id.
///
/// Nothing is written when validation fails.
///
/// # Errors
/// Returns a validation error for a bad draft, or [`Error::Database`] if the insert fails.
#[instrument(skip(db))]
pub async fn create_flight<C>(db: &C, draft: FlightDraft) -> Result<flight::Model>
where
    C: ConnectionTrait,
{
    let new_flight = draft.validate()?;
    insert_flight(db, new_flight).await
}

async fn insert_flight<C>(db: &C, new_flight: NewFlight) -> Result<flight::Model>
where
    C: ConnectionTrait,
{
    let flight = flight::ActiveModel {
        id: ActiveValue::NotSet,
        airline: Set(new_flight.airline),
        name: Set(new_flight.name),
        origin: Set(new_flight.origin),
        destination: Set(new_flight.destination),
        date: Set(new_flight.date),
        fare: Set(new_flight.fare),
    };

    let stored = flight.insert(db).await?;
    info!(id = stored.id, name = %stored.name, "flight created");
    Ok(stored)
}

/// Streams every stored flight, in id order.
///
/// Records are fetched lazily as the stream is polled.
///
/// # Errors
/// Returns an error if the query cannot be started; each item carries its own
/// error if a row fails to load.
pub async fn find_all_flights(
    db: &DatabaseConnection,
) -> Result<impl Stream<Item = Result<flight::Model>> + Send + '_> {
    let rows = Flight::find()
        .order_by_asc(flight::Column::Id)
        .stream(db)
        .await?;
    Ok(rows.map_err(Error::from))
}

/// Retrieves a flight by its id.
///
/// # Errors
/// Returns [`Error::FlightNotFound`] if no flight has this id, or
/// [`Error::Database`] if the query fails.
#[instrument(skip(db))]
pub async fn find_flight_by_id(db: &DatabaseConnection, flight_id: i64) -> Result<flight::Model> {
    Flight::find_by_id(flight_id)
        .one(db)
        .await?
        .ok_or(Error::FlightNotFound { id: flight_id })
}

/// Merges the fields present in `patch` into an existing flight.
///
/// Concurrent updates to the same flight are last-write-wins.
///
/// # Errors
/// Returns [`Error::FlightNotFound`] if the flight does not exist, a validation
/// error if a provided field is invalid, or [`Error::Database`] on failure.
#[instrument(skip(db))]
pub async fn update_flight_by_id(
    db: &DatabaseConnection,
    flight_id: i64,
    patch: FlightPatch,
) -> Result<flight::Model> {
    let existing = find_flight_by_id(db, flight_id).await?;
    let mut flight: flight::ActiveModel = existing.clone().into();
    patch.apply_to(&mut flight)?;

    if !flight.is_changed() {
        debug!(id = flight_id, "empty patch, nothing to update");
        return Ok(existing);
    }

    save_update(db, flight_id, flight).await
}

/// Writes a patched flight. A row deleted since it was read is reported as not found.
async fn save_update(
    db: &DatabaseConnection,
    flight_id: i64,
    flight: flight::ActiveModel,
) -> Result<flight::Model> {
    let updated = flight.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => Error::FlightNotFound { id: flight_id },
        other => Error::Database(other),
    })?;
    info!(id = flight_id, "flight updated");
    Ok(updated)
}

/// Permanently deletes a flight.
///
/// # Errors
/// Returns [`Error::FlightNotFound`] if no row was removed, or [`Error::Database`] on failure.
#[instrument(skip(db))]
pub async fn delete_flight_by_id(db: &DatabaseConnection, flight_id: i64) -> Result<()> {
    let result = Flight::delete_by_id(flight_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::FlightNotFound { id: flight_id });
    }
    info!(id = flight_id, "flight deleted");
    Ok(())
}

/// Finds flights on an exact route whose date falls in `[start, end)`, earliest first.
///
/// # Errors
/// Returns [`Error::Database`] if the query fails.
#[instrument(skip(db))]
pub async fn find_flights_in_range(
    db: &DatabaseConnection,
    origin: &str,
    destination: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<flight::Model>> {
    let flights = Flight::find()
        .filter(flight::Column::Origin.eq(origin))
        .filter(flight::Column::Destination.eq(destination))
        .filter(flight::Column::Date.gte(start))
        .filter(flight::Column::Date.lt(end))
        .order_by_asc(flight::Column::Date)
        .order_by_asc(flight::Column::Id)
        .all(db)
        .await?;
    debug!(matches = flights.len(), "flight search finished");
    Ok(flights)
}

/// Inserts the configured initial flights, but only into an empty store.
///
/// All drafts are validated before anything is written, and the inserts run in
/// one transaction. Returns the number of flights inserted.
///
/// # Errors
/// Returns a validation error for the first invalid draft, or [`Error::Database`]
/// if counting or inserting fails.
#[instrument(skip(db, drafts), fields(drafts = drafts.len()))]
pub async fn seed_flights(db: &DatabaseConnection, drafts: &[FlightDraft]) -> Result<usize> {
    if drafts.is_empty() {
        return Ok(0);
    }

    let existing = Flight::find().count(db).await?;
    if existing > 0 {
        info!(existing, "flights already present, skipping seed");
        return Ok(0);
    }

    let new_flights = drafts
        .iter()
        .cloned()
        .map(FlightDraft::validate)
        .collect::<Result<Vec<_>>>()?;

    let txn = db.begin().await?;
    for new_flight in new_flights {
        insert_flight(&txn, new_flight).await?;
    }
    txn.commit().await?;

    info!(seeded = drafts.len(), "initial flights seeded");
    Ok(drafts.len())
}
