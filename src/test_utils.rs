//! Shared test utilities for the flight service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test flights with sensible defaults.

use crate::{
    core::flight::{self, DateInput, FareInput, FlightDraft},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A complete, valid draft: Air India AI4131 from PNQ to BOM on 2020-09-05 for 4000.
#[must_use]
pub fn sample_draft() -> FlightDraft {
    FlightDraft {
        airline: Some("Air India".to_string()),
        name: Some("AI4131".to_string()),
        origin: Some("PNQ".to_string()),
        destination: Some("BOM".to_string()),
        date: Some(DateInput::Text("2020-09-05".to_string())),
        fare: Some(FareInput::Number(4000.0)),
    }
}

/// Creates a test flight on the given route and date.
///
/// # Defaults
/// * airline: "Air India"
/// * name: "AI4131"
/// * fare: 4000.0
pub async fn create_test_flight(
    db: &DatabaseConnection,
    from: &str,
    to: &str,
    date: &str,
) -> Result<entities::flight::Model> {
    let draft = FlightDraft {
        origin: Some(from.to_string()),
        destination: Some(to.to_string()),
        date: Some(DateInput::Text(date.to_string())),
        ..sample_draft()
    };
    flight::create_flight(db, draft).await
}
