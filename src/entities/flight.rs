//! Flight entity - A single bookable flight leg.
//!
//! Each flight has an airline, a flight number, a route (`from` -> `to`),
//! a departure date and a fare. Column and JSON names follow the public API
//! (`airlines`, `from`, `to`), while the Rust fields use clearer names.
//! Duplicate flights are allowed; nothing is unique except `id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flight database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "flights")]
#[schema(as = Flight)]
pub struct Model {
    /// System-generated identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Operating airline (e.g., "Air India")
    #[sea_orm(column_name = "airlines")]
    #[serde(rename = "airlines")]
    pub airline: String,
    /// Flight number (e.g., "AI4131")
    pub name: String,
    /// Origin airport code
    #[sea_orm(column_name = "from", indexed)]
    #[serde(rename = "from")]
    pub origin: String,
    /// Destination airport code
    #[sea_orm(column_name = "to")]
    #[serde(rename = "to")]
    pub destination: String,
    /// Departure time, UTC, whole seconds
    #[schema(value_type = String, format = DateTime)]
    pub date: DateTimeUtc,
    /// Ticket price
    pub fare: f64,
}

/// Flights have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
