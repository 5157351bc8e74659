//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod flight;

pub use flight::{Column as FlightColumn, Entity as Flight, Model as FlightModel};
