//! Core logic - framework-agnostic flight store and search operations.

/// Date parsing and search windows
pub mod date;
/// Flight persistence: create, list, fetch, update, delete, seed
pub mod flight;
/// Route and date search
pub mod search;
