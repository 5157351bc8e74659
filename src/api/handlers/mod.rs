/// Flight CRUD and search handlers.
pub mod flights;
/// Health and readiness probe handlers.
pub mod health;
