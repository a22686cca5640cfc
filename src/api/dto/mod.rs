//! Data Transfer Objects for API requests and responses.
//!
//! Validation of payload contents happens in the service layer; DTOs only
//! shape JSON into domain inputs.

pub mod health;
pub mod url;
