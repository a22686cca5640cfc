//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and service outcomes into
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response shapes
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
