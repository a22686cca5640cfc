//! Application layer services implementing business logic.
//!
//! Services validate input, coordinate the alias generator and repository
//! calls, and return typed outcomes to the HTTP layer.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Url creation, update and resolution

pub mod services;
