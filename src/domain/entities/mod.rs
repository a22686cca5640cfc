//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored alias → target URL mapping with its visit counter
//! - [`NewUrl`] - Validated input for creating a record
//! - [`UrlChanges`] - Validated caller-facing partial update
//! - [`UrlPatch`] - Partial update as written to the store

pub mod url_record;

pub use url_record::{NewUrl, UrlChanges, UrlPatch, UrlRecord, validate_target_url};
