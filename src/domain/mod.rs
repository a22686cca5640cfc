//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit_event`] - Visit counting event model
//! - [`visit_worker`] - Asynchronous visit counting worker
//!
//! # Visit Counting Flow
//!
//! 1. [`crate::application::services::UrlService::resolve`] finds the record
//! 2. A [`visit_event::VisitEvent`] is offered to a bounded channel (non-blocking)
//! 3. [`visit_worker::run_visit_worker`] applies an atomic increment with retry
//! 4. The redirect never waits for, or fails because of, step 3

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
