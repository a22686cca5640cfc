//! Helpers shared across layers.
//!
//! - [`alias_generator`] - Random alias generation and alias rules
//! - [`db_error`] - Classification of SQLx errors

pub mod alias_generator;
pub mod db_error;
