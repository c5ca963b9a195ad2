//! Output formatting for collection results.
//!
//! This module handles writing a [`Collection`](crate::models::Collection):
//! - [`json`] - JSON document for the downstream catalog
//! - [`terminal`] - Colored summary table

mod json;
mod terminal;

pub use json::{to_json_string, write_json};
pub use terminal::{format_field, print_summary, summary_rows};
