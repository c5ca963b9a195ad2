//! Collection and normalization logic.
//!
//! This module contains the pipeline turning raw az output into responses:
//! - [`normalize`] - Raw JSON to snake_case records
//! - [`derive`] - Display field helpers
//! - [`collector`] - The per-item collection loop
//! - [`function_app`], [`web_pubsub`], [`mysql_server`] - Per family enrichment

pub mod collector;
pub mod derive;
mod function_app;
mod mysql_server;
pub mod normalize;
mod web_pubsub;

// Re-export public functions
pub use collector::{collect_items, run_collection, CollectObserver, LogObserver};
pub use function_app::{build_function_app, collect_function_apps};
pub use mysql_server::{build_mysql_server, collect_mysql_servers};
pub use web_pubsub::{build_web_pubsub_service, collect_web_pubsub_services};
