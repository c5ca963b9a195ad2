//! Azure CLI interaction.
//!
//! This module handles all Azure-related operations:
//! - [`cli`] - Command execution for Azure CLI
//! - [`connector`] - Per resource family connectors on top of the cli

mod cli;
mod connector;

// Re-export public types and functions
pub use cli::{parse_list, parse_object, run};
pub use connector::{
    AzCliConnector, FunctionAppConnector, MySqlServerConnector, Runner, WebPubSubConnector,
};
