//! Collector configuration.
//!
//! Constants used across the crate, plus [`Settings`] loaded from the environment
//! (a `.env` file is honoured, see `main.rs`).

use crate::error::{CollectError, CollectResult};
use crate::models::{CollectParams, SubscriptionInfo};
use std::str::FromStr;

/// Max accepted stdout size of a single az cli call.
pub const MAX_OUTPUT_BYTES: usize = 5_000_000;

/// OS label used when an app `kind` carries no platform segment.
pub const DEFAULT_OS_SYSTEM: &str = "window";

/// Category label put on every error response.
pub const ERROR_CATEGORY: &str = "Instance";

pub const PORTAL_URL: &str = "https://portal.azure.com/#@.onmicrosoft.com/resource";

/// api-version used for `az rest` calls against Microsoft.Web.
pub const WEB_API_VERSION: &str = "2022-03-01";

/// Resource families the collector knows how to inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFamily {
    FunctionApp,
    WebPubSub,
    MySqlServer,
}

impl ResourceFamily {
    pub const ALL: [ResourceFamily; 3] = [
        ResourceFamily::FunctionApp,
        ResourceFamily::WebPubSub,
        ResourceFamily::MySqlServer,
    ];
}

impl FromStr for ResourceFamily {
    type Err = CollectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "functionapp" | "function_app" => Ok(ResourceFamily::FunctionApp),
            "webpubsub" | "web_pubsub" => Ok(ResourceFamily::WebPubSub),
            "mysql" | "mysqlserver" | "mysql_server" => Ok(ResourceFamily::MySqlServer),
            other => Err(CollectError::Config(format!("unknown resource family '{other}'"))),
        }
    }
}

/// Runtime settings for the collector binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub subscription_id: String,
    pub subscription_name: String,
    pub families: Vec<ResourceFamily>,
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> CollectResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, so tests don't touch process env.
    pub fn from_lookup<F>(lookup: F) -> CollectResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let subscription_id = lookup("AZURE_SUBSCRIPTION_ID")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CollectError::Config("AZURE_SUBSCRIPTION_ID is not set".to_string()))?;
        let subscription_name =
            lookup("AZURE_SUBSCRIPTION_NAME").unwrap_or_else(|| subscription_id.clone());

        let families = match lookup("INVENTORY_RESOURCES") {
            Some(list) if !list.trim().is_empty() => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(ResourceFamily::from_str)
                .collect::<CollectResult<Vec<_>>>()?,
            _ => ResourceFamily::ALL.to_vec(),
        };

        Ok(Settings {
            subscription_id,
            subscription_name,
            families,
        })
    }

    /// Params handed to every collector.
    pub fn params(&self) -> CollectParams {
        CollectParams {
            subscription_info: SubscriptionInfo {
                subscription_id: self.subscription_id.clone(),
                subscription_name: self.subscription_name.clone(),
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_lookup(lookup(&[("AZURE_SUBSCRIPTION_ID", "sub-1")]))
            .expect("settings should load");
        assert_eq!(settings.subscription_name, "sub-1");
        assert_eq!(settings.families, ResourceFamily::ALL.to_vec());
        assert_eq!(settings.params().subscription_info.subscription_id, "sub-1");
    }

    #[test]
    fn test_settings_families() {
        let settings = Settings::from_lookup(lookup(&[
            ("AZURE_SUBSCRIPTION_ID", "sub-1"),
            ("AZURE_SUBSCRIPTION_NAME", "Prod"),
            ("INVENTORY_RESOURCES", "mysql, functionapp"),
        ]))
        .expect("settings should load");
        assert_eq!(settings.subscription_name, "Prod");
        assert_eq!(
            settings.families,
            vec![ResourceFamily::MySqlServer, ResourceFamily::FunctionApp]
        );
    }

    #[test]
    fn test_settings_missing_subscription() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.kind(), "Config");
    }

    #[test]
    fn test_settings_unknown_family() {
        let err = Settings::from_lookup(lookup(&[
            ("AZURE_SUBSCRIPTION_ID", "sub-1"),
            ("INVENTORY_RESOURCES", "cosmos"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("cosmos"));
    }
}
