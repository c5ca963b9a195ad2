//! Domain models for the Azure inventory collector.
//!
//! This module contains the typed records built at the end of each collection pass:
//! - [`FunctionApp`] - Function app with its functions, slots and deployment center
//! - [`WebPubSubService`] - Web PubSub service with hubs and key names
//! - [`MySqlServer`] - MySQL server with firewall rules and parameters
//! - [`ResourceResponse`] / [`ErrorResponse`] / [`Collection`] - Collector output
//! - [`CollectParams`] - Input handed to every collector

mod function_app;
mod mysql_server;
mod params;
mod response;
mod web_pubsub;

use crate::error::{CollectError, CollectResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Re-export public types
pub use function_app::{
    DeploymentCenter, DeploymentSlot, Function, FunctionApp, TriggerConfigDisplay,
};
pub use mysql_server::{FirewallRule, MySqlServer};
pub use params::{CollectParams, SubscriptionInfo};
pub use response::{Collection, ErrorResponse, Reference, ResourceResponse};
pub use web_pubsub::{WebPubSubHub, WebPubSubKey, WebPubSubService};

/// Normalized record: a JSON object with snake_case keys.
pub type Record = Map<String, Value>;

/// Monitoring pointer attached to every parent record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AzureMonitor {
    pub resource_id: String,
}

/// A typed parent record that can be wrapped into a [`ResourceResponse`].
pub trait CloudResource: Serialize {
    /// Type label used on both success and error responses.
    const RESOURCE_TYPE: &'static str;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn location(&self) -> &str;
    fn tags(&self) -> &Record;

    fn reference(&self) -> Reference {
        Reference::from_id(self.id())
    }
}

/// Build a typed model from a normalized record.
///
/// Uses `serde_path_to_error` so the failing field ends up in the error.
pub fn from_record<T: DeserializeOwned>(model: &'static str, record: Record) -> CollectResult<T> {
    serde_path_to_error::deserialize(Value::Object(record)).map_err(|e| CollectError::Model {
        model,
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

/// Treat an explicit JSON `null` like an absent field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Probe {
        #[allow(dead_code)]
        id: String,
        #[serde(default, deserialize_with = "null_default")]
        tags: Record,
    }

    #[test]
    fn test_from_record_reports_path() {
        let record = json!({"tags": {}}).as_object().cloned().unwrap();
        let err = from_record::<Probe>("Probe", record).unwrap_err();
        match err {
            CollectError::Model { model, message, .. } => {
                assert_eq!(model, "Probe");
                assert!(message.contains("id"), "message was {message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_null_tags_become_empty() {
        let record = json!({"id": "x", "tags": null}).as_object().cloned().unwrap();
        let probe: Probe = from_record("Probe", record).expect("null tags accepted");
        assert!(probe.tags.is_empty());
    }
}
