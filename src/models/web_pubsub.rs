//! Azure Web PubSub service data model.

use super::{null_default, AzureMonitor, CloudResource, Record};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebPubSubService {
    pub id: String,
    pub name: String,
    pub location: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub subscription_name: String,
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub sku: Record,
    #[serde(default, deserialize_with = "null_default")]
    pub tags: Record,
    pub azure_monitor: AzureMonitor,
    #[serde(default)]
    pub web_pubsub_hubs: Vec<WebPubSubHub>,
    pub web_pubsub_hub_count_display: usize,
    #[serde(default)]
    pub web_pubsub_key: WebPubSubKey,
    #[serde(flatten)]
    pub extra: Record,
}

impl CloudResource for WebPubSubService {
    const RESOURCE_TYPE: &'static str = "WebPubSubService";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn tags(&self) -> &Record {
        &self.tags
    }
}

/// A hub of a Web PubSub service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebPubSubHub {
    pub id: String,
    pub name: String,
    /// Name of the owning service.
    pub web_pubsub_svc_name: String,
    pub event_handler_count_display: usize,
    #[serde(default, deserialize_with = "null_default")]
    pub properties: Record,
    #[serde(flatten)]
    pub extra: Record,
}

/// Access keys of a service. Only the names of the keys present are kept.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WebPubSubKey {
    pub key_names: Vec<String>,
}
