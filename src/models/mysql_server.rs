//! Azure Database for MySQL server data model.

use super::{null_default, AzureMonitor, CloudResource, Record};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MySqlServer {
    pub id: String,
    pub name: String,
    pub location: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub subscription_name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub fully_qualified_domain_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub sku: Record,
    #[serde(default, deserialize_with = "null_default")]
    pub tags: Record,
    pub azure_monitor: AzureMonitor,
    #[serde(default)]
    pub firewall_rules: Vec<FirewallRule>,
    #[serde(default)]
    pub server_parameters: Vec<Record>,
    pub version_display: String,
    #[serde(flatten)]
    pub extra: Record,
}

impl CloudResource for MySqlServer {
    const RESOURCE_TYPE: &'static str = "MySQLServer";

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

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FirewallRule {
    pub name: String,
    #[serde(default)]
    pub start_ip_address: Option<String>,
    #[serde(default)]
    pub end_ip_address: Option<String>,
    /// `start - end`
    pub ip_range_display: String,
    #[serde(flatten)]
    pub extra: Record,
}
