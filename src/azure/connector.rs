//! Connectors per resource family.
//!
//! Each trait is the narrow view a collector has of the Azure management plane.
//! [`AzCliConnector`] implements all of them on top of the az cli.

use super::cli;
use crate::config;
use crate::error::CollectResult;
use serde_json::Value;

pub trait FunctionAppConnector {
    /// All function apps of the subscription.
    fn list(&self) -> CollectResult<Vec<Value>>;
    fn list_functions(&self, resource_group: &str, name: &str) -> CollectResult<Vec<Value>>;
    fn list_slots(&self, resource_group: &str, name: &str) -> CollectResult<Vec<Value>>;
    fn list_metadata_slot(&self, resource_group: &str, name: &str, slot_name: &str) -> CollectResult<Value>;
    /// Deployment center metadata of the production slot.
    fn list_metadata(&self, resource_group: &str, name: &str) -> CollectResult<Value>;
    fn get_configuration(&self, resource_group: &str, name: &str) -> CollectResult<Value>;
}

pub trait WebPubSubConnector {
    fn list_by_subscription(&self) -> CollectResult<Vec<Value>>;
    fn list_hubs(&self, resource_group: &str, resource_name: &str) -> CollectResult<Vec<Value>>;
    fn list_keys(&self, resource_group: &str, resource_name: &str) -> CollectResult<Value>;
}

pub trait MySqlServerConnector {
    fn list_servers(&self) -> CollectResult<Vec<Value>>;
    fn list_firewall_rules_by_server(&self, resource_group: &str, server_name: &str) -> CollectResult<Vec<Value>>;
    fn list_server_parameters(&self, resource_group: &str, server_name: &str) -> CollectResult<Vec<Value>>;
}

/// Runs a command line and returns stdout.
pub type Runner = fn(&str) -> CollectResult<String>;

/// Connector bound to one subscription, shelling out to `az`.
#[derive(Clone)]
pub struct AzCliConnector {
    subscription_id: String,
    runner: Runner,
}

impl AzCliConnector {
    pub fn new(subscription_id: &str) -> Self {
        Self::with_runner(subscription_id, cli::run)
    }

    /// Use another command runner, e.g. canned output in tests.
    pub fn with_runner(subscription_id: &str, runner: Runner) -> Self {
        AzCliConnector {
            subscription_id: subscription_id.to_string(),
            runner,
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn az(&self, args: &str) -> String {
        format!(
            "az {args} --subscription {sub} --output json",
            sub = self.subscription_id
        )
    }

    fn az_in(&self, command: &str, resource_group: &str, name_flag: &str, name: &str) -> String {
        self.az(&format!(
            "{command} --resource-group {resource_group} {name_flag} {name}"
        ))
    }

    /// `az rest` POST against a site path below Microsoft.Web.
    fn az_rest_site(&self, resource_group: &str, site_path: &str) -> String {
        format!(
            "az rest --method post --uri 'https://management.azure.com/subscriptions/{sub}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{site_path}?api-version={api}' --output json",
            sub = self.subscription_id,
            api = config::WEB_API_VERSION,
        )
    }

    fn run_list(&self, cmd: &str) -> CollectResult<Vec<Value>> {
        cli::parse_list(&(self.runner)(cmd)?)
    }

    fn run_object(&self, cmd: &str) -> CollectResult<Value> {
        cli::parse_object(&(self.runner)(cmd)?)
    }
}

impl FunctionAppConnector for AzCliConnector {
    fn list(&self) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az("functionapp list"))
    }

    fn list_functions(&self, resource_group: &str, name: &str) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az_in("functionapp function list", resource_group, "--name", name))
    }

    fn list_slots(&self, resource_group: &str, name: &str) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az_in("functionapp deployment slot list", resource_group, "--name", name))
    }

    fn list_metadata_slot(&self, resource_group: &str, name: &str, slot_name: &str) -> CollectResult<Value> {
        self.run_object(&self.az_rest_site(
            resource_group,
            &format!("{name}/slots/{slot_name}/config/metadata/list"),
        ))
    }

    fn list_metadata(&self, resource_group: &str, name: &str) -> CollectResult<Value> {
        self.run_object(&self.az_rest_site(resource_group, &format!("{name}/config/metadata/list")))
    }

    fn get_configuration(&self, resource_group: &str, name: &str) -> CollectResult<Value> {
        self.run_object(&self.az_in("functionapp config show", resource_group, "--name", name))
    }
}

impl WebPubSubConnector for AzCliConnector {
    fn list_by_subscription(&self) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az("webpubsub list"))
    }

    fn list_hubs(&self, resource_group: &str, resource_name: &str) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az_in("webpubsub hub list", resource_group, "--name", resource_name))
    }

    fn list_keys(&self, resource_group: &str, resource_name: &str) -> CollectResult<Value> {
        self.run_object(&self.az_in("webpubsub key show", resource_group, "--name", resource_name))
    }
}

impl MySqlServerConnector for AzCliConnector {
    fn list_servers(&self) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az("mysql server list"))
    }

    fn list_firewall_rules_by_server(&self, resource_group: &str, server_name: &str) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az_in(
            "mysql server firewall-rule list",
            resource_group,
            "--server-name",
            server_name,
        ))
    }

    fn list_server_parameters(&self, resource_group: &str, server_name: &str) -> CollectResult<Vec<Value>> {
        self.run_list(&self.az_in(
            "mysql server configuration list",
            resource_group,
            "--server-name",
            server_name,
        ))
    }
}
