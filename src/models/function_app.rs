//! Azure Function App data model.

use super::{null_default, AzureMonitor, CloudResource, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents an Azure function app with everything stitched under it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FunctionApp {
    pub id: String,
    pub name: String,
    pub location: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub subscription_name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub default_host_name: Option<String>,
    #[serde(default)]
    pub server_farm_id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub tags: Record,
    pub azure_monitor: AzureMonitor,
    /// Platform segment of `kind`, e.g. `linux`.
    pub os_system_display: String,
    /// Last segment of `server_farm_id`.
    #[serde(default)]
    pub app_service_plan_display: Option<String>,
    #[serde(default)]
    pub functions: Vec<Function>,
    pub functions_count_display: usize,
    #[serde(default)]
    pub deployment_slots: Vec<DeploymentSlot>,
    #[serde(default)]
    pub deployment_center: DeploymentCenter,
    #[serde(default, deserialize_with = "null_default")]
    pub configuration: Record,
    /// Every other field returned by Azure.
    #[serde(flatten)]
    pub extra: Record,
}

impl CloudResource for FunctionApp {
    const RESOURCE_TYPE: &'static str = "FunctionApp";

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

/// A single function inside a function app.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Function {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub is_disabled: bool,
    /// The function.json content, kept verbatim.
    #[serde(default)]
    pub config: Value,
    pub name_display: String,
    pub status_display: String,
    pub config_display: TriggerConfigDisplay,
    #[serde(flatten)]
    pub extra: Record,
}

/// Summary of the trigger bindings of a function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TriggerConfigDisplay {
    pub name: Option<String>,
    #[serde(rename = "authLevel")]
    pub auth_level: Option<String>,
    pub request_type: Option<String>,
    pub request_method: Vec<String>,
    /// Type of the second binding, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
    /// Serialized JSON of the whole config.
    pub details: String,
}

/// A deployment slot of a function app.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeploymentSlot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub server_farm_id: Option<String>,
    pub os_system_display: String,
    #[serde(default)]
    pub app_service_plan_display: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub deployment_center: Record,
    #[serde(flatten)]
    pub extra: Record,
}

/// Source control metadata of a function app.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DeploymentCenter {
    #[serde(default, deserialize_with = "null_default")]
    pub properties: Record,
    #[serde(default)]
    pub repository_display: Option<String>,
    #[serde(default)]
    pub repository_id_display: Option<String>,
    #[serde(default)]
    pub repository_name_display: Option<String>,
    #[serde(flatten)]
    pub extra: Record,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::from_record;
    use serde_json::json;

    #[test]
    fn test_function_app_keeps_unknown_fields() {
        let record = json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/app",
            "name": "app",
            "location": "koreacentral",
            "resource_group": "rg",
            "subscription_id": "s",
            "subscription_name": "Dev",
            "https_only": true,
            "tags": null,
            "azure_monitor": {"resource_id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/app"},
            "os_system_display": "window",
            "functions_count_display": 0
        });
        let app: FunctionApp =
            from_record("FunctionApp", record.as_object().cloned().unwrap()).expect("valid app");
        assert_eq!(app.extra.get("https_only"), Some(&json!(true)));
        assert!(app.tags.is_empty());
        assert!(app.functions.is_empty());
        assert_eq!(app.reference().resource_id, app.id);
    }

    #[test]
    fn test_function_app_requires_location() {
        let record = json!({
            "id": "x",
            "name": "app",
            "resource_group": "rg",
            "subscription_id": "s",
            "subscription_name": "Dev",
            "azure_monitor": {"resource_id": "x"},
            "os_system_display": "window",
            "functions_count_display": 0
        });
        let err = from_record::<FunctionApp>("FunctionApp", record.as_object().cloned().unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("location"), "got {err}");
    }

    #[test]
    fn test_trigger_display_omits_missing_response_type() {
        let display = TriggerConfigDisplay {
            name: Some("req".to_string()),
            details: "{}".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&display).unwrap();
        assert!(value.get("response_type").is_none());
        assert_eq!(value["authLevel"], Value::Null);
    }
}
