//! Collector input parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subscription the collection runs against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SubscriptionInfo {
    pub subscription_id: String,
    pub subscription_name: String,
}

/// Parameters passed to every collector.
///
/// Only `subscription_info` is read by the pipeline; the remaining fields are
/// carried through untouched for connectors that want them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CollectParams {
    pub subscription_info: SubscriptionInfo,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub secret_data: Value,
    #[serde(default)]
    pub filter: Value,
    #[serde(default)]
    pub zones: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_from_json_passthrough() {
        let params: CollectParams = serde_json::from_value(json!({
            "subscription_info": {"subscription_id": "s-1", "subscription_name": "Dev"},
            "options": {"cloud_service_types": ["FunctionApp"]},
            "zones": ["koreacentral"]
        }))
        .expect("params should parse");
        assert_eq!(params.subscription_info.subscription_name, "Dev");
        assert_eq!(params.options["cloud_service_types"][0], "FunctionApp");
        assert_eq!(params.zones, vec!["koreacentral"]);
        assert!(params.secret_data.is_null());
    }
}
