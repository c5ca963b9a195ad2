//! Display field derivation.
//!
//! Pure helpers turning raw ids, URIs and config blobs into display values.
//! None of them do I/O.

use crate::config;
use crate::error::{CollectError, CollectResult};
use crate::models::TriggerConfigDisplay;
use serde_json::Value;

/// Platform label from an app `kind` such as `functionapp,linux`.
///
/// Returns the segment after the first comma, or [`config::DEFAULT_OS_SYSTEM`]
/// when there is no comma or no kind at all.
pub fn os_system_from_kind(kind: Option<&str>) -> String {
    kind.and_then(|k| k.split(',').nth(1))
        .unwrap_or(config::DEFAULT_OS_SYSTEM)
        .to_string()
}

/// App service plan name from a server farm id.
pub fn app_service_plan_from_server_farm_id(server_farm_id: Option<&str>) -> Option<String> {
    server_farm_id.map(|id| short_name(id).to_string())
}

/// Last `/` segment of an id.
///
/// An input without `/` is returned whole; empty input or a trailing `/` gives `""`.
pub fn short_name(resource_id: &str) -> &str {
    resource_id.rsplit('/').next().unwrap_or_default()
}

/// Resource group segment of an ARM id
/// (`/subscriptions/<sub>/resourceGroups/<rg>/providers/...`).
pub fn resource_group_from_id(resource_id: &str) -> CollectResult<String> {
    let mut segments = resource_id.split('/');
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case("resourceGroups") {
            return match segments.next() {
                Some(rg) if !rg.is_empty() => Ok(rg.to_string()),
                _ => Err(CollectError::MalformedId(resource_id.to_string())),
            };
        }
    }
    Err(CollectError::MalformedId(resource_id.to_string()))
}

pub fn status_from_disabled(is_disabled: bool) -> &'static str {
    if is_disabled {
        "Disabled"
    } else {
        "Enabled"
    }
}

/// Summarize the bindings of a function config.
///
/// The first binding is the trigger, the optional second one the output.
/// A config without bindings is rejected instead of indexing into nothing.
pub fn trigger_config_display(config: &Value) -> CollectResult<TriggerConfigDisplay> {
    let bindings = config
        .get("bindings")
        .and_then(Value::as_array)
        .ok_or_else(|| CollectError::MissingField("config.bindings".to_string()))?;
    let trigger = bindings.first().ok_or(CollectError::EmptyBindings)?;

    let text = |binding: &Value, key: &str| {
        binding
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Ok(TriggerConfigDisplay {
        name: text(trigger, "name"),
        auth_level: text(trigger, "authLevel"),
        request_type: text(trigger, "type"),
        request_method: trigger
            .get("methods")
            .and_then(Value::as_array)
            .map(|methods| {
                methods
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        response_type: bindings.get(1).and_then(|b| text(b, "type")),
        details: serde_json::to_string(config)?,
    })
}

/// Git hosting label of a clone URI, if recognized.
pub fn repository_from_uri(uri: &str) -> Option<&'static str> {
    if uri.contains("git@bitbucket.org") {
        Some("Bitbucket")
    } else if uri.contains("github.com") {
        Some("Github")
    } else {
        None
    }
}

/// Second to last `/` segment of a clone URI (the owner / organisation).
pub fn repository_id_from_uri(uri: &str) -> Option<&str> {
    let mut segments = uri.rsplit('/');
    segments.next();
    segments.next()
}

/// Last `/` segment of a clone URI.
pub fn repository_name_from_uri(uri: &str) -> &str {
    short_name(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_os_system_from_kind() {
        assert_eq!(os_system_from_kind(Some("Linux,abc")), "abc");
        assert_eq!(os_system_from_kind(Some("functionapp,linux,container")), "linux");
        assert_eq!(os_system_from_kind(Some("Windows")), "window");
        assert_eq!(os_system_from_kind(None), "window");
        assert_eq!(os_system_from_kind(Some("functionapp,")), "");
    }

    #[test]
    fn test_app_service_plan() {
        assert_eq!(
            app_service_plan_from_server_farm_id(Some("/a/b/planX")),
            Some("planX".to_string())
        );
        assert_eq!(app_service_plan_from_server_farm_id(None), None);
    }

    #[test]
    fn test_short_name_edges() {
        assert_eq!(short_name("/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/app"), "app");
        assert_eq!(short_name("app/staging"), "staging");
        assert_eq!(short_name("plain"), "plain");
        assert_eq!(short_name(""), "");
        assert_eq!(short_name("trailing/"), "");
    }

    #[test]
    fn test_resource_group_from_id() {
        assert_eq!(
            resource_group_from_id("/subscriptions/s/resourceGroups/my-rg/providers/Microsoft.Web/sites/app")
                .unwrap(),
            "my-rg"
        );
        assert_eq!(
            resource_group_from_id("/subscriptions/s/resourcegroups/lower/providers/x").unwrap(),
            "lower"
        );
        assert_eq!(resource_group_from_id("").unwrap_err().kind(), "MalformedId");
        assert_eq!(
            resource_group_from_id("/subscriptions/s/resourceGroups/").unwrap_err().kind(),
            "MalformedId"
        );
    }

    #[test]
    fn test_status_from_disabled() {
        assert_eq!(status_from_disabled(true), "Disabled");
        assert_eq!(status_from_disabled(false), "Enabled");
    }

    #[test]
    fn test_trigger_config_display_http() {
        let config = json!({
            "bindings": [
                {"name": "req", "authLevel": "anonymous", "type": "httpTrigger", "methods": ["get"]},
                {"type": "http"}
            ]
        });
        let display = trigger_config_display(&config).expect("bindings present");
        assert_eq!(display.name.as_deref(), Some("req"));
        assert_eq!(display.auth_level.as_deref(), Some("anonymous"));
        assert_eq!(display.request_type.as_deref(), Some("httpTrigger"));
        assert_eq!(display.request_method, vec!["get"]);
        assert_eq!(display.response_type.as_deref(), Some("http"));
        let details: Value = serde_json::from_str(&display.details).unwrap();
        assert_eq!(details, config);
    }

    #[test]
    fn test_trigger_config_details_keep_source_order() {
        let config: Value = serde_json::from_str(
            r#"{"scriptFile": "__init__.py", "bindings": [{"type": "httpTrigger", "authLevel": "function"}]}"#,
        )
        .unwrap();
        let display = trigger_config_display(&config).unwrap();
        assert_eq!(
            display.details,
            r#"{"scriptFile":"__init__.py","bindings":[{"type":"httpTrigger","authLevel":"function"}]}"#
        );
    }

    #[test]
    fn test_trigger_config_display_single_binding() {
        let config = json!({"bindings": [{"name": "timer", "type": "timerTrigger"}]});
        let display = trigger_config_display(&config).unwrap();
        assert!(display.request_method.is_empty());
        assert_eq!(display.response_type, None);
        assert_eq!(display.auth_level, None);
    }

    #[test]
    fn test_trigger_config_display_no_bindings() {
        let err = trigger_config_display(&json!({"bindings": []})).unwrap_err();
        assert_eq!(err.kind(), "EmptyBindings");
        let err = trigger_config_display(&json!({})).unwrap_err();
        assert_eq!(err.kind(), "MissingField");
    }

    #[test]
    fn test_repository_from_uri() {
        assert_eq!(repository_from_uri("git@bitbucket.org:org/repo.git"), Some("Bitbucket"));
        assert_eq!(repository_from_uri("https://github.com/org/repo"), Some("Github"));
        assert_eq!(repository_from_uri("https://example.com/x"), None);
    }

    #[test]
    fn test_repository_id_and_name() {
        assert_eq!(repository_id_from_uri("https://github.com/org/repo"), Some("org"));
        assert_eq!(repository_name_from_uri("https://github.com/org/repo"), "repo");
        assert_eq!(repository_id_from_uri("git@bitbucket.org:org/repo.git"), Some("git@bitbucket.org:org"));
        assert_eq!(repository_name_from_uri("git@bitbucket.org:org/repo.git"), "repo.git");
        assert_eq!(repository_id_from_uri("no-slash"), None);
    }
}
