//! Function app collection.
//!
//! Stitches functions, deployment slots, deployment center metadata and the site
//! configuration under each function app.

use super::collector::{run_collection, CollectObserver};
use super::derive::{
    app_service_plan_from_server_farm_id, os_system_from_kind, repository_from_uri,
    repository_id_from_uri, repository_name_from_uri, resource_group_from_id, short_name,
    status_from_disabled, trigger_config_display,
};
use super::normalize::{merge_fields, normalize_record, optional_str, required_str};
use crate::azure::FunctionAppConnector;
use crate::error::{CollectError, CollectResult};
use crate::models::{
    from_record, CloudResource, Collection, CollectParams, FunctionApp, Record, ResourceResponse,
    SubscriptionInfo,
};
use serde_json::{json, Value};

/// Collect every function app of the subscription.
///
/// # Returns
/// * `Ok(Collection)` - One success or error response per listed app
/// * `Err` - If the function app listing itself failed
pub fn collect_function_apps<C>(
    params: &CollectParams,
    connector: &C,
    observer: &dyn CollectObserver,
) -> CollectResult<Collection>
where
    C: FunctionAppConnector + ?Sized,
{
    let subscription = &params.subscription_info;
    run_collection(
        FunctionApp::RESOURCE_TYPE,
        observer,
        || connector.list(),
        |record, function_app_id| {
            let function_app = build_function_app(connector, subscription, record, function_app_id)?;
            ResourceResponse::new(&function_app, &subscription.subscription_id)
        },
    )
}

/// Enrich one normalized function app and build the typed record.
pub fn build_function_app<C>(
    connector: &C,
    subscription: &SubscriptionInfo,
    mut record: Record,
    function_app_id: &str,
) -> CollectResult<FunctionApp>
where
    C: FunctionAppConnector + ?Sized,
{
    let resource_group = resource_group_from_id(function_app_id)?;
    let function_app_name = short_name(function_app_id).to_string();
    let name = required_str(&record, "name")?.to_string();

    let functions = connector
        .list_functions(&resource_group, &name)?
        .iter()
        .map(|function| function_record(function, &function_app_name))
        .collect::<CollectResult<Vec<_>>>()?;

    let deployment_slots = connector
        .list_slots(&resource_group, &name)?
        .iter()
        .map(|slot| {
            let slot = normalize_record(slot)?;
            let slot_name = short_name(required_str(&slot, "name")?).to_string();
            let metadata =
                connector.list_metadata_slot(&resource_group, &function_app_name, &slot_name)?;
            deployment_slot_record(slot, &metadata)
        })
        .collect::<CollectResult<Vec<_>>>()?;

    let deployment_center =
        deployment_center_record(&connector.list_metadata(&resource_group, &function_app_name)?)?;
    let configuration =
        normalize_record(&connector.get_configuration(&resource_group, &function_app_name)?)?;

    let os_system = os_system_from_kind(optional_str(&record, "kind"));
    let app_service_plan = app_service_plan_from_server_farm_id(optional_str(&record, "server_farm_id"));
    let functions_count = functions.len();

    merge_fields(
        &mut record,
        [
            ("resource_group", json!(resource_group)),
            ("subscription_id", json!(subscription.subscription_id)),
            ("subscription_name", json!(subscription.subscription_name)),
            ("azure_monitor", json!({ "resource_id": function_app_id })),
            ("os_system_display", json!(os_system)),
            ("app_service_plan_display", json!(app_service_plan)),
            ("functions", Value::Array(functions.into_iter().map(Value::Object).collect())),
            ("functions_count_display", json!(functions_count)),
            (
                "deployment_slots",
                Value::Array(deployment_slots.into_iter().map(Value::Object).collect()),
            ),
            ("deployment_center", Value::Object(deployment_center)),
            ("configuration", Value::Object(configuration)),
        ],
    );

    from_record(FunctionApp::RESOURCE_TYPE, record)
}

/// Normalize one function and add its display fields.
fn function_record(raw: &Value, function_app_name: &str) -> CollectResult<Record> {
    let mut function = normalize_record(raw)?;
    // null reads as not disabled, an absent or non-bool flag is an error
    let is_disabled = match function.get("is_disabled") {
        Some(Value::Null) => false,
        Some(flag) => flag
            .as_bool()
            .ok_or_else(|| CollectError::MissingField("functions[].is_disabled".to_string()))?,
        None => return Err(CollectError::MissingField("functions[].is_disabled".to_string())),
    };
    let config_display = match function.get("config") {
        Some(config) => trigger_config_display(config)?,
        None => return Err(CollectError::MissingField("functions[].config".to_string())),
    };

    merge_fields(
        &mut function,
        [
            ("name_display", json!(function_app_name)),
            ("status_display", json!(status_from_disabled(is_disabled))),
            ("config_display", serde_json::to_value(config_display)?),
        ],
    );
    Ok(function)
}

fn deployment_slot_record(mut slot: Record, metadata: &Value) -> CollectResult<Record> {
    let os_system = os_system_from_kind(optional_str(&slot, "kind"));
    let app_service_plan = app_service_plan_from_server_farm_id(optional_str(&slot, "server_farm_id"));
    let deployment_center = normalize_record(metadata)?;

    merge_fields(
        &mut slot,
        [
            ("os_system_display", json!(os_system)),
            ("app_service_plan_display", json!(app_service_plan)),
            ("deployment_center", Value::Object(deployment_center)),
        ],
    );
    Ok(slot)
}

/// Normalize deployment center metadata, adding repository info when a clone URI is set.
fn deployment_center_record(metadata: &Value) -> CollectResult<Record> {
    let mut deployment_center = normalize_record(metadata)?;

    let clone_uri = deployment_center
        .get("properties")
        .and_then(|p| p.get("CloneUri"))
        .and_then(Value::as_str)
        .filter(|uri| !uri.is_empty())
        .map(str::to_string);

    if let Some(uri) = clone_uri {
        merge_fields(
            &mut deployment_center,
            [
                ("repository_display", json!(repository_from_uri(&uri))),
                ("repository_id_display", json!(repository_id_from_uri(&uri))),
                ("repository_name_display", json!(repository_name_from_uri(&uri))),
            ],
        );
    }
    Ok(deployment_center)
}
