//! MySQL server collection.

use super::collector::{run_collection, CollectObserver};
use super::derive::resource_group_from_id;
use super::normalize::{merge_fields, normalize_record, optional_str, required_str};
use crate::azure::MySqlServerConnector;
use crate::error::CollectResult;
use crate::models::{
    from_record, CloudResource, Collection, CollectParams, MySqlServer, Record, ResourceResponse,
    SubscriptionInfo,
};
use serde_json::{json, Value};

pub fn collect_mysql_servers<C>(
    params: &CollectParams,
    connector: &C,
    observer: &dyn CollectObserver,
) -> CollectResult<Collection>
where
    C: MySqlServerConnector + ?Sized,
{
    let subscription = &params.subscription_info;
    run_collection(
        MySqlServer::RESOURCE_TYPE,
        observer,
        || connector.list_servers(),
        |record, server_id| {
            let server = build_mysql_server(connector, subscription, record, server_id)?;
            ResourceResponse::new(&server, &subscription.subscription_id)
        },
    )
}

pub fn build_mysql_server<C>(
    connector: &C,
    subscription: &SubscriptionInfo,
    mut record: Record,
    server_id: &str,
) -> CollectResult<MySqlServer>
where
    C: MySqlServerConnector + ?Sized,
{
    let resource_group = resource_group_from_id(server_id)?;
    let name = required_str(&record, "name")?.to_string();

    let firewall_rules = connector
        .list_firewall_rules_by_server(&resource_group, &name)?
        .iter()
        .map(firewall_rule_record)
        .collect::<CollectResult<Vec<_>>>()?;
    let server_parameters = connector
        .list_server_parameters(&resource_group, &name)?
        .iter()
        .map(normalize_record)
        .collect::<CollectResult<Vec<_>>>()?;
    let version = version_display(optional_str(&record, "version"));

    merge_fields(
        &mut record,
        [
            ("resource_group", json!(resource_group)),
            ("subscription_id", json!(subscription.subscription_id)),
            ("subscription_name", json!(subscription.subscription_name)),
            ("azure_monitor", json!({ "resource_id": server_id })),
            ("firewall_rules", Value::Array(firewall_rules.into_iter().map(Value::Object).collect())),
            (
                "server_parameters",
                Value::Array(server_parameters.into_iter().map(Value::Object).collect()),
            ),
            ("version_display", json!(version)),
        ],
    );

    from_record(MySqlServer::RESOURCE_TYPE, record)
}

fn firewall_rule_record(raw: &Value) -> CollectResult<Record> {
    let mut rule = normalize_record(raw)?;
    let range = format!(
        "{} - {}",
        optional_str(&rule, "start_ip_address").unwrap_or_default(),
        optional_str(&rule, "end_ip_address").unwrap_or_default()
    );
    merge_fields(&mut rule, [("ip_range_display", json!(range))]);
    Ok(rule)
}

fn version_display(version: Option<&str>) -> String {
    match version {
        Some(v) if !v.is_empty() => format!("MySQL {v}"),
        _ => "MySQL".to_string(),
    }
}
