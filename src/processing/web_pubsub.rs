//! Web PubSub service collection.

use super::collector::{run_collection, CollectObserver};
use super::derive::resource_group_from_id;
use super::normalize::{merge_fields, normalize_record, required_str};
use crate::azure::WebPubSubConnector;
use crate::error::CollectResult;
use crate::models::{
    from_record, CloudResource, Collection, CollectParams, Record, ResourceResponse,
    SubscriptionInfo, WebPubSubKey, WebPubSubService,
};
use serde_json::{json, Value};

pub fn collect_web_pubsub_services<C>(
    params: &CollectParams,
    connector: &C,
    observer: &dyn CollectObserver,
) -> CollectResult<Collection>
where
    C: WebPubSubConnector + ?Sized,
{
    let subscription = &params.subscription_info;
    run_collection(
        WebPubSubService::RESOURCE_TYPE,
        observer,
        || connector.list_by_subscription(),
        |record, service_id| {
            let service = build_web_pubsub_service(connector, subscription, record, service_id)?;
            ResourceResponse::new(&service, &subscription.subscription_id)
        },
    )
}

pub fn build_web_pubsub_service<C>(
    connector: &C,
    subscription: &SubscriptionInfo,
    mut record: Record,
    service_id: &str,
) -> CollectResult<WebPubSubService>
where
    C: WebPubSubConnector + ?Sized,
{
    let resource_group = resource_group_from_id(service_id)?;
    let name = required_str(&record, "name")?.to_string();

    let hubs = connector
        .list_hubs(&resource_group, &name)?
        .iter()
        .map(|hub| hub_record(hub, &name))
        .collect::<CollectResult<Vec<_>>>()?;
    let key = key_names(&connector.list_keys(&resource_group, &name)?)?;
    let hub_count = hubs.len();

    merge_fields(
        &mut record,
        [
            ("resource_group", json!(resource_group)),
            ("subscription_id", json!(subscription.subscription_id)),
            ("subscription_name", json!(subscription.subscription_name)),
            ("azure_monitor", json!({ "resource_id": service_id })),
            ("web_pubsub_hubs", Value::Array(hubs.into_iter().map(Value::Object).collect())),
            ("web_pubsub_hub_count_display", json!(hub_count)),
            ("web_pubsub_key", serde_json::to_value(key)?),
        ],
    );

    from_record(WebPubSubService::RESOURCE_TYPE, record)
}

fn hub_record(raw: &Value, service_name: &str) -> CollectResult<Record> {
    let mut hub = normalize_record(raw)?;
    let event_handler_count = hub
        .get("properties")
        .and_then(|p| p.get("eventHandlers"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    merge_fields(
        &mut hub,
        [
            ("web_pubsub_svc_name", json!(service_name)),
            ("event_handler_count_display", json!(event_handler_count)),
        ],
    );
    Ok(hub)
}

/// Names of the keys that are set. Key material never leaves this function.
fn key_names(raw: &Value) -> CollectResult<WebPubSubKey> {
    let keys = normalize_record(raw)?;
    let mut key_names: Vec<String> = keys
        .iter()
        .filter(|(_, v)| v.as_str().is_some_and(|s| !s.is_empty()))
        .map(|(k, _)| k.clone())
        .collect();
    key_names.sort();
    Ok(WebPubSubKey { key_names })
}
