// cargo watch -x 'fmt' -x 'test'

pub mod azure;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use azure::{FunctionAppConnector, MySqlServerConnector, WebPubSubConnector};
use config::ResourceFamily;
use error::CollectResult;
use models::{
    CloudResource, CollectParams, Collection, ErrorResponse, FunctionApp, MySqlServer,
    WebPubSubService,
};
use processing::CollectObserver;

pub use error::CollectError;
pub use processing::{
    collect_function_apps, collect_mysql_servers, collect_web_pubsub_services, LogObserver,
};

/// Connector able to serve every resource family.
pub trait InventoryConnector: FunctionAppConnector + WebPubSubConnector + MySqlServerConnector {}

impl<T> InventoryConnector for T where T: FunctionAppConnector + WebPubSubConnector + MySqlServerConnector {}

/// Run the collectors for the given families one after the other.
///
/// Per-item failures end up in `Collection::errors`. A failed primary listing
/// becomes one error entry for its family, with an empty resource id, and the
/// remaining families are still collected.
pub fn collect_all<C>(
    params: &CollectParams,
    families: &[ResourceFamily],
    connector: &C,
    observer: &dyn CollectObserver,
) -> CollectResult<Collection>
where
    C: InventoryConnector + ?Sized,
{
    let mut collection = Collection::new();
    for family in families {
        let (resource_type, part) = match family {
            ResourceFamily::FunctionApp => (
                FunctionApp::RESOURCE_TYPE,
                collect_function_apps(params, connector, observer),
            ),
            ResourceFamily::WebPubSub => (
                WebPubSubService::RESOURCE_TYPE,
                collect_web_pubsub_services(params, connector, observer),
            ),
            ResourceFamily::MySqlServer => (
                MySqlServer::RESOURCE_TYPE,
                collect_mysql_servers(params, connector, observer),
            ),
        };
        match part {
            Ok(part) => collection.extend(part),
            Err(e) => {
                log::error!("[{resource_type}] listing failed, skipping family: {e}");
                collection.push_error(ErrorResponse::new(resource_type, "", &e));
            }
        }
    }
    log::info!(
        "Collected {} resource(s), {} error(s), regions={:?}",
        collection.successes.len(),
        collection.errors.len(),
        collection.region_codes
    );
    Ok(collection)
}
