//! Collection loop shared by every resource family.
//!
//! The primary listing is fatal. Everything after it runs per item: a failing item
//! becomes an [`ErrorResponse`] and the loop moves on.

use super::normalize::{normalize_record, required_str};
use crate::error::{CollectError, CollectResult};
use crate::models::{Collection, ErrorResponse, Record, ResourceResponse};
use colored::Colorize;
use serde_json::Value;

/// Receives progress and per-item failures of a collection pass.
pub trait CollectObserver {
    fn started(&self, _resource_type: &str) {}

    fn item_failed(&self, resource_type: &str, resource_id: &str, error: &CollectError);

    fn finished(&self, _resource_type: &str, _collection: &Collection, _elapsed_ms: i64) {}
}

/// Default observer, writes through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CollectObserver for LogObserver {
    fn started(&self, resource_type: &str) {
        log::debug!("** {resource_type} START **");
    }

    fn item_failed(&self, resource_type: &str, resource_id: &str, error: &CollectError) {
        log::error!(
            "[{rt}] {failed} id='{resource_id}' kind={kind} error={error:?}",
            rt = resource_type,
            failed = "failed".on_red(),
            kind = error.kind(),
        );
    }

    fn finished(&self, resource_type: &str, collection: &Collection, elapsed_ms: i64) {
        log::debug!(
            "** {resource_type} Finished {secs:.3} Seconds ok={ok} errors={errors} **",
            secs = elapsed_ms as f64 / 1000.0,
            ok = collection.successes.len(),
            errors = collection.errors.len(),
        );
    }
}

/// Run one collection pass.
///
/// # Arguments
/// * `resource_type` - Label put on error responses
/// * `observer` - Receives failures and timing
/// * `list` - Primary listing, its error aborts the pass
/// * `build` - Turns one normalized record and its id into a response
pub fn run_collection<L, B>(
    resource_type: &str,
    observer: &dyn CollectObserver,
    list: L,
    build: B,
) -> CollectResult<Collection>
where
    L: FnOnce() -> CollectResult<Vec<Value>>,
    B: FnMut(Record, &str) -> CollectResult<ResourceResponse>,
{
    let start = chrono::Utc::now();
    observer.started(resource_type);

    let raw_items = list()?;
    log::info!("[{resource_type}] listed {} item(s)", raw_items.len());

    let collection = collect_items(resource_type, &raw_items, observer, build);

    let elapsed = chrono::Utc::now() - start;
    observer.finished(resource_type, &collection, elapsed.num_milliseconds());
    Ok(collection)
}

/// Process every raw item, never letting one item's error escape.
pub fn collect_items<B>(
    resource_type: &str,
    raw_items: &[Value],
    observer: &dyn CollectObserver,
    mut build: B,
) -> Collection
where
    B: FnMut(Record, &str) -> CollectResult<ResourceResponse>,
{
    let mut collection = Collection::new();

    for raw in raw_items {
        let mut resource_id = String::new();
        match process_item(raw, &mut resource_id, &mut build) {
            Ok(response) => collection.push_success(response),
            Err(e) => {
                observer.item_failed(resource_type, &resource_id, &e);
                collection.push_error(ErrorResponse::new(resource_type, &resource_id, &e));
            }
        }
    }

    collection
}

/// The id is captured before `build` runs so a failure can still be attributed.
fn process_item<B>(raw: &Value, resource_id: &mut String, build: &mut B) -> CollectResult<ResourceResponse>
where
    B: FnMut(Record, &str) -> CollectResult<ResourceResponse>,
{
    let record = normalize_record(raw)?;
    *resource_id = required_str(&record, "id")?.to_string();
    build(record, resource_id.as_str())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Reference;
    use serde_json::json;
    use std::cell::RefCell;

    /// Observer that remembers what it was told.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub failures: RefCell<Vec<(String, String)>>,
        pub finished: RefCell<Vec<String>>,
    }

    impl CollectObserver for RecordingObserver {
        fn item_failed(&self, resource_type: &str, resource_id: &str, error: &CollectError) {
            self.failures
                .borrow_mut()
                .push((resource_id.to_string(), format!("{resource_type}:{}", error.kind())));
        }

        fn finished(&self, resource_type: &str, _collection: &Collection, _elapsed_ms: i64) {
            self.finished.borrow_mut().push(resource_type.to_string());
        }
    }

    fn echo(record: Record, id: &str) -> CollectResult<ResourceResponse> {
        if record.get("fail").is_some() {
            return Err(CollectError::MissingField("fail".to_string()));
        }
        Ok(ResourceResponse {
            resource_type: "Test".to_string(),
            name: id.to_string(),
            account: "acc".to_string(),
            data: Value::Object(record),
            tags: Record::new(),
            region_code: "westeurope".to_string(),
            reference: Reference::from_id(id),
        })
    }

    #[test]
    fn test_collect_items_isolates_failures() {
        let raw = vec![
            json!({"id": "a"}),
            json!({"id": "b", "fail": true}),
            json!({"name": "no id"}),
            json!("not an object"),
            json!({"id": "c"}),
        ];
        let observer = RecordingObserver::default();
        let collection = collect_items("Test", &raw, &observer, echo);

        assert_eq!(collection.total(), raw.len());
        let ok: Vec<&str> = collection.successes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(ok, vec!["a", "c"]);
        let failed: Vec<&str> = collection.errors.iter().map(|e| e.resource_id.as_str()).collect();
        assert_eq!(failed, vec!["b", "", ""]);
        assert_eq!(observer.failures.borrow().len(), 3);
        assert_eq!(observer.failures.borrow()[0].1, "Test:MissingField");
        assert_eq!(collection.region_codes.len(), 1);
    }

    #[test]
    fn test_run_collection_listing_error_is_fatal() {
        let observer = RecordingObserver::default();
        let result = run_collection(
            "Test",
            &observer,
            || Err(CollectError::Command {
                cmd: "az".to_string(),
                stderr: "boom".to_string(),
            }),
            echo,
        );
        assert!(result.is_err());
        assert!(observer.finished.borrow().is_empty());
    }

    #[test]
    fn test_run_collection_empty_listing() {
        let observer = RecordingObserver::default();
        let collection = run_collection("Test", &observer, || Ok(vec![]), echo).unwrap();
        assert_eq!(collection.total(), 0);
        assert_eq!(*observer.finished.borrow(), vec!["Test".to_string()]);
    }
}
