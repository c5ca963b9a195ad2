//! Collector output envelopes.

use super::{CloudResource, Record};
use crate::config;
use crate::error::{CollectError, CollectResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Pointer back to the resource in Azure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Reference {
    pub resource_id: String,
    pub external_link: String,
}

impl Reference {
    pub fn from_id(resource_id: &str) -> Self {
        Reference {
            resource_id: resource_id.to_string(),
            external_link: format!("{}{}/overview", config::PORTAL_URL, resource_id),
        }
    }
}

/// One successfully collected resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    pub resource_type: String,
    pub name: String,
    /// Subscription id the resource belongs to.
    pub account: String,
    pub data: Value,
    pub tags: Record,
    pub region_code: String,
    pub reference: Reference,
}

impl ResourceResponse {
    pub fn new<T: CloudResource>(record: &T, account: &str) -> CollectResult<Self> {
        Ok(ResourceResponse {
            resource_type: T::RESOURCE_TYPE.to_string(),
            name: record.name().to_string(),
            account: account.to_string(),
            data: serde_json::to_value(record)?,
            tags: record.tags().clone(),
            region_code: record.location().to_string(),
            reference: record.reference(),
        })
    }
}

/// One resource that failed somewhere between listing and model construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub category: String,
    pub resource_type: String,
    /// Best-known id, empty when the raw item had none.
    pub resource_id: String,
    pub error_kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(resource_type: &str, resource_id: &str, error: &CollectError) -> Self {
        ErrorResponse {
            category: config::ERROR_CATEGORY.to_string(),
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            error_kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Everything one or more collection passes produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Collection {
    pub successes: Vec<ResourceResponse>,
    pub errors: Vec<ErrorResponse>,
    /// Regions seen on successful records.
    pub region_codes: BTreeSet<String>,
}

impl Collection {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_success(&mut self, response: ResourceResponse) {
        if !response.region_code.is_empty() {
            self.region_codes.insert(response.region_code.clone());
        }
        self.successes.push(response);
    }

    pub fn push_error(&mut self, response: ErrorResponse) {
        self.errors.push(response);
    }

    pub fn total(&self) -> usize {
        self.successes.len() + self.errors.len()
    }

    /// Append another collection, keeping order.
    pub fn extend(&mut self, other: Collection) {
        self.successes.extend(other.successes);
        self.errors.extend(other.errors);
        self.region_codes.extend(other.region_codes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_from_id() {
        let reference = Reference::from_id("/subscriptions/s/resourceGroups/rg/providers/x/y/app");
        assert_eq!(
            reference.external_link,
            "https://portal.azure.com/#@.onmicrosoft.com/resource/subscriptions/s/resourceGroups/rg/providers/x/y/app/overview"
        );
    }

    #[test]
    fn test_error_response_carries_kind() {
        let e = ErrorResponse::new("FunctionApp", "", &CollectError::EmptyBindings);
        assert_eq!(e.category, "Instance");
        assert_eq!(e.resource_id, "");
        assert_eq!(e.error_kind, "EmptyBindings");
        assert_eq!(e.message, "trigger config has no bindings");
    }

    #[test]
    fn test_collection_extend_keeps_order() {
        let mut a = Collection::new();
        a.push_error(ErrorResponse::new("A", "1", &CollectError::EmptyBindings));
        let mut b = Collection::new();
        b.push_error(ErrorResponse::new("B", "2", &CollectError::EmptyBindings));
        a.extend(b);
        assert_eq!(a.total(), 2);
        assert_eq!(a.errors[1].resource_id, "2");
    }
}
