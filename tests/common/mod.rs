//! Shared test doubles for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use awp::adapters::akamai::SignedApiClient;
use awp::core::report::{ProgressEvent, Reporter};
use awp::domain::{ApiError, ApiResult, ContractId, GroupId, ItemId, ParentContext, ResourceKind, Versions, WorkItem};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

/// One recorded call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub params: Vec<(String, String)>,
    pub at: Instant,
}

/// In-memory [`SignedApiClient`] answering from scripted responses
///
/// Responses are keyed by `path` or by `path?k=v&...` with the parameters in
/// the order they are sent; the more specific key wins. Unscripted calls
/// answer 404.
#[derive(Default)]
pub struct FakeApiClient {
    responses: Mutex<HashMap<String, ApiResult>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, key: &str, body: Value) -> Self {
        self.set(key, Ok(body));
        self
    }

    pub fn fail(self, key: &str, error: ApiError) -> Self {
        self.set(key, Err(error));
        self
    }

    pub fn set(&self, key: &str, response: ApiResult) {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of calls whose path starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path.starts_with(prefix))
            .count()
    }
}

pub fn key_for(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

#[async_trait]
impl SignedApiClient for FakeApiClient {
    async fn get(&self, path: &str, params: &[(String, String)]) -> ApiResult {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            params: params.to_vec(),
            at: Instant::now(),
        });

        let responses = self.responses.lock().unwrap();
        responses
            .get(&key_for(path, params))
            .or_else(|| responses.get(path))
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::http(
                    404,
                    format!("404 Client Error: Not Found for url: {path}"),
                ))
            })
    }
}

/// Reporter that keeps every event
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matcher: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matcher(e)).count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Property work item in `grp_1` / `ctr_1`
pub fn property(id: &str, name: &str, production: Option<u64>, latest: Option<u64>) -> WorkItem {
    WorkItem::new(ResourceKind::Property, ItemId::new(id).unwrap(), name)
        .with_context(ParentContext::new(
            ContractId::new("ctr_1").unwrap(),
            GroupId::new("grp_1").unwrap(),
        ))
        .with_versions(Versions {
            production,
            staging: None,
            latest,
        })
}

/// Detail path for a property rule tree with the `ctr_1` / `grp_1` context
pub fn rules_key(id: &str, version: u64) -> String {
    format!("/papi/v1/properties/{id}/versions/{version}/rules?contractId=ctr_1&groupId=grp_1")
}
