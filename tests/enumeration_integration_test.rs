//! Integration tests for work list construction
//!
//! These tests verify that:
//! - The hierarchy walk yields items in traversal order with their context
//! - Groups without contracts and out-of-scope groups are never queried
//! - A failed child call skips one pair; a failed root call aborts
//! - Flat lists carry their payload and single lookups honour a pinned version

mod common;

use awp::core::enumerate::{
    enumerate_client_lists, enumerate_network_lists, lookup_property, search_account_switch_keys,
    search_groups, HierarchyEnumerator,
};
use awp::core::report::ProgressEvent;
use awp::domain::{ApiError, AwpError, GroupId, ItemId, ResourceKind};
use common::{FakeApiClient, RecordingReporter};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn two_group_client() -> FakeApiClient {
    FakeApiClient::new()
        .respond(
            "/papi/v1/groups",
            json!({"groups": {"items": [
                {"groupId": "g1", "groupName": "Group One", "contractIds": ["c1"]},
                {"groupId": "g2", "groupName": "Group Two", "contractIds": []}
            ]}}),
        )
        .respond(
            "/papi/v1/properties?contractId=c1&groupId=g1",
            json!({"properties": {"items": [
                {"propertyId": "p1", "propertyName": "www.example.com",
                 "productionVersion": 3, "stagingVersion": 4, "latestVersion": 5},
                {"propertyId": "p2", "propertyName": "api.example.com", "latestVersion": 1}
            ]}}),
        )
}

#[tokio::test]
async fn test_hierarchy_enumeration() {
    let client = Arc::new(two_group_client());
    let reporter = Arc::new(RecordingReporter::new());

    let items = HierarchyEnumerator::new(client.clone(), reporter.clone())
        .enumerate()
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "p1");
    assert_eq!(items[1].id.as_str(), "p2");
    for item in &items {
        assert_eq!(item.kind, ResourceKind::Property);
        assert_eq!(item.parent_context.get("groupId"), Some("g1"));
        assert_eq!(item.parent_context.get("contractId"), Some("c1"));
    }
    assert_eq!(items[0].versions.production, Some(3));
    assert_eq!(items[0].versions.staging, Some(4));
    assert_eq!(items[1].versions.latest, Some(1));

    // One root call plus one child call; g2 has no contracts
    assert_eq!(client.call_count(), 2);
    assert!(reporter.events().contains(&ProgressEvent::Enumerated {
        kind: ResourceKind::Property,
        count: 2,
    }));
}

#[tokio::test]
async fn test_scope_excludes_other_groups() {
    let client = Arc::new(two_group_client());
    let reporter = Arc::new(RecordingReporter::new());

    let items = HierarchyEnumerator::new(client.clone(), reporter)
        .with_scope(Some(GroupId::new("g2").unwrap()))
        .enumerate()
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(client.calls_to("/papi/v1/properties"), 0);
}

#[tokio::test]
async fn test_enumeration_is_idempotent() {
    let client = Arc::new(two_group_client());
    let reporter = Arc::new(RecordingReporter::new());
    let enumerator = HierarchyEnumerator::new(client, reporter);

    let first = enumerator.enumerate().await.unwrap();
    let second = enumerator.enumerate().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_child_failure_skips_pair() {
    let client = Arc::new(
        FakeApiClient::new()
            .respond(
                "/papi/v1/groups",
                json!({"groups": {"items": [
                    {"groupId": "g1", "groupName": "One", "contractIds": ["c1", "c2"]}
                ]}}),
            )
            .fail(
                "/papi/v1/properties?contractId=c1&groupId=g1",
                ApiError::http(403, "403 Client Error: Forbidden for url: x"),
            )
            .respond(
                "/papi/v1/properties?contractId=c2&groupId=g1",
                json!({"properties": {"items": [
                    {"propertyId": "p9", "propertyName": "kept", "productionVersion": 1}
                ]}}),
            ),
    );
    let reporter = Arc::new(RecordingReporter::new());

    let items = HierarchyEnumerator::new(client, reporter.clone())
        .enumerate()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].parent_context.get("contractId"), Some("c2"));
    assert_eq!(
        reporter.count(|e| matches!(
            e,
            ProgressEvent::FetchingChildren { group_name, .. } if group_name == "One"
        )),
        2
    );
    assert_eq!(
        reporter.count(|e| matches!(e, ProgressEvent::ChildFetchFailed { .. })),
        1
    );
}

#[tokio::test]
async fn test_root_failure_aborts() {
    let client = Arc::new(FakeApiClient::new().fail(
        "/papi/v1/groups",
        ApiError::http(401, "401 Client Error: Unauthorized for url: x"),
    ));
    let reporter = Arc::new(RecordingReporter::new());

    let err = HierarchyEnumerator::new(client.clone(), reporter)
        .enumerate()
        .await
        .unwrap_err();

    assert!(matches!(err, AwpError::Api(ref api) if api.status_code == Some(401)));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_entries_without_ids_are_dropped() {
    let client = Arc::new(
        FakeApiClient::new()
            .respond(
                "/papi/v1/groups",
                json!({"groups": {"items": [
                    {"groupName": "No id", "contractIds": ["c1"]},
                    {"groupId": "g1", "groupName": "One", "contractIds": ["c1"]}
                ]}}),
            )
            .respond(
                "/papi/v1/properties?contractId=c1&groupId=g1",
                json!({"properties": {"items": [
                    {"propertyName": "nameless", "productionVersion": 1},
                    {"propertyId": "p1", "propertyName": "kept", "productionVersion": 1}
                ]}}),
            ),
    );
    let reporter = Arc::new(RecordingReporter::new());

    let items = HierarchyEnumerator::new(client, reporter.clone())
        .enumerate()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(
        reporter.count(|e| matches!(e, ProgressEvent::EntryDropped { .. })),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn test_child_fetch_delay() {
    let client = Arc::new(
        FakeApiClient::new().respond(
            "/papi/v1/groups",
            json!({"groups": {"items": [
                {"groupId": "g1", "groupName": "One", "contractIds": ["c1", "c2"]}
            ]}}),
        )
        .respond("/papi/v1/properties", json!({"properties": {"items": []}})),
    );
    let reporter = Arc::new(RecordingReporter::new());

    HierarchyEnumerator::new(client.clone(), reporter)
        .with_child_fetch_delay(Duration::from_millis(300))
        .enumerate()
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[1].at - calls[0].at >= Duration::from_millis(300));
    assert!(calls[2].at - calls[1].at >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_network_lists_carry_payload() {
    let client = Arc::new(FakeApiClient::new().respond(
        "/network-list/v2/network-lists?includeElements=true",
        json!({"networkLists": [
            {"uniqueId": "1_BLOCK", "name": "Block", "type": "IP", "list": ["1.2.3.4"]},
            {"name": "No id", "type": "GEO", "list": ["US"]}
        ]}),
    ));
    let reporter = Arc::new(RecordingReporter::new());

    let items = enumerate_network_lists(client.as_ref(), reporter.as_ref())
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, ResourceKind::NetworkList);
    assert_eq!(items[0].display_name, "Block");
    let payload = items[0].payload.as_ref().unwrap();
    assert_eq!(payload["list"], json!(["1.2.3.4"]));
    assert_eq!(
        reporter.count(|e| matches!(e, ProgressEvent::EntryDropped { .. })),
        1
    );
}

#[tokio::test]
async fn test_client_lists_carry_payload() {
    let client = Arc::new(FakeApiClient::new().respond(
        "/client-list/v1/lists?includeItems=true",
        json!({"content": [
            {"listId": "9_ALLOW", "name": "Allow", "type": "IP",
             "productionActivationStatus": "ACTIVE",
             "items": [{"value": "10.0.0.1", "tags": ["a", "b"]}, "10.0.0.2"]}
        ]}),
    ));
    let reporter = Arc::new(RecordingReporter::new());

    let items = enumerate_client_lists(client.as_ref(), reporter.as_ref())
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id.as_str(), "9_ALLOW");
    assert!(items[0].payload.is_some());
}

#[tokio::test]
async fn test_null_contract_ids_are_skipped() {
    let client = Arc::new(
        FakeApiClient::new()
            .respond(
                "/papi/v1/groups",
                json!({"groups": {"items": [
                    {"groupId": "g1", "groupName": "One", "contractIds": ["c1"]},
                    {"groupId": "g2", "groupName": "Two", "contractIds": null}
                ]}}),
            )
            .respond(
                "/papi/v1/properties?contractId=c1&groupId=g1",
                json!({"properties": {"items": [
                    {"propertyId": "p1", "propertyName": "kept", "productionVersion": 1}
                ]}}),
            ),
    );
    let reporter = Arc::new(RecordingReporter::new());

    let items = HierarchyEnumerator::new(client.clone(), reporter)
        .enumerate()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(client.calls_to("/papi/v1/properties"), 1);
}

#[tokio::test]
async fn test_null_properties_are_empty() {
    let client = Arc::new(
        FakeApiClient::new()
            .respond(
                "/papi/v1/groups",
                json!({"groups": {"items": [
                    {"groupId": "g1", "groupName": "One", "contractIds": ["c1"]}
                ]}}),
            )
            .respond(
                "/papi/v1/properties?contractId=c1&groupId=g1",
                json!({"properties": {"items": null}}),
            ),
    );
    let reporter = Arc::new(RecordingReporter::new());

    let items = HierarchyEnumerator::new(client, reporter.clone())
        .enumerate()
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(
        reporter.count(|e| matches!(e, ProgressEvent::ChildFetchFailed { .. })),
        0
    );
}

#[tokio::test]
async fn test_null_network_list_elements_are_empty() {
    let client = Arc::new(FakeApiClient::new().respond(
        "/network-list/v2/network-lists?includeElements=true",
        json!({"networkLists": [
            {"uniqueId": "1_EMPTY", "name": "Empty", "type": "IP", "list": null},
            {"uniqueId": "2_FULL", "name": "Full", "type": "IP", "list": ["1.2.3.4"]}
        ]}),
    ));
    let reporter = Arc::new(RecordingReporter::new());

    let items = enumerate_network_lists(client.as_ref(), reporter.as_ref())
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "1_EMPTY");
    assert_eq!(items[1].id.as_str(), "2_FULL");
}

#[tokio::test]
async fn test_null_client_list_fields_are_tolerated() {
    let client = Arc::new(FakeApiClient::new().respond(
        "/client-list/v1/lists?includeItems=true",
        json!({"content": [
            {"listId": "1_EMPTY", "name": "Empty", "type": "IP", "items": null},
            {"listId": "2_TAGS", "name": "Tags", "type": "IP",
             "items": [{"value": "10.0.0.1", "tags": null}]}
        ]}),
    ));
    let reporter = Arc::new(RecordingReporter::new());

    let items = enumerate_client_lists(client.as_ref(), reporter.as_ref())
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "1_EMPTY");
    assert_eq!(items[1].id.as_str(), "2_TAGS");
}

#[tokio::test]
async fn test_lookup_property_pins_version() {
    let client = Arc::new(FakeApiClient::new().respond(
        "/papi/v1/properties/prp_1",
        json!({"properties": {"items": [
            {"propertyId": "prp_1", "propertyName": "www.example.com",
             "contractId": "ctr_1", "groupId": "grp_1", "productionVersion": 3}
        ]}}),
    ));
    let id = ItemId::new("prp_1").unwrap();

    let item = lookup_property(client.as_ref(), &id, Some(7)).await.unwrap();

    assert_eq!(item.display_name, "www.example.com");
    assert_eq!(item.version_hint, Some(7));
    assert_eq!(item.versions.production, Some(3));
    assert_eq!(item.parent_context.get("groupId"), Some("grp_1"));
}

#[tokio::test]
async fn test_lookup_property_not_found() {
    let client = Arc::new(
        FakeApiClient::new().respond("/papi/v1/properties/prp_0", json!({"properties": {"items": []}})),
    );
    let id = ItemId::new("prp_0").unwrap();

    let err = lookup_property(client.as_ref(), &id, None).await.unwrap_err();

    assert!(err.to_string().contains("Property prp_0 not found"));
}

#[tokio::test]
async fn test_search_groups_is_case_insensitive() {
    let client = Arc::new(two_group_client());

    let groups = search_groups(client.as_ref(), "group ONE").await.unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group_id.as_deref(), Some("g1"));
}

#[tokio::test]
async fn test_search_account_switch_keys_sends_term() {
    let client = Arc::new(FakeApiClient::new().respond(
        "/identity-management/v3/api-clients/self/account-switch-keys?search=example",
        json!([{"accountSwitchKey": "1-ABC:1-DEF", "accountName": "Example Corp"}]),
    ));

    let keys = search_account_switch_keys(client.as_ref(), "example")
        .await
        .unwrap();

    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].account_name, "Example Corp");
}
