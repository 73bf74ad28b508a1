//! Network list and client list enumeration
//!
//! Both resources come back from a single collection call. When elements are
//! requested, each list's payload rides along on its work item and the
//! exporter writes it without a detail fetch.

use crate::adapters::akamai::models::{
    ClientList, ClientListsResponse, NetworkList, NetworkListsResponse,
};
use crate::adapters::akamai::SignedApiClient;
use crate::core::report::{ProgressEvent, Reporter};
use crate::domain::{AwpError, ItemId, ResourceKind, Result, WorkItem};

const NETWORK_LISTS_PATH: &str = "/network-list/v2/network-lists";
const CLIENT_LISTS_PATH: &str = "/client-list/v1/lists";

/// Fetches all network lists, with their elements when `include_elements` is set
///
/// # Errors
///
/// Returns [`AwpError::Api`] if the call fails and [`AwpError::Enumeration`]
/// if the response cannot be read.
pub async fn fetch_network_lists(
    client: &dyn SignedApiClient,
    include_elements: bool,
) -> Result<Vec<NetworkList>> {
    let params = flag_param("includeElements", include_elements);
    let response = client.get(NETWORK_LISTS_PATH, &params).await?;
    let lists: NetworkListsResponse = serde_json::from_value(response)
        .map_err(|e| AwpError::Enumeration(format!("Unexpected network lists response: {e}")))?;
    Ok(lists.network_lists)
}

/// Fetches all client lists, with their items when `include_items` is set
///
/// # Errors
///
/// Returns [`AwpError::Api`] if the call fails and [`AwpError::Enumeration`]
/// if the response cannot be read.
pub async fn fetch_client_lists(
    client: &dyn SignedApiClient,
    include_items: bool,
) -> Result<Vec<ClientList>> {
    let params = flag_param("includeItems", include_items);
    let response = client.get(CLIENT_LISTS_PATH, &params).await?;
    let lists: ClientListsResponse = serde_json::from_value(response)
        .map_err(|e| AwpError::Enumeration(format!("Unexpected client lists response: {e}")))?;
    Ok(lists.content)
}

/// Enumerates network lists as work items carrying their payload
pub async fn enumerate_network_lists(
    client: &dyn SignedApiClient,
    reporter: &dyn Reporter,
) -> Result<Vec<WorkItem>> {
    reporter.report(&ProgressEvent::FetchingRoot {
        kind: ResourceKind::NetworkList,
    });
    let lists = fetch_network_lists(client, true).await?;

    let items = lists
        .into_iter()
        .filter_map(|list| {
            let id = list.id().map(str::to_string);
            let name = list.name.clone();
            to_work_item(ResourceKind::NetworkList, id, name, &list, reporter)
        })
        .collect::<Vec<_>>();

    reporter.report(&ProgressEvent::Enumerated {
        kind: ResourceKind::NetworkList,
        count: items.len(),
    });
    Ok(items)
}

/// Enumerates client lists as work items carrying their payload
pub async fn enumerate_client_lists(
    client: &dyn SignedApiClient,
    reporter: &dyn Reporter,
) -> Result<Vec<WorkItem>> {
    reporter.report(&ProgressEvent::FetchingRoot {
        kind: ResourceKind::ClientList,
    });
    let lists = fetch_client_lists(client, true).await?;

    let items = lists
        .into_iter()
        .filter_map(|list| {
            let id = list.list_id.clone();
            let name = list.name.clone();
            to_work_item(ResourceKind::ClientList, id, name, &list, reporter)
        })
        .collect::<Vec<_>>();

    reporter.report(&ProgressEvent::Enumerated {
        kind: ResourceKind::ClientList,
        count: items.len(),
    });
    Ok(items)
}

fn to_work_item<T: serde::Serialize>(
    kind: ResourceKind,
    id: Option<String>,
    name: Option<String>,
    list: &T,
    reporter: &dyn Reporter,
) -> Option<WorkItem> {
    let display_name = name.unwrap_or_else(|| "unknown".to_string());

    let Some(id) = id.and_then(|id| ItemId::new(id).ok()) else {
        reporter.report(&ProgressEvent::EntryDropped {
            kind,
            reason: format!("'{display_name}' has no id"),
        });
        return None;
    };

    match serde_json::to_value(list) {
        Ok(payload) => Some(WorkItem::new(kind, id, display_name).with_payload(payload)),
        Err(e) => {
            reporter.report(&ProgressEvent::EntryDropped {
                kind,
                reason: format!("'{display_name}' could not be encoded: {e}"),
            });
            None
        }
    }
}

fn flag_param(name: &str, enabled: bool) -> Vec<(String, String)> {
    if enabled {
        vec![(name.to_string(), "true".to_string())]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_param() {
        assert_eq!(
            flag_param("includeItems", true),
            vec![("includeItems".to_string(), "true".to_string())]
        );
        assert!(flag_param("includeItems", false).is_empty());
    }
}
