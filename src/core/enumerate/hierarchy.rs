//! Groups → contracts → properties enumeration
//!
//! One root call lists the groups; one child call per (group, contract) pair
//! lists that pair's properties. A failed root call aborts; a failed child
//! call is reported and the pair skipped.

use crate::adapters::akamai::models::{Group, GroupsResponse, PropertiesResponse, PropertySummary};
use crate::adapters::akamai::SignedApiClient;
use crate::core::report::{ProgressEvent, Reporter};
use crate::domain::{
    AwpError, ContractId, GroupId, ItemId, ParentContext, ResourceKind, Result, Versions, WorkItem,
};
use std::sync::Arc;
use std::time::Duration;

const GROUPS_PATH: &str = "/papi/v1/groups";
const PROPERTIES_PATH: &str = "/papi/v1/properties";

/// Fetches the group list
///
/// # Errors
///
/// Returns [`AwpError::Api`] if the call fails and [`AwpError::Enumeration`]
/// if the response cannot be read.
pub async fn fetch_groups(client: &dyn SignedApiClient) -> Result<Vec<Group>> {
    let response = client.get(GROUPS_PATH, &[]).await?;
    let groups: GroupsResponse = serde_json::from_value(response)
        .map_err(|e| AwpError::Enumeration(format!("Unexpected groups response: {e}")))?;
    Ok(groups.groups.items)
}

/// Builds the property work list
pub struct HierarchyEnumerator {
    client: Arc<dyn SignedApiClient>,
    reporter: Arc<dyn Reporter>,
    scope: Option<GroupId>,
    child_fetch_delay: Duration,
}

impl HierarchyEnumerator {
    pub fn new(client: Arc<dyn SignedApiClient>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            client,
            reporter,
            scope: None,
            child_fetch_delay: Duration::ZERO,
        }
    }

    /// Restricts enumeration to one group
    pub fn with_scope(mut self, scope: Option<GroupId>) -> Self {
        self.scope = scope;
        self
    }

    /// Pause before every child fetch
    pub fn with_child_fetch_delay(mut self, delay: Duration) -> Self {
        self.child_fetch_delay = delay;
        self
    }

    /// Walks the hierarchy and returns the work list in traversal order
    ///
    /// Groups come in root order, contracts in listed order and properties in
    /// the order each child call returns them. Nothing is written to disk.
    ///
    /// # Errors
    ///
    /// Fails only if the root group listing fails.
    pub async fn enumerate(&self) -> Result<Vec<WorkItem>> {
        self.reporter.report(&ProgressEvent::FetchingRoot {
            kind: ResourceKind::Property,
        });
        let groups = fetch_groups(self.client.as_ref()).await?;
        self.reporter.report(&ProgressEvent::RootFetched {
            kind: ResourceKind::Property,
            count: groups.len(),
        });

        let mut items = Vec::new();
        for group in &groups {
            if group.contract_ids.is_empty() {
                continue;
            }

            let Some(group_id) = group.group_id.as_deref().and_then(|id| GroupId::new(id).ok())
            else {
                self.drop_entry(format!(
                    "group '{}' has no groupId",
                    group.group_name.as_deref().unwrap_or("Unknown")
                ));
                continue;
            };

            if self.scope.as_ref().is_some_and(|scope| scope != &group_id) {
                continue;
            }

            let group_name = group.group_name.as_deref().unwrap_or("Unknown");
            for contract_id in &group.contract_ids {
                let Ok(contract_id) = ContractId::new(contract_id.as_str()) else {
                    self.drop_entry(format!("group {group_id} lists an empty contractId"));
                    continue;
                };

                let context = ParentContext::new(contract_id, group_id.clone());
                if let Some(properties) = self.fetch_properties(group_name, &context).await {
                    items.extend(
                        properties
                            .into_iter()
                            .filter_map(|p| self.work_item(p, &context)),
                    );
                }
            }
        }

        self.reporter.report(&ProgressEvent::Enumerated {
            kind: ResourceKind::Property,
            count: items.len(),
        });
        Ok(items)
    }

    async fn fetch_properties(
        &self,
        group_name: &str,
        context: &ParentContext,
    ) -> Option<Vec<PropertySummary>> {
        let group_id = context.get("groupId").unwrap_or_default().to_string();
        let contract_id = context.get("contractId").unwrap_or_default().to_string();

        if !self.child_fetch_delay.is_zero() {
            tokio::time::sleep(self.child_fetch_delay).await;
        }

        self.reporter.report(&ProgressEvent::FetchingChildren {
            group_id: group_id.clone(),
            group_name: group_name.to_string(),
            contract_id: contract_id.clone(),
        });

        let parsed = self
            .client
            .get(PROPERTIES_PATH, &context.query_params())
            .await
            .map_err(|e| e.to_string())
            .and_then(|response| {
                serde_json::from_value::<PropertiesResponse>(response)
                    .map_err(|e| format!("Unexpected properties response: {e}"))
            });

        match parsed {
            Ok(response) => Some(response.properties.items),
            Err(error) => {
                self.reporter.report(&ProgressEvent::ChildFetchFailed {
                    group_id,
                    contract_id,
                    error,
                });
                None
            }
        }
    }

    fn work_item(&self, property: PropertySummary, context: &ParentContext) -> Option<WorkItem> {
        let Some(id) = property
            .property_id
            .as_deref()
            .and_then(|id| ItemId::new(id).ok())
        else {
            self.drop_entry(format!(
                "property '{}' has no propertyId",
                property.property_name.as_deref().unwrap_or("Unknown")
            ));
            return None;
        };

        let name = property
            .property_name
            .clone()
            .unwrap_or_else(|| id.to_string());

        Some(
            WorkItem::new(ResourceKind::Property, id, name)
                .with_context(context.clone())
                .with_versions(versions_of(&property)),
        )
    }

    fn drop_entry(&self, reason: String) {
        self.reporter.report(&ProgressEvent::EntryDropped {
            kind: ResourceKind::Property,
            reason,
        });
    }
}

/// Versions reported by a property listing entry
pub fn versions_of(property: &PropertySummary) -> Versions {
    Versions {
        production: property.production_version,
        staging: property.staging_version,
        latest: property.latest_version,
    }
}
