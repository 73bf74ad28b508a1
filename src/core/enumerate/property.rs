//! Single property lookup

use super::hierarchy::versions_of;
use crate::adapters::akamai::models::PropertiesResponse;
use crate::adapters::akamai::SignedApiClient;
use crate::domain::{
    AwpError, ContractId, GroupId, ItemId, ParentContext, ResourceKind, Result, WorkItem,
};

/// Looks up one property and returns it as a work item
///
/// `version` pins the version to export; without it the usual policy applies.
/// Missing contract or group ids are left empty so the exporter reports the
/// item as incomplete instead of fetching.
///
/// # Errors
///
/// Returns [`AwpError::Api`] if the call fails and [`AwpError::Enumeration`]
/// if the property does not exist.
pub async fn lookup_property(
    client: &dyn SignedApiClient,
    property_id: &ItemId,
    version: Option<u64>,
) -> Result<WorkItem> {
    let response = client
        .get(&format!("/papi/v1/properties/{property_id}"), &[])
        .await?;
    let response: PropertiesResponse = serde_json::from_value(response)
        .map_err(|e| AwpError::Enumeration(format!("Unexpected property response: {e}")))?;

    let property = response
        .properties
        .items
        .into_iter()
        .next()
        .ok_or_else(|| AwpError::Enumeration(format!("Property {property_id} not found")))?;

    let context = ParentContext {
        contract_id: property
            .contract_id
            .as_deref()
            .and_then(|id| ContractId::new(id).ok()),
        group_id: property
            .group_id
            .as_deref()
            .and_then(|id| GroupId::new(id).ok()),
    };
    let name = property
        .property_name
        .clone()
        .unwrap_or_else(|| property_id.to_string());

    tracing::debug!(
        property_id = %property_id,
        name = %name,
        production = property.production_version,
        latest = property.latest_version,
        "Property found"
    );

    let item = WorkItem::new(ResourceKind::Property, property_id.clone(), name)
        .with_context(context)
        .with_versions(versions_of(&property));

    Ok(match version {
        Some(v) => item.with_version_hint(v),
        None => item,
    })
}
