//! Wire models for the Akamai endpoints awp reads
//!
//! Fields are optional wherever the API may omit them; validation of the
//! values that must be present (ids) happens when work items are built.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `GET /papi/v1/groups`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Items<Group>,
}

/// `GET /papi/v1/properties` and `GET /papi/v1/properties/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertiesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Items<PropertySummary>,
}

/// The `{ "items": [...] }` envelope used by Property Manager collections
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Items<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

impl<T> Default for Items<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Property Manager group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_ids: Vec<String>,
}

/// Property as reported by a property listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub property_id: Option<String>,
    pub property_name: Option<String>,
    pub contract_id: Option<String>,
    pub group_id: Option<String>,
    pub production_version: Option<u64>,
    pub staging_version: Option<u64>,
    pub latest_version: Option<u64>,
}

/// `GET /network-list/v2/network-lists`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkListsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_lists: Vec<NetworkList>,
}

/// Network list, with elements when requested via `includeElements=true`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkList {
    pub unique_id: Option<String>,
    pub network_list_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub list_type: Option<String>,
    pub element_count: Option<u64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub list: Vec<Value>,
}

impl NetworkList {
    /// Stable identifier; `uniqueId`, falling back to `networkListId`
    pub fn id(&self) -> Option<&str> {
        self.unique_id
            .as_deref()
            .or(self.network_list_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Number of elements, preferring the reported count
    pub fn element_count(&self) -> u64 {
        self.element_count.unwrap_or(self.list.len() as u64)
    }
}

/// `GET /client-list/v1/lists`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientListsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ClientList>,
}

/// Client list, with items when requested via `includeItems=true`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientList {
    pub list_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub list_type: Option<String>,
    pub items_count: Option<u64>,
    pub staging_activation_status: Option<String>,
    pub production_activation_status: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<ClientListItem>,
}

impl ClientList {
    /// Number of items, preferring the reported count
    pub fn items_count(&self) -> u64 {
        self.items_count.unwrap_or(self.items.len() as u64)
    }
}

/// Client list entry; older lists may carry bare values
///
/// Every JSON object is a [`ClientListItem::Entry`]; only non-object items
/// are kept as [`ClientListItem::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClientListItem {
    Entry(ClientListEntry),
    Raw(Value),
}

impl<'de> Deserialize<'de> for ClientListItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_object() {
            serde_json::from_value(value)
                .map(ClientListItem::Entry)
                .map_err(serde::de::Error::custom)
        } else {
            Ok(ClientListItem::Raw(value))
        }
    }
}

/// Client list entry with metadata
///
/// Fields stay raw JSON so that nulls and non-string scalars still land in
/// their own CSV column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListEntry {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub description: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub expiration_date: Value,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<Value>,
}

impl ClientListEntry {
    /// Tags joined with `,`
    pub fn joined_tags(&self) -> String {
        self.tags
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Entry of `GET /identity-management/v3/api-clients/self/account-switch-keys`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSwitchKey {
    pub account_switch_key: String,
    #[serde(default)]
    pub account_name: String,
}

/// Treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Renders a JSON scalar the way it should appear in a CSV cell
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
