//! Work items produced by enumeration and consumed by the exporter

use super::ids::{ContractId, GroupId, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of remote object being exported
///
/// The kind decides which context keys the detail fetch needs, whether a
/// version must be resolved, and which artifact format is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Property Manager configuration; exported as its rule tree (JSON)
    Property,
    /// Network list; exported as a single-column CSV
    NetworkList,
    /// Client list; exported as a CSV with item metadata
    ClientList,
}

impl ResourceKind {
    /// Human-readable label used in progress output
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Property => "property",
            ResourceKind::NetworkList => "network list",
            ResourceKind::ClientList => "client list",
        }
    }

    /// File extension of the exported artifact
    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Property => "json",
            ResourceKind::NetworkList | ResourceKind::ClientList => "csv",
        }
    }

    /// Whether a version must be resolved before the detail fetch
    pub fn is_versioned(self) -> bool {
        matches!(self, ResourceKind::Property)
    }

    /// Context keys the detail endpoint requires
    pub fn required_context(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Property => &["contractId", "groupId"],
            ResourceKind::NetworkList | ResourceKind::ClientList => &[],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contextual identifiers needed to fetch an item's detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentContext {
    /// Contract the item was enumerated under
    pub contract_id: Option<ContractId>,

    /// Group the item was enumerated under
    pub group_id: Option<GroupId>,
}

impl ParentContext {
    /// Creates a context for a (contract, group) pair
    pub fn new(contract_id: ContractId, group_id: GroupId) -> Self {
        Self {
            contract_id: Some(contract_id),
            group_id: Some(group_id),
        }
    }

    /// Looks up a context value by its wire key
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "contractId" => self.contract_id.as_ref().map(ContractId::as_str),
            "groupId" => self.group_id.as_ref().map(GroupId::as_str),
            _ => None,
        }
    }

    /// Keys required by `kind` that are absent from this context
    pub fn missing_for(&self, kind: ResourceKind) -> Vec<&'static str> {
        kind.required_context()
            .iter()
            .copied()
            .filter(|key| self.get(key).is_none())
            .collect()
    }

    /// Query parameters carrying the context, in wire order
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(contract_id) = &self.contract_id {
            params.push(("contractId".to_string(), contract_id.to_string()));
        }
        if let Some(group_id) = &self.group_id {
            params.push(("groupId".to_string(), group_id.to_string()));
        }
        params
    }
}

/// Versions reported for an item by its collection listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    /// Version active on the production network
    pub production: Option<u64>,

    /// Version active on the staging network (display only)
    pub staging: Option<u64>,

    /// Most recent version
    pub latest: Option<u64>,
}

/// One exportable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Kind of object
    pub kind: ResourceKind,

    /// Stable remote identifier
    pub id: ItemId,

    /// Human-readable name, not guaranteed unique
    pub display_name: String,

    /// Identifiers required by the detail fetch
    pub parent_context: ParentContext,

    /// Explicit version to export; overrides [`Versions`]
    pub version_hint: Option<u64>,

    /// Versions reported by the listing
    pub versions: Versions,

    /// Detail payload already delivered by the enumeration call
    ///
    /// When present the exporter writes it directly instead of fetching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl WorkItem {
    /// Creates a work item with empty context and no version information
    pub fn new(kind: ResourceKind, id: ItemId, display_name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            display_name: display_name.into(),
            parent_context: ParentContext::default(),
            version_hint: None,
            versions: Versions::default(),
            payload: None,
        }
    }

    /// Sets the parent context
    pub fn with_context(mut self, parent_context: ParentContext) -> Self {
        self.parent_context = parent_context;
        self
    }

    /// Sets the versions reported by the listing
    pub fn with_versions(mut self, versions: Versions) -> Self {
        self.versions = versions;
        self
    }

    /// Pins the version to export
    pub fn with_version_hint(mut self, version: u64) -> Self {
        self.version_hint = Some(version);
        self
    }

    /// Attaches an already-fetched detail payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
