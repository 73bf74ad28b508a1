//! Version selection for versioned resources

use crate::domain::WorkItem;

/// Outcome of resolving the version to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVersion {
    /// The kind is not versioned
    Unversioned,

    /// Export this version
    Version(u64),

    /// No version can be determined
    Unresolvable,
}

impl ResolvedVersion {
    /// Version number, if one was resolved
    pub fn number(self) -> Option<u64> {
        match self {
            ResolvedVersion::Version(v) => Some(v),
            _ => None,
        }
    }
}

/// Picks the version to export
///
/// Order: explicit hint, production version, latest version. The staging
/// version is never exported implicitly.
///
/// ```
/// use awp::core::export::{resolve_version, ResolvedVersion};
/// use awp::domain::{ItemId, ResourceKind, Versions, WorkItem};
///
/// let item = WorkItem::new(ResourceKind::Property, ItemId::new("prp_1").unwrap(), "site")
///     .with_versions(Versions { production: None, staging: Some(4), latest: Some(5) });
/// assert_eq!(resolve_version(&item), ResolvedVersion::Version(5));
/// ```
pub fn resolve_version(item: &WorkItem) -> ResolvedVersion {
    if !item.kind.is_versioned() {
        return ResolvedVersion::Unversioned;
    }

    [
        item.version_hint,
        item.versions.production,
        item.versions.latest,
    ]
    .into_iter()
    .flatten()
    .find(|v| *v > 0)
    .map_or(ResolvedVersion::Unresolvable, ResolvedVersion::Version)
}
