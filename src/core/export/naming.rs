//! Artifact file naming
//!
//! Display names are not unique and may contain anything, so they are
//! sanitized before they reach the filesystem and batch names are prefixed
//! with the item's stable id.

use crate::domain::WorkItem;

/// Maps an arbitrary display name to a safe file name component
///
/// Every character other than an ASCII letter, digit, `.`, `_` or `-` is
/// replaced with `_`. The output has as many characters as the input.
///
/// ```
/// use awp::core::export::sanitize_filename;
///
/// assert_eq!(sanitize_filename("www.example.com/api v2"), "www.example.com_api_v2");
/// assert_eq!(sanitize_filename("ünï"), "___");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// How exported files are named
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamingScheme {
    /// `{id}_{name}[_v{version}].{ext}`; unique within a batch
    #[default]
    Batch,

    /// `{name}[_v{version}].{ext}`; used when exporting one item
    Single,
}

impl NamingScheme {
    /// File name for `item` exported at `version`
    pub fn file_name(self, item: &WorkItem, version: Option<u64>) -> String {
        let name = sanitize_filename(&item.display_name);
        let stem = match self {
            NamingScheme::Batch => format!("{}_{}", item.id, name),
            NamingScheme::Single => name,
        };

        let version = version
            .filter(|_| item.kind.is_versioned())
            .map(|v| format!("_v{v}"))
            .unwrap_or_default();

        format!("{stem}{version}.{}", item.kind.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, ResourceKind};
    use test_case::test_case;

    #[test_case("www.example.com", "www.example.com" ; "already safe")]
    #[test_case("a b/c\\d:e", "a_b_c_d_e" ; "separators")]
    #[test_case("", "" ; "empty")]
    #[test_case("café", "caf_" ; "non ascii letter")]
    #[test_case("a\u{1F600}b", "a_b" ; "emoji counts as one char")]
    fn test_sanitize_filename(input: &str, expected: &str) {
        assert_eq!(sanitize_filename(input), expected);
    }

    #[test]
    fn test_sanitize_preserves_char_count() {
        let input = "Prod – www.example.com (EU) #1 ✓";
        let output = sanitize_filename(input);
        assert_eq!(output.chars().count(), input.chars().count());
        assert!(output
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn test_batch_names_are_prefixed_with_id() {
        let item = WorkItem::new(
            ResourceKind::Property,
            ItemId::new("prp_1").unwrap(),
            "www.example.com",
        );
        assert_eq!(
            NamingScheme::Batch.file_name(&item, Some(3)),
            "prp_1_www.example.com_v3.json"
        );
        assert_eq!(
            NamingScheme::Single.file_name(&item, Some(3)),
            "www.example.com_v3.json"
        );
    }

    #[test]
    fn test_unversioned_kinds_ignore_version() {
        let item = WorkItem::new(
            ResourceKind::NetworkList,
            ItemId::new("1024_BLOCK").unwrap(),
            "Block list",
        );
        assert_eq!(
            NamingScheme::Batch.file_name(&item, Some(9)),
            "1024_BLOCK_Block_list.csv"
        );
    }
}
