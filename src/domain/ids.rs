//! Domain identifier types with validation
//!
//! Newtype wrappers for the remote identifiers (`grp_…`, `ctr_…`, `prp_…`, list ids).
//! Each type rejects empty values, which is how a [`WorkItem`](super::WorkItem)
//! guarantees a non-empty id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting empty or whitespace-only values
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Stable remote identifier of an exportable item
    /// (property id, network list unique id, client list id)
    ///
    /// ```
    /// use awp::domain::ids::ItemId;
    ///
    /// let id = ItemId::new("prp_123456").unwrap();
    /// assert_eq!(id.as_str(), "prp_123456");
    /// assert!(ItemId::new("  ").is_err());
    /// ```
    ItemId,
    "Item ID"
);

string_id!(
    /// Property Manager group identifier, e.g. `grp_12345`
    GroupId,
    "Group ID"
);

string_id!(
    /// Contract identifier, e.g. `ctr_1-ABCDE`
    ContractId,
    "Contract ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_valid() {
        let id = ItemId::from_str("prp_123").unwrap();
        assert_eq!(id.as_str(), "prp_123");
        assert_eq!(id.to_string(), "prp_123");
        assert_eq!(id.into_inner(), "prp_123");
    }

    #[test]
    fn test_ids_reject_empty() {
        assert!(ItemId::new("").is_err());
        assert!(GroupId::new("   ").is_err());
        let err = ContractId::new("").unwrap_err();
        assert_eq!(err, "Contract ID cannot be empty");
    }

    #[test]
    fn test_id_serde_roundtrip_rejects_empty() {
        let id: GroupId = serde_json::from_str("\"grp_1\"").unwrap();
        assert_eq!(id.as_str(), "grp_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"grp_1\"");

        assert!(serde_json::from_str::<GroupId>("\"\"").is_err());
    }
}
