//! Work list construction
//!
//! - [`hierarchy`] walks groups → contracts → properties
//! - [`property`] resolves a single property by id
//! - [`lists`] reads network and client lists from one collection call
//! - [`lookup`] searches account switch keys and groups

pub mod hierarchy;
pub mod lists;
pub mod lookup;
pub mod property;

pub use hierarchy::{fetch_groups, HierarchyEnumerator};
pub use lists::{
    enumerate_client_lists, enumerate_network_lists, fetch_client_lists, fetch_network_lists,
};
pub use lookup::{search_account_switch_keys, search_groups};
pub use property::lookup_property;
