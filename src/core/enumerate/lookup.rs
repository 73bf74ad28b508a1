//! Account switch key and group searches

use super::hierarchy::fetch_groups;
use crate::adapters::akamai::models::{AccountSwitchKey, Group};
use crate::adapters::akamai::SignedApiClient;
use crate::domain::{AwpError, Result};

const ACCOUNT_SWITCH_KEYS_PATH: &str = "/identity-management/v3/api-clients/self/account-switch-keys";

/// Searches account switch keys by account name
///
/// # Errors
///
/// Returns [`AwpError::Api`] if the call fails and [`AwpError::Enumeration`]
/// if the response is not a list of keys.
pub async fn search_account_switch_keys(
    client: &dyn SignedApiClient,
    name: &str,
) -> Result<Vec<AccountSwitchKey>> {
    let response = client
        .get(
            ACCOUNT_SWITCH_KEYS_PATH,
            &[("search".to_string(), name.to_string())],
        )
        .await?;
    serde_json::from_value(response)
        .map_err(|e| AwpError::Enumeration(format!("Unexpected account switch key response: {e}")))
}

/// Groups whose name contains `name`, ignoring case
///
/// # Errors
///
/// Fails if the group listing fails.
pub async fn search_groups(client: &dyn SignedApiClient, name: &str) -> Result<Vec<Group>> {
    let needle = name.to_lowercase();
    let groups = fetch_groups(client).await?;
    Ok(groups
        .into_iter()
        .filter(|g| {
            g.group_name
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
        .collect())
}
