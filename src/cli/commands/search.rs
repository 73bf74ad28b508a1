//! Search commands
//!
//! `search-asw` looks up account switch keys, `search-group` filters the
//! group listing by name.

use super::{report_failure, CommandContext};
use crate::adapters::akamai::models::{AccountSwitchKey, Group};
use crate::cli::table::Table;
use crate::core::enumerate::{search_account_switch_keys, search_groups};
use clap::Args;

/// Arguments for the search-asw command
#[derive(Args, Debug)]
pub struct SearchAswArgs {
    /// Account name to search (partial match supported)
    pub name: String,
}

impl SearchAswArgs {
    /// Execute the search-asw command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        tracing::info!(name = %self.name, "Searching account switch keys");

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };

        let keys = match search_account_switch_keys(client.as_ref(), &self.name).await {
            Ok(keys) => keys,
            Err(e) => return Ok(report_failure("Account switch key search failed", &e)),
        };

        if keys.is_empty() {
            eprintln!("No results found");
            return Ok(1);
        }

        print!("{}", account_table(&keys).render());
        Ok(0)
    }
}

/// Arguments for the search-group command
#[derive(Args, Debug)]
pub struct SearchGroupArgs {
    /// Group name to search (case-insensitive partial match)
    pub name: String,
}

impl SearchGroupArgs {
    /// Execute the search-group command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        tracing::info!(name = %self.name, "Searching groups");

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };

        let groups = match search_groups(client.as_ref(), &self.name).await {
            Ok(groups) => groups,
            Err(e) => return Ok(report_failure("Group search failed", &e)),
        };

        if groups.is_empty() {
            eprintln!("No results found");
            return Ok(1);
        }

        print!("{}", group_table(&groups).render());
        Ok(0)
    }
}

fn account_table(keys: &[AccountSwitchKey]) -> Table {
    let mut table = Table::new(["accountSwitchKey", "accountName"]);
    for key in keys {
        table.add_row([key.account_switch_key.as_str(), key.account_name.as_str()]);
    }
    table
}

fn group_table(groups: &[Group]) -> Table {
    let mut table = Table::new(["groupId", "groupName", "contractIds"]);
    for group in groups {
        table.add_row([
            group.group_id.clone().unwrap_or_default(),
            group.group_name.clone().unwrap_or_default(),
            group.contract_ids.join(";"),
        ]);
    }
    table
}
