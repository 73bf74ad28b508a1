//! Network list and client list commands
//!
//! Listing and downloading both use a single collection call. Downloads ask
//! for the list contents up front and write one CSV file per list.

use super::{report_failure, summary_exit_code, CommandContext};
use crate::adapters::akamai::models::{ClientList, NetworkList};
use crate::cli::table::Table;
use crate::core::enumerate::{
    enumerate_client_lists, enumerate_network_lists, fetch_client_lists, fetch_network_lists,
};
use crate::core::export::{BatchExporter, ExportOptions};
use crate::domain::ResourceKind;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the list-networklists command
#[derive(Args, Debug)]
pub struct ListNetworkListsArgs {}

impl ListNetworkListsArgs {
    /// Execute the list-networklists command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        tracing::info!("Listing network lists");

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };

        let lists = match fetch_network_lists(client.as_ref(), false).await {
            Ok(lists) => lists,
            Err(e) => return Ok(report_failure("Failed to list network lists", &e)),
        };

        if lists.is_empty() {
            eprintln!("No network lists found");
            return Ok(1);
        }

        print!("{}", network_list_table(&lists).render());
        Ok(0)
    }
}

/// Arguments for the download-networklists command
#[derive(Args, Debug)]
pub struct DownloadNetworkListsArgs {
    /// Output directory (default: ./networklists)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl DownloadNetworkListsArgs {
    /// Execute the download-networklists command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| ctx.config.export.network_lists_dir.clone());

        download_lists(ctx, ResourceKind::NetworkList, output_dir).await
    }
}

/// Arguments for the list-clientlists command
#[derive(Args, Debug)]
pub struct ListClientListsArgs {}

impl ListClientListsArgs {
    /// Execute the list-clientlists command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        tracing::info!("Listing client lists");

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };

        let lists = match fetch_client_lists(client.as_ref(), false).await {
            Ok(lists) => lists,
            Err(e) => return Ok(report_failure("Failed to list client lists", &e)),
        };

        if lists.is_empty() {
            eprintln!("No client lists found");
            return Ok(1);
        }

        print!("{}", client_list_table(&lists).render());
        Ok(0)
    }
}

/// Arguments for the download-clientlists command
#[derive(Args, Debug)]
pub struct DownloadClientListsArgs {
    /// Output directory (default: ./clientlists)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl DownloadClientListsArgs {
    /// Execute the download-clientlists command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| ctx.config.export.client_lists_dir.clone());

        download_lists(ctx, ResourceKind::ClientList, output_dir).await
    }
}

async fn download_lists(
    ctx: &CommandContext,
    kind: ResourceKind,
    output_dir: PathBuf,
) -> anyhow::Result<i32> {
    tracing::info!(
        kind = %kind,
        output_dir = %output_dir.display(),
        "Downloading lists"
    );

    let client = match ctx.connect() {
        Ok(c) => c,
        Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
    };
    let reporter = ctx.reporter();

    let enumerated = match kind {
        ResourceKind::ClientList => {
            enumerate_client_lists(client.as_ref(), reporter.as_ref()).await
        }
        _ => enumerate_network_lists(client.as_ref(), reporter.as_ref()).await,
    };
    let items = match enumerated {
        Ok(items) => items,
        Err(e) => return Ok(report_failure(&format!("Failed to list {}s", kind.label()), &e)),
    };

    if items.is_empty() {
        eprintln!("No {}s found", kind.label());
        return Ok(1);
    }

    // Payloads come with the collection; nothing is fetched per list
    let options = ExportOptions::new(output_dir).with_delay(Duration::ZERO);
    let summary = match BatchExporter::new(client, reporter, options)
        .with_shutdown(ctx.shutdown())
        .export(items)
        .await
    {
        Ok(summary) => summary,
        Err(e) => return Ok(report_failure("Export failed", &e)),
    };

    Ok(summary_exit_code(&summary))
}

fn network_list_table(lists: &[NetworkList]) -> Table {
    let mut table = Table::new(["name", "networkListId", "type", "elementCount"]);
    for list in lists {
        table.add_row([
            list.name.clone().unwrap_or_default(),
            list.network_list_id.clone().unwrap_or_default(),
            list.list_type.clone().unwrap_or_default(),
            list.element_count().to_string(),
        ]);
    }
    table
}

fn client_list_table(lists: &[ClientList]) -> Table {
    let mut table = Table::new([
        "name",
        "listId",
        "type",
        "itemsCount",
        "stagingStatus",
        "productionStatus",
    ]);
    for list in lists {
        table.add_row([
            list.name.clone().unwrap_or_default(),
            list.list_id.clone().unwrap_or_default(),
            list.list_type.clone().unwrap_or_default(),
            list.items_count().to_string(),
            list.staging_activation_status.clone().unwrap_or_default(),
            list.production_activation_status.clone().unwrap_or_default(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_list_table() {
        let lists = vec![NetworkList {
            unique_id: Some("123_BLOCK".to_string()),
            network_list_id: Some("123_BLOCK".to_string()),
            name: Some("Blocklist".to_string()),
            list_type: Some("IP".to_string()),
            element_count: Some(2),
            list: Vec::new(),
        }];

        let rendered = network_list_table(&lists).render();
        let cells: Vec<&str> = rendered.lines().nth(2).unwrap().split_whitespace().collect();
        assert_eq!(cells, vec!["Blocklist", "123_BLOCK", "IP", "2"]);
    }

    #[test]
    fn test_client_list_table_defaults_missing_fields() {
        let lists = vec![ClientList {
            list_id: Some("91596_ALLOW".to_string()),
            name: Some("Allow".to_string()),
            list_type: Some("IP".to_string()),
            items_count: None,
            staging_activation_status: Some("ACTIVE".to_string()),
            production_activation_status: None,
            items: Vec::new(),
        }];

        let rendered = client_list_table(&lists).render();
        let cells: Vec<&str> = rendered.lines().nth(2).unwrap().split_whitespace().collect();
        assert_eq!(cells, vec!["Allow", "91596_ALLOW", "IP", "0", "ACTIVE"]);
    }
}
