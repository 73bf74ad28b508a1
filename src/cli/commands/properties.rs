//! Property commands
//!
//! `list-properties` prints the enumerated work list, `download-property`
//! exports one rule tree and `download-properties` exports every property
//! in scope with the rule tree rate limit applied.

use super::{parse_delay, report_failure, summary_exit_code, CommandContext};
use crate::cli::table::{cell, Table};
use crate::core::enumerate::{lookup_property, HierarchyEnumerator};
use crate::core::export::{resolve_version, BatchExporter, ExportOptions, NamingScheme};
use crate::domain::{GroupId, ItemId, WorkItem};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the list-properties command
#[derive(Args, Debug)]
pub struct ListPropertiesArgs {
    /// Only list properties of this group (e.g., grp_123456)
    #[arg(short, long)]
    pub group: Option<GroupId>,
}

impl ListPropertiesArgs {
    /// Execute the list-properties command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        tracing::info!(group = ?self.group, "Listing properties");

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };

        let items = match HierarchyEnumerator::new(client, ctx.reporter())
            .with_scope(self.group.clone())
            .with_child_fetch_delay(ctx.config.export.enumeration_delay())
            .enumerate()
            .await
        {
            Ok(items) => items,
            Err(e) => return Ok(report_failure("Failed to list groups", &e)),
        };

        if items.is_empty() {
            eprintln!("No properties found");
            return Ok(1);
        }

        print!("{}", property_table(&items).render());
        println!();
        println!("Total: {} properties", items.len());
        Ok(0)
    }
}

/// Arguments for the download-property command
#[derive(Args, Debug)]
pub struct DownloadPropertyArgs {
    /// Property ID (e.g., prp_123456)
    pub property_id: ItemId,

    /// Version to download (default: production or latest)
    #[arg(short, long)]
    pub version: Option<u64>,

    /// Output file path (default: {propertyName}_v{version}.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DownloadPropertyArgs {
    /// Execute the download-property command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        tracing::info!(
            property_id = %self.property_id,
            version = ?self.version,
            "Downloading property"
        );

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };

        eprintln!("Fetching property info for {}...", self.property_id);
        let item = match lookup_property(client.as_ref(), &self.property_id, self.version).await {
            Ok(item) => item,
            Err(e) => return Ok(report_failure("Property lookup failed", &e)),
        };

        let mut options = ExportOptions::new(".")
            .with_naming(NamingScheme::Single)
            .with_delay(Duration::ZERO);
        if let Some(output) = &self.output {
            options = options.with_output_file(output);
        }

        let summary = match BatchExporter::new(client, ctx.reporter(), options)
            .with_shutdown(ctx.shutdown())
            .export(vec![item])
            .await
        {
            Ok(summary) => summary,
            Err(e) => return Ok(report_failure("Export failed", &e)),
        };

        if let Some(path) = summary.results.first().and_then(|r| r.file_path()) {
            println!("Saved to {}", path.display());
        }
        Ok(summary_exit_code(&summary))
    }
}

/// Arguments for the download-properties command
#[derive(Args, Debug)]
pub struct DownloadPropertiesArgs {
    /// Only download properties of this group (e.g., grp_123456)
    #[arg(short, long)]
    pub group: Option<GroupId>,

    /// Output directory (default: ./properties)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Delay between rule tree downloads in seconds (default: 21)
    #[arg(long, value_parser = parse_delay)]
    pub delay: Option<Duration>,
}

impl DownloadPropertiesArgs {
    /// Execute the download-properties command
    pub async fn execute(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| ctx.config.export.properties_dir.clone());
        let delay = self
            .delay
            .unwrap_or_else(|| ctx.config.export.rule_tree_delay());

        tracing::info!(
            group = ?self.group,
            output_dir = %output_dir.display(),
            delay_secs = delay.as_secs_f64(),
            "Downloading properties"
        );

        let client = match ctx.connect() {
            Ok(c) => c,
            Err(e) => return Ok(report_failure("Failed to load credentials", &e)),
        };
        let reporter = ctx.reporter();

        let items = match HierarchyEnumerator::new(client.clone(), reporter.clone())
            .with_scope(self.group.clone())
            .with_child_fetch_delay(ctx.config.export.enumeration_delay())
            .enumerate()
            .await
        {
            Ok(items) => items,
            Err(e) => return Ok(report_failure("Failed to list groups", &e)),
        };

        if items.is_empty() {
            eprintln!("No properties found");
            return Ok(1);
        }

        if !delay.is_zero() && items.len() > 1 {
            let estimate = delay.as_secs_f64() * (items.len() - 1) as f64 / 60.0;
            eprintln!(
                "Rate limit: one rule tree every {:.1}s (about {:.1} minutes)",
                delay.as_secs_f64(),
                estimate
            );
        }

        let options = ExportOptions::new(output_dir).with_delay(delay);
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
}

fn property_table(items: &[WorkItem]) -> Table {
    let mut table = Table::new([
        "propertyId",
        "propertyName",
        "prodVer",
        "stgVer",
        "latestVer",
        "exportVer",
        "groupId",
    ]);
    for item in items {
        table.add_row([
            item.id.to_string(),
            item.display_name.clone(),
            cell(item.versions.production),
            cell(item.versions.staging),
            cell(item.versions.latest),
            cell(resolve_version(item).number()),
            item.parent_context.get("groupId").unwrap_or_default().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContractId, ParentContext, ResourceKind, Versions};

    #[test]
    fn test_property_table_shows_export_version() {
        let item = WorkItem::new(
            ResourceKind::Property,
            ItemId::new("prp_1").unwrap(),
            "www.example.com",
        )
        .with_context(ParentContext::new(
            ContractId::new("ctr_1").unwrap(),
            GroupId::new("grp_1").unwrap(),
        ))
        .with_versions(Versions {
            production: None,
            staging: Some(3),
            latest: Some(4),
        });

        let rendered = property_table(&[item]).render();
        let row = rendered.lines().nth(2).unwrap();
        let cells: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(
            cells,
            vec!["prp_1", "www.example.com", "-", "3", "4", "4", "grp_1"]
        );
    }
}
