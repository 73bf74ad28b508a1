//! Artifact writers
//!
//! - rule trees: pretty-printed JSON, byte-for-byte the payload received
//! - network lists: CSV with a single `value` column
//! - client lists: CSV with item metadata and the list's activation status

use crate::adapters::akamai::models::{display_value, ClientList, ClientListItem, NetworkList};
use crate::domain::{AwpError, ResourceKind, Result};
use csv::Writer;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
struct NetworkListRecord {
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientListRecord {
    value: String,
    description: String,
    expiration_date: String,
    tags: String,
    staging_status: String,
    production_status: String,
}

/// Writes the artifact for one item of `kind` to `path`
///
/// The file is flushed and closed before this returns.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the payload does not
/// have the shape expected for `kind`.
pub fn write_artifact(kind: ResourceKind, path: &Path, payload: &Value) -> Result<()> {
    match kind {
        ResourceKind::Property => write_json(path, payload),
        ResourceKind::NetworkList => {
            let list: NetworkList = serde_json::from_value(payload.clone())?;
            write_network_list(path, &list)
        }
        ResourceKind::ClientList => {
            let list: ClientList = serde_json::from_value(payload.clone())?;
            write_client_list(path, &list)
        }
    }
}

/// Writes `payload` as pretty-printed JSON
pub fn write_json(path: &Path, payload: &Value) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, payload)?;
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}

/// Writes one row per network list element
pub fn write_network_list(path: &Path, list: &NetworkList) -> Result<()> {
    let mut writer = csv_writer(path)?;
    if list.list.is_empty() {
        writer.write_record(["value"])?;
    }
    for element in &list.list {
        writer.serialize(NetworkListRecord {
            value: display_value(element),
        })?;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}

/// Writes one row per client list item
pub fn write_client_list(path: &Path, list: &ClientList) -> Result<()> {
    let staging_status = list.staging_activation_status.clone().unwrap_or_default();
    let production_status = list.production_activation_status.clone().unwrap_or_default();

    let mut writer = csv_writer(path)?;
    if list.items.is_empty() {
        writer.write_record([
            "value",
            "description",
            "expirationDate",
            "tags",
            "stagingStatus",
            "productionStatus",
        ])?;
    }
    for item in &list.items {
        let record = match item {
            ClientListItem::Entry(entry) => ClientListRecord {
                value: display_value(&entry.value),
                description: display_value(&entry.description),
                expiration_date: display_value(&entry.expiration_date),
                tags: entry.joined_tags(),
                staging_status: staging_status.clone(),
                production_status: production_status.clone(),
            },
            ClientListItem::Raw(value) => ClientListRecord {
                value: display_value(value),
                description: String::new(),
                expiration_date: String::new(),
                tags: String::new(),
                staging_status: staging_status.clone(),
                production_status: production_status.clone(),
            },
        };
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}

fn csv_writer(path: &Path) -> Result<Writer<BufWriter<File>>> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    Ok(Writer::from_writer(BufWriter::new(file)))
}

fn io_error(path: &Path, e: std::io::Error) -> AwpError {
    AwpError::Io(format!("{}: {}", path.display(), e))
}
