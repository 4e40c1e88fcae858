//! Manifest discovery
//!
//! Walks a file or directory of Kubernetes manifests and records every object
//! in a [`UsageIndex`], keyed the same way as the API catalog.

use kubepug_core::{UsageIndex, UsageItem};
use serde::Deserialize;
use serde_yaml::Value;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{CliError, Result};

const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Build a usage index from a manifest file or a directory of manifests
pub fn scan(path: &Path) -> Result<UsageIndex> {
    if !path.exists() {
        return Err(CliError::Io {
            message: format!("{}: no such file or directory", path.display()),
        });
    }

    let mut usage = UsageIndex::new();

    if path.is_file() {
        scan_file(path, &mut usage)?;
    } else {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(walk_error)?;
            if entry.file_type().is_file() && is_manifest(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();

        tracing::debug!(dir = %path.display(), files = files.len(), "scanning manifest directory");
        for file in &files {
            scan_file(file, &mut usage)?;
        }
    }

    tracing::info!(
        resource_types = usage.len(),
        objects = usage.item_count(),
        "collected resource usage"
    );

    Ok(usage)
}

/// Unreadable entries (dangling links, loops, permissions) fail the scan
fn walk_error(err: walkdir::Error) -> CliError {
    let message = match (err.path(), err.io_error()) {
        (Some(path), Some(io)) => format!("{}: {}", path.display(), io),
        _ => err.to_string(),
    };
    CliError::Io { message }
}

fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Record every object of a single (possibly multi-document) manifest file
pub fn scan_file(path: &Path, usage: &mut UsageIndex) -> Result<()> {
    let location = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => CliError::input(&location, e.to_string()),
        _ => CliError::Io {
            message: format!("{}: {}", location, e),
        },
    })?;

    for document in serde_yaml::Deserializer::from_str(&content) {
        let value = Value::deserialize(document)
            .map_err(|e| CliError::input(&location, e.to_string()))?;
        record_object(&value, &location, usage);
    }

    Ok(())
}

/// Record one object, expanding `List` kinds into their items
fn record_object(value: &Value, location: &str, usage: &mut UsageIndex) {
    if value.is_null() {
        return;
    }

    let api_version = value.get("apiVersion").and_then(Value::as_str);
    let kind = value.get("kind").and_then(Value::as_str);

    let (Some(api_version), Some(kind)) = (api_version, kind) else {
        tracing::debug!(location, "skipping document without apiVersion and kind");
        return;
    };

    if kind.ends_with("List")
        && let Some(items) = value.get("items").and_then(Value::as_sequence)
    {
        for item in items {
            record_object(item, location, usage);
        }
        return;
    }

    let metadata = value.get("metadata");
    let name = metadata
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let item = match metadata
        .and_then(|m| m.get("namespace"))
        .and_then(Value::as_str)
    {
        Some(namespace) => UsageItem::new(namespace, name),
        None => UsageItem::cluster_scoped(name),
    };

    tracing::debug!(location, api_version, kind, name, "found object");
    usage.record_api_version(api_version, kind, item.with_location(location));
}
