//! Catalog command - list the resource types a swagger document declares

use console::style;
use kubepug_core::ApiCatalog;
use std::path::Path;

use crate::error::{CliError, Result};

pub fn run(swagger_file: &Path, deprecated_only: bool, json: bool) -> Result<()> {
    let catalog = ApiCatalog::from_swagger_file(swagger_file)
        .map_err(|e| CliError::catalog(&swagger_file.display().to_string(), e))?;

    let entries: Vec<_> = catalog
        .iter()
        .map(|(_, info)| info)
        .filter(|info| !deprecated_only || info.is_deprecated())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for info in &entries {
        let marker = if info.is_deprecated() {
            style("⚠").yellow()
        } else {
            style("✓").green()
        };
        println!("  {} {}", marker, info.key());
    }

    println!();
    println!(
        "{} {} resource type(s), {} deprecated",
        style("→").blue(),
        catalog.len(),
        catalog.deprecated().count()
    );

    Ok(())
}
