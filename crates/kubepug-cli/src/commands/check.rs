//! Check command - find deprecated and deleted APIs used by manifests

use console::style;
use kubepug_core::{CatalogBuilder, ConflictPolicy, Report};
use std::path::{Path, PathBuf};

use crate::display::{self, OutputFormat};
use crate::error::{CliError, Result};
use crate::input;

/// Options for a single check run
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub swagger_file: PathBuf,
    pub input: PathBuf,
    pub format: OutputFormat,
    pub filename: Option<PathBuf>,
    pub show_description: bool,
    pub error_on_deprecated: bool,
    pub error_on_deleted: bool,
    pub reject_duplicates: bool,
}

pub fn run(options: &CheckOptions) -> Result<()> {
    tracing::debug!(?options, "starting check");

    let report = analyze(
        &options.swagger_file,
        &options.input,
        options.reject_duplicates,
    )?;

    // Colors only make sense on a terminal
    let format = match (&options.filename, options.format) {
        (Some(_), OutputFormat::Stdout) => OutputFormat::Plain,
        (_, format) => format,
    };
    let output = display::render(&report, format, options.show_description)?;

    match &options.filename {
        Some(path) => {
            std::fs::write(path, output).map_err(|e| CliError::Io {
                message: format!("{}: {}", path.display(), e),
            })?;
            eprintln!(
                "{} Results written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => print!("{}", output),
    }

    let deleted = report.deleted_apis.len();
    let deprecated = report.deprecated_apis.len();
    if (options.error_on_deleted && deleted > 0)
        || (options.error_on_deprecated && deprecated > 0)
    {
        return Err(CliError::Findings {
            deleted,
            deprecated,
        });
    }

    Ok(())
}

/// Build the catalog and usage index, then match them
pub fn analyze(swagger_file: &Path, input: &Path, reject_duplicates: bool) -> Result<Report> {
    let policy = if reject_duplicates {
        ConflictPolicy::Reject
    } else {
        ConflictPolicy::KeepLast
    };

    let catalog = CatalogBuilder::new()
        .conflict_policy(policy)
        .build_from_file(swagger_file)
        .map_err(|e| CliError::catalog(&swagger_file.display().to_string(), e))?;
    tracing::info!(resource_types = catalog.len(), "loaded API catalog");

    let usage = input::scan(input)?;

    Ok(Report::analyze(&catalog, &usage))
}
