//! Rendering of analysis reports
//!
//! - `stdout`: human readable, colored when the terminal supports it
//! - `plain`: same layout without colors, for logs and files
//! - `json` / `yaml`: the serialized report

use clap::ValueEnum;
use console::Style;
use kubepug_core::{Report, UsageItem};
use std::fmt::Write;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Stdout,
    Plain,
    Json,
    Yaml,
}

const REMOVED_NOTICE: &str = "API REMOVED FROM THE CURRENT VERSION AND SHOULD BE MIGRATED IMMEDIATELY!!";

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat, show_description: bool) -> Result<String> {
    match format {
        OutputFormat::Stdout => Ok(render_text(report, show_description, &Palette::colored())),
        OutputFormat::Plain => Ok(render_text(report, show_description, &Palette::plain())),
        OutputFormat::Json => {
            let value = to_value(report, show_description)?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
        }
        OutputFormat::Yaml => {
            let value = to_value(report, show_description)?;
            Ok(serde_yaml::to_string(&value)?)
        }
    }
}

/// Serialize the report, dropping descriptions when they are not wanted
fn to_value(report: &Report, show_description: bool) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(report)?;
    if !show_description
        && let Some(apis) = value
            .get_mut("deprecatedApis")
            .and_then(serde_json::Value::as_array_mut)
    {
        for api in apis {
            if let Some(api) = api.as_object_mut() {
                api.remove("description");
            }
        }
    }
    Ok(value)
}

struct Palette {
    header: Style,
    kind: Style,
    api: Style,
    description: Style,
    removed: Style,
    item: Style,
}

impl Palette {
    fn colored() -> Self {
        Self {
            header: Style::new().bold().underlined(),
            kind: Style::new().cyan().bold(),
            api: Style::new().bold(),
            description: Style::new().dim(),
            removed: Style::new().red().bold(),
            item: Style::new().yellow(),
        }
    }

    fn plain() -> Self {
        Self {
            header: Style::new(),
            kind: Style::new(),
            api: Style::new(),
            description: Style::new(),
            removed: Style::new(),
            item: Style::new(),
        }
    }
}

fn render_text(report: &Report, show_description: bool, palette: &Palette) -> String {
    let mut out = String::new();

    if report.is_clean() {
        let _ = writeln!(out, "No deprecated or deleted APIs found");
        return out;
    }

    let _ = writeln!(out, "{}", palette.header.apply_to("RESULTS:"));

    if !report.deprecated_apis.is_empty() {
        let _ = writeln!(out, "{}", palette.header.apply_to("Deprecated APIs:"));
        let _ = writeln!(out);
        for finding in &report.deprecated_apis {
            write_heading(&mut out, palette, finding.api.kind(), &finding.api.gvk().api_version());
            if show_description {
                let _ = writeln!(
                    out,
                    "\t ├─ {}",
                    palette.description.apply_to(finding.api.description())
                );
            }
            write_items(&mut out, palette, &finding.items);
            let _ = writeln!(out);
        }
    }

    if !report.deleted_apis.is_empty() {
        let _ = writeln!(out, "{}", palette.header.apply_to("Deleted APIs:"));
        let _ = writeln!(out);
        for deleted in &report.deleted_apis {
            write_heading(&mut out, palette, &deleted.gvk.kind, &deleted.gvk.api_version());
            let _ = writeln!(out, "\t ├─ {}", palette.removed.apply_to(REMOVED_NOTICE));
            write_items(&mut out, palette, &deleted.items);
            let _ = writeln!(out);
        }
    }

    out
}

fn write_heading(out: &mut String, palette: &Palette, kind: &str, api_version: &str) {
    let _ = writeln!(
        out,
        "{} found in {}",
        palette.kind.apply_to(kind),
        palette.api.apply_to(api_version)
    );
}

fn write_items(out: &mut String, palette: &Palette, items: &[UsageItem]) {
    for item in items {
        let location = item
            .location
            .as_deref()
            .map(|l| format!(" location: {}", l))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "\t\t-> {}: {} {}{}",
            palette.item.apply_to("Object"),
            item.name,
            format_scope(&item.scope),
            location
        );
    }
}

fn format_scope(scope: &str) -> String {
    if scope == kubepug_core::CLUSTER_SCOPE {
        "(cluster-scoped)".to_string()
    } else {
        format!("namespace: {}", scope)
    }
}
