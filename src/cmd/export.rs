//! `eventcheck export`: public or review rows as JSON or CSV.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use eventcheck::export::{public_rows, review_rows, to_csv, to_json};
use eventcheck::ui;

use super::Workspace;
use crate::cli::{Audience, ExportFormat};

pub struct ExportOptions<'a> {
    pub input: &'a Path,
    pub config: Option<&'a Path>,
    pub audience: Audience,
    pub format: ExportFormat,
    pub reconcile: bool,
    pub probe: bool,
    pub token: Option<&'a str>,
    pub output: Option<&'a Path>,
}

pub fn cmd_export(options: ExportOptions<'_>) -> Result<()> {
    let mut workspace = Workspace::load(options.input, options.config)?;

    // An aborted identity pass exports nothing, not even probe results
    if workspace.probe_enabled(options.probe) {
        workspace.probe();
    }
    if options.reconcile {
        workspace.reconcile(options.token)?;
    }

    let content = render(&workspace, options.audience, options.format)?;

    match options.output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            if !ui::is_quiet() {
                eprintln!(
                    "{} Exported {} record(s) to {}",
                    "✓".green(),
                    workspace.records.len(),
                    path.display()
                );
            }
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn render(workspace: &Workspace, audience: Audience, format: ExportFormat) -> Result<String> {
    let records = &workspace.records;
    let content = match (audience, format) {
        (Audience::Public, ExportFormat::Json) => to_json(&public_rows(records))? + "\n",
        (Audience::Public, ExportFormat::Csv) => to_csv(&public_rows(records)),
        (Audience::Review, format) => {
            let rows = review_rows(records, &workspace.config.export.preview_base_url);
            match format {
                ExportFormat::Json => to_json(&rows)? + "\n",
                ExportFormat::Csv => to_csv(&rows),
            }
        }
    };
    Ok(content)
}
