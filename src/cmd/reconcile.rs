//! `eventcheck reconcile`: confirm handles and print the confirmed identities.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use eventcheck::reconcile::{ProbeSummary, ReconciliationReport};
use eventcheck::record::EventRecord;
use eventcheck::ui::{self, colors, format};

use super::Workspace;

#[derive(Serialize)]
struct ReconcileOutput<'a> {
    generated_at: String,
    records: usize,
    identity: &'a ReconciliationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    probe: Option<&'a ProbeSummary>,
}

pub fn cmd_reconcile(
    input: &Path,
    config: Option<&Path>,
    probe: bool,
    token: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut workspace = Workspace::load(input, config)?;

    let probe_summary = if workspace.probe_enabled(probe) {
        Some(workspace.probe())
    } else {
        None
    };

    let report = workspace.reconcile(token)?;

    if json {
        let output = ReconcileOutput {
            generated_at: eventcheck::utc_now_iso(),
            records: workspace.records.len(),
            identity: &report,
            probe: probe_summary.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !ui::is_quiet() {
        if probe_summary.is_some() {
            print_websites(&workspace.records);
        }
        print_confirmed(&report);
    }

    println!(
        "{} {} confirmed, {} not found, {} skipped",
        "✓".green(),
        colors::success(&report.confirmed.len().to_string()),
        if report.errors == 0 {
            colors::secondary("0")
        } else {
            colors::error(&report.errors.to_string())
        },
        report.skipped
    );
    Ok(())
}

fn print_websites(records: &[EventRecord]) {
    for record in records.iter().filter(|r| r.website().is_candidate()) {
        let website = record.website();
        println!(
            "{} {:<30} {}",
            ui::confirmation_icon(website.confirmation()),
            format::truncate(record.origin_org(), 30),
            website.normalized_value()
        );
    }
    println!();
}

fn print_confirmed(report: &ReconciliationReport) {
    if report.confirmed.is_empty() {
        println!("{}", colors::secondary("No identities confirmed."));
        return;
    }

    println!(
        "{}",
        colors::heading(&format!("{:<20} {:<30} {}", "HANDLE", "NAME", "ORG"))
    );
    println!("{}", format::separator(72));
    for identity in &report.confirmed {
        println!(
            "{:<20} {:<30} {}",
            colors::identifier(&format!("@{}", identity.handle)),
            format::truncate(&identity.display_name, 30),
            identity.org_name
        );
    }
    println!();
}
