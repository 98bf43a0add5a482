//! `eventcheck check`: local normalization report.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use eventcheck::field::Quality;
use eventcheck::record::{EventRecord, FieldKey};
use eventcheck::ui::{self, colors, format};

use super::Workspace;

const TITLE_WIDTH: usize = 40;

pub fn cmd_check(input: &Path, config: Option<&Path>) -> Result<()> {
    let workspace = Workspace::load(input, config)?;
    let records = &workspace.records;

    let mut needs_attention = 0;
    for record in records {
        if record_needs_attention(record) {
            needs_attention += 1;
        }
        if !ui::is_quiet() {
            print_record(record);
        }
    }

    println!(
        "{} {} record(s), {} need attention",
        "→".cyan(),
        records.len(),
        if needs_attention == 0 {
            colors::success("0")
        } else {
            colors::warning(&needs_attention.to_string())
        }
    );
    Ok(())
}

fn print_record(record: &EventRecord) {
    println!(
        "{} {}",
        colors::identifier(record.id().as_str()),
        colors::heading(&format::truncate(record.title().raw_input(), TITLE_WIDTH))
    );
    println!("  {:<12} {}", "org", record.origin_org());
    println!(
        "  {:<12} {} ({})",
        "category",
        record.category_label(),
        record.category_code()
    );

    for key in FieldKey::SOCIAL {
        if let Some(field) = record.field(key) {
            println!(
                "  {:<12} {} {}",
                key.as_str(),
                ui::quality_icon(field.quality()),
                ui::review_label(field)
            );
        }
    }

    if let Some(short) = record.field(FieldKey::DescriptionShort) {
        if short.quality() == Quality::NeedsReview {
            println!(
                "  {:<12} {} {}",
                key_label(FieldKey::DescriptionShort),
                ui::quality_icon(short.quality()),
                colors::warning("too wide for the listing card")
            );
        }
    }
    println!();
}

fn key_label(key: FieldKey) -> &'static str {
    match key {
        FieldKey::DescriptionShort => "short desc",
        other => other.as_str(),
    }
}

/// Whether a reviewer has to look at this record before publishing.
fn record_needs_attention(record: &EventRecord) -> bool {
    FieldKey::ALL.into_iter().any(|key| {
        record
            .field(key)
            .is_some_and(|f| matches!(f.quality(), Quality::Invalid | Quality::NeedsReview))
    })
}
