//! Export rows for the public site and for human review.
//!
//! The public row only ever carries `safe_value()` of the social fields, so
//! unconfirmed or rejected handles never leave the system. The review row is
//! the reverse: raw input and the four-state review labels, for reviewers.

use anyhow::Result;
use serde::Serialize;

use crate::record::{EventRecord, FieldKey};

/// One event on the public listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicEventRow {
    pub event_id: String,
    pub icon_ref: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub description_short: String,
    pub category_code: u8,
    pub org_name: String,
    pub org_description: String,
    pub sns_twitter: String,
    pub sns_facebook: String,
    pub sns_instagram: String,
    pub sns_website: String,
}

impl PublicEventRow {
    pub fn from_record(record: &EventRecord) -> Self {
        let safe = |key: FieldKey| {
            record
                .field(key)
                .map(|f| f.safe_value().to_string())
                .unwrap_or_default()
        };
        let text = |key: FieldKey| record.value(key).to_string();

        Self {
            event_id: record.id().to_string(),
            icon_ref: record.icon_ref().to_string(),
            title: text(FieldKey::Title),
            summary: text(FieldKey::Summary),
            description: text(FieldKey::Description),
            description_short: text(FieldKey::DescriptionShort),
            category_code: record.category_code(),
            org_name: text(FieldKey::OrgName),
            org_description: text(FieldKey::OrgDescription),
            sns_twitter: safe(FieldKey::Twitter),
            sns_facebook: safe(FieldKey::Facebook),
            sns_instagram: safe(FieldKey::Instagram),
            sns_website: safe(FieldKey::Website),
        }
    }
}

/// One event as a reviewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEventRow {
    pub origin_org: String,
    pub contact_address: String,
    pub preview_url: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub description_short: String,
    pub description_short_status: String,
    pub category: String,
    pub org_name: String,
    pub org_description: String,
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub website: String,
}

impl ReviewEventRow {
    pub fn from_record(record: &EventRecord, preview_base_url: &str) -> Self {
        let raw = |key: FieldKey| {
            record
                .field(key)
                .map(|f| f.raw_input().to_string())
                .unwrap_or_default()
        };
        let label = |key: FieldKey| {
            record
                .field(key)
                .map(|f| f.review_label())
                .unwrap_or_default()
        };

        Self {
            origin_org: record.origin_org().to_string(),
            contact_address: record.contact_address().to_string(),
            preview_url: record.id().preview_url(preview_base_url),
            title: raw(FieldKey::Title),
            summary: raw(FieldKey::Summary),
            description: raw(FieldKey::Description),
            description_short: raw(FieldKey::DescriptionShort),
            description_short_status: field_status(record, FieldKey::DescriptionShort),
            category: record.category_label().to_string(),
            org_name: raw(FieldKey::OrgName),
            org_description: raw(FieldKey::OrgDescription),
            twitter: label(FieldKey::Twitter),
            facebook: label(FieldKey::Facebook),
            instagram: label(FieldKey::Instagram),
            website: label(FieldKey::Website),
        }
    }
}

fn field_status(record: &EventRecord, key: FieldKey) -> String {
    record
        .field(key)
        .map(|f| f.quality().to_string())
        .unwrap_or_default()
}

/// A row that can be written as CSV.
pub trait CsvRow {
    fn headers() -> &'static [&'static str];
    fn values(&self) -> Vec<&str>;
}

impl CsvRow for PublicEventRow {
    fn headers() -> &'static [&'static str] {
        &[
            "event_id",
            "icon_ref",
            "title",
            "summary",
            "description",
            "description_short",
            "category_code",
            "org_name",
            "org_description",
            "sns_twitter",
            "sns_facebook",
            "sns_instagram",
            "sns_website",
        ]
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.event_id.as_str(),
            self.icon_ref.as_str(),
            self.title.as_str(),
            self.summary.as_str(),
            self.description.as_str(),
            self.description_short.as_str(),
            category_code_str(self.category_code),
            self.org_name.as_str(),
            self.org_description.as_str(),
            self.sns_twitter.as_str(),
            self.sns_facebook.as_str(),
            self.sns_instagram.as_str(),
            self.sns_website.as_str(),
        ]
    }
}

impl CsvRow for ReviewEventRow {
    fn headers() -> &'static [&'static str] {
        &[
            "origin_org",
            "contact_address",
            "preview_url",
            "title",
            "summary",
            "description",
            "description_short",
            "description_short_status",
            "category",
            "org_name",
            "org_description",
            "twitter",
            "facebook",
            "instagram",
            "website",
        ]
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.origin_org.as_str(),
            self.contact_address.as_str(),
            self.preview_url.as_str(),
            self.title.as_str(),
            self.summary.as_str(),
            self.description.as_str(),
            self.description_short.as_str(),
            self.description_short_status.as_str(),
            self.category.as_str(),
            self.org_name.as_str(),
            self.org_description.as_str(),
            self.twitter.as_str(),
            self.facebook.as_str(),
            self.instagram.as_str(),
            self.website.as_str(),
        ]
    }
}

fn category_code_str(code: u8) -> &'static str {
    const CODES: [&str; 9] = ["0", "1", "2", "3", "4", "5", "6", "7", "8"];
    CODES.get(code as usize).copied().unwrap_or("0")
}

pub fn public_rows(records: &[EventRecord]) -> Vec<PublicEventRow> {
    records.iter().map(PublicEventRow::from_record).collect()
}

pub fn review_rows(records: &[EventRecord], preview_base_url: &str) -> Vec<ReviewEventRow> {
    records
        .iter()
        .map(|r| ReviewEventRow::from_record(r, preview_base_url))
        .collect()
}

/// Export rows as pretty JSON
pub fn to_json<R: Serialize>(rows: &[R]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Export rows as CSV with a header line
pub fn to_csv<R: CsvRow>(rows: &[R]) -> String {
    let mut output = String::new();

    output.push_str(&R::headers().join(","));
    output.push('\n');

    for row in rows {
        let values: Vec<String> = row.values().into_iter().map(csv_escape).collect();
        output.push_str(&values.join(","));
        output.push('\n');
    }

    output
}

/// Escape a value for CSV output
fn csv_escape(value: &str) -> String {
    // If value contains comma, quote, or newline, wrap in quotes and escape quotes
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
