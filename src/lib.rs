//! # eventcheck - submission normalization and verification
//!
//! Event organizers submit titles, descriptions and social-media contacts
//! through a form. eventcheck turns each submission into an [`EventRecord`]
//! whose fields carry both a local syntax verdict ([`Quality`]) and an
//! external confirmation ([`Confirmation`]), and only lets a value reach the
//! public listing once both agree.
//!
//! ## Modules
//!
//! - [`field`] - the [`VerificationField`] value object and its review labels
//! - [`normalize`] - per-field-kind normalization rules
//! - [`record`] - records, snapshots, field keys and categories
//! - [`validator`] - runs the enabled normalizers; single-field updates
//! - [`reconcile`] - batch identity lookup and website reachability passes
//! - [`export`] - public and review rows
//! - [`config`] - YAML configuration
//!
//! ## Example
//!
//! ```
//! use eventcheck::record::{EventRecord, RecordSnapshot};
//! use eventcheck::validator::RecordValidator;
//!
//! let snapshot = RecordSnapshot {
//!     origin_org: "Chess Club".to_string(),
//!     twitter: "https://twitter.com/chess_club".to_string(),
//!     ..Default::default()
//! };
//! let record = EventRecord::new(snapshot, &RecordValidator::default());
//!
//! assert_eq!(record.twitter().normalized_value(), "chess_club");
//! // not confirmed yet, so nothing is published
//! assert_eq!(record.twitter().safe_value(), "");
//! ```
//!
//! [`EventRecord`]: record::EventRecord
//! [`Quality`]: field::Quality
//! [`Confirmation`]: field::Confirmation
//! [`VerificationField`]: field::VerificationField

pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod id;
pub mod normalize;
pub mod reconcile;
pub mod record;
pub mod retry;
pub mod ui;
pub mod validator;

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
