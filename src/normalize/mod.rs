//! Field normalizers.
//!
//! Each normalizer maps a raw submission string to a normalized value and a
//! [`Quality`]. Normalizers are pure: they never perform I/O and never fail.
//! Every input has a defined outcome, defaulting to [`Quality::Invalid`] with
//! the raw input retained.
//!
//! Candidate patterns are tried in order and the first match wins.

pub mod handle;
pub mod text;
pub mod url;

use std::sync::OnceLock;

use regex::Regex;

use crate::field::{Quality, VerificationField};

pub use handle::{HandleRule, ALTERNATE_HANDLE, INSTAGRAM_HANDLE, TWITTER_HANDLE};
pub use text::{check_width, display_width, fits_display_width, DESCRIPTION_SHORT_WIDTH};

/// Result of running a normalizer over one raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub value: String,
    pub quality: Quality,
}

impl Outcome {
    pub fn new(value: impl Into<String>, quality: Quality) -> Self {
        Self {
            value: value.into(),
            quality,
        }
    }

    pub fn empty() -> Self {
        Self::new("", Quality::Ok)
    }

    /// Rejected input, raw value retained for reviewers.
    pub fn invalid(raw: &str) -> Self {
        Self::new(raw, Quality::Invalid)
    }

    /// Write this outcome into a field. Confirmation is left alone.
    pub fn apply_to(self, field: &mut VerificationField) {
        field.set_normalized(self.value, self.quality);
    }
}

/// The normalization rule attached to a field kind.
#[derive(Debug, Clone, Copy)]
pub enum Normalizer {
    /// Social handle with platform URL fallbacks
    Handle(&'static HandleRule),
    /// Website URL shape check
    Url,
    /// Free text, whitespace trimmed
    Text,
    /// Display-width limit on the raw input
    WidthGate { budget: usize },
}

impl Normalizer {
    pub fn normalize(&self, raw: &str) -> Outcome {
        match self {
            Normalizer::Handle(rule) => rule.normalize(raw),
            Normalizer::Url => url::normalize_url(raw),
            Normalizer::Text => text::normalize_text(raw),
            Normalizer::WidthGate { budget } => text::check_width(raw, *budget),
        }
    }

    /// Re-normalize a field from its raw input.
    pub fn apply(&self, field: &mut VerificationField) {
        let outcome = self.normalize(field.raw_input());
        tracing::debug!(
            raw = field.raw_input(),
            value = %outcome.value,
            quality = %outcome.quality,
            "normalized field"
        );
        outcome.apply_to(field);
    }
}

/// Compile a static pattern once.
pub(crate) fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static normalizer pattern must compile"))
}

/// First capture group of the first pattern that matches, if any.
pub(crate) fn first_capture<'a>(patterns: &[&Regex], input: &'a str) -> Option<&'a str> {
    patterns
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
