//! Website URL normalization.
//!
//! Only the URL shape is checked here. Whether the site answers is decided
//! later by the reachability pass in [`crate::reconcile::probe`].

use std::sync::OnceLock;

use regex::Regex;

use super::{cached, first_capture, Outcome};
use crate::field::Quality;

static WEBSITE: OnceLock<Regex> = OnceLock::new();

fn website_pattern() -> &'static Regex {
    cached(&WEBSITE, r"^(https?://[/.a-z0-9_-]+)$")
}

pub fn normalize_url(raw: &str) -> Outcome {
    if raw.is_empty() {
        return Outcome::empty();
    }
    match first_capture(&[website_pattern()], raw) {
        Some(url) => Outcome::new(url, Quality::Ok),
        None => Outcome::invalid(raw),
    }
}
