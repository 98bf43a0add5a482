//! Social-media handle normalization.

use std::sync::OnceLock;

use regex::Regex;

use super::{cached, first_capture, Outcome};
use crate::field::Quality;

/// Handle syntax for one platform: a strict handle pattern and an ordered
/// list of profile-URL patterns whose first capture group is a handle.
#[derive(Debug)]
pub struct HandleRule {
    strict_pattern: &'static str,
    url_patterns: &'static [&'static str],
    strict: OnceLock<Regex>,
    urls: OnceLock<Vec<Regex>>,
}

impl HandleRule {
    const fn new(
        strict_pattern: &'static str,
        url_patterns: &'static [&'static str],
    ) -> Self {
        Self {
            strict_pattern,
            url_patterns,
            strict: OnceLock::new(),
            urls: OnceLock::new(),
        }
    }

    fn strict(&'static self) -> &'static Regex {
        cached(&self.strict, self.strict_pattern)
    }

    fn urls(&'static self) -> &'static [Regex] {
        self.urls.get_or_init(|| {
            self.url_patterns
                .iter()
                .map(|p| Regex::new(p).expect("static handle URL pattern must compile"))
                .collect()
        })
    }

    /// The handle if `input` is a bare handle (optional `@`), else None.
    pub fn strict_handle<'a>(&'static self, input: &'a str) -> Option<&'a str> {
        first_capture(&[self.strict()], input)
    }

    /// Normalize a raw handle submission.
    ///
    /// - empty → `("", Ok)`
    /// - bare handle → `(handle, Ok)`
    /// - profile URL whose segment is a valid handle → `(handle, Reformatted)`
    /// - anything else → `(raw, Invalid)`
    pub fn normalize(&'static self, raw: &str) -> Outcome {
        if raw.is_empty() {
            return Outcome::empty();
        }

        if let Some(handle) = self.strict_handle(raw) {
            return Outcome::new(handle, Quality::Ok);
        }

        let urls: Vec<&Regex> = self.urls().iter().collect();
        if let Some(segment) = first_capture(&urls, raw) {
            if let Some(handle) = self.strict_handle(segment) {
                return Outcome::new(handle, Quality::Reformatted);
            }
        }

        Outcome::invalid(raw)
    }
}

/// Twitter: 1-15 word characters, trailing spaces tolerated.
pub static TWITTER_HANDLE: HandleRule = HandleRule::new(
    r"^@?([A-Za-z0-9_]{1,15}) *$",
    &[r"^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/@?([A-Za-z0-9_]+)"],
);

/// Facebook: five or more alphanumerics or dots. No URL form is accepted.
pub static ALTERNATE_HANDLE: HandleRule = HandleRule::new(r"^@?([A-Za-z0-9.]{5,})$", &[]);

pub static INSTAGRAM_HANDLE: HandleRule = HandleRule::new(
    r"^@?([A-Za-z0-9._]+)$",
    &[r"^https?://(?:www\.)?instagram\.com/([A-Za-z0-9._]+)"],
);
