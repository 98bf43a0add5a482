//! Free-text normalization and the display-width gate.
//!
//! Trimming and the width gate are separate rules: a width-limited field is
//! only measured, never rewritten.
//!
//! Width is measured in terminal/print columns: East Asian wide and
//! fullwidth characters occupy two columns, everything else one.

use unicode_width::UnicodeWidthStr;

use super::Outcome;
use crate::field::Quality;

/// Column budget for the short description shown on event cards.
pub const DESCRIPTION_SHORT_WIDTH: usize = 60;

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// True when `text` fits in `budget` display columns.
pub fn fits_display_width(text: &str, budget: usize) -> bool {
    display_width(text) <= budget
}

/// Trim surrounding whitespace.
///
/// Free text is never rejected: the submitter's prose is kept.
pub fn normalize_text(raw: &str) -> Outcome {
    if raw.is_empty() {
        return Outcome::empty();
    }

    let trimmed = raw.trim();
    if trimmed.len() != raw.len() {
        Outcome::new(trimmed, Quality::Reformatted)
    } else {
        Outcome::new(raw, Quality::Ok)
    }
}

/// Width gate for length-limited text. The value is the raw input, never
/// rewritten; text over `budget` columns is flagged for review.
///
/// Measures exactly what [`fits_display_width`] measures, so the verdict and
/// a direct fit check on the same raw input always agree.
pub fn check_width(raw: &str, budget: usize) -> Outcome {
    if fits_display_width(raw, budget) {
        Outcome::new(raw, Quality::Ok)
    } else {
        Outcome::new(raw, Quality::NeedsReview)
    }
}
