//! Centralized UI formatting and color utilities
//!
//! Status icons and colors for field quality and confirmation, shared by the
//! `check`, `reconcile` and `export` commands.

use colored::{ColoredString, Colorize};

use crate::field::{Confirmation, Quality, ReviewState, VerificationField};

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var("EVENTCHECK_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored icon for a normalizer verdict.
///
/// Icons:
/// - Ok: ● (green)
/// - Reformatted: ◐ (cyan)
/// - NeedsReview: ⚠ (yellow)
/// - Invalid: ✗ (red)
pub fn quality_icon(quality: Quality) -> ColoredString {
    match quality {
        Quality::Ok => "●".green(),
        Quality::Reformatted => "◐".cyan(),
        Quality::NeedsReview => "⚠".yellow(),
        Quality::Invalid => "✗".red(),
    }
}

/// Confirmation icon:
/// - Unconfirmed: ○
/// - Confirmed: ✓ (green)
/// - ConfirmationError: ✗ (red)
pub fn confirmation_icon(confirmation: Confirmation) -> ColoredString {
    match confirmation {
        Confirmation::Unconfirmed => "○".white(),
        Confirmation::Confirmed => "✓".green(),
        Confirmation::ConfirmationError => "✗".red(),
    }
}

/// Review label colored by state.
pub fn review_label(field: &VerificationField) -> ColoredString {
    let label = field.review_label();
    match field.review_state() {
        ReviewState::NotSet => label.dimmed(),
        ReviewState::Confirmed(_) => label.green(),
        ReviewState::Unconfirmed(_) => label.yellow(),
        ReviewState::Error { .. } => label.red(),
    }
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors/failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (event IDs, handles)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Common text formatting patterns
pub mod format {
    use crate::normalize::display_width;

    /// Truncate text to a display width, counting wide characters as two columns
    pub fn truncate(text: &str, max_width: usize) -> String {
        if display_width(text) <= max_width {
            return text.to_string();
        }
        let budget = max_width.saturating_sub(3);
        let mut out = String::new();
        let mut width = 0;
        for c in text.chars() {
            let w = display_width(c.encode_utf8(&mut [0; 4]));
            if width + w > budget {
                break;
            }
            width += w;
            out.push(c);
        }
        out.push_str("...");
        out
    }

    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "─".repeat(width)
    }
}
