//! Verification field value object.
//!
//! A [`VerificationField`] tracks one submitted value through three stages:
//! the raw input as typed by the submitter, the locally normalized value, and
//! whether an external authority has confirmed that value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an external authority has corroborated the field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    #[default]
    Unconfirmed,
    Confirmed,
    ConfirmationError,
}

/// Local judgment of a field's syntax, set by a normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Input accepted as typed
    #[default]
    Ok,
    /// Input rewritten into canonical form (e.g. URL reduced to a handle)
    Reformatted,
    /// Input accepted but a reviewer should look at it
    NeedsReview,
    /// Input rejected
    Invalid,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confirmation::Unconfirmed => write!(f, "unconfirmed"),
            Confirmation::Confirmed => write!(f, "confirmed"),
            Confirmation::ConfirmationError => write!(f, "confirmation error"),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Ok => write!(f, "ok"),
            Quality::Reformatted => write!(f, "reformatted"),
            Quality::NeedsReview => write!(f, "needs review"),
            Quality::Invalid => write!(f, "invalid"),
        }
    }
}

/// The four reviewer-facing states of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState<'a> {
    NotSet,
    Confirmed(&'a str),
    Unconfirmed(&'a str),
    Error { raw: &'a str },
}

impl fmt::Display for ReviewState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewState::NotSet => write!(f, "not set"),
            ReviewState::Confirmed(value) => write!(f, "{} (confirmed)", value),
            ReviewState::Unconfirmed(value) => write!(f, "{} (unconfirmed)", value),
            ReviewState::Error { raw } => write!(f, "{} (error/invalid input)", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationField {
    raw_input: String,
    normalized_value: String,
    confirmation: Confirmation,
    quality: Quality,
}

impl VerificationField {
    /// Create an unconfirmed field whose normalized value starts as the raw input.
    pub fn new(raw_input: impl Into<String>) -> Self {
        let raw_input = raw_input.into();
        Self {
            normalized_value: raw_input.clone(),
            raw_input,
            confirmation: Confirmation::Unconfirmed,
            quality: Quality::Ok,
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn normalized_value(&self) -> &str {
        &self.normalized_value
    }

    pub fn confirmation(&self) -> Confirmation {
        self.confirmation
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Replace the normalized value and quality together. Confirmation is untouched.
    pub fn set_normalized(&mut self, value: impl Into<String>, quality: Quality) {
        self.normalized_value = value.into();
        self.quality = quality;
    }

    /// Replace the confirmation status only.
    pub fn set_confirmation(&mut self, confirmation: Confirmation) {
        self.confirmation = confirmation;
    }

    /// Overwrite the normalized value with an externally confirmed canonical form.
    pub(crate) fn confirm_as(&mut self, canonical: impl Into<String>) {
        self.normalized_value = canonical.into();
        self.confirmation = Confirmation::Confirmed;
    }

    /// True when the value may leave the system on a public export.
    pub fn is_safe(&self) -> bool {
        self.quality != Quality::Invalid && self.confirmation == Confirmation::Confirmed
    }

    /// Normalized value if [`is_safe`](Self::is_safe), else the empty string.
    pub fn safe_value(&self) -> &str {
        if self.is_safe() {
            &self.normalized_value
        } else {
            ""
        }
    }

    /// True when the field is worth sending to an external authority.
    pub fn is_candidate(&self) -> bool {
        self.quality != Quality::Invalid && !self.normalized_value.is_empty()
    }

    pub fn review_state(&self) -> ReviewState<'_> {
        if self.raw_input.is_empty() {
            return ReviewState::NotSet;
        }
        match (self.quality, self.confirmation) {
            (q, Confirmation::Confirmed) if q != Quality::Invalid => {
                ReviewState::Confirmed(&self.normalized_value)
            }
            (q, Confirmation::Unconfirmed) if q != Quality::Invalid => {
                ReviewState::Unconfirmed(&self.normalized_value)
            }
            _ => ReviewState::Error {
                raw: &self.raw_input,
            },
        }
    }

    /// Human-readable status summary for reviewers.
    pub fn review_label(&self) -> String {
        self.review_state().to_string()
    }
}
