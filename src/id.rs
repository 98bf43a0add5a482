//! Content-derived event identifiers.
//!
//! An event's ID is a hash of the organizer's origin name, so the same
//! organizer always maps to the same event page across imports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Display, Formatter};

/// Length of the hex identifier (128 bits).
pub const EVENT_ID_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Derive the identifier from the origin organization name.
    pub fn derive(origin_org: &str) -> Self {
        let digest = Sha256::digest(origin_org.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(EVENT_ID_LEN);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Preview page URL for reviewers: `base` followed by the identifier.
    pub fn preview_url(&self, base: &str) -> String {
        format!("{}{}", base, self.0)
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
