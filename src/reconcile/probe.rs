//! Website reachability pass.

use std::time::Duration;

use serde::Serialize;
use ureq::{Agent, AgentBuilder};

use crate::field::Confirmation;
use crate::record::{EventRecord, FieldKey};

/// Whether a URL answers.
pub trait Reachability {
    fn is_reachable(&self, url: &str) -> bool;
}

impl<R: Reachability + ?Sized> Reachability for &R {
    fn is_reachable(&self, url: &str) -> bool {
        (**self).is_reachable(url)
    }
}

/// GET probe; reachable iff the final response status is below 300.
pub struct HttpReachability {
    agent: Agent,
}

impl HttpReachability {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            agent: AgentBuilder::new()
                .timeout(Duration::from_millis(timeout_ms))
                .build(),
        }
    }
}

impl Reachability for HttpReachability {
    fn is_reachable(&self, url: &str) -> bool {
        match self.agent.get(url).call() {
            Ok(response) => response.status() < 300,
            Err(e) => {
                tracing::debug!(url, error = %e, "probe failed");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeSummary {
    pub reachable: usize,
    pub unreachable: usize,
    pub skipped: usize,
}

impl ProbeSummary {
    pub fn probed(&self) -> usize {
        self.reachable + self.unreachable
    }
}

/// Number of website fields [`probe_websites`] would check.
pub fn probe_candidates(records: &[EventRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.website().is_candidate())
        .count()
}

/// Confirm or reject every candidate website field. `on_probe` is called
/// after each check, for progress reporting.
pub fn probe_websites(
    records: &mut [EventRecord],
    reachability: &dyn Reachability,
    mut on_probe: impl FnMut(&str),
) -> ProbeSummary {
    let mut summary = ProbeSummary::default();

    for record in records.iter_mut() {
        let Some(website) = record.field_mut(FieldKey::Website) else {
            continue;
        };
        if !website.is_candidate() {
            summary.skipped += 1;
            continue;
        }

        let confirmation = if reachability.is_reachable(website.normalized_value()) {
            summary.reachable += 1;
            Confirmation::Confirmed
        } else {
            summary.unreachable += 1;
            Confirmation::ConfirmationError
        };
        website.set_confirmation(confirmation);
        on_probe(website.normalized_value());
    }

    tracing::info!(
        reachable = summary.reachable,
        unreachable = summary.unreachable,
        skipped = summary.skipped,
        "website probe finished"
    );
    summary
}
