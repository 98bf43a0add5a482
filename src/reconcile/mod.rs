//! Batch reconciliation against external authorities.
//!
//! The identity pass ([`BatchReconciler`]) upgrades one handle field across
//! many records from locally normalized to externally confirmed:
//!
//! 1. select candidate fields (not invalid, non-empty value)
//! 2. send every distinct candidate value in one [`IdentityLookup`] call
//! 3. merge: hit → canonical value + `Confirmed`; miss → `ConfirmationError`
//! 4. report the confirmed identities
//!
//! A failed lookup aborts the pass before any record is modified.
//!
//! The reachability pass ([`probe::probe_websites`]) confirms website fields
//! one by one through a [`probe::Reachability`] check.

pub mod http;
pub mod probe;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::RetryConfig;
use crate::error::{LookupError, ReconcileError};
use crate::field::Confirmation;
use crate::record::{EventRecord, FieldKey};
use crate::retry::run_with_retry;

pub use http::HttpIdentityLookup;
pub use probe::{probe_candidates, probe_websites, HttpReachability, ProbeSummary, Reachability};

/// Canonical identity returned by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityInfo {
    /// Handle with the authority's casing
    pub handle: String,
    pub display_name: String,
}

/// Lookup results keyed case-insensitively by handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMatches {
    by_key: HashMap<String, IdentityInfo>,
}

impl IdentityMatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: IdentityInfo) {
        self.by_key.insert(match_key(&info.handle), info);
    }

    pub fn get(&self, handle: &str) -> Option<&IdentityInfo> {
        self.by_key.get(&match_key(handle))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl FromIterator<IdentityInfo> for IdentityMatches {
    fn from_iter<I: IntoIterator<Item = IdentityInfo>>(iter: I) -> Self {
        let mut matches = Self::new();
        for info in iter {
            matches.insert(info);
        }
        matches
    }
}

fn match_key(handle: &str) -> String {
    handle.to_lowercase()
}

/// External identity source.
pub trait IdentityLookup {
    /// Resolve a batch of handles. Handles the source does not know are
    /// simply absent from the result.
    fn lookup(&self, handles: &[String]) -> Result<IdentityMatches, LookupError>;
}

impl<L: IdentityLookup + ?Sized> IdentityLookup for &L {
    fn lookup(&self, handles: &[String]) -> Result<IdentityMatches, LookupError> {
        (**self).lookup(handles)
    }
}

impl<L: IdentityLookup + ?Sized> IdentityLookup for Box<L> {
    fn lookup(&self, handles: &[String]) -> Result<IdentityMatches, LookupError> {
        (**self).lookup(handles)
    }
}

/// Wraps a lookup with bounded exponential-backoff retry on transient errors.
pub struct RetryingLookup<L> {
    inner: L,
    config: RetryConfig,
}

impl<L: IdentityLookup> RetryingLookup<L> {
    pub fn new(inner: L, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    fn lookup_with_attempts(&self, handles: &[String]) -> Result<IdentityMatches, ReconcileError> {
        run_with_retry(&self.config, LookupError::is_transient, || {
            self.inner.lookup(handles)
        })
        .map_err(|exhausted| ReconcileError::LookupFailed {
            attempts: exhausted.attempts,
            source: exhausted.error,
        })
    }
}

/// One confirmed identity, for the reconciliation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedIdentity {
    pub handle: String,
    pub display_name: String,
    pub org_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub confirmed: Vec<ConfirmedIdentity>,
    /// Records whose value the authority did not know
    pub errors: usize,
    /// Records not sent (empty or invalid value)
    pub skipped: usize,
}

/// Runs the identity pass for one handle field.
pub struct BatchReconciler<L> {
    lookup: RetryingLookup<L>,
    field: FieldKey,
}

impl<L: IdentityLookup> BatchReconciler<L> {
    /// Reconciler for the Twitter field with the given retry policy.
    pub fn new(lookup: L, retry: RetryConfig) -> Self {
        Self {
            lookup: RetryingLookup::new(lookup, retry),
            field: FieldKey::Twitter,
        }
    }

    /// Reconcile a different handle field.
    pub fn for_field(mut self, field: FieldKey) -> Self {
        self.field = field;
        self
    }

    /// Run one pass over `records`.
    ///
    /// Either every candidate's confirmation is updated, or, when the lookup
    /// fails, none is.
    pub fn reconcile(
        &self,
        records: &mut [EventRecord],
    ) -> Result<ReconciliationReport, ReconcileError> {
        let targets: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.field(self.field).is_some_and(|f| f.is_candidate()))
            .map(|(i, _)| i)
            .collect();

        let handles = distinct_values(targets.iter().filter_map(|&i| {
            records[i].field(self.field).map(|f| f.normalized_value())
        }));

        let mut report = ReconciliationReport {
            skipped: records.len() - targets.len(),
            ..Default::default()
        };

        if handles.is_empty() {
            tracing::info!(field = %self.field, "no candidates to reconcile");
            return Ok(report);
        }

        tracing::info!(
            field = %self.field,
            candidates = targets.len(),
            distinct = handles.len(),
            "looking up identities"
        );
        let matches = self.lookup.lookup_with_attempts(&handles).map_err(|e| {
            tracing::warn!(error = %e, "reconciliation aborted");
            e
        })?;

        for i in targets {
            let record = &mut records[i];
            let org_name = record.value(FieldKey::OrgName).to_string();
            let Some(field) = record.field_mut(self.field) else {
                continue;
            };

            match matches.get(field.normalized_value()) {
                Some(info) => {
                    field.confirm_as(info.handle.as_str());
                    report.confirmed.push(ConfirmedIdentity {
                        handle: info.handle.clone(),
                        display_name: info.display_name.clone(),
                        org_name,
                    });
                }
                None => {
                    tracing::debug!(value = field.normalized_value(), "identity not found");
                    field.set_confirmation(Confirmation::ConfirmationError);
                    report.errors += 1;
                }
            }
        }

        tracing::info!(
            confirmed = report.confirmed.len(),
            errors = report.errors,
            skipped = report.skipped,
            "reconciliation finished"
        );
        Ok(report)
    }
}

/// Distinct values, case-insensitively, keeping first spelling and order.
fn distinct_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(match_key(v)))
        .map(|v| v.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Quality;
    use crate::record::RecordSnapshot;
    use crate::validator::RecordValidator;
    use std::cell::{Cell, RefCell};

    struct FakeLookup {
        known: Vec<IdentityInfo>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeLookup {
        fn new(known: &[(&str, &str)]) -> Self {
            Self {
                known: known
                    .iter()
                    .map(|(h, n)| IdentityInfo {
                        handle: h.to_string(),
                        display_name: n.to_string(),
                    })
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl IdentityLookup for FakeLookup {
        fn lookup(&self, handles: &[String]) -> Result<IdentityMatches, LookupError> {
            self.calls.borrow_mut().push(handles.to_vec());
            Ok(self
                .known
                .iter()
                .filter(|k| handles.iter().any(|h| h.eq_ignore_ascii_case(&k.handle)))
                .cloned()
                .collect())
        }
    }

    struct FailingLookup {
        error: fn() -> LookupError,
        calls: Cell<usize>,
    }

    impl IdentityLookup for FailingLookup {
        fn lookup(&self, _handles: &[String]) -> Result<IdentityMatches, LookupError> {
            self.calls.set(self.calls.get() + 1);
            Err((self.error)())
        }
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_retries: 2,
            retry_delay_ms: 0,
            backoff_multiplier: 1.0,
        }
    }

    fn record(org: &str, twitter: &str) -> EventRecord {
        EventRecord::new(
            RecordSnapshot {
                origin_org: org.to_string(),
                org_name: org.to_string(),
                twitter: twitter.to_string(),
                ..Default::default()
            },
            &RecordValidator::default(),
        )
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matches: IdentityMatches = [IdentityInfo {
            handle: "Alice".to_string(),
            display_name: "Alice A".to_string(),
        }]
        .into_iter()
        .collect();
        assert_eq!(matches.get("ALICE").unwrap().handle, "Alice");
        assert_eq!(matches.get("alice").unwrap().handle, "Alice");
        assert!(matches.get("bob").is_none());
    }

    #[test]
    fn test_hit_and_miss() {
        let mut records = vec![record("Alice Org", "alice"), record("Bob Org", "bob")];
        let lookup = FakeLookup::new(&[("ALICE", "Alice A")]);

        let report = BatchReconciler::new(&lookup, fast_retry())
            .reconcile(&mut records)
            .unwrap();

        assert_eq!(records[0].twitter().confirmation(), Confirmation::Confirmed);
        assert_eq!(records[0].twitter().normalized_value(), "ALICE");
        assert_eq!(
            records[1].twitter().confirmation(),
            Confirmation::ConfirmationError
        );
        assert_eq!(records[1].twitter().normalized_value(), "bob");

        assert_eq!(
            report.confirmed,
            vec![ConfirmedIdentity {
                handle: "ALICE".to_string(),
                display_name: "Alice A".to_string(),
                org_name: "Alice Org".to_string(),
            }]
        );
        assert_eq!(report.errors, 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_single_call_with_distinct_candidates() {
        let mut records = vec![
            record("A", "@alice"),
            record("B", "ALICE"),
            record("C", ""),
            record("D", "!!!"),
            record("E", "https://twitter.com/carol"),
        ];
        let lookup = FakeLookup::new(&[("alice", "Alice"), ("carol", "Carol")]);

        let report = BatchReconciler::new(&lookup, fast_retry())
            .reconcile(&mut records)
            .unwrap();

        let calls = lookup.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["alice".to_string(), "carol".to_string()]);

        assert_eq!(report.confirmed.len(), 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(records[1].twitter().normalized_value(), "alice");
        // invalid and empty fields are never sent or touched
        assert_eq!(records[2].twitter().confirmation(), Confirmation::Unconfirmed);
        assert_eq!(records[3].twitter().confirmation(), Confirmation::Unconfirmed);
        assert_eq!(records[3].twitter().quality(), Quality::Invalid);
    }

    #[test]
    fn test_no_candidates_skips_lookup() {
        let mut records = vec![record("A", ""), record("B", "!!!")];
        let lookup = FakeLookup::new(&[]);
        let report = BatchReconciler::new(&lookup, fast_retry())
            .reconcile(&mut records)
            .unwrap();
        assert!(lookup.calls.borrow().is_empty());
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_lookup_failure_aborts_without_changes() {
        let mut records = vec![record("A", "alice"), record("B", "bob")];
        let before = records.clone();
        let lookup = FailingLookup {
            error: || LookupError::Unauthorized { code: 401 },
            calls: Cell::new(0),
        };

        let err = BatchReconciler::new(&lookup, fast_retry())
            .reconcile(&mut records)
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::LookupFailed {
                attempts: 1,
                source: LookupError::Unauthorized { code: 401 }
            }
        ));
        assert_eq!(lookup.calls.get(), 1);
        assert_eq!(records, before);
    }

    #[test]
    fn test_transient_failure_is_retried_then_fatal() {
        let mut records = vec![record("A", "alice")];
        let lookup = FailingLookup {
            error: || LookupError::Timeout { timeout_ms: 10 },
            calls: Cell::new(0),
        };

        let err = BatchReconciler::new(&lookup, fast_retry())
            .reconcile(&mut records)
            .unwrap_err();

        assert!(matches!(err, ReconcileError::LookupFailed { attempts: 3, .. }));
        assert_eq!(lookup.calls.get(), 3);
        assert_eq!(records[0].twitter().confirmation(), Confirmation::Unconfirmed);
    }

    #[test]
    fn test_second_pass_overwrites() {
        let mut records = vec![record("A", "alice")];
        BatchReconciler::new(FakeLookup::new(&[]), fast_retry())
            .reconcile(&mut records)
            .unwrap();
        assert_eq!(
            records[0].twitter().confirmation(),
            Confirmation::ConfirmationError
        );

        BatchReconciler::new(FakeLookup::new(&[("Alice", "Alice")]), fast_retry())
            .reconcile(&mut records)
            .unwrap();
        assert_eq!(records[0].twitter().confirmation(), Confirmation::Confirmed);
        assert_eq!(records[0].twitter().normalized_value(), "Alice");
    }

    #[test]
    fn test_for_field_targets_instagram() {
        let mut records = vec![EventRecord::new(
            RecordSnapshot {
                origin_org: "A".to_string(),
                twitter: "alice".to_string(),
                instagram: "@alice.gram".to_string(),
                ..Default::default()
            },
            &RecordValidator::default(),
        )];
        let lookup = FakeLookup::new(&[("alice.gram", "Alice")]);

        BatchReconciler::new(&lookup, fast_retry())
            .for_field(FieldKey::Instagram)
            .reconcile(&mut records)
            .unwrap();

        let instagram = records[0].field(FieldKey::Instagram).unwrap();
        assert_eq!(instagram.confirmation(), Confirmation::Confirmed);
        assert_eq!(records[0].twitter().confirmation(), Confirmation::Unconfirmed);
    }
}
