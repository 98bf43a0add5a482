//! Command module structure for the eventcheck CLI

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use eventcheck::config::Config;
use eventcheck::reconcile::{
    probe_candidates, probe_websites, BatchReconciler, HttpIdentityLookup, HttpReachability,
    ProbeSummary, ReconciliationReport,
};
use eventcheck::record::{load_snapshots, EventRecord};
use eventcheck::ui;

pub mod check;
pub mod export;
pub mod reconcile;
pub mod util;

/// Config plus the records built from one input file.
pub struct Workspace {
    pub config: Config,
    pub records: Vec<EventRecord>,
}

impl Workspace {
    pub fn load(input: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let validator = config.record_validator()?;
        let snapshots = load_snapshots(input)?;

        tracing::debug!(count = snapshots.len(), input = %input.display(), "loaded submissions");
        let records = EventRecord::from_snapshots(snapshots, &validator);

        Ok(Self { config, records })
    }

    /// Probe every candidate website, with a progress bar unless quiet.
    pub fn probe(&mut self) -> ProbeSummary {
        let total = probe_candidates(&self.records);
        let reachability = HttpReachability::new(self.config.probe.timeout_ms);

        let pb = if ui::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }

        let summary = probe_websites(&mut self.records, &reachability, |url| {
            pb.set_message(url.to_string());
            pb.inc(1);
        });
        pb.finish_and_clear();

        // stdout may carry the export
        if !ui::is_quiet() {
            eprintln!(
                "{} Probed {} website(s): {} reachable, {} unreachable",
                "→".cyan(),
                summary.probed(),
                ui::colors::success(&summary.reachable.to_string()),
                ui::colors::error(&summary.unreachable.to_string()),
            );
        }
        summary
    }

    /// Run the Twitter identity pass against the configured lookup service.
    pub fn reconcile(&mut self, token: Option<&str>) -> Result<ReconciliationReport> {
        let lookup_config = &self.config.lookup;
        let lookup = HttpIdentityLookup::new(lookup_config, lookup_config.token_or(token));
        let reconciler = BatchReconciler::new(lookup, lookup_config.retry.clone());

        reconciler
            .reconcile(&mut self.records)
            .context("Reconciliation aborted; no records were changed")
    }

    pub fn probe_enabled(&self, flag: bool) -> bool {
        flag || self.config.probe.enabled
    }
}
