//! `eventcheck version` and `eventcheck completion`.
//!
//! Commit and build date are baked in by `build.rs` as `GIT_SHA` and
//! `BUILD_DATE`, so a published row set can be traced to the binary that
//! produced it.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

pub fn cmd_version(build_info: bool) -> Result<()> {
    println!("eventcheck {}", env!("CARGO_PKG_VERSION"));

    if build_info {
        println!("commit: {}", env!("GIT_SHA"));
        println!("built: {}", env!("BUILD_DATE"));
    }

    Ok(())
}

/// Completion script for `shell` on stdout, covering every subcommand and
/// the global `--config`, `--quiet` and `--verbose` flags.
pub fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "eventcheck", &mut io::stdout());
    Ok(())
}
