//! CLI entry point for eventcheck.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.quiet {
        std::env::set_var("EVENTCHECK_QUIET", "1");
    }

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Check { input } => cmd::check::cmd_check(&input, config),
        Commands::Reconcile {
            input,
            probe,
            token,
            json,
        } => cmd::reconcile::cmd_reconcile(&input, config, probe, token.as_deref(), json),
        Commands::Export {
            input,
            audience,
            format,
            reconcile,
            probe,
            token,
            output,
        } => cmd::export::cmd_export(cmd::export::ExportOptions {
            input: &input,
            config,
            audience,
            format,
            reconcile,
            probe,
            token: token.as_deref(),
            output: output.as_deref(),
        }),
        Commands::Version { build_info } => cmd::util::cmd_version(build_info),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
    }
}

/// Logs go to stderr so exports on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
