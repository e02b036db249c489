//! Command line interface for release_sync.
//!
//! Parses the desired release state, builds the GitHub client and runs one
//! reconciliation with user-facing output.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::config::EnvConfig;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::reconcile::{DesiredState, Reconciler, RunOutcome, SyncReport};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args, &EnvConfig::from_env()).await
}

/// Run one reconciliation for already-parsed arguments.
///
/// Returns the process exit code. Asset-level failures never change it;
/// fatal errors are returned as `Err`.
pub async fn execute(args: &Args, env: &EnvConfig) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(args);
    config.println(&format!("🚀 Running release_sync {}", env!("CARGO_PKG_VERSION")));

    let host = args.host_config(env)?;
    config.verbose_println(&format!("Repository: {} ({})", host.full_name(), host.api_url));
    let client = GitHubClient::new(host)?;

    let desired = args.desired_state();
    if desired.files.is_empty() {
        config.verbose_println("No files given; only release metadata will be reconciled.");
    }

    let outcome = Reconciler::new(&client, &config).run(&desired).await?;
    report_outcome(&config, &desired, &outcome);

    Ok(0)
}

fn report_outcome(config: &RuntimeConfig, desired: &DesiredState, outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Skipped => {
            config.println(&format!("Release \"{}\" left unchanged.", desired.tag));
        }
        RunOutcome::Synced {
            release,
            created,
            report,
        } => {
            let verb = if *created { "Created" } else { "Updated" };
            config.success_println(&format!("{verb} release {}", release_label(release)));
            summarize(config, report);
            config.println("All is nominal 🚀. Execution has ended.");
        }
    }
}

fn release_label(release: &crate::github::Release) -> String {
    if release.html_url.is_empty() {
        format!("\"{}\"", release.tag_name)
    } else {
        format!("\"{}\": {}", release.tag_name, release.html_url)
    }
}

fn summarize(config: &RuntimeConfig, report: &SyncReport) {
    if report.uploaded.is_empty() && report.is_clean() {
        return;
    }

    config.indent(&format!(
        "{} uploaded, {} replaced",
        report.uploaded.len(),
        report.replaced.len()
    ));

    if !report.is_clean() {
        config.warning_println(&format!(
            "{} asset operation(s) failed; the release may be incomplete",
            report.failed_deletes.len() + report.failed_uploads.len()
        ));
        for name in &report.failed_deletes {
            config.indent(&format!("delete failed: {name}"));
        }
        for name in &report.failed_uploads {
            config.indent(&format!("upload failed: {name}"));
        }
    }
}
