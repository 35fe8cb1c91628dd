mod bootstrap_helpers;
mod cli_args;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tau_diagnostics::{
    collect_channel_doctor_issues, load_channel_status_document, render_channel_doctor_report,
    render_channel_doctor_report_json, ChannelDoctorRegistry, ChannelDoctorSummary,
};

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run_channel_doctor(&cli)
}

fn run_channel_doctor(cli: &Cli) -> Result<()> {
    let document = load_channel_status_document(&cli.snapshots, &cli.default_channel)
        .with_context(|| {
            format!(
                "failed to load channel status snapshots from {}",
                cli.snapshots.display()
            )
        })?;
    tracing::debug!(
        path = %cli.snapshots.display(),
        channels = document.channels.len(),
        accounts = document.account_count(),
        "loaded channel status document"
    );

    let registry = ChannelDoctorRegistry::with_builtin_collectors();
    let issues = collect_channel_doctor_issues(&registry, &document);
    let output = if cli.json {
        render_channel_doctor_report_json(&issues)
    } else {
        render_channel_doctor_report(&issues)
    };
    println!("{output}");

    if cli.fail_on_issues && !issues.is_empty() {
        let summary = ChannelDoctorSummary::from_issues(&issues);
        bail!(
            "channel doctor gate: status=fail issues={} config={} runtime={} auth={}",
            summary.issues,
            summary.config,
            summary.runtime,
            summary.auth
        );
    }
    Ok(())
}
