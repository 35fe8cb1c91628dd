use std::path::PathBuf;

use clap::{ArgAction, Parser};

fn parse_channel_id(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("channel id must be non-empty".to_string());
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Parser)]
#[command(
    name = "tau-channel-doctor",
    about = "Diagnose channel account status snapshots and print actionable issues",
    version
)]
/// Command-line arguments for the channel doctor binary.
pub(crate) struct Cli {
    #[arg(
        long,
        env = "TAU_CHANNEL_STATUS_PATH",
        help = "Path to a channel status document: an array of account snapshots or an object mapping channel ids to arrays."
    )]
    pub(crate) snapshots: PathBuf,

    #[arg(
        long = "default-channel",
        env = "TAU_CHANNEL_DOCTOR_DEFAULT_CHANNEL",
        default_value = "telegram",
        value_parser = parse_channel_id,
        help = "Channel id applied when the document is a bare array of account snapshots."
    )]
    pub(crate) default_channel: String,

    #[arg(
        long,
        env = "TAU_CHANNEL_DOCTOR_JSON",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Print the report as JSON instead of text."
    )]
    pub(crate) json: bool,

    #[arg(
        long = "fail-on-issues",
        env = "TAU_CHANNEL_DOCTOR_FAIL_ON_ISSUES",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Exit with a failure status when any issue is reported."
    )]
    pub(crate) fail_on_issues: bool,
}
