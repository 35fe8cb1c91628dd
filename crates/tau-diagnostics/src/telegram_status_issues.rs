//! Telegram account status issue synthesis.
//!
//! Each account is gated on `enabled && configured`, then runs independent
//! config/runtime checks followed by a single probe-failure classification.
//! Accounts never influence each other and output order follows input order.

use serde_json::Value;
use tau_core::{append_match_metadata, resolve_enabled_configured_account_id};

use crate::channel_doctor::ChannelStatusIssueCollector;
use crate::channel_status_issue::{ChannelIssueKind, ChannelStatusIssue};
use crate::signal_classifiers::{
    classify_probe_failure, format_probe_label, is_dns_failure, ProbeFailureClass, ProbeLabelTag,
};
use crate::status_readers::{read_group_membership_audit, read_probe_summary, ProbeSummary};
use crate::telegram_status::{read_telegram_account_status, NormalizedTelegramAccountStatus};

pub const TELEGRAM_CHANNEL_ID: &str = "telegram";

const TELEGRAM_DNS_FIX: &str = "Telegram API host could not be resolved. Check DNS on this host or route through channels.telegram.proxy, then restart the gateway.";
const TELEGRAM_CONNECTIVITY_FIX: &str =
    "Check Telegram API connectivity from this host and verify the bot token.";
const TELEGRAM_NETWORK_EGRESS_FIX: &str = "Allow outbound HTTPS and DNS to api.telegram.org from this host, or route through channels.telegram.proxy.";
const TELEGRAM_AUTH_FIX: &str = "Copy a valid bot token from BotFather into channels.telegram.botToken (or TELEGRAM_BOT_TOKEN), then restart the gateway.";
const TELEGRAM_PROBE_FIX: &str =
    "Verify the bot token and Telegram Bot API access (getMe) from this host.";

#[derive(Debug, Clone, Copy, Default)]
/// `ChannelStatusIssueCollector` for Telegram bot accounts.
pub struct TelegramStatusIssueCollector;

impl ChannelStatusIssueCollector for TelegramStatusIssueCollector {
    fn channel_id(&self) -> &'static str {
        TELEGRAM_CHANNEL_ID
    }

    fn collect_issues(&self, accounts: &[Value]) -> Vec<ChannelStatusIssue> {
        collect_telegram_status_issues(accounts)
    }
}

/// Converts Telegram account snapshots into ordered, actionable issues.
#[tracing::instrument(
    name = "tau_diagnostics.telegram.collect_status_issues",
    skip(accounts),
    fields(account_count = accounts.len())
)]
pub fn collect_telegram_status_issues(accounts: &[Value]) -> Vec<ChannelStatusIssue> {
    let mut issues = Vec::new();
    let mut diagnosed_accounts = 0usize;
    for (index, entry) in accounts.iter().enumerate() {
        let Some(account) = read_telegram_account_status(entry) else {
            tracing::trace!(index, "skipping non-object telegram account snapshot");
            continue;
        };
        let Some(account_id) = resolve_enabled_configured_account_id(&account) else {
            tracing::trace!(index, "skipping disabled or unconfigured telegram account");
            continue;
        };
        diagnosed_accounts += 1;
        collect_account_issues(account_id, &account, &mut issues);
    }
    tracing::debug!(
        diagnosed_accounts,
        issue_count = issues.len(),
        "collected telegram status issues"
    );
    issues
}

fn collect_account_issues(
    account_id: &str,
    account: &NormalizedTelegramAccountStatus<'_>,
    issues: &mut Vec<ChannelStatusIssue>,
) {
    let issue = |kind: ChannelIssueKind, message: String, fix: &str| {
        ChannelStatusIssue::new(TELEGRAM_CHANNEL_ID, account_id, kind, message, fix)
    };

    if account.allow_unmentioned_groups == Some(true) {
        issues.push(issue(
            ChannelIssueKind::Config,
            "Config allows unmentioned group messages (requireMention=false). Telegram Bot API privacy mode will block most group messages unless disabled.".to_string(),
            "In BotFather run /setprivacy and choose Disable for this bot, then restart the gateway.",
        ));
    }

    let audit = account
        .audit
        .map(read_group_membership_audit)
        .unwrap_or_default();

    if audit.has_wildcard_unmentioned_groups == Some(true) {
        issues.push(issue(
            ChannelIssueKind::Config,
            "Telegram groups config uses \"*\" with requireMention=false; membership probing is not possible without explicit group IDs.".to_string(),
            "Add explicit numeric group ids under channels.telegram.groups (or per-account groups) to enable probing.",
        ));
    }

    if let Some(unresolved_groups) = audit.unresolved_groups.filter(|count| *count > 0.0) {
        issues.push(issue(
            ChannelIssueKind::Config,
            format!(
                "Some configured Telegram groups are not numeric IDs (unresolvedGroups={unresolved_groups}). Membership probe can only check numeric group IDs."
            ),
            "Use numeric chat IDs (e.g. -100...) as keys in channels.telegram.groups for requireMention=false groups.",
        ));
    }

    for group in audit.failing_groups() {
        let status = group
            .status
            .filter(|status| !status.is_empty())
            .map(|status| format!(" status={status}"))
            .unwrap_or_default();
        let error = group
            .error
            .filter(|error| !error.is_empty())
            .map(|error| format!(": {error}"))
            .unwrap_or_default();
        let base_message = format!("Group {} not reachable by bot.{status}{error}", group.chat_id);
        issues.push(issue(
            ChannelIssueKind::Runtime,
            append_match_metadata(&base_message, group.match_metadata()),
            "Invite the bot to the group, then DM the bot once (/start) and restart the gateway.",
        ));
    }

    if account.running == Some(true) && account.connected == Some(false) {
        let detail = account
            .last_error
            .map(|error| format!(": {error}"))
            .unwrap_or_default();
        let fix = if is_dns_failure(account.last_error) {
            TELEGRAM_DNS_FIX
        } else {
            TELEGRAM_CONNECTIVITY_FIX
        };
        issues.push(issue(
            ChannelIssueKind::Runtime,
            format!("Telegram bot is running but not connected{detail}"),
            fix,
        ));
    }

    let failed_probe = account
        .probe
        .and_then(read_probe_summary)
        .filter(|probe| probe.ok == Some(false));
    if let Some(probe) = failed_probe {
        issues.push(probe_failure_issue(account_id, &probe));
    }
}

fn probe_failure_issue(account_id: &str, probe: &ProbeSummary<'_>) -> ChannelStatusIssue {
    let (kind, message, fix) = match classify_probe_failure(probe) {
        ProbeFailureClass::Auth => (
            ChannelIssueKind::Auth,
            format!(
                "Telegram bot token validation failed: {}",
                format_probe_label(probe, ProbeLabelTag::Auth)
            ),
            TELEGRAM_AUTH_FIX,
        ),
        ProbeFailureClass::Network { dns } => (
            ChannelIssueKind::Runtime,
            format!(
                "Telegram bot probe is not reachable: {}",
                format_probe_label(probe, ProbeLabelTag::Other)
            ),
            if dns {
                TELEGRAM_DNS_FIX
            } else {
                TELEGRAM_NETWORK_EGRESS_FIX
            },
        ),
        ProbeFailureClass::Other => (
            ChannelIssueKind::Runtime,
            format!(
                "Telegram bot probe failed: {}",
                format_probe_label(probe, ProbeLabelTag::Other)
            ),
            TELEGRAM_PROBE_FIX,
        ),
    };
    ChannelStatusIssue::new(TELEGRAM_CHANNEL_ID, account_id, kind, message, fix)
}
