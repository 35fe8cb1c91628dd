//! Cross-channel doctor aggregation and plain report rendering.
//!
//! Collectors are registered per channel id and run in registration order
//! against a loaded [`ChannelStatusDocument`].

use anyhow::{bail, Result};
use serde_json::Value;

use crate::channel_status_document::ChannelStatusDocument;
use crate::channel_status_issue::{ChannelIssueKind, ChannelStatusIssue};
use crate::telegram_status_issues::TelegramStatusIssueCollector;

/// Trait contract for per-channel status issue collectors.
pub trait ChannelStatusIssueCollector: Send + Sync {
    fn channel_id(&self) -> &'static str;

    fn collect_issues(&self, accounts: &[Value]) -> Vec<ChannelStatusIssue>;
}

#[derive(Default)]
/// Ordered set of channel collectors keyed by channel id.
pub struct ChannelDoctorRegistry {
    collectors: Vec<Box<dyn ChannelStatusIssueCollector>>,
}

impl ChannelDoctorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every collector this crate ships.
    pub fn with_builtin_collectors() -> Self {
        Self {
            collectors: vec![Box::new(TelegramStatusIssueCollector)],
        }
    }

    pub fn register(&mut self, collector: Box<dyn ChannelStatusIssueCollector>) -> Result<()> {
        let channel_id = collector.channel_id();
        if channel_id.trim().is_empty() {
            bail!("channel doctor collector must declare a non-empty channel id");
        }
        if self.collector(channel_id).is_some() {
            bail!("channel doctor collector already registered for channel '{channel_id}'");
        }
        self.collectors.push(collector);
        Ok(())
    }

    pub fn collector(&self, channel_id: &str) -> Option<&dyn ChannelStatusIssueCollector> {
        self.collectors
            .iter()
            .find(|collector| collector.channel_id() == channel_id)
            .map(|collector| collector.as_ref())
    }

    pub fn channel_ids(&self) -> Vec<&'static str> {
        self.collectors
            .iter()
            .map(|collector| collector.channel_id())
            .collect()
    }
}

/// Runs every registered collector whose channel appears in `document`.
pub fn collect_channel_doctor_issues(
    registry: &ChannelDoctorRegistry,
    document: &ChannelStatusDocument,
) -> Vec<ChannelStatusIssue> {
    for entry in &document.channels {
        if registry.collector(&entry.channel).is_none() {
            tracing::warn!(
                channel = %entry.channel,
                accounts = entry.accounts.len(),
                "no channel doctor collector registered; skipping channel"
            );
        }
    }

    let mut issues = Vec::new();
    for collector in &registry.collectors {
        if let Some(accounts) = document.accounts_for(collector.channel_id()) {
            issues.extend(collector.collect_issues(accounts));
        }
    }
    issues
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Issue counts per kind.
pub struct ChannelDoctorSummary {
    pub issues: usize,
    pub config: usize,
    pub runtime: usize,
    pub auth: usize,
}

impl ChannelDoctorSummary {
    pub fn from_issues(issues: &[ChannelStatusIssue]) -> Self {
        let count = |kind: ChannelIssueKind| issues.iter().filter(|issue| issue.kind == kind).count();
        Self {
            issues: issues.len(),
            config: count(ChannelIssueKind::Config),
            runtime: count(ChannelIssueKind::Runtime),
            auth: count(ChannelIssueKind::Auth),
        }
    }
}

pub fn render_channel_doctor_report(issues: &[ChannelStatusIssue]) -> String {
    let summary = ChannelDoctorSummary::from_issues(issues);
    let mut lines = vec![format!(
        "channel doctor summary: issues={} config={} runtime={} auth={}",
        summary.issues, summary.config, summary.runtime, summary.auth
    )];
    for issue in issues {
        lines.push(format!(
            "channel doctor issue: channel={} account={} kind={} message={} fix={}",
            issue.channel,
            issue.account_id,
            issue.kind.as_str(),
            issue.message,
            issue.fix
        ));
    }
    lines.join("\n")
}

pub fn render_channel_doctor_report_json(issues: &[ChannelStatusIssue]) -> String {
    let summary = ChannelDoctorSummary::from_issues(issues);
    serde_json::json!({
        "summary": {
            "issues": summary.issues,
            "config": summary.config,
            "runtime": summary.runtime,
            "auth": summary.auth,
        },
        "issues": issues,
    })
    .to_string()
}
