use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `ChannelIssueKind` values.
pub enum ChannelIssueKind {
    Config,
    Runtime,
    Auth,
}

impl ChannelIssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Runtime => "runtime",
            Self::Auth => "auth",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// One actionable problem found for a channel account.
pub struct ChannelStatusIssue {
    pub channel: String,
    pub account_id: String,
    pub kind: ChannelIssueKind,
    pub message: String,
    pub fix: String,
}

impl ChannelStatusIssue {
    pub fn new(
        channel: &str,
        account_id: &str,
        kind: ChannelIssueKind,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.to_string(),
            account_id: account_id.to_string(),
            kind,
            message: message.into(),
            fix: fix.into(),
        }
    }
}
