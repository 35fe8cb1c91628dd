//! Typed view over an untyped Telegram account status snapshot.

use serde_json::Value;
use tau_core::{as_record, as_strict_bool, as_string, read_field, GatedAccountStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Fields of a Telegram account snapshot needed for diagnosis.
///
/// Absent or mistyped fields read as `None`. `audit` and `probe` stay raw and
/// are narrowed by [`crate::status_readers`].
pub struct NormalizedTelegramAccountStatus<'a> {
    pub account_id: Option<&'a str>,
    pub enabled: Option<bool>,
    pub configured: Option<bool>,
    pub allow_unmentioned_groups: Option<bool>,
    pub audit: Option<&'a Value>,
    pub probe: Option<&'a Value>,
    pub running: Option<bool>,
    pub connected: Option<bool>,
    pub last_error: Option<&'a str>,
}

impl GatedAccountStatus for NormalizedTelegramAccountStatus<'_> {
    fn account_id(&self) -> Option<&str> {
        self.account_id
    }

    fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    fn configured(&self) -> Option<bool> {
        self.configured
    }
}

/// Narrows one snapshot entry; `None` when the entry is not an object.
pub fn read_telegram_account_status(value: &Value) -> Option<NormalizedTelegramAccountStatus<'_>> {
    let record = as_record(value)?;
    Some(NormalizedTelegramAccountStatus {
        account_id: read_field(record, "accountId", as_string),
        enabled: read_field(record, "enabled", as_strict_bool),
        configured: read_field(record, "configured", as_strict_bool),
        allow_unmentioned_groups: read_field(record, "allowUnmentionedGroups", as_strict_bool),
        audit: record.get("audit"),
        probe: record.get("probe"),
        running: read_field(record, "running", as_strict_bool),
        connected: read_field(record, "connected", as_strict_bool),
        last_error: read_field(record, "lastError", as_string),
    })
}
