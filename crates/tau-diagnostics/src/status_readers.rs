//! Narrowing readers for nested channel status payloads.
//!
//! Readers borrow from the raw `serde_json::Value` and never fail: a field with
//! the wrong shape reads as absent, and group entries without a chat id are
//! dropped.

use serde_json::Value;
use tau_core::{
    as_finite_number, as_record, as_strict_bool, as_string, read_field, GroupMatchMetadata,
};

#[derive(Debug, Clone, PartialEq)]
/// One group probed by a membership audit.
pub struct GroupAuditEntry<'a> {
    pub chat_id: &'a str,
    pub ok: Option<bool>,
    pub status: Option<&'a str>,
    pub error: Option<&'a str>,
    pub match_key: Option<&'a str>,
    pub match_source: Option<&'a str>,
}

impl<'a> GroupAuditEntry<'a> {
    pub fn match_metadata(&self) -> GroupMatchMetadata<'a> {
        GroupMatchMetadata {
            match_key: self.match_key,
            match_source: self.match_source,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Summary of a group membership audit. Every field is optional.
pub struct GroupMembershipAudit<'a> {
    pub unresolved_groups: Option<f64>,
    pub has_wildcard_unmentioned_groups: Option<bool>,
    pub groups: Option<Vec<GroupAuditEntry<'a>>>,
}

impl<'a> GroupMembershipAudit<'a> {
    /// Entries whose `ok` flag is not strictly `true`, in input order.
    pub fn failing_groups(&self) -> impl Iterator<Item = &GroupAuditEntry<'a>> {
        self.groups
            .iter()
            .flatten()
            .filter(|group| group.ok != Some(true))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Outcome of an API probe. `status: None` means no HTTP status, which is distinct from zero.
pub struct ProbeSummary<'a> {
    pub ok: Option<bool>,
    pub status: Option<f64>,
    pub error: Option<&'a str>,
}

/// Reads one audit group entry; `None` unless it is an object with a non-empty `chatId`.
pub fn read_group_audit_entry(value: &Value) -> Option<GroupAuditEntry<'_>> {
    let record = as_record(value)?;
    let chat_id = read_field(record, "chatId", as_string).filter(|chat_id| !chat_id.is_empty())?;
    Some(GroupAuditEntry {
        chat_id,
        ok: read_field(record, "ok", as_strict_bool),
        status: read_field(record, "status", as_string),
        error: read_field(record, "error", as_string),
        match_key: read_field(record, "matchKey", as_string),
        match_source: read_field(record, "matchSource", as_string),
    })
}

/// Reads a membership audit summary from any value. Non-objects yield the empty summary.
pub fn read_group_membership_audit(value: &Value) -> GroupMembershipAudit<'_> {
    let Some(record) = as_record(value) else {
        return GroupMembershipAudit::default();
    };
    let groups = read_field(record, "groups", Value::as_array).map(|entries| {
        entries
            .iter()
            .filter_map(read_group_audit_entry)
            .collect::<Vec<_>>()
    });
    GroupMembershipAudit {
        unresolved_groups: read_field(record, "unresolvedGroups", as_finite_number),
        has_wildcard_unmentioned_groups: read_field(
            record,
            "hasWildcardUnmentionedGroups",
            as_strict_bool,
        ),
        groups,
    }
}

/// Reads a probe summary; `None` when `value` is not an object.
pub fn read_probe_summary(value: &Value) -> Option<ProbeSummary<'_>> {
    let record = as_record(value)?;
    Some(ProbeSummary {
        ok: read_field(record, "ok", as_strict_bool),
        status: read_field(record, "status", as_finite_number),
        error: read_field(record, "error", as_string),
    })
}
