use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tau_core::{append_match_metadata, GroupMatchMetadata};
use tau_diagnostics::{
    collect_channel_doctor_issues, collect_telegram_status_issues, load_channel_status_document,
    render_channel_doctor_report, render_channel_doctor_report_json, ChannelDoctorRegistry,
    ChannelIssueKind, ChannelStatusIssue, TELEGRAM_CHANNEL_ID,
};

fn diagnostics_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/tau-diagnostics/testdata/channel-status")
        .join(name)
}

fn issue_shape(issues: &[ChannelStatusIssue]) -> Vec<(&str, ChannelIssueKind)> {
    issues
        .iter()
        .map(|issue| (issue.account_id.as_str(), issue.kind))
        .collect()
}

#[test]
fn integration_fixture_document_produces_ordered_report() {
    let document =
        load_channel_status_document(&diagnostics_fixture("telegram-mixed-accounts.json"), "telegram")
            .expect("load fixture");
    let registry = ChannelDoctorRegistry::with_builtin_collectors();
    let issues = collect_channel_doctor_issues(&registry, &document);

    assert_eq!(
        issue_shape(&issues),
        vec![
            ("default", ChannelIssueKind::Config),
            ("default", ChannelIssueKind::Config),
            ("default", ChannelIssueKind::Runtime),
            ("default", ChannelIssueKind::Runtime),
            ("default", ChannelIssueKind::Auth),
            ("alerts", ChannelIssueKind::Runtime),
        ]
    );
    assert!(issues.iter().all(|issue| issue.channel == TELEGRAM_CHANNEL_ID));
    assert_eq!(
        issues[2].message,
        append_match_metadata(
            "Group -1002 not reachable by bot. status=kicked",
            GroupMatchMetadata {
                match_key: Some("-1002"),
                match_source: Some("id"),
            },
        )
    );
    assert!(issues[3].fix.contains("could not be resolved"));
    assert!(issues[4].message.contains("HTTP 401"));
    assert!(issues[5].message.contains("not reachable"));

    let report = render_channel_doctor_report(&issues);
    assert!(report.starts_with("channel doctor summary: issues=6 config=2 runtime=3 auth=1"));
}

#[test]
fn integration_engine_does_not_mutate_input_and_is_repeatable() {
    let accounts = vec![
        json!({
            "accountId": "a1",
            "enabled": true,
            "configured": true,
            "allowUnmentionedGroups": true,
            "audit": {"groups": [{"chatId": "-1", "ok": false, "error": "Forbidden"}]}
        }),
        json!({"accountId": "a2", "enabled": true, "configured": false}),
    ];
    let snapshot = accounts.clone();
    let first = collect_telegram_status_issues(&accounts);
    let second = collect_telegram_status_issues(&accounts);
    assert_eq!(first, second);
    assert_eq!(accounts, snapshot);
}

#[test]
fn integration_json_report_round_trips_through_disk() {
    let tempdir = tempfile::tempdir().expect("tempdir");
    let path = tempdir.path().join("status.json");
    fs::write(
        &path,
        json!([
            {"accountId": "a3", "enabled": true, "configured": true, "probe": {"ok": false, "error": "ECONNREFUSED"}},
            {"accountId": "a4", "enabled": false, "configured": true}
        ])
        .to_string(),
    )
    .expect("write document");

    let document = load_channel_status_document(&path, "telegram").expect("load document");
    let registry = ChannelDoctorRegistry::with_builtin_collectors();
    let issues = collect_channel_doctor_issues(&registry, &document);
    let rendered: Value =
        serde_json::from_str(&render_channel_doctor_report_json(&issues)).expect("parse report");

    assert_eq!(rendered["summary"]["issues"], 1);
    assert_eq!(rendered["issues"][0]["accountId"], "a3");
    assert_eq!(rendered["issues"][0]["kind"], "runtime");
}
