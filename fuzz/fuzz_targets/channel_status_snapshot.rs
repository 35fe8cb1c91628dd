#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use tau_diagnostics::{
    collect_telegram_status_issues, parse_channel_status_document, read_telegram_account_status,
    ChannelIssueKind,
};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(document) = parse_channel_status_document(&raw, "telegram") else {
        return;
    };
    let Some(accounts) = document.accounts_for("telegram") else {
        return;
    };

    let issues = collect_telegram_status_issues(accounts);
    for issue in &issues {
        assert_eq!(issue.channel, "telegram");
        assert!(!issue.account_id.is_empty());
        assert!(!issue.message.is_empty());
        assert!(!issue.fix.is_empty());
    }

    for account in accounts {
        let gated_open = account.get("enabled") == Some(&Value::Bool(true))
            && account.get("configured") == Some(&Value::Bool(true));
        let per_account = collect_telegram_status_issues(std::slice::from_ref(account));
        if !gated_open || read_telegram_account_status(account).is_none() {
            assert!(per_account.is_empty());
        }
        let auth = per_account
            .iter()
            .filter(|issue| issue.kind == ChannelIssueKind::Auth)
            .count();
        assert!(auth <= 1);
    }
});
