//! Channel status diagnostics and doctor reporting for Tau.
//!
//! Turns raw, loosely-typed per-account channel status snapshots into an
//! ordered list of actionable issues (`config`, `runtime`, `auth`) with
//! remediation text. The collectors are pure: no I/O, no state across calls.
//!
//! ```rust
//! use serde_json::json;
//! use tau_diagnostics::{collect_telegram_status_issues, ChannelIssueKind};
//!
//! let issues = collect_telegram_status_issues(&[json!({
//!     "accountId": "default",
//!     "enabled": true,
//!     "configured": true,
//!     "probe": { "ok": false, "status": 401, "error": "Unauthorized" }
//! })]);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, ChannelIssueKind::Auth);
//! ```

pub mod channel_doctor;
pub mod channel_status_document;
pub mod channel_status_issue;
pub mod signal_classifiers;
pub mod status_readers;
pub mod telegram_status;
pub mod telegram_status_issues;

pub use channel_doctor::*;
pub use channel_status_document::*;
pub use channel_status_issue::*;
pub use signal_classifiers::*;
pub use status_readers::*;
pub use telegram_status::*;
pub use telegram_status_issues::*;
