//! Free-text failure classifiers for channel probe and runtime errors.
//!
//! Classification is substring containment over the lower-cased error text
//! against [`SIGNAL_PATTERNS`]. The broad network entries (`dns`, `network`,
//! `timeout`) over-match unrelated text that happens to contain them; that is
//! a known limitation of the heuristic and is kept as-is.

use std::sync::OnceLock;

use aho_corasick::AhoCorasick;

use crate::status_readers::ProbeSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `SignalClass` values.
pub enum SignalClass {
    Auth,
    Network,
    Dns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One `(pattern, class)` entry of the classifier table.
pub struct SignalPattern {
    pub pattern: &'static str,
    pub class: SignalClass,
}

const fn signal(pattern: &'static str, class: SignalClass) -> SignalPattern {
    SignalPattern { pattern, class }
}

/// Ordered classifier table. Patterns are lower-case.
pub const SIGNAL_PATTERNS: &[SignalPattern] = &[
    signal("unauthorized", SignalClass::Auth),
    signal("invalid token", SignalClass::Auth),
    signal("not authorized", SignalClass::Auth),
    signal("bad request", SignalClass::Auth),
    signal("econnrefused", SignalClass::Network),
    signal("econnreset", SignalClass::Network),
    signal("enotfound", SignalClass::Network),
    signal("eai_again", SignalClass::Network),
    signal("etimedout", SignalClass::Network),
    signal("esockettimedout", SignalClass::Network),
    signal("fetch failed", SignalClass::Network),
    signal("getaddrinfo", SignalClass::Network),
    signal("network is down", SignalClass::Network),
    signal("socket hang up", SignalClass::Network),
    signal("dns", SignalClass::Network),
    signal("network", SignalClass::Network),
    signal("timeout", SignalClass::Network),
    signal("could not resolve host", SignalClass::Dns),
    signal("enotfound", SignalClass::Dns),
    signal("eai_again", SignalClass::Dns),
    signal("getaddrinfo", SignalClass::Dns),
    signal("dns", SignalClass::Dns),
    signal("name or service not known", SignalClass::Dns),
    signal("temporarily unresolvable", SignalClass::Dns),
];

/// Patterns for one class, in table order.
pub fn signal_patterns_for(class: SignalClass) -> Vec<&'static str> {
    SIGNAL_PATTERNS
        .iter()
        .filter(|entry| entry.class == class)
        .map(|entry| entry.pattern)
        .collect()
}

struct SignalMatcher {
    patterns: Vec<&'static str>,
    automaton: Option<AhoCorasick>,
}

impl SignalMatcher {
    fn new(class: SignalClass) -> Self {
        let patterns = signal_patterns_for(class);
        let automaton = match AhoCorasick::new(&patterns) {
            Ok(automaton) => Some(automaton),
            Err(error) => {
                tracing::warn!(?class, %error, "falling back to linear signal pattern scan");
                None
            }
        };
        Self {
            patterns,
            automaton,
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        match &self.automaton {
            Some(automaton) => automaton.is_match(lowered),
            None => self
                .patterns
                .iter()
                .any(|pattern| lowered.contains(pattern)),
        }
    }
}

fn signal_matcher(class: SignalClass) -> &'static SignalMatcher {
    static AUTH: OnceLock<SignalMatcher> = OnceLock::new();
    static NETWORK: OnceLock<SignalMatcher> = OnceLock::new();
    static DNS: OnceLock<SignalMatcher> = OnceLock::new();
    let cell = match class {
        SignalClass::Auth => &AUTH,
        SignalClass::Network => &NETWORK,
        SignalClass::Dns => &DNS,
    };
    cell.get_or_init(|| SignalMatcher::new(class))
}

fn error_text_matches(error: Option<&str>, class: SignalClass) -> bool {
    match error {
        Some(text) => signal_matcher(class).matches(&text.to_lowercase()),
        None => false,
    }
}

/// Returns true for HTTP 401/403, or auth phrases in the error text.
pub fn is_auth_failure(error: Option<&str>, status: Option<f64>) -> bool {
    if matches!(status, Some(code) if code == 401.0 || code == 403.0) {
        return true;
    }
    error_text_matches(error, SignalClass::Auth)
}

/// Returns true when the failure looks like a connectivity problem.
///
/// Any numeric status means the API answered, so the result is false. With
/// neither status nor error text the request never got a response, which is
/// treated as a connectivity failure.
pub fn is_network_failure(error: Option<&str>, status: Option<f64>) -> bool {
    if status.is_some() {
        return false;
    }
    match error {
        None => true,
        Some(_) => error_text_matches(error, SignalClass::Network),
    }
}

/// Returns true when the error text names a name-resolution failure.
pub fn is_dns_failure(error: Option<&str>) -> bool {
    error_text_matches(error, SignalClass::Dns)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `ProbeLabelTag` values.
pub enum ProbeLabelTag {
    Auth,
    Other,
}

/// Builds a human label for a failed probe: the raw error text when present,
/// else a generic phrase for `tag`, followed by `(HTTP <status>)` when known.
pub fn format_probe_label(probe: &ProbeSummary<'_>, tag: ProbeLabelTag) -> String {
    let base = match probe.error {
        Some(error) if !error.trim().is_empty() => error.trim().to_string(),
        _ => match tag {
            ProbeLabelTag::Auth => "unauthorized".to_string(),
            ProbeLabelTag::Other => "request failed".to_string(),
        },
    };
    match probe.status {
        Some(status) => format!("{base} (HTTP {status})"),
        None => base,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// First matching branch of the probe-failure guard chain.
pub enum ProbeFailureClass {
    Auth,
    Network { dns: bool },
    Other,
}

/// Classifies a failed probe; auth wins over network, network over the generic branch.
pub fn classify_probe_failure(probe: &ProbeSummary<'_>) -> ProbeFailureClass {
    if is_auth_failure(probe.error, probe.status) {
        ProbeFailureClass::Auth
    } else if is_network_failure(probe.error, probe.status) {
        ProbeFailureClass::Network {
            dns: is_dns_failure(probe.error),
        }
    } else {
        ProbeFailureClass::Other
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{
        classify_probe_failure, format_probe_label, is_auth_failure, is_dns_failure,
        is_network_failure, signal_patterns_for, ProbeFailureClass, ProbeLabelTag, SignalClass,
        SignalMatcher, SIGNAL_PATTERNS,
    };
    use crate::status_readers::ProbeSummary;

    fn probe(status: Option<f64>, error: Option<&str>) -> ProbeSummary<'_> {
        ProbeSummary {
            ok: Some(false),
            status,
            error,
        }
    }

    #[test]
    fn unit_signal_patterns_are_lower_case_and_non_empty() {
        for entry in SIGNAL_PATTERNS {
            assert!(!entry.pattern.is_empty());
            assert_eq!(entry.pattern, entry.pattern.to_lowercase());
        }
        assert_eq!(
            signal_patterns_for(SignalClass::Auth),
            vec!["unauthorized", "invalid token", "not authorized", "bad request"]
        );
    }

    #[test]
    fn unit_linear_signal_scan_agrees_with_automaton() {
        for class in [SignalClass::Auth, SignalClass::Network, SignalClass::Dns] {
            let automaton_matcher = SignalMatcher::new(class);
            assert!(automaton_matcher.automaton.is_some());
            let linear_matcher = SignalMatcher {
                patterns: signal_patterns_for(class),
                automaton: None,
            };
            for text in [
                "unauthorized",
                "connect econnrefused 149.154.167.220:443",
                "getaddrinfo enotfound api.telegram.org",
                "request timeout",
                "conflict: terminated by other getupdates",
                "",
            ] {
                assert_eq!(
                    linear_matcher.matches(text),
                    automaton_matcher.matches(text),
                    "{class:?} {text}"
                );
            }
        }
    }

    #[test]
    fn regression_blank_error_text_is_present_for_network_but_absent_for_label() {
        let blank = probe(None, Some(""));
        assert!(!is_network_failure(blank.error, blank.status));
        assert_eq!(classify_probe_failure(&blank), ProbeFailureClass::Other);
        assert_eq!(format_probe_label(&blank, ProbeLabelTag::Other), "request failed");
    }

    #[test]
    fn unit_auth_classifier_matches_status_codes_without_text() {
        assert!(is_auth_failure(None, Some(401.0)));
        assert!(is_auth_failure(None, Some(403.0)));
        assert!(is_auth_failure(Some("everything is fine"), Some(403.0)));
        assert!(!is_auth_failure(None, Some(404.0)));
        assert!(!is_auth_failure(None, None));
    }

    #[test]
    fn unit_auth_classifier_matches_phrases_case_insensitively() {
        assert!(is_auth_failure(Some("Unauthorized"), None));
        assert!(is_auth_failure(Some("Telegram said: INVALID TOKEN"), Some(500.0)));
        assert!(is_auth_failure(Some("Bad Request: chat not found"), Some(400.0)));
        assert!(is_auth_failure(Some("bot is not authorized"), None));
        assert!(!is_auth_failure(Some("Forbidden: bot was blocked"), Some(429.0)));
    }

    #[test]
    fn unit_network_classifier_treats_missing_signals_as_connectivity_failure() {
        assert!(is_network_failure(None, None));
        assert!(!is_network_failure(Some(""), None));
    }

    #[test]
    fn unit_network_classifier_matches_connectivity_codes() {
        for text in [
            "connect ECONNREFUSED 149.154.167.220:443",
            "read ECONNRESET",
            "getaddrinfo ENOTFOUND api.telegram.org",
            "getaddrinfo EAI_AGAIN api.telegram.org",
            "ETIMEDOUT",
            "ESOCKETTIMEDOUT",
            "TypeError: fetch failed",
            "Network is down",
            "socket hang up",
        ] {
            assert!(is_network_failure(Some(text), None), "{text}");
        }
        assert!(!is_network_failure(Some("Conflict: terminated by other getUpdates"), None));
    }

    #[test]
    fn regression_network_classifier_keeps_broad_words() {
        assert!(is_network_failure(Some("request timeout after 10s"), None));
        assert!(is_network_failure(Some("unexpected network policy"), None));
        assert!(is_network_failure(Some("DNS lookup failed"), None));
    }

    #[test]
    fn unit_network_classifier_ignores_text_when_status_present() {
        assert!(!is_network_failure(Some("ECONNREFUSED"), Some(502.0)));
        assert!(!is_network_failure(None, Some(0.0)));
    }

    #[test]
    fn unit_dns_classifier_matches_resolver_errors_only() {
        assert!(is_dns_failure(Some("getaddrinfo ENOTFOUND api.telegram.org")));
        assert!(is_dns_failure(Some("Could not resolve host: api.telegram.org")));
        assert!(is_dns_failure(Some("Name or service not known")));
        assert!(is_dns_failure(Some("api.telegram.org is temporarily unresolvable")));
        assert!(!is_dns_failure(Some("connect ECONNREFUSED")));
        assert!(!is_dns_failure(None));
    }

    #[test]
    fn unit_format_probe_label_prefers_error_text_and_appends_status() {
        assert_eq!(
            format_probe_label(&probe(Some(401.0), Some("Unauthorized")), ProbeLabelTag::Auth),
            "Unauthorized (HTTP 401)"
        );
        assert_eq!(
            format_probe_label(&probe(Some(403.0), None), ProbeLabelTag::Auth),
            "unauthorized (HTTP 403)"
        );
        assert_eq!(
            format_probe_label(&probe(None, None), ProbeLabelTag::Other),
            "request failed"
        );
        assert_eq!(
            format_probe_label(&probe(None, Some("  ")), ProbeLabelTag::Other),
            "request failed"
        );
    }

    #[test]
    fn functional_classify_probe_failure_stops_at_first_branch() {
        assert_eq!(
            classify_probe_failure(&probe(Some(401.0), Some("network timeout"))),
            ProbeFailureClass::Auth
        );
        assert_eq!(
            classify_probe_failure(&probe(None, Some("getaddrinfo ENOTFOUND"))),
            ProbeFailureClass::Network { dns: true }
        );
        assert_eq!(
            classify_probe_failure(&probe(None, Some("ECONNREFUSED"))),
            ProbeFailureClass::Network { dns: false }
        );
        assert_eq!(
            classify_probe_failure(&probe(Some(500.0), Some("Internal Server Error"))),
            ProbeFailureClass::Other
        );
    }

    proptest! {
        #[test]
        fn property_auth_status_codes_dominate_text(
            error in proptest::option::of(any::<String>()),
            code in prop_oneof![Just(401.0f64), Just(403.0f64)],
        ) {
            prop_assert!(is_auth_failure(error.as_deref(), Some(code)));
        }

        #[test]
        fn property_network_classifier_is_false_with_any_status(
            error in proptest::option::of(any::<String>()),
            status in any::<i32>(),
        ) {
            prop_assert!(!is_network_failure(error.as_deref(), Some(f64::from(status))));
        }
    }
}
