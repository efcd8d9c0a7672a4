//! Hostname extraction from Traefik router rules
//!
//! A rule such as ``Host(`app.example.com`) && PathPrefix(`/api`)`` names
//! the hostname it serves inside a `Host(...)` matcher. Backtick, single and
//! double quotes are tried in that order; the first match wins.

use regex::Regex;
use std::sync::LazyLock;

static HOST_MATCHERS: LazyLock<[(&'static str, Regex); 3]> = LazyLock::new(|| {
    [
        ("backtick", compile(r"Host\(`([^`]+)`\)")),
        ("single-quote", compile(r"Host\('([^']+)'\)")),
        ("double-quote", compile(r#"Host\("([^"]+)"\)"#)),
    ]
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static host matcher compiles")
}

/// Extract the hostname a rule expression denotes
///
/// Returns an empty string when the rule has no `Host(...)` matcher with a
/// supported quote style. An empty result means "skip this route", not an
/// error.
pub fn extract_hostname(rule: &str) -> String {
    for (style, matcher) in HOST_MATCHERS.iter() {
        if let Some(captures) = matcher.captures(rule) {
            let hostname = captures[1].trim().to_string();
            tracing::debug!(rule, style, hostname = %hostname, "extracted hostname from rule");
            return hostname;
        }
    }

    tracing::debug!(rule, "no hostname found in rule");
    String::new()
}
