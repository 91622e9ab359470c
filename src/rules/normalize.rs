//! Rule normalization
//!
//! Turns filter-list lines and custom URLs into canonical `*domain*`
//! wildcard patterns.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::CandidatePattern;

lazy_static! {
    // `||` must be tried before `|`; only the first anchor is removed.
    static ref ANCHOR_REGEX: Regex = Regex::new(r"^(?:\|\||\||\.)").unwrap();
    static ref DOMAIN_END_REGEX: Regex = Regex::new(r"[/?*]").unwrap();
}

/// Why a line produced no pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    #[error("empty domain in rule '{0}'")]
    EmptyDomain(String),
    #[error("'{domain}' is not a dotted host (rule '{rule}')")]
    NotDotted { rule: String, domain: String },
    #[error("host contains whitespace in '{0}'")]
    Whitespace(String),
}

/// Returns true for lines a filter list carries that are not block rules:
/// blanks, `!` comments, `@@` exceptions and `[...]` headers.
pub fn is_skipped_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty()
        || line.starts_with('!')
        || line.starts_with("@@")
        || (line.starts_with('[') && line.ends_with(']'))
}

/// Extracts the domain part of a filter-list rule without validating it.
pub fn extract_rule_domain(raw: &str) -> String {
    let unanchored = ANCHOR_REGEX.replace(raw, "");
    let stripped = unanchored.replace('^', "");
    DOMAIN_END_REGEX
        .split(&stripped)
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Normalizes a single filter-list rule.
///
/// # Examples
/// ```
/// use foxyrules::rules::normalize_rule;
///
/// let p = normalize_rule("||example.com^").unwrap();
/// assert_eq!(p.pattern, "*example.com*");
/// assert!(normalize_rule("keyword").is_err());
/// ```
pub fn normalize_rule(raw: &str) -> Result<CandidatePattern, Rejected> {
    let domain = extract_rule_domain(raw);
    if domain.is_empty() {
        return Err(Rejected::EmptyDomain(raw.to_string()));
    }
    if !domain.contains('.') {
        return Err(Rejected::NotDotted {
            rule: raw.to_string(),
            domain,
        });
    }
    Ok(CandidatePattern::wildcard(&domain))
}

/// Extracts the host of a user supplied URL, dropping scheme, path and port.
pub fn extract_url_host(raw: &str) -> &str {
    let raw = raw.trim();
    let rest = match raw.find("://") {
        Some(pos) => &raw[pos + 3..],
        None => raw,
    };
    let host = rest.split('/').next().unwrap_or_default();
    match host.find(':') {
        Some(pos) => &host[..pos],
        None => host,
    }
}

/// Normalizes a custom URL such as `https://sub.example.org:8443/a`.
///
/// Unlike [`normalize_rule`] the host is not required to contain a dot,
/// so `localhost` style entries are accepted. Hosts with inner whitespace
/// are rejected.
pub fn normalize_url(raw: &str) -> Result<CandidatePattern, Rejected> {
    let host = extract_url_host(raw);
    if host.is_empty() {
        return Err(Rejected::EmptyDomain(raw.to_string()));
    }
    if host.chars().any(char::is_whitespace) {
        return Err(Rejected::Whitespace(raw.to_string()));
    }
    Ok(CandidatePattern::wildcard(host))
}
