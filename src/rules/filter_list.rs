//! Filter-list parsing
//!
//! Applies the line pre-filter and the rule normalizer to a decoded
//! gfwlist body.

use log::debug;

use super::dedup::Deduplicator;
use super::normalize::{is_skipped_line, normalize_rule, normalize_url, Rejected};
use crate::models::CandidatePattern;

/// Structured result of converting a batch of raw lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Unique patterns, first occurrence wins.
    pub candidates: Vec<CandidatePattern>,
    /// Comment, exception, header and blank lines.
    pub skipped: usize,
    /// Lines that failed normalization.
    pub invalid: Vec<Rejected>,
    /// Lines that repeated a pattern already produced by this batch.
    pub duplicates: usize,
}

impl ConversionReport {
    fn push(&mut self, dedup: &mut Deduplicator, result: Result<CandidatePattern, Rejected>) {
        match result {
            Ok(candidate) => {
                let outcome = dedup.filter(std::iter::once(candidate));
                self.candidates.extend(outcome.accepted);
                self.duplicates += outcome.duplicates.len();
            }
            Err(rejected) => {
                debug!("Rejected rule: {}", rejected);
                self.invalid.push(rejected);
            }
        }
    }
}

/// Converts the decoded text of a filter list, one rule per line.
pub fn parse_filter_list(content: &str) -> ConversionReport {
    let mut report = ConversionReport::default();
    let mut dedup = Deduplicator::new();

    for line in content.lines() {
        if is_skipped_line(line) {
            report.skipped += 1;
            continue;
        }
        report.push(&mut dedup, normalize_rule(line.trim()));
    }
    report
}

/// Converts user supplied URLs with the custom-URL normalizer.
///
/// Comment, exception and header lines are skipped just like in a filter
/// list, so a note in the rule file never becomes a pattern.
pub fn parse_custom_urls<I, S>(urls: I) -> ConversionReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ConversionReport::default();
    let mut dedup = Deduplicator::new();

    for url in urls {
        let url = url.as_ref().trim();
        if is_skipped_line(url) {
            report.skipped += 1;
            continue;
        }
        report.push(&mut dedup, normalize_url(url));
    }
    report
}

/// Splits an operator supplied line on commas and whitespace.
pub fn split_interactive_input(line: &str) -> Vec<String> {
    line.replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_filter_list() {
        let content = "||foo.com^\n! comment\n@@bar.com\nbaz.net/path\n";
        let report = parse_filter_list(content);
        let got: Vec<_> = report
            .candidates
            .iter()
            .map(|p| (p.pattern.as_str(), p.title.as_str()))
            .collect();
        assert_eq!(got, vec![("*foo.com*", "foo.com"), ("*baz.net*", "baz.net")]);
        assert_eq!(report.skipped, 2);
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_different_anchors_collapse() {
        let report = parse_filter_list("||example.com^\n.example.com\n|example.com\n");
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.duplicates, 2);
    }

    #[test]
    fn test_header_and_invalid_lines() {
        let content = "[AutoProxy 0.2.9]\n\nkeyword\n/^https?:\\/\\/[^\\/]+example\\.com/\n  ||ok.org  \n";
        let report = parse_filter_list(content);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.invalid.len(), 2);
        assert_eq!(report.candidates[0].title, "ok.org");
    }

    #[test]
    fn test_custom_urls() {
        let report = parse_custom_urls(vec![
            "https://sub.example.org:8443/a/b",
            "sub.example.org",
            "",
            "http://:80/",
        ]);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].pattern, "*sub.example.org*");
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.invalid.len(), 1);
    }

    #[test]
    fn test_custom_urls_skip_notes_and_exceptions() {
        let report = parse_custom_urls(["! my notes", "@@bar.com", "[Section]", "foo.com"]);
        let patterns: Vec<_> = report.candidates.iter().map(|p| p.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["*foo.com*"]);
        assert_eq!(report.skipped, 3);
        assert!(report.invalid.is_empty());
    }

    #[test]
    fn test_split_interactive_input() {
        assert_eq!(
            split_interactive_input(" a.com,b.com  c.com,, "),
            vec!["a.com", "b.com", "c.com"]
        );
        assert!(split_interactive_input("  , ").is_empty());
    }
}
