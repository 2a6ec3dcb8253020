// piiscrub-core/src/engines/pii_engine.rs
//! The ordered PII redaction pipeline.
//!
//! Active detectors run one after another, each over the output of the one
//! before, and each replaces every match with the marker. Once a span is a
//! marker it is plain text to later passes. A final digit pass masks every
//! remaining ASCII digit with `X`; it runs whatever the detector set says.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;

use crate::config::RedactionConfig;
use crate::detectors::{validate_marker, Detectors};
use crate::engine::SanitizationEngine;
use crate::errors::PiiScrubError;
use crate::patterns::{DEFAULT_MARKER, DIGIT_MASK, DIGIT_RE, DIGIT_RULE_NAME};
use crate::redaction_match::{
    ensure_match_hashes, log_redaction_action_debug, RedactionMatch, RedactionSummaryItem,
};
use crate::sanitizers::compiler::get_or_compile_detectors;

const MODULE_PATH: &str = "piiscrub_core::engines::pii_engine";

/// Replaces every match of `regex` in `text` with `replacement`, inserted
/// literally (no `$` group expansion). Returns the new text and match count.
fn replace_pass(
    text: &str,
    rule_name: &str,
    regex: &Regex,
    replacement: &str,
    mut sink: Option<&mut Vec<RedactionMatch>>,
) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut count = 0;

    for m in regex.find_iter(text) {
        output.push_str(&text[last_end..m.start()]);
        output.push_str(replacement);
        last_end = m.end();
        count += 1;

        log_redaction_action_debug(MODULE_PATH, m.as_str(), replacement, rule_name);
        if let Some(matches) = sink.as_deref_mut() {
            matches.push(RedactionMatch {
                rule_name: rule_name.to_string(),
                original_string: m.as_str().to_string(),
                sanitized_string: replacement.to_string(),
                start: m.start() as u64,
                end: m.end() as u64,
                sample_hash: None,
            });
        }
    }

    if count == 0 {
        return (text.to_string(), 0);
    }
    output.push_str(&text[last_end..]);
    (output, count)
}

/// Runs the full pipeline. `marker` must already be validated.
///
/// Only named-detector replacements reach `sink`. Masked digits are counted
/// in the summary but never listed.
pub(crate) fn run_pipeline(
    content: &str,
    marker: &str,
    detectors: &Detectors,
    mut sink: Option<&mut Vec<RedactionMatch>>,
) -> (String, Vec<RedactionSummaryItem>) {
    let mut text = content.to_string();
    let mut summary = Vec::new();

    for detector in detectors.active() {
        let rule_name = detector.category.as_str();
        let (next, count) = replace_pass(&text, rule_name, &detector.regex, marker, sink.as_deref_mut());
        debug!("Pass '{}' replaced {} span(s).", rule_name, count);
        if count > 0 {
            summary.push(RedactionSummaryItem {
                rule_name: rule_name.to_string(),
                occurrences: count,
            });
        }
        text = next;
    }

    let (masked, digits) = replace_pass(&text, DIGIT_RULE_NAME, &DIGIT_RE, DIGIT_MASK, None);
    debug!("Catch-all pass masked {} digit(s).", digits);
    if digits > 0 {
        summary.push(RedactionSummaryItem {
            rule_name: DIGIT_RULE_NAME.to_string(),
            occurrences: digits,
        });
    }

    (masked, summary)
}

/// A `SanitizationEngine` that runs the PII pipeline with a fixed marker and
/// detector set. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct PiiEngine {
    detectors: Arc<Detectors>,
    marker: String,
}

impl PiiEngine {
    pub fn new(marker: impl Into<String>, detectors: Detectors) -> Result<Self, PiiScrubError> {
        let marker = marker.into();
        validate_marker(&marker)?;
        Ok(Self {
            detectors: Arc::new(detectors),
            marker,
        })
    }

    /// Builds an engine from a configuration, reusing cached compiled
    /// detectors when the same configuration was seen before.
    pub fn from_config(config: &RedactionConfig) -> Result<Self> {
        config.validate().context("Invalid redaction configuration")?;
        let detectors = get_or_compile_detectors(config)
            .context("Failed to compile detectors for PiiEngine")?;
        Ok(Self {
            detectors,
            marker: config.marker().to_string(),
        })
    }
}

impl Default for PiiEngine {
    fn default() -> Self {
        Self {
            detectors: Arc::new(Detectors::default()),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

impl SanitizationEngine for PiiEngine {
    fn sanitize(&self, content: &str) -> (String, Vec<RedactionSummaryItem>) {
        run_pipeline(content, &self.marker, &self.detectors, None)
    }

    fn analyze_for_stats(&self, content: &str) -> Vec<RedactionSummaryItem> {
        run_pipeline(content, &self.marker, &self.detectors, None).1
    }

    fn find_matches(&self, content: &str) -> Vec<RedactionMatch> {
        self.analyze_matches(content).0
    }

    fn analyze_matches(&self, content: &str) -> (Vec<RedactionMatch>, Vec<RedactionSummaryItem>) {
        let mut matches = Vec::new();
        let (_, summary) = run_pipeline(content, &self.marker, &self.detectors, Some(&mut matches));
        ensure_match_hashes(&mut matches);
        (matches, summary)
    }

    fn marker(&self) -> &str {
        &self.marker
    }

    fn detectors(&self) -> &Detectors {
        &self.detectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::Detector;
    use crate::patterns::Category;

    fn engine(detectors: Detectors) -> PiiEngine {
        PiiEngine::new(DEFAULT_MARKER, detectors).unwrap()
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let (out, summary) = PiiEngine::default().sanitize("call 02079461234 or 02079461235");
        assert_eq!(out, "call [PII Removed] or [PII Removed]");
        assert_eq!(
            summary,
            vec![RedactionSummaryItem { rule_name: "phone".to_string(), occurrences: 2 }]
        );
    }

    #[test]
    fn test_passport_runs_before_digit_catch_all() {
        let (out, _) = PiiEngine::default().sanitize("passport 5333800068GBR8812049F2509286 ok");
        assert_eq!(out, "passport [PII Removed] ok");
    }

    #[test]
    fn test_disabled_detector_falls_through_to_digits() {
        let (out, summary) = engine(Detectors::only(Category::Phone)).sanitize("5333800068GBR8812049F2509286");
        assert_eq!(out, "XXXXXXXXXXGBRXXXXXXXFXXXXXXX");
        assert_eq!(summary.last().unwrap().rule_name, DIGIT_RULE_NAME);
    }

    #[test]
    fn test_catch_all_runs_with_no_detectors() {
        let (out, summary) = engine(Detectors::none()).sanitize("QQ123456C");
        assert_eq!(out, "QQXXXXXXC");
        assert_eq!(summary, vec![RedactionSummaryItem { rule_name: "digit".to_string(), occurrences: 6 }]);
    }

    #[test]
    fn test_marker_is_inserted_literally() {
        let custom = PiiEngine::new("<$name gone>", Detectors::only(Category::Phone)).unwrap();
        assert_eq!(custom.sanitize("02079461234").0, "<$name gone>");
    }

    #[test]
    fn test_marker_with_digits_is_rejected() {
        let err = PiiEngine::new("[PII 1]", Detectors::default()).unwrap_err();
        assert!(matches!(err, PiiScrubError::InvalidMarker(_)));
    }

    #[test]
    fn test_custom_rule_is_used() {
        let iso_dates = Detector::from_pattern(Category::Date, r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap();
        let (out, _) = engine(Detectors::default().with_rule(iso_dates)).sanitize("born 1964-10-21");
        assert_eq!(out, "born [PII Removed]");
    }

    #[test]
    fn test_find_matches_reports_each_pass() {
        let matches = PiiEngine::default().find_matches("QQ123456C on 21/10/1964, room 4");
        let names: Vec<&str> = matches.iter().map(|m| m.rule_name.as_str()).collect();
        assert_eq!(names, vec!["date", "national_insurance"]);
        assert!(matches.iter().all(|m| m.sample_hash.is_some()));
        assert_eq!(matches[0].original_string, "21/10/1964");
    }

    #[test]
    fn test_masked_digits_are_counted_not_listed() {
        let (matches, summary) = PiiEngine::default().analyze_matches("my PIN is 4821");
        assert!(matches.is_empty());
        assert_eq!(summary, vec![RedactionSummaryItem { rule_name: DIGIT_RULE_NAME.to_string(), occurrences: 4 }]);
    }

    #[test]
    fn test_analyze_matches_agrees_with_sanitize() {
        let engine = PiiEngine::default();
        let text = "NI QQ123456C, tel 02079461234, 3 kids";
        let (matches, summary) = engine.analyze_matches(text);
        assert_eq!(summary, engine.sanitize(text).1);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (out, summary) = PiiEngine::default().sanitize("");
        assert_eq!(out, "");
        assert!(summary.is_empty());
    }
}
