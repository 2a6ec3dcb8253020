// piiscrub-core/src/engine.rs
//! Defines the core `SanitizationEngine` trait.
//!
//! Front ends (the CLI, a web handler storing survey comments) talk to the
//! engine through this trait so they never depend on how detection is done.
//!
//! License: MIT OR APACHE 2.0

use crate::detectors::Detectors;
use crate::redaction_match::{RedactionMatch, RedactionSummaryItem};

/// The functionality every redaction engine provides.
///
/// None of these methods can fail: any input string, including an empty or
/// non-ASCII one, produces a deterministic result. Configuration errors are
/// reported when the engine is built.
pub trait SanitizationEngine: Send + Sync {
    /// Redacts `content` and returns the redacted text together with
    /// per-detector replacement counts.
    fn sanitize(&self, content: &str) -> (String, Vec<RedactionSummaryItem>);

    /// Counts what `sanitize` would replace, without returning the text.
    fn analyze_for_stats(&self, content: &str) -> Vec<RedactionSummaryItem>;

    /// Lists every named-detector replacement, pass by pass, with keyed
    /// sample hashes filled in. Masked digits are not listed.
    fn find_matches(&self, content: &str) -> Vec<RedactionMatch>;

    /// `find_matches` and `analyze_for_stats` from a single pipeline run.
    fn analyze_matches(&self, content: &str) -> (Vec<RedactionMatch>, Vec<RedactionSummaryItem>);

    /// The literal substituted for detected spans.
    fn marker(&self) -> &str;

    /// The detector set the engine runs.
    fn detectors(&self) -> &Detectors;
}
