// piiscrub-core/src/headless.rs
//! One-shot convenience wrappers over `PiiEngine` for callers that just want
//! a redacted string back.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;

use crate::config::RedactionConfig;
use crate::detectors::{validate_marker, Detectors};
use crate::engine::SanitizationEngine;
use crate::engines::pii_engine::{run_pipeline, PiiEngine};
use crate::errors::PiiScrubError;

lazy_static! {
    static ref DEFAULT_ENGINE: PiiEngine = PiiEngine::default();
}

/// Redacts `text` with the default marker and every built-in detector.
///
/// ```
/// assert_eq!(piiscrub_core::redact("QQ 12 34 56 C"), "[PII Removed]");
/// assert_eq!(piiscrub_core::redact("a test with 1, 23, and 456"), "a test with X, XX, and XXX");
/// ```
pub fn redact(text: &str) -> String {
    DEFAULT_ENGINE.sanitize(text).0
}

/// Redacts `text` with an explicit marker and detector set. Fails only when
/// `marker` contains a digit.
pub fn redact_with(text: &str, marker: &str, detectors: &Detectors) -> Result<String, PiiScrubError> {
    validate_marker(marker)?;
    Ok(run_pipeline(text, marker, detectors, None).0)
}

/// Builds an engine from `config` and redacts `content` with it.
pub fn headless_sanitize_string(config: &RedactionConfig, content: &str) -> Result<String> {
    let engine = PiiEngine::from_config(config)?;
    Ok(engine.sanitize(content).0)
}
