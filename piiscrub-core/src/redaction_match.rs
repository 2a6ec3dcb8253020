//! Data structures for reporting redactions, and logging helpers that keep
//! raw PII out of debug output.
//!
//! Sample hashes are HMAC-SHA256 under a key drawn once per process. They
//! group identical matches within one report, but cannot be checked against
//! guessed values by anyone reading the report.
//!
//! License: MIT OR APACHE 2.0

use hmac::{Hmac, Mac};
use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

use crate::errors::PiiScrubError;

pub type SampleHashKey = [u8; 32];

lazy_static! {
    static ref RUN_HASH_KEY: SampleHashKey = rand::random();

    /// Whether raw matched text may appear in debug logs. Read once per process.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PIISCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single span replaced by one pass of the pipeline.
///
/// `start`/`end` are byte offsets into the text as that pass saw it, i.e.
/// after every earlier pass had already run. The raw text is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedactionMatch {
    pub rule_name: String,
    #[serde(skip_serializing, default)]
    pub original_string: String,
    pub sanitized_string: String,
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub sample_hash: Option<String>,
}

/// Per-detector totals for one redaction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
}

/// Stand-in for sensitive text in logs.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_redaction_action_debug(
    module_path: &str,
    original_sensitive_content: &str,
    sanitized_replacement: &str,
    rule_name: &str,
) {
    debug!(
        "{} Redaction action: Original='{}', Redacted='{}' for detector '{}'",
        module_path,
        get_loggable_content(original_sensitive_content),
        sanitized_replacement,
        rule_name
    );
}

/// Keyed fingerprint of a match: case and whitespace differences in the
/// snippet do not change it, the key does.
pub fn canonical_sample_hash(key: &[u8], rule_id: &str, snippet: &str) -> Result<String, PiiScrubError> {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| PiiScrubError::Fatal(format!("Failed to create sample hash HMAC: {}", e)))?;
    mac.update(rule_id.as_bytes());
    mac.update(b":");
    mac.update(normalized.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Fills in missing sample hashes with this process's key.
pub fn ensure_match_hashes(matches: &mut [RedactionMatch]) {
    for m in matches.iter_mut() {
        if m.sample_hash.is_some() {
            continue;
        }
        match canonical_sample_hash(&RUN_HASH_KEY[..], &m.rule_name, &m.original_string) {
            Ok(hash) => m.sample_hash = Some(hash),
            Err(e) => warn!("Leaving sample hash empty for detector '{}': {}", m.rule_name, e),
        }
    }
}
