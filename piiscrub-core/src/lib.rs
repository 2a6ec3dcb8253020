// piiscrub-core/src/lib.rs
//! # piiscrub Core Library
//!
//! `piiscrub-core` removes personally identifiable information from free-text
//! survey comments before they are stored or shown to coders. It also carries
//! the rule-based classifier that normalises the GOV.UK page URL a survey was
//! filled in on.
//!
//! ## Modules
//!
//! * `patterns`: The built-in detectors, one per PII category.
//! * `detectors`: The per-call configuration surface (which detectors run).
//! * `config`: YAML configuration, validation and merging.
//! * `sanitizers`: Compilation and caching of configured detectors.
//! * `engine`: The `SanitizationEngine` trait.
//! * `engines`: `PiiEngine`, the ordered redaction pipeline.
//! * `headless`: One-shot helpers (`redact`, `redact_with`).
//! * `redaction_match`: Reporting types and PII-safe logging helpers.
//! * `urls`: `clean_url`, the survey URL classifier.
//! * `errors`: The library error type.
//!
//! ## Pipeline
//!
//! Detectors run in a fixed order, each over the output of the previous one:
//! passport, date, phone, national insurance, vehicle plate. Every match
//! becomes the marker (`[PII Removed]` by default). A final pass replaces
//! each remaining ASCII digit with `X`, so no digit survives outside a
//! marker whatever the detector configuration.
//!
//! ## Usage Example
//!
//! ```rust
//! use piiscrub_core::{redact, redact_with, Category, Detectors};
//!
//! assert_eq!(redact("Call me on 0207 946 1234"), "Call me on [PII Removed]");
//!
//! let dates_only = Detectors::only(Category::Date);
//! let out = redact_with("born 21/10/1964, NI QQ123456C", "<pii>", &dates_only).unwrap();
//! assert_eq!(out, "born <pii>, NI QQXXXXXXC");
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod detectors;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod patterns;
pub mod redaction_match;
pub mod sanitizers;
pub mod urls;

pub use config::{merge_configs, DetectorRule, RedactionConfig, MAX_PATTERN_LENGTH};

pub use errors::PiiScrubError;

pub use detectors::{validate_marker, Detector, Detectors};

pub use patterns::{Category, DEFAULT_MARKER, DIGIT_MASK, DIGIT_RULE_NAME};

pub use engine::SanitizationEngine;

pub use engines::pii_engine::PiiEngine;

pub use headless::{headless_sanitize_string, redact, redact_with};

pub use redaction_match::{RedactionMatch, RedactionSummaryItem};

pub use sanitizers::compiler::{compile_detectors, get_or_compile_detectors};

pub use urls::{clean_url, CleanedUrl};
