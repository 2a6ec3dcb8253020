//! errors.rs - Custom error types for the piiscrub-core library.
//!
//! Redaction itself never fails. Everything in here describes a caller
//! contract violation: a bad marker, a detector rule that will not compile,
//! or a configuration file that names something the pipeline does not know.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::patterns::Category;

/// This enum represents all possible error types in the `piiscrub-core` library.
///
/// New variants may be added as the configuration surface grows, so the enum
/// is `#[non_exhaustive]`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PiiScrubError {
    #[error("Failed to compile detector '{0}': {1}")]
    RuleCompilationError(Category, regex::Error),

    #[error("Detector '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(Category, usize, usize),

    #[error("Invalid marker '{0}': a marker must not contain decimal digits")]
    InvalidMarker(String),

    #[error("Unknown detector '{0}'. Expected one of: passport, date, phone, national_insurance, vehicle_plate")]
    UnknownDetector(String),

    #[error("Invalid configuration:\n{0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
