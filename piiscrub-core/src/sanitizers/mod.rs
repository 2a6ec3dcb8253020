//! Detector compilation for piiscrub.
//!
//! This module turns configuration (built-in rules plus any custom patterns
//! from a YAML file) into the compiled `Detectors` the pipeline runs. It works
//! closely with `config` (rule definitions) and `patterns` (built-in rules).

pub mod compiler;
