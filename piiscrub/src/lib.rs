// piiscrub/src/lib.rs
//! # piiscrub CLI
//!
//! Terminal front end for `piiscrub-core`: redact survey comments from files
//! or pipes, scan them for PII without changing them, and classify survey
//! page URLs.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
