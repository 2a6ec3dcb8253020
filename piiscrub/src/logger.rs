// piiscrub/src/logger.rs
//! Logger setup for the piiscrub binary.
//!
//! Logs go to stderr so they never mix with redacted output on stdout.
//! `RUST_LOG` is honoured unless the caller forces a level.

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`. Safe to call more than once; later calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()));
    let _ = builder.try_init();
}
