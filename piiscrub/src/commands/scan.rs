// piiscrub/src/commands/scan.rs
//! `piiscrub scan`: report personal data without changing the input.
//!
//! Matched text never leaves the process. The JSON report carries detector
//! names, offsets and keyed sample hashes for named-detector matches only;
//! masked digits appear as a count.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};

use piiscrub_core::{RedactionMatch, RedactionSummaryItem, SanitizationEngine, DIGIT_RULE_NAME};

use crate::cli::ScanCommand;
use crate::commands::{build_engine, info_msg, read_input, warn_msg};
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

/// The machine-readable scan result.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Matches from named detectors; masked digits are not counted.
    pub total_detections: usize,
    pub masked_digits: usize,
    pub summary: Vec<RedactionSummaryItem>,
    pub matches: Vec<RedactionMatch>,
}

impl ScanReport {
    pub fn build(engine: &dyn SanitizationEngine, input: &str) -> Self {
        let (matches, summary) = engine.analyze_matches(input);

        let (digits, detections): (Vec<_>, Vec<_>) = summary.iter().partition(|s| s.rule_name == DIGIT_RULE_NAME);
        Self {
            total_detections: detections.iter().map(|s| s.occurrences).sum(),
            masked_digits: digits.iter().map(|s| s.occurrences).sum(),
            summary,
            matches,
        }
    }
}

/// Entry point for the `scan` subcommand.
pub fn run(cmd: &ScanCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    let engine = build_engine(&cmd.detectors)?;
    let input = read_input(cmd.detectors.input_file.as_deref())?;
    info!("Scanning {} bytes of input.", input.len());
    if input.trim().is_empty() && !quiet {
        warn_msg("Input is empty; nothing to scan.", theme);
    }

    let report = ScanReport::build(&engine, &input);

    if cmd.json_stdout {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to serialize scan report")?;
        writeln!(writer)?;
    } else {
        if let Some(path) = &cmd.json_file {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
            fs::write(path, json).with_context(|| format!("Failed to write scan report: {}", path.display()))?;
            if !quiet {
                info_msg(format!("Scan report written to {}", path.display()), theme);
            }
        }
        if !quiet {
            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            redaction_summary::print_summary(&report.summary, &mut stdout.lock(), theme, supports_color)?;
        }
    }

    if let Some(threshold) = cmd.fail_over_threshold {
        if report.total_detections > threshold {
            bail!(
                "Found {} detection(s), exceeding the threshold of {}",
                report.total_detections,
                threshold
            );
        }
    }
    Ok(())
}
