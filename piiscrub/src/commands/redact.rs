// piiscrub/src/commands/redact.rs
//! `piiscrub redact`: replace personal data in a file or stdin.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use piiscrub_core::{RedactionSummaryItem, SanitizationEngine};

use crate::cli::RedactCommand;
use crate::commands::{build_engine, read_input, success_msg};
use crate::ui::diff_viewer;
use crate::ui::redaction_summary;
use crate::ui::theme::ThemeMap;

/// Options for a single redaction run, detached from clap.
pub struct RedactOptions {
    pub input: String,
    pub diff: bool,
    pub output_path: Option<PathBuf>,
    pub no_redaction_summary: bool,
    pub quiet: bool,
}

/// Entry point for the `redact` subcommand.
pub fn run(cmd: &RedactCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    let engine = build_engine(&cmd.detectors)?;

    if cmd.line_buffered {
        if cmd.detectors.input_file.is_some() || cmd.output.is_some() {
            anyhow::bail!("--line-buffered reads stdin and writes stdout; it cannot be combined with --input-file or --output");
        }
        let stdin = io::stdin();
        let stdout = io::stdout();
        return run_line_buffered(&engine, stdin.lock(), &mut stdout.lock());
    }

    let opts = RedactOptions {
        input: read_input(cmd.detectors.input_file.as_deref())?,
        diff: cmd.diff,
        output_path: cmd.output.clone(),
        no_redaction_summary: cmd.no_summary,
        quiet,
    };
    run_redact_opts(&engine, opts, theme)
}

/// Redacts `opts.input` and writes the result, the optional diff and the summary.
pub fn run_redact_opts(engine: &dyn SanitizationEngine, opts: RedactOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting redaction.");
    let (sanitized, summary) = engine.sanitize(&opts.input);
    debug!(
        "Content redacted. Original length: {}, redacted length: {}",
        opts.input.len(),
        sanitized.len()
    );

    handle_primary_output(&opts, &sanitized, theme)?;
    handle_redaction_summary(&summary, &opts, theme)?;

    info!("Redaction completed.");
    Ok(())
}

fn handle_primary_output(opts: &RedactOptions, sanitized: &str, theme: &ThemeMap) -> Result<()> {
    if let Some(path) = &opts.output_path {
        let mut file =
            fs::File::create(path).with_context(|| format!("Failed to create output file: {}", path.display()))?;
        if opts.diff {
            diff_viewer::print_diff(&opts.input, sanitized, &mut file, theme, false)?;
        } else {
            file.write_all(sanitized.as_bytes())?;
        }
        if !opts.quiet {
            success_msg(format!("Redacted content written to {}", path.display()), theme);
        }
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        if opts.diff {
            diff_viewer::print_diff(&opts.input, sanitized, &mut writer, theme, supports_color)?;
        } else {
            writer.write_all(sanitized.as_bytes())?;
            if !sanitized.ends_with('\n') {
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

fn handle_redaction_summary(summary: &[RedactionSummaryItem], opts: &RedactOptions, theme: &ThemeMap) -> Result<()> {
    if !opts.no_redaction_summary && !opts.quiet {
        let supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(summary, &mut io::stderr(), theme, supports_color)?;
    }
    Ok(())
}

/// Redacts one line at a time, flushing after each so the output keeps pace
/// with a pipe.
pub fn run_line_buffered<R: BufRead, W: Write>(engine: &dyn SanitizationEngine, reader: R, writer: &mut W) -> Result<()> {
    info!("Processing input line by line.");
    for line in reader.lines() {
        let line = line.context("Failed to read line from stdin")?;
        writeln!(writer, "{}", sanitize_single_line(&line, engine))?;
        writer.flush()?;
    }
    Ok(())
}

pub fn sanitize_single_line(line: &str, engine: &dyn SanitizationEngine) -> String {
    engine.sanitize(line).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiscrub_core::PiiEngine;
    use std::io::Cursor;

    #[test]
    fn test_line_buffered_redacts_each_line() {
        let engine = PiiEngine::default();
        let input = Cursor::new("call 02079461234\nno pii here\nNI QQ123456C\n");
        let mut out = Vec::new();
        run_line_buffered(&engine, input, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "call [PII Removed]\nno pii here\nNI [PII Removed]\n"
        );
    }

    #[test]
    fn test_sanitize_single_line_masks_digits() {
        assert_eq!(sanitize_single_line("room 101", &PiiEngine::default()), "room XXX");
    }

    #[test]
    fn test_output_file_receives_redacted_text() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.txt");
        let opts = RedactOptions {
            input: "born 21/10/1964\n".into(),
            diff: false,
            output_path: Some(path.clone()),
            no_redaction_summary: true,
            quiet: true,
        };
        run_redact_opts(&PiiEngine::default(), opts, &crate::ui::theme::default_theme_map())?;
        assert_eq!(fs::read_to_string(path)?, "born [PII Removed]\n");
        Ok(())
    }
}
