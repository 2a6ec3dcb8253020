// piiscrub/src/commands/mod.rs
//! Subcommand implementations and the plumbing they share.

pub mod classify_url;
pub mod redact;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use piiscrub_core::{merge_configs, PiiEngine, RedactionConfig};

use crate::cli::DetectorArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Builds the effective configuration: built-in defaults, overlaid with the
/// YAML file if one was given, then the command-line marker and
/// enable/disable lists.
pub fn build_config(args: &DetectorArgs) -> Result<RedactionConfig> {
    let user = args
        .config
        .as_ref()
        .map(RedactionConfig::load_from_file)
        .transpose()?;
    let mut config = merge_configs(RedactionConfig::default(), user);

    if let Some(marker) = &args.marker {
        config.marker = Some(marker.clone());
    }
    config
        .set_active_detectors(&args.enable, &args.disable)
        .context("Invalid --enable/--disable selection")?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Builds the redaction engine for `args`.
pub fn build_engine(args: &DetectorArgs) -> Result<PiiEngine> {
    let config = build_config(args)?;
    PiiEngine::from_config(&config).context("Failed to build the redaction engine")
}

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiscrub_core::{Category, SanitizationEngine};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test_log::test]
    fn test_build_config_applies_cli_overrides() -> Result<()> {
        let args = DetectorArgs {
            marker: Some("<gone>".into()),
            disable: vec!["phone".into()],
            ..Default::default()
        };
        let config = build_config(&args)?;
        assert_eq!(config.marker(), "<gone>");
        assert!(!config.is_enabled(Category::Phone));
        assert!(config.is_enabled(Category::Date));
        Ok(())
    }

    #[test_log::test]
    fn test_build_engine_reads_config_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "marker: \"<pii>\"")?;
        let args = DetectorArgs {
            config: Some(file.path().to_path_buf()),
            enable: vec!["national-insurance".into()],
            ..Default::default()
        };
        let engine = build_engine(&args)?;
        assert_eq!(engine.sanitize("QQ123456C on 21/10/1964").0, "<pii> on XX/XX/XXXX");
        Ok(())
    }

    #[test]
    fn test_build_engine_rejects_digit_marker() {
        let args = DetectorArgs {
            marker: Some("[1]".into()),
            ..Default::default()
        };
        assert!(build_engine(&args).is_err());
    }

    #[test]
    fn test_unknown_detector_name_is_an_error() {
        let args = DetectorArgs {
            enable: vec!["email".into()],
            ..Default::default()
        };
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_read_input_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "hello 42")?;
        assert_eq!(read_input(Some(file.path()))?, "hello 42");
        assert!(read_input(Some(Path::new("/nonexistent/piiscrub-input.txt"))).is_err());
        Ok(())
    }
}
