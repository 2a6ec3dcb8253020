// piiscrub/src/main.rs
//! piiscrub entry point.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use piiscrub::cli::{Cli, Commands};
use piiscrub::commands::{self, error_msg};
use piiscrub::logger;
use piiscrub::ui::theme::{default_theme_map, ThemeMap};

fn run(cli: &Cli, theme: &ThemeMap) -> Result<()> {
    match &cli.command {
        Commands::Redact(cmd) => commands::redact::run(cmd, cli.quiet, theme),
        Commands::Scan(cmd) => commands::scan::run(cmd, cli.quiet, theme),
        Commands::ClassifyUrl(cmd) => commands::classify_url::run(cmd),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme = default_theme_map();
    match run(&cli, &theme) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{e:#}"), &theme);
            ExitCode::FAILURE
        }
    }
}
