// piiscrub/src/commands/classify_url.rs
//! `piiscrub classify-url`: normalise survey page URLs.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use piiscrub_core::{clean_url, CleanedUrl};

use crate::cli::ClassifyUrlCommand;

pub fn run(cmd: &ClassifyUrlCommand) -> Result<()> {
    let cleaned: Vec<CleanedUrl> = cmd.urls.iter().map(|url| clean_url(url)).collect();
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    if cmd.json {
        serde_json::to_writer_pretty(&mut writer, &cleaned).context("Failed to serialize URL classification")?;
        writeln!(writer)?;
    } else {
        write_table(&cleaned, &mut writer, supports_color)?;
    }
    Ok(())
}

fn write_table<W: Write>(cleaned: &[CleanedUrl], writer: &mut W, supports_color: bool) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if !supports_color {
        table.force_no_tty();
    }
    table.set_header(vec!["URL", "Page", "Organisation", "Section", "Subsection"]);
    for c in cleaned {
        table.add_row(vec![
            c.full_url.as_str(),
            c.page.as_str(),
            c.org0.as_deref().unwrap_or("-"),
            c.section0.as_deref().unwrap_or("-"),
            c.section1.as_deref().unwrap_or("-"),
        ]);
    }
    writeln!(writer, "{table}")
}
