// piiscrub/src/ui/diff_viewer.rs
//! Line-oriented diff between the original and the redacted text.
//!
//! Removed lines are shown in red with `-`, their redacted replacements in
//! green with `+`.

use std::io::{self, Write};

use diffy::{create_patch, Line as DiffLine};

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);
    writeln!(writer, "{}", paint("--- Diff View ---", ThemeEntry::DiffHeader, theme, supports_color))?;

    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    changed = true;
                    let text = format!("-{}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", paint(&text, ThemeEntry::DiffRemoved, theme, supports_color))?;
                }
                DiffLine::Insert(s) => {
                    changed = true;
                    let text = format!("+{}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", paint(&text, ThemeEntry::DiffAdded, theme, supports_color))?;
                }
                DiffLine::Context(s) => writeln!(writer, " {}", s.trim_end_matches('\n'))?,
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes.")?;
    }
    writeln!(writer, "{}", paint("-----------------", ThemeEntry::DiffHeader, theme, supports_color))
}
