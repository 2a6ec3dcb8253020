// piiscrub/src/ui/theme.rs
//! Colour palette for terminal output.
//!
//! Each logical part of the output maps to an ANSI colour. Colour is only
//! applied when the destination stream is a terminal.

use owo_colors::{AnsiColors, OwoColorize};
use std::collections::HashMap;

/// Type alias for the theme map.
pub type ThemeMap = HashMap<ThemeEntry, AnsiColors>;

/// The parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
    SummaryRuleName,
    SummaryOccurrences,
}

/// The palette used when nothing overrides it.
pub fn default_theme_map() -> ThemeMap {
    HashMap::from([
        (ThemeEntry::Header, AnsiColors::BrightCyan),
        (ThemeEntry::Success, AnsiColors::Green),
        (ThemeEntry::Info, AnsiColors::Cyan),
        (ThemeEntry::Warn, AnsiColors::Yellow),
        (ThemeEntry::Error, AnsiColors::Red),
        (ThemeEntry::DiffAdded, AnsiColors::Green),
        (ThemeEntry::DiffRemoved, AnsiColors::Red),
        (ThemeEntry::DiffHeader, AnsiColors::Yellow),
        (ThemeEntry::SummaryRuleName, AnsiColors::BrightMagenta),
        (ThemeEntry::SummaryOccurrences, AnsiColors::BrightWhite),
    ])
}

/// Renders `text` in the colour for `entry`, or unchanged when colour is off
/// or the entry has no colour.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    match theme.get(&entry) {
        Some(color) if supports_color => text.color(*color).to_string(),
        _ => text.to_string(),
    }
}
