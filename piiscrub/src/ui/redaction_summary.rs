// piiscrub/src/ui/redaction_summary.rs
//! Per-detector summary table printed after a redaction or scan.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use piiscrub_core::RedactionSummaryItem;

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

pub fn print_summary<W: Write>(
    summary: &[RedactionSummaryItem],
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("Redaction Summary:", ThemeEntry::Header, theme, supports_color))?;

    if summary.is_empty() {
        return writeln!(writer, "No personal data found.");
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    if !supports_color {
        table.force_no_tty();
    }
    table.set_header(vec!["Detector", "Occurrences"]);
    for item in summary {
        table.add_row(vec![
            Cell::new(paint(&item.rule_name, ThemeEntry::SummaryRuleName, theme, supports_color)),
            Cell::new(paint(&item.occurrences.to_string(), ThemeEntry::SummaryOccurrences, theme, supports_color)),
        ]);
    }
    writeln!(writer, "{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::default_theme_map;

    #[test]
    fn test_summary_lists_each_detector() {
        let summary = vec![
            RedactionSummaryItem { rule_name: "phone".into(), occurrences: 2 },
            RedactionSummaryItem { rule_name: "digit".into(), occurrences: 5 },
        ];
        let mut buf = Vec::new();
        print_summary(&summary, &mut buf, &default_theme_map(), false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("Redaction Summary:"));
        assert!(out.contains("phone"));
        assert!(out.contains("digit"));
        assert!(out.contains('5'));
    }

    #[test]
    fn test_empty_summary() {
        let mut buf = Vec::new();
        print_summary(&[], &mut buf, &default_theme_map(), false).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No personal data found."));
    }
}
