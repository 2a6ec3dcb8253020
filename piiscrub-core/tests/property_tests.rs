// piiscrub-core/tests/property_tests.rs
//! Invariants of the pipeline over generated input.

use piiscrub_core::{redact, redact_with, Category, Detectors, DEFAULT_MARKER};
use proptest::prelude::*;

fn has_ascii_digit(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
}

proptest! {
    #[test]
    fn digit_free_text_is_unchanged(s in "[^0-9]{0,200}") {
        prop_assert_eq!(redact(&s), s);
    }

    #[test]
    fn output_never_contains_ascii_digits(s in "\\PC{0,200}") {
        let out = redact(&s);
        prop_assert!(!has_ascii_digit(&out.replace(DEFAULT_MARKER, "")), "digits survived: {}", out);
    }

    #[test]
    fn redaction_is_idempotent(s in "[A-Za-z0-9 /.#+()-]{0,120}") {
        let once = redact(&s);
        prop_assert_eq!(redact(&once), once.clone());
    }

    #[test]
    fn catch_all_runs_with_every_detector_disabled(s in "[A-Za-z0-9 ]{0,120}") {
        let out = redact_with(&s, DEFAULT_MARKER, &Detectors::none()).unwrap();
        prop_assert!(!has_ascii_digit(&out));
        prop_assert_eq!(out.len(), s.len());
    }

    #[test]
    fn generated_phone_numbers_are_removed(area in "[1-9][0-9]{2}", exchange in "[0-9]{3}", line in "[0-9]{4}") {
        let input = format!("call 0{area} {exchange} {line} today");
        let out = redact_with(&input, DEFAULT_MARKER, &Detectors::only(Category::Phone)).unwrap();
        prop_assert_eq!(out, format!("call {DEFAULT_MARKER} today"));
    }

    #[test]
    fn generated_passports_are_one_marker(head in "[0-9]{9,10}", mid in "[0-9]{7}", sex in "[UMF]", tail in "[0-9]{7}") {
        let input = format!("{head}GBR{mid}{sex}{tail}");
        prop_assert_eq!(redact(&input), DEFAULT_MARKER);
    }
}
