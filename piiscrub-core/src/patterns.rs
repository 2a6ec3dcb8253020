//! patterns.rs - The built-in PII pattern library.
//!
//! One detector per PII category, each backed by a regular expression that is
//! compiled once per process on first use. Only ASCII digits `0-9` count as
//! digits anywhere in this module; other Unicode decimal digits pass through
//! the pipeline untouched.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::PiiScrubError;

/// The literal substituted for every detected span unless the caller picks another.
pub const DEFAULT_MARKER: &str = "[PII Removed]";

/// The literal substituted for each stray digit by the catch-all pass.
pub const DIGIT_MASK: &str = "X";

/// Name used for the catch-all pass in summaries and reports.
pub const DIGIT_RULE_NAME: &str = "digit";

/// Fixed-format UK passport specimen number.
pub const PASSPORT_PATTERN: &str = r"[0-9]{9,10}GBR[0-9]{7}[UMF][0-9]{7}";

/// UK landline and mobile numbers with a 4, 3 or 2 digit area code.
pub const PHONE_PATTERN: &str = concat!(
    r"(?:(?:\+44\s?[0-9]{4}|\(?0[0-9]{4}\)?)\s?[0-9]{3}\s?[0-9]{3}",
    r"|(?:\+44\s?[0-9]{3}|\(?0[0-9]{3}\)?)\s?[0-9]{3}\s?[0-9]{4}",
    r"|(?:\+44\s?[0-9]{2}|\(?0[0-9]{2}\)?)\s?[0-9]{4}\s?[0-9]{4})",
    r"(?:\s?#(?:[0-9]{4}|[0-9]{3}))?",
);

/// Two letters, six digits (whitespace allowed around each), optional suffix letter.
pub const NATIONAL_INSURANCE_PATTERN: &str = r"[a-zA-Z]{2}(?:\s*[0-9]\s*){6}[a-zA-Z]?";

/// Current-style (`AB12 ABC`) and older (`ABC 1234`) registration plates.
pub const VEHICLE_PLATE_PATTERN: &str = r"\b(?:[A-Z]{2}[0-9]{2} ?[A-Z]{3}|[A-Z]{3} ?[0-9]{4})\b";

/// Any single ASCII decimal digit.
pub const DIGIT_PATTERN: &str = r"[0-9]";

const DATE_SEPARATORS: [&str; 4] = ["/", r"\.", "-", " "];

const DATE_DAY: &str = r"(?:0?[1-9]|[12][0-9]|3[01])(?:st|nd|rd|th)?";

const DATE_YEAR: &str = r"[0-9]{2}(?:[0-9]{2})?";

// Full names come before abbreviations so "September" is preferred over "Sep".
const MONTH_NAMES: [&str; 24] = [
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sept", "sep", "oct", "nov", "dec",
];

/// Builds the date expression. The `regex` crate has no backreferences, so
/// each separator gets its own alternative to keep both separators identical.
fn build_date_pattern() -> String {
    let month = format!(r"(?:1[0-2]|0?[1-9]|(?i:{}))", MONTH_NAMES.join("|"));
    DATE_SEPARATORS
        .iter()
        .map(|sep| format!("{DATE_DAY}{sep}{month}{sep}{DATE_YEAR}"))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    /// Day, month (number or English name) and year sharing one separator.
    pub static ref DATE_PATTERN: String = build_date_pattern();

    static ref PASSPORT_RE: Regex = Regex::new(PASSPORT_PATTERN).expect("built-in passport pattern compiles");
    static ref DATE_RE: Regex = Regex::new(&DATE_PATTERN).expect("built-in date pattern compiles");
    static ref PHONE_RE: Regex = Regex::new(PHONE_PATTERN).expect("built-in phone pattern compiles");
    static ref NATIONAL_INSURANCE_RE: Regex =
        Regex::new(NATIONAL_INSURANCE_PATTERN).expect("built-in national insurance pattern compiles");
    static ref VEHICLE_PLATE_RE: Regex =
        Regex::new(VEHICLE_PLATE_PATTERN).expect("built-in vehicle plate pattern compiles");

    pub(crate) static ref DIGIT_RE: Regex = Regex::new(DIGIT_PATTERN).expect("digit pattern compiles");
}

/// A configurable PII category.
///
/// The digit catch-all is deliberately absent: it always runs and cannot be
/// switched off or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Passport,
    Date,
    Phone,
    NationalInsurance,
    VehiclePlate,
}

impl Category {
    /// Named categories in the order the pipeline applies them.
    pub const PIPELINE_ORDER: [Category; 5] = [
        Category::Passport,
        Category::Date,
        Category::Phone,
        Category::NationalInsurance,
        Category::VehiclePlate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Passport => "passport",
            Category::Date => "date",
            Category::Phone => "phone",
            Category::NationalInsurance => "national_insurance",
            Category::VehiclePlate => "vehicle_plate",
        }
    }

    /// The built-in pattern source for this category.
    pub fn builtin_pattern(self) -> &'static str {
        match self {
            Category::Passport => PASSPORT_PATTERN,
            Category::Date => DATE_PATTERN.as_str(),
            Category::Phone => PHONE_PATTERN,
            Category::NationalInsurance => NATIONAL_INSURANCE_PATTERN,
            Category::VehiclePlate => VEHICLE_PLATE_PATTERN,
        }
    }

    /// The process-wide compiled built-in regex for this category.
    pub fn builtin_regex(self) -> &'static Regex {
        match self {
            Category::Passport => &PASSPORT_RE,
            Category::Date => &DATE_RE,
            Category::Phone => &PHONE_RE,
            Category::NationalInsurance => &NATIONAL_INSURANCE_RE,
            Category::VehiclePlate => &VEHICLE_PLATE_RE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PiiScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Category::PIPELINE_ORDER
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| PiiScrubError::UnknownDetector(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_match(category: Category, text: &str) -> bool {
        category
            .builtin_regex()
            .find(text)
            .map_or(false, |m| m.start() == 0 && m.end() == text.len())
    }

    #[test]
    fn test_passport_specimen() {
        assert!(full_match(Category::Passport, "5333800068GBR8812049F2509286"));
        assert!(full_match(Category::Passport, "533380006GBR8812049M2509286"));
        assert!(!Category::Passport.builtin_regex().is_match("5333800068GBR8812049X2509286"));
    }

    #[test]
    fn test_date_forms() {
        for date in ["21/10/1964", "12 Feb 2061", "1st January 2020", "3.4.19", "15-03-1990", "12 FEBRUARY 2019"] {
            assert!(full_match(Category::Date, date), "expected a full date match for {date:?}");
        }
    }

    #[test]
    fn test_date_requires_matching_separators() {
        assert!(!Category::Date.builtin_regex().is_match("21/10-1964"));
        assert!(!Category::Date.builtin_regex().is_match("21.10/64"));
    }

    #[test]
    fn test_date_ignores_spaced_national_insurance_digits() {
        assert!(!Category::Date.builtin_regex().is_match("QQ 12 34 56 C"));
    }

    #[test]
    fn test_phone_forms() {
        for phone in [
            "02079461234",
            "0207 946 1234",
            "020 7946 1234",
            "+442079461234",
            "+44 20 7946 1234",
            "07700 900123",
            "(01632) 960 001",
            "0161 496 0000 #1234",
        ] {
            assert!(full_match(Category::Phone, phone), "expected a full phone match for {phone:?}");
        }
    }

    #[test]
    fn test_national_insurance_forms() {
        for ni in ["QQ123456C", "QQ 123456 C", "QQ 12 34 56 C", "QQ123456", "qq 12 34 56"] {
            assert!(full_match(Category::NationalInsurance, ni), "expected a full NI match for {ni:?}");
        }
    }

    #[test]
    fn test_vehicle_plate_forms() {
        for plate in ["AB12ABC", "AB12 ABC", "ABC1234", "ABC 1234"] {
            assert!(full_match(Category::VehiclePlate, plate), "expected a full plate match for {plate:?}");
        }
        assert!(!Category::VehiclePlate.builtin_regex().is_match("ab12abc"));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("national_insurance".parse::<Category>().unwrap(), Category::NationalInsurance);
        assert_eq!("Vehicle-Plate".parse::<Category>().unwrap(), Category::VehiclePlate);
        assert!(matches!("digit".parse::<Category>(), Err(PiiScrubError::UnknownDetector(_))));
    }

    #[test]
    fn test_builtin_patterns_have_no_digit_free_matches() {
        // Every built-in needs at least one digit, which keeps digit-free markers inert.
        for category in Category::PIPELINE_ORDER {
            assert!(!category.builtin_regex().is_match("[PII Removed] ABC QQ Feb"));
        }
    }
}
