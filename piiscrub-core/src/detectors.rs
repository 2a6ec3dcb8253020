//! detectors.rs - The per-call configuration surface of the pipeline.
//!
//! `Detectors` holds one optional rule per named category. A slot set to
//! `None` switches that detector off for every call made with this value; the
//! digit catch-all has no slot and always runs.
//!
//! License: MIT OR APACHE 2.0

use regex::Regex;

use crate::errors::PiiScrubError;
use crate::patterns::Category;

/// A compiled rule for one PII category.
///
/// Cloning is cheap: `Regex` shares its compiled program.
#[derive(Debug, Clone)]
pub struct Detector {
    pub category: Category,
    pub regex: Regex,
}

impl Detector {
    pub fn new(category: Category, regex: Regex) -> Self {
        Self { category, regex }
    }

    /// The built-in rule for `category`.
    pub fn builtin(category: Category) -> Self {
        Self::new(category, category.builtin_regex().clone())
    }

    /// Compiles a custom rule. Prefer `compile_detectors` for rules that come
    /// from configuration files, which also enforces length limits.
    pub fn from_pattern(category: Category, pattern: &str) -> Result<Self, PiiScrubError> {
        let regex = Regex::new(pattern).map_err(|e| PiiScrubError::RuleCompilationError(category, e))?;
        Ok(Self::new(category, regex))
    }
}

/// The active/inactive rule for each named detector.
#[derive(Debug, Clone)]
pub struct Detectors {
    pub passport: Option<Detector>,
    pub date: Option<Detector>,
    pub phone: Option<Detector>,
    pub national_insurance: Option<Detector>,
    pub vehicle_plate: Option<Detector>,
}

impl Default for Detectors {
    fn default() -> Self {
        Self {
            passport: Some(Detector::builtin(Category::Passport)),
            date: Some(Detector::builtin(Category::Date)),
            phone: Some(Detector::builtin(Category::Phone)),
            national_insurance: Some(Detector::builtin(Category::NationalInsurance)),
            vehicle_plate: Some(Detector::builtin(Category::VehiclePlate)),
        }
    }
}

impl Detectors {
    /// Every named detector disabled. Only the digit catch-all will run.
    pub fn none() -> Self {
        Self {
            passport: None,
            date: None,
            phone: None,
            national_insurance: None,
            vehicle_plate: None,
        }
    }

    /// Only the built-in rule for `category` enabled.
    pub fn only(category: Category) -> Self {
        Self::none().with_rule(Detector::builtin(category))
    }

    /// Disables `category`.
    pub fn without(mut self, category: Category) -> Self {
        self.set(category, None);
        self
    }

    /// Enables `detector`, replacing whatever rule its category held.
    pub fn with_rule(mut self, detector: Detector) -> Self {
        let category = detector.category;
        self.set(category, Some(detector));
        self
    }

    pub fn get(&self, category: Category) -> Option<&Detector> {
        self.slot(category).as_ref()
    }

    pub fn set(&mut self, category: Category, detector: Option<Detector>) {
        *self.slot_mut(category) = detector;
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Active detectors in pipeline order.
    pub fn active(&self) -> impl Iterator<Item = &Detector> + '_ {
        Category::PIPELINE_ORDER.into_iter().filter_map(move |c| self.get(c))
    }

    fn slot(&self, category: Category) -> &Option<Detector> {
        match category {
            Category::Passport => &self.passport,
            Category::Date => &self.date,
            Category::Phone => &self.phone,
            Category::NationalInsurance => &self.national_insurance,
            Category::VehiclePlate => &self.vehicle_plate,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<Detector> {
        match category {
            Category::Passport => &mut self.passport,
            Category::Date => &mut self.date,
            Category::Phone => &mut self.phone,
            Category::NationalInsurance => &mut self.national_insurance,
            Category::VehiclePlate => &mut self.vehicle_plate,
        }
    }
}

/// Rejects markers the digit catch-all would corrupt.
pub fn validate_marker(marker: &str) -> Result<(), PiiScrubError> {
    if marker.bytes().any(|b| b.is_ascii_digit()) {
        return Err(PiiScrubError::InvalidMarker(marker.to_string()));
    }
    Ok(())
}
