//! Configuration management for `piiscrub-core`.
//!
//! A configuration names the marker and, per detector category, whether the
//! detector runs and which pattern it uses. Categories the file does not
//! mention keep their built-in rule. Configurations are read from YAML and
//! validated eagerly: anything the pipeline could not honour is rejected at
//! load time rather than skipped at redaction time.
//!
//! License: MIT OR Apache-2.0

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::detectors::validate_marker;
use crate::errors::PiiScrubError;
use crate::patterns::{Category, DEFAULT_MARKER};

/// Maximum allowed length for a custom pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Per-category settings. Every field except `name` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorRule {
    /// The category this rule configures.
    pub name: Category,
    /// Human-readable note on why the rule was customised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement regex. `None` keeps the built-in pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// `Some(false)` disables the detector. `None` means enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl DetectorRule {
    pub fn new(name: Category) -> Self {
        Self {
            name,
            description: None,
            pattern: None,
            enabled: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// The top-level configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RedactionConfig {
    /// Replacement for detected spans. Defaults to `[PII Removed]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Detector overrides, at most one per category.
    #[serde(default)]
    pub detectors: Vec<DetectorRule>,
}

impl RedactionConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading redaction config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(PiiScrubError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!("Loaded {} detector override(s) from {}.", config.detectors.len(), path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RedactionConfig = serde_yml::from_str(text).context("Failed to parse redaction config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn marker(&self) -> &str {
        self.marker.as_deref().unwrap_or(DEFAULT_MARKER)
    }

    pub fn rule(&self, category: Category) -> Option<&DetectorRule> {
        self.detectors.iter().find(|r| r.name == category)
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.rule(category).map_or(true, DetectorRule::is_enabled)
    }

    fn rule_mut(&mut self, category: Category) -> &mut DetectorRule {
        let index = match self.detectors.iter().position(|r| r.name == category) {
            Some(index) => index,
            None => {
                self.detectors.push(DetectorRule::new(category));
                self.detectors.len() - 1
            }
        };
        &mut self.detectors[index]
    }

    /// Applies CLI-style enable/disable lists.
    ///
    /// A non-empty `enable` list switches off every detector it does not name.
    /// `disable` wins over `enable` when a name appears in both.
    pub fn set_active_detectors(&mut self, enable: &[String], disable: &[String]) -> Result<()> {
        let enable_set = parse_names(enable)?;
        let disable_set = parse_names(disable)?;

        for name in enable_set.intersection(&disable_set) {
            warn!("Detector '{}' is both enabled and disabled; disabling it.", name);
        }

        for category in Category::PIPELINE_ORDER {
            if disable_set.contains(&category) {
                self.rule_mut(category).enabled = Some(false);
            } else if !enable_set.is_empty() {
                self.rule_mut(category).enabled = Some(enable_set.contains(&category));
            }
        }

        debug!(
            "Active detectors after filtering: {:?}",
            Category::PIPELINE_ORDER.iter().filter(|c| self.is_enabled(**c)).collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Checks everything that can be checked before compilation.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        if let Err(e) = validate_marker(self.marker()) {
            errors.push(e.to_string());
        }

        for rule in &self.detectors {
            if !seen.insert(rule.name) {
                errors.push(format!("Duplicate detector entry found: '{}'.", rule.name));
            }

            let Some(pattern) = &rule.pattern else { continue };
            if pattern.is_empty() {
                errors.push(format!("Detector '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            if pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Detector '{}': pattern length ({}) exceeds maximum allowed ({}).",
                    rule.name,
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
                continue;
            }
            if let Err(e) = Regex::new(pattern) {
                errors.push(format!("Detector '{}' has an invalid regex pattern: {}", rule.name, e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PiiScrubError::InvalidConfig(errors.join("\n")).into())
        }
    }
}

fn parse_names(names: &[String]) -> Result<HashSet<Category>> {
    names
        .iter()
        .map(|n| n.parse::<Category>().map_err(anyhow::Error::from))
        .collect()
}

/// Overlays a user configuration on top of a base configuration.
///
/// User fields win field by field, so a user rule that only sets `enabled`
/// keeps the base pattern. Rules come back in pipeline order.
pub fn merge_configs(base: RedactionConfig, user: Option<RedactionConfig>) -> RedactionConfig {
    let Some(user) = user else {
        return base;
    };
    debug!("Merging {} user detector rule(s) over {} base rule(s).", user.detectors.len(), base.detectors.len());

    let mut merged: BTreeMap<Category, DetectorRule> = base.detectors.into_iter().map(|r| (r.name, r)).collect();
    for user_rule in user.detectors {
        match merged.get_mut(&user_rule.name) {
            Some(existing) => {
                existing.pattern = user_rule.pattern.or(existing.pattern.take());
                existing.enabled = user_rule.enabled.or(existing.enabled);
                existing.description = user_rule.description.or(existing.description.take());
            }
            None => {
                merged.insert(user_rule.name, user_rule);
            }
        }
    }

    RedactionConfig {
        marker: user.marker.or(base.marker),
        detectors: merged.into_values().collect(),
    }
}
