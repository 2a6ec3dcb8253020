//! compiler.rs - Turns a `RedactionConfig` into a set of compiled `Detectors`.
//!
//! Built-in rules reuse the process-wide regexes from `patterns`; only custom
//! patterns are compiled here. Compiled sets are cached behind a global
//! `RwLock`, keyed by a hash of the configuration, so that repeated engine
//! construction from the same file never recompiles.
//!
//! License: MIT OR APACHE 2.0

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use log::debug;
use regex::RegexBuilder;

use crate::config::{RedactionConfig, MAX_PATTERN_LENGTH};
use crate::detectors::{Detector, Detectors};
use crate::errors::PiiScrubError;
use crate::patterns::Category;

/// Upper bound on the compiled size of any custom pattern.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

lazy_static! {
    /// A thread-safe, global cache of compiled detector sets.
    static ref COMPILED_DETECTORS_CACHE: RwLock<HashMap<u64, Arc<Detectors>>> = RwLock::new(HashMap::new());
}

/// Hashes the detector rules of a config. Rules are sorted by category first
/// so that ordering in the YAML file does not change the key.
fn hash_config(config: &RedactionConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut rules = config.detectors.clone();
    rules.sort_by_key(|r| r.name);
    rules.hash(&mut hasher);
    hasher.finish()
}

fn compile_pattern(category: Category, pattern: &str) -> Result<Detector, PiiScrubError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(PiiScrubError::PatternLengthExceeded(category, pattern.len(), MAX_PATTERN_LENGTH));
    }
    let regex = RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| PiiScrubError::RuleCompilationError(category, e))?;
    Ok(Detector::new(category, regex))
}

/// Compiles the detector set described by `config`.
///
/// All failing rules are reported together in a single `Fatal` error.
pub fn compile_detectors(config: &RedactionConfig) -> Result<Detectors, PiiScrubError> {
    let mut detectors = Detectors::none();
    let mut compilation_errors = Vec::new();

    for category in Category::PIPELINE_ORDER {
        let rule = config.rule(category);
        if !rule.map_or(true, |r| r.is_enabled()) {
            debug!("Detector '{}' disabled by configuration.", category);
            continue;
        }

        match rule.and_then(|r| r.pattern.as_deref()) {
            Some(pattern) => match compile_pattern(category, pattern) {
                Ok(detector) => {
                    debug!(target: "piiscrub_core::sanitizer", "Detector '{}' compiled from custom pattern.", category);
                    detectors.set(category, Some(detector));
                }
                Err(e) => compilation_errors.push(e),
            },
            None => {
                debug!(target: "piiscrub_core::sanitizer", "Detector '{}' using built-in pattern.", category);
                detectors.set(category, Some(Detector::builtin(category)));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(PiiScrubError::Fatal(format!(
            "Failed to compile {} detector(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling detectors. Active: {}.", detectors.active().count());
    Ok(detectors)
}

/// Gets a compiled detector set from the cache, compiling it on a miss.
pub fn get_or_compile_detectors(config: &RedactionConfig) -> Result<Arc<Detectors>, PiiScrubError> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_DETECTORS_CACHE.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(detectors) = cache.get(&cache_key) {
            debug!("Serving compiled detectors from cache for key: {}", cache_key);
            return Ok(Arc::clone(detectors));
        }
    }

    debug!("Compiled detectors not found in cache. Compiling now.");
    let compiled = Arc::new(compile_detectors(config)?);
    COMPILED_DETECTORS_CACHE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached detectors for key: {}", cache_key);
    Ok(compiled)
}
