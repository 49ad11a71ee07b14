//! Quality rule definitions.
//!
//! Rules are declarative thresholds keyed by rule kind. They are immutable
//! for the lifetime of an auditor: construct them once, pass them in, and
//! every report run grades against the same values.

use crate::error::{ProbityError, Result};
use serde::{Deserialize, Serialize};

/// Threshold configuration for quality rule evaluation.
///
/// All thresholds are percentages in `[0, 100]`. The accuracy and consistency
/// thresholds are part of the configuration surface for downstream consumers
/// but are not exercised by the built-in evaluators yet.
///
/// # Examples
///
/// ```rust
/// use probity::rules::QualityRules;
///
/// let rules = QualityRules::default();
/// assert_eq!(rules.completeness_threshold, 95.0);
///
/// let strict = QualityRules::default().with_completeness_threshold(99.5);
/// assert_eq!(strict.completeness_threshold, 99.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityRules {
    /// Minimum acceptable per-column completeness percentage.
    pub completeness_threshold: f64,
    /// Minimum acceptable accuracy percentage (reserved for future evaluators).
    pub accuracy_threshold: f64,
    /// Minimum acceptable consistency percentage (reserved for future evaluators).
    pub consistency_threshold: f64,
}

impl Default for QualityRules {
    fn default() -> Self {
        Self {
            completeness_threshold: 95.0,
            accuracy_threshold: 98.0,
            consistency_threshold: 99.0,
        }
    }
}

impl QualityRules {
    /// Sets the completeness threshold.
    pub fn with_completeness_threshold(mut self, threshold: f64) -> Self {
        self.completeness_threshold = threshold;
        self
    }

    /// Sets the accuracy threshold.
    pub fn with_accuracy_threshold(mut self, threshold: f64) -> Self {
        self.accuracy_threshold = threshold;
        self
    }

    /// Sets the consistency threshold.
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    /// Validates that every threshold is a finite percentage in `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("completeness_threshold", self.completeness_threshold),
            ("accuracy_threshold", self.accuracy_threshold),
            ("consistency_threshold", self.consistency_threshold),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ProbityError::Config(format!(
                    "{name} must be a percentage in [0, 100], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let rules = QualityRules::default();
        assert_eq!(rules.completeness_threshold, 95.0);
        assert_eq!(rules.accuracy_threshold, 98.0);
        assert_eq!(rules.consistency_threshold, 99.0);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let rules = QualityRules::default()
            .with_completeness_threshold(90.0)
            .with_accuracy_threshold(97.0)
            .with_consistency_threshold(99.9);
        assert_eq!(rules.completeness_threshold, 90.0);
        assert_eq!(rules.accuracy_threshold, 97.0);
        assert_eq!(rules.consistency_threshold, 99.9);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(QualityRules::default()
            .with_completeness_threshold(-1.0)
            .validate()
            .is_err());
        assert!(QualityRules::default()
            .with_accuracy_threshold(100.5)
            .validate()
            .is_err());
        assert!(QualityRules::default()
            .with_consistency_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let rules: QualityRules =
            serde_json::from_str(r#"{"completeness_threshold": 90.0}"#).unwrap();
        assert_eq!(rules.completeness_threshold, 90.0);
        assert_eq!(rules.accuracy_threshold, 98.0);
        assert_eq!(rules.consistency_threshold, 99.0);
    }
}
