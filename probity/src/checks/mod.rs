//! Quality check evaluators.
//!
//! Each evaluator maps metric values and a threshold to a pass/fail outcome.
//! The grading logic is pure; only the metric lookups touch the source.

pub mod completeness;
pub mod duplicates;

pub use completeness::{ColumnCompleteness, CompletenessCheck};
pub use duplicates::{DuplicateCheck, DuplicateSummary};

use serde::{Deserialize, Serialize};

/// The outcome of a single quality check.
///
/// `Error` is distinct from `Fail`: a failed check graded real data against a
/// rule, an errored check could not be evaluated at all. Errors are recorded
/// in the report rather than swallowed or propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The check passed.
    Pass,
    /// The check graded the data and found it below the rule's bar.
    Fail,
    /// The check could not be evaluated.
    ///
    /// The built-in evaluators surface evaluation failures at the section
    /// level (`EntitySection::Error`) rather than per check, so they never
    /// construct this variant themselves. It stays on the per-check surface
    /// for deserialized reports and custom evaluators that grade columns
    /// individually.
    Error,
}

impl CheckStatus {
    /// Returns true if this is a Pass status.
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }

    /// Returns true if this is a Fail status.
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    /// Returns true if this is an Error status.
    pub fn is_error(&self) -> bool {
        matches!(self, CheckStatus::Error)
    }
}
