//! Completeness check for critical columns.
//!
//! Completeness is the fraction of non-null values in a column relative to
//! total rows, expressed as a percentage. Every configured column is always
//! evaluated; a failing column never short-circuits the rest.

use crate::checks::CheckStatus;
use crate::error::Result;
use crate::source::MetricSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The completeness outcome for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCompleteness {
    /// The checked column.
    pub column: String,
    /// Non-null percentage in `[0, 100]`. An empty table grades as 0.
    pub completeness_pct: f64,
    /// Pass iff `completeness_pct >= threshold`.
    pub status: CheckStatus,
    /// Context for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Evaluates completeness for a set of critical columns in one table.
///
/// # Examples
///
/// ```rust,no_run
/// use probity::checks::CompletenessCheck;
///
/// let check = CompletenessCheck::new(
///     "dim_customer",
///     ["customer_id", "email"],
///     95.0,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CompletenessCheck {
    table: String,
    columns: Vec<String>,
    threshold_pct: f64,
}

impl CompletenessCheck {
    /// Creates a completeness check over `columns` of `table`, graded against
    /// `threshold_pct` (a percentage in `[0, 100]`).
    pub fn new<I, S>(table: impl Into<String>, columns: I, threshold_pct: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            threshold_pct,
        }
    }

    /// Evaluates all configured columns against the source.
    ///
    /// Returns one result per column, in configuration order. An empty table
    /// grades every column at 0% rather than erroring. A source error for any
    /// column aborts the whole check so the caller can record the section as
    /// errored.
    #[instrument(skip(self, source), fields(
        check.table = %self.table,
        check.columns = self.columns.len(),
        check.threshold = %self.threshold_pct
    ))]
    pub async fn evaluate(&self, source: &dyn MetricSource) -> Result<Vec<ColumnCompleteness>> {
        let total = source.total(&self.table).await?;

        let mut results = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let non_null = source.non_null_count(&self.table, column).await?;
            let pct = completeness_pct(non_null, total);
            let status = grade_completeness(pct, self.threshold_pct);

            debug!(
                check.table = %self.table,
                check.column = %column,
                result.completeness_pct = %format!("{pct:.2}"),
                result.non_null = non_null,
                result.total = total,
                result.status = ?status,
                "Completeness check evaluated"
            );

            let message = match status {
                CheckStatus::Pass => None,
                _ if total == 0 => Some(format!(
                    "Table '{}' is empty; completeness graded as 0%",
                    self.table
                )),
                _ => Some(format!(
                    "Column '{column}' completeness {pct:.2}% is below threshold {:.2}%",
                    self.threshold_pct
                )),
            };

            results.push(ColumnCompleteness {
                column: column.clone(),
                completeness_pct: pct,
                status,
                message,
            });
        }

        Ok(results)
    }
}

/// Computes the completeness percentage for `non_null` values out of `total`
/// rows. An empty table resolves to 0% instead of dividing by zero, so a
/// vacant critical column is graded as fully incomplete rather than crashing
/// the run.
pub fn completeness_pct(non_null: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (non_null as f64) * 100.0 / (total as f64)
}

/// Grades a completeness percentage against a threshold.
pub fn grade_completeness(pct: f64, threshold_pct: f64) -> CheckStatus {
    if pct >= threshold_pct {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    }
}
