//! Duplicate check for entity key columns.
//!
//! A duplicate is a record whose key-column combination repeats within the
//! same table. Unlike completeness there is no partial credit: duplicate keys
//! violate identity invariants, so any duplication is a hard fail regardless
//! of threshold configuration.

use crate::checks::CheckStatus;
use crate::error::Result;
use crate::source::MetricSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The duplicate-check outcome for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSummary {
    /// Total rows in the table.
    pub total_records: u64,
    /// Distinct key combinations.
    pub unique_records: u64,
    /// `total_records - unique_records`, never negative.
    pub duplicate_count: u64,
    /// Pass iff `duplicate_count == 0`.
    pub status: CheckStatus,
    /// Context for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Evaluates key uniqueness for one table.
///
/// # Examples
///
/// ```rust,no_run
/// use probity::checks::DuplicateCheck;
///
/// let check = DuplicateCheck::new("fact_transactions", ["transaction_id"]);
/// ```
#[derive(Debug, Clone)]
pub struct DuplicateCheck {
    table: String,
    key_columns: Vec<String>,
}

impl DuplicateCheck {
    /// Creates a duplicate check over the ordered composite key `key_columns`
    /// of `table`.
    pub fn new<I, S>(table: impl Into<String>, key_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            key_columns: key_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluates the check against the source.
    #[instrument(skip(self, source), fields(
        check.table = %self.table,
        check.key_columns = ?self.key_columns
    ))]
    pub async fn evaluate(&self, source: &dyn MetricSource) -> Result<DuplicateSummary> {
        let total = source.total(&self.table).await?;
        let unique = source.distinct_count(&self.table, &self.key_columns).await?;

        let duplicate_count = duplicate_count(total, unique);
        let status = grade_duplicates(duplicate_count);

        debug!(
            check.table = %self.table,
            result.total = total,
            result.unique = unique,
            result.duplicates = duplicate_count,
            result.status = ?status,
            "Duplicate check evaluated"
        );

        let message = match status {
            CheckStatus::Pass => None,
            _ => Some(format!(
                "Table '{}' has {duplicate_count} duplicate key combination(s) over ({})",
                self.table,
                self.key_columns.join(", ")
            )),
        };

        Ok(DuplicateSummary {
            total_records: total,
            unique_records: unique,
            duplicate_count,
            status,
            message,
        })
    }
}

/// Computes the number of duplicate records: `total - unique`, never
/// negative. A source honoring the snapshot contract never reports more
/// distinct keys than rows; saturate rather than wrap if one misbehaves.
pub fn duplicate_count(total: u64, unique: u64) -> u64 {
    total.saturating_sub(unique)
}

/// Grades a duplicate count: any duplication at all is a failure.
pub fn grade_duplicates(duplicate_count: u64) -> CheckStatus {
    if duplicate_count == 0 {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DataFusionSource;
    use crate::test_helpers::create_test_context;

    #[test]
    fn test_duplicate_count_saturates() {
        assert_eq!(duplicate_count(100, 97), 3);
        assert_eq!(duplicate_count(10, 10), 0);
        assert_eq!(duplicate_count(3, 5), 0);
        assert_eq!(duplicate_count(0, 0), 0);
    }

    #[test]
    fn test_grade_duplicates() {
        assert_eq!(grade_duplicates(0), CheckStatus::Pass);
        assert_eq!(grade_duplicates(1), CheckStatus::Fail);
        assert_eq!(grade_duplicates(1000), CheckStatus::Fail);
    }

    #[tokio::test]
    async fn test_all_unique_passes() {
        let ctx = create_test_context(
            "t",
            vec!["id"],
            (1..=100).map(|i| vec![Some(i)]).collect(),
        )
        .await;
        let source = DataFusionSource::new(ctx);

        let summary = DuplicateCheck::new("t", ["id"])
            .evaluate(&source)
            .await
            .unwrap();

        assert_eq!(summary.total_records, 100);
        assert_eq!(summary.unique_records, 100);
        assert_eq!(summary.duplicate_count, 0);
        assert_eq!(summary.status, CheckStatus::Pass);
        assert!(summary.message.is_none());
    }

    #[tokio::test]
    async fn test_duplicates_fail_hard() {
        // 100 rows, 97 distinct keys
        let mut rows: Vec<Vec<Option<i64>>> = (1..=97).map(|i| vec![Some(i)]).collect();
        rows.push(vec![Some(1)]);
        rows.push(vec![Some(2)]);
        rows.push(vec![Some(3)]);
        let ctx = create_test_context("t", vec!["id"], rows).await;
        let source = DataFusionSource::new(ctx);

        let summary = DuplicateCheck::new("t", ["id"])
            .evaluate(&source)
            .await
            .unwrap();

        assert_eq!(summary.total_records, 100);
        assert_eq!(summary.unique_records, 97);
        assert_eq!(summary.duplicate_count, 3);
        assert_eq!(summary.status, CheckStatus::Fail);
        assert!(summary.message.as_deref().unwrap().contains("3 duplicate"));
    }

    #[tokio::test]
    async fn test_single_duplicate_fails() {
        let ctx = create_test_context("t", vec!["id"], vec![vec![Some(1)], vec![Some(1)]]).await;
        let source = DataFusionSource::new(ctx);

        let summary = DuplicateCheck::new("t", ["id"])
            .evaluate(&source)
            .await
            .unwrap();
        assert_eq!(summary.duplicate_count, 1);
        assert_eq!(summary.status, CheckStatus::Fail);
    }

    #[tokio::test]
    async fn test_composite_key() {
        let ctx = create_test_context(
            "t",
            vec!["customer_id", "order_id"],
            vec![
                vec![Some(1), Some(1)],
                vec![Some(1), Some(2)],
                vec![Some(2), Some(1)],
                vec![Some(1), Some(1)],
            ],
        )
        .await;
        let source = DataFusionSource::new(ctx);

        let summary = DuplicateCheck::new("t", ["customer_id", "order_id"])
            .evaluate(&source)
            .await
            .unwrap();

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.unique_records, 3);
        assert_eq!(summary.duplicate_count, 1);
        assert_eq!(summary.status, CheckStatus::Fail);
    }

    #[tokio::test]
    async fn test_empty_table_passes() {
        let ctx = create_test_context("t", vec!["id"], vec![]).await;
        let source = DataFusionSource::new(ctx);

        let summary = DuplicateCheck::new("t", ["id"])
            .evaluate(&source)
            .await
            .unwrap();
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.duplicate_count, 0);
        assert_eq!(summary.status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn test_missing_key_column_propagates_error() {
        let ctx = create_test_context("t", vec!["id"], vec![vec![Some(1)]]).await;
        let source = DataFusionSource::new(ctx);

        let check = DuplicateCheck::new("t", ["missing"]);
        assert!(check.evaluate(&source).await.is_err());
    }
}
