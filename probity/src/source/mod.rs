//! Metric sources backing rule evaluation.
//!
//! A metric source answers the three counting questions the evaluators ask:
//! how many rows a table has, how many non-null values a column has, and how
//! many distinct key combinations a column set has. The engine never touches
//! raw rows.

mod datafusion;

pub use self::datafusion::DataFusionSource;

use crate::error::Result;
use async_trait::async_trait;

/// A queryable tabular data source exposing column statistics.
///
/// Implementations must reflect a consistent snapshot for the duration of one
/// report run: the total, non-null, and distinct counts for the same check
/// must not observe different versions of the data. Implementations must also
/// support concurrent read-only queries, since independent entity sections
/// share nothing but the source.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Returns the total number of rows in `table`.
    async fn total(&self, table: &str) -> Result<u64>;

    /// Returns the number of non-null values in `table.column`.
    async fn non_null_count(&self, table: &str, column: &str) -> Result<u64>;

    /// Returns the number of distinct combinations of the ordered `columns`
    /// in `table`.
    async fn distinct_count(&self, table: &str, columns: &[String]) -> Result<u64>;
}
