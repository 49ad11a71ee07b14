//! DataFusion-backed metric source.

use crate::error::{ProbityError, Result};
use crate::security::SqlSecurity;
use crate::source::MetricSource;
use async_trait::async_trait;
use datafusion::error::DataFusionError;
use datafusion::prelude::*;
use tracing::{debug, instrument};

/// A [`MetricSource`] that runs count queries against a DataFusion
/// [`SessionContext`].
///
/// Tables registered in the context (in-memory batches, CSV, Parquet, or any
/// other DataFusion table provider) become auditable. `SessionContext` is
/// cheap to clone and immutable registrations give each report run a
/// consistent snapshot.
///
/// All identifiers are validated and escaped before query construction; the
/// raw caller-supplied strings never reach the SQL layer.
///
/// # Examples
///
/// ```rust,no_run
/// use datafusion::prelude::SessionContext;
/// use probity::source::DataFusionSource;
///
/// let ctx = SessionContext::new();
/// // ... register tables ...
/// let source = DataFusionSource::new(ctx);
/// ```
#[derive(Clone)]
pub struct DataFusionSource {
    ctx: SessionContext,
}

impl std::fmt::Debug for DataFusionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // SessionContext does not implement Debug.
        f.debug_struct("DataFusionSource").finish_non_exhaustive()
    }
}

impl DataFusionSource {
    /// Creates a metric source over the given session context.
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Returns a reference to the underlying session context.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Runs a query expected to return a single `Int64` count.
    async fn count_query(&self, sql: &str) -> Result<u64> {
        debug!(query.sql = %sql, "Executing count query");

        let df = self
            .ctx
            .sql(sql)
            .await
            .map_err(classify_datafusion_error)?;
        let batches = df.collect().await.map_err(classify_datafusion_error)?;

        let batch = batches
            .iter()
            .find(|b| b.num_rows() > 0)
            .ok_or_else(|| ProbityError::Internal("count query returned no rows".to_string()))?;

        let count = batch
            .column(0)
            .as_any()
            .downcast_ref::<arrow::array::Int64Array>()
            .ok_or_else(|| {
                ProbityError::Internal("count query did not return an Int64 column".to_string())
            })?
            .value(0);

        u64::try_from(count)
            .map_err(|_| ProbityError::Internal(format!("count query returned {count}")))
    }
}

#[async_trait]
impl MetricSource for DataFusionSource {
    #[instrument(skip(self), fields(source.table = %table))]
    async fn total(&self, table: &str) -> Result<u64> {
        let table_identifier = SqlSecurity::escape_identifier(table)?;
        let sql = format!("SELECT COUNT(*) AS total_records FROM {table_identifier}");
        self.count_query(&sql).await
    }

    #[instrument(skip(self), fields(source.table = %table, source.column = %column))]
    async fn non_null_count(&self, table: &str, column: &str) -> Result<u64> {
        let table_identifier = SqlSecurity::escape_identifier(table)?;
        let column_identifier = SqlSecurity::escape_identifier(column)?;
        let sql = format!(
            "SELECT COUNT({column_identifier}) AS non_null_records FROM {table_identifier}"
        );
        self.count_query(&sql).await
    }

    #[instrument(skip(self), fields(source.table = %table, source.columns = ?columns))]
    async fn distinct_count(&self, table: &str, columns: &[String]) -> Result<u64> {
        if columns.is_empty() {
            return Err(ProbityError::Config(
                "distinct_count requires at least one column".to_string(),
            ));
        }

        let table_identifier = SqlSecurity::escape_identifier(table)?;
        let column_list = columns
            .iter()
            .map(|c| SqlSecurity::escape_identifier(c))
            .collect::<Result<Vec<_>>>()?
            .join(", ");

        // DISTINCT over a subquery handles composite keys and treats NULL
        // combinations as a single distinct value.
        let sql = format!(
            "SELECT COUNT(*) AS unique_records FROM (SELECT DISTINCT {column_list} FROM {table_identifier}) AS distinct_keys"
        );
        self.count_query(&sql).await
    }
}

/// Maps DataFusion errors onto the audit error taxonomy.
///
/// Planning and schema errors mean the configured table or column does not
/// exist; everything else is treated as the source being unavailable.
fn classify_datafusion_error(err: DataFusionError) -> ProbityError {
    match &err {
        DataFusionError::SchemaError(..) | DataFusionError::Plan(_) | DataFusionError::SQL(..) => {
            ProbityError::MalformedColumnSet(err.to_string())
        }
        _ => ProbityError::SourceUnavailable(err.to_string()),
    }
}
