//! Test helpers for building in-memory metric sources.

use arrow::array::Int64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use std::sync::Arc;

/// Builds a session context with a single in-memory table of nullable Int64
/// columns. Rows are given column-major-friendly as `Vec<Vec<Option<i64>>>`,
/// one inner vec per row.
pub async fn create_test_context(
    table: &str,
    columns: Vec<&str>,
    data: Vec<Vec<Option<i64>>>,
) -> SessionContext {
    let ctx = SessionContext::new();

    let fields: Vec<Field> = columns
        .iter()
        .map(|&name| Field::new(name, DataType::Int64, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<Arc<dyn arrow::array::Array>> = (0..columns.len())
        .map(|col_idx| {
            let values: Vec<Option<i64>> = data.iter().map(|row| row[col_idx]).collect();
            Arc::new(Int64Array::from(values)) as Arc<dyn arrow::array::Array>
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
    let provider = MemTable::try_new(schema, vec![vec![batch]]).unwrap();
    ctx.register_table(table, Arc::new(provider)).unwrap();

    ctx
}
