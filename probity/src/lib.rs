//! # Probity - Data Quality Auditing for Rust
//!
//! Probity computes structured data-quality reports over relational datasets.
//! It grades per-column completeness against configurable thresholds, hunts
//! duplicate key combinations, and assembles the outcomes into a nested,
//! serializable report with an overall score. Query execution is backed by
//! DataFusion, so anything registered in a `SessionContext` (in-memory
//! batches, CSV, Parquet) becomes auditable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datafusion::prelude::SessionContext;
//! use probity::prelude::*;
//! use probity::config::EntityConfig;
//! use probity::report::QualityAuditor;
//! use probity::rules::QualityRules;
//! use probity::source::DataFusionSource;
//!
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! // Describe what to audit
//! let auditor = QualityAuditor::builder()
//!     .rules(QualityRules::default().with_completeness_threshold(95.0))
//!     .entity(
//!         EntityConfig::new("customer", "dim_customer")
//!             .with_critical_columns(["customer_id", "first_name", "last_name", "email"])
//!             .with_key_columns(["customer_id"]),
//!     )
//!     .entity(
//!         EntityConfig::new("transaction", "fact_transactions")
//!             .with_critical_columns(["transaction_id", "customer_id", "amount"])
//!             .with_key_columns(["transaction_id"]),
//!     )
//!     .build()?;
//!
//! // Point it at your data
//! let ctx = SessionContext::new();
//! // ... register your tables ...
//! let source = DataFusionSource::new(ctx);
//!
//! // Run the audit
//! let report = auditor.run(&source).await?;
//! println!("overall score: {:.1}%", report.overall_score);
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! - **`rules`**: declarative thresholds (completeness, accuracy, consistency)
//!   passed explicitly at construction; no process-wide mutable state.
//! - **`checks`**: the evaluators. Completeness grades each critical column
//!   independently with no short-circuiting; the duplicate check is a hard
//!   pass/fail with no partial credit.
//! - **`source`**: the [`source::MetricSource`] trait abstracts the queryable
//!   data source behind three count operations, with a DataFusion
//!   implementation included.
//! - **`report`**: the auditor isolates failures per entity. A broken table
//!   becomes an `Error` section in the report, never an aborted run and never
//!   a silently dropped result.
//!
//! Reports are plain serde-serializable values; rendering them is left to the
//! embedding application.

pub mod checks;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod rules;
pub mod security;
pub mod source;

#[cfg(test)]
pub mod test_helpers;
