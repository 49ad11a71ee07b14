//! Entity configuration for audit runs.
//!
//! An entity names one monitored table together with the columns its quality
//! checks cover: critical columns for completeness and key columns for the
//! duplicate check. Configuration is static for the lifetime of an auditor.

use crate::error::{ProbityError, Result};
use crate::security::SqlSecurity;
use serde::{Deserialize, Serialize};

/// Configuration for one monitored entity.
///
/// # Examples
///
/// ```rust
/// use probity::config::EntityConfig;
///
/// let customer = EntityConfig::new("customer", "dim_customer")
///     .with_critical_columns(["customer_id", "first_name", "last_name", "email"])
///     .with_key_columns(["customer_id"]);
///
/// assert_eq!(customer.name, "customer");
/// assert_eq!(customer.key_columns.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Entity name used as the report section key.
    pub name: String,
    /// Source table name in the metric source.
    pub table: String,
    /// Columns checked for completeness.
    #[serde(default)]
    pub critical_columns: Vec<String>,
    /// Ordered columns forming the entity's composite identity.
    #[serde(default)]
    pub key_columns: Vec<String>,
}

impl EntityConfig {
    /// Creates a new entity configuration for the given report section name
    /// and source table.
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            critical_columns: Vec::new(),
            key_columns: Vec::new(),
        }
    }

    /// Sets the columns checked for completeness.
    pub fn with_critical_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.critical_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the ordered key columns forming the entity's composite identity.
    pub fn with_key_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the entity configuration.
    ///
    /// The table and every configured column must be well-formed SQL
    /// identifiers, and at least one check must be configured.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ProbityError::Config(
                "entity name cannot be empty".to_string(),
            ));
        }
        SqlSecurity::validate_identifier(&self.table)?;
        for column in self.critical_columns.iter().chain(self.key_columns.iter()) {
            SqlSecurity::validate_identifier(column)?;
        }
        if self.critical_columns.is_empty() && self.key_columns.is_empty() {
            return Err(ProbityError::Config(format!(
                "entity '{}' configures no checks: set critical_columns and/or key_columns",
                self.name
            )));
        }
        Ok(())
    }

    /// Number of individual check results this entity contributes to a report:
    /// one per critical column plus one duplicate check when key columns are
    /// configured.
    pub fn check_count(&self) -> usize {
        self.critical_columns.len() + usize::from(!self.key_columns.is_empty())
    }
}

/// Ready-made audit profiles.
///
/// These are plain constructors, not global state: callers get a fresh
/// `Vec<EntityConfig>` and may modify it freely before building an auditor.
pub struct AuditProfile;

impl AuditProfile {
    /// The customer/transaction star-schema profile used by the financial
    /// analytics demo dataset.
    pub fn financial_demo() -> Vec<EntityConfig> {
        vec![
            EntityConfig::new("customer", "dim_customer")
                .with_critical_columns(["customer_id", "first_name", "last_name", "email"])
                .with_key_columns(["customer_id"]),
            EntityConfig::new("transaction", "fact_transactions")
                .with_critical_columns([
                    "transaction_id",
                    "customer_id",
                    "amount",
                    "transaction_date",
                ])
                .with_key_columns(["transaction_id"]),
        ]
    }
}
