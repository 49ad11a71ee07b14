//! Quality report assembly.
//!
//! The auditor orchestrates the evaluators across every configured entity and
//! assembles a nested report with an overall score. Each report run is an
//! independent, stateless batch computation over a snapshot of the metric
//! source: run it twice against unchanged data and everything but the
//! timestamp is identical.

use crate::checks::{ColumnCompleteness, CompletenessCheck, DuplicateCheck, DuplicateSummary};
use crate::config::EntityConfig;
use crate::error::Result;
use crate::rules::QualityRules;
use crate::source::MetricSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// One entity's slice of a quality report.
///
/// Evaluator errors are isolated at this boundary: a section that could not
/// be audited is recorded as `Error` with the number of checks it would have
/// contributed, and the remaining entities still run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitySection {
    /// The entity's checks ran to completion.
    Audited {
        /// Per-column completeness results, keyed by column name.
        completeness: BTreeMap<String, ColumnCompleteness>,
        /// Key-uniqueness result, present when key columns are configured.
        #[serde(skip_serializing_if = "Option::is_none")]
        duplicates: Option<DuplicateSummary>,
    },
    /// The entity's checks could not be evaluated.
    Error {
        /// Why the section failed.
        message: String,
        /// How many individual checks this section would have contributed.
        checks_not_run: usize,
    },
}

impl EntitySection {
    /// Counts `(passed, total)` individual checks in this section.
    ///
    /// Errored sections contribute their intended check count as non-passing
    /// results, so a broken entity drags the overall score down instead of
    /// silently vanishing from it.
    fn tally(&self) -> (usize, usize) {
        match self {
            EntitySection::Audited {
                completeness,
                duplicates,
            } => {
                let mut passed = completeness.values().filter(|c| c.status.is_pass()).count();
                let mut total = completeness.len();
                if let Some(summary) = duplicates {
                    total += 1;
                    if summary.status.is_pass() {
                        passed += 1;
                    }
                }
                (passed, total)
            }
            EntitySection::Error { checks_not_run, .. } => (0, *checks_not_run),
        }
    }

    /// Returns true if every check in this section passed.
    pub fn is_clean(&self) -> bool {
        let (passed, total) = self.tally();
        passed == total
    }
}

/// The aggregated outcome of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Per-entity results, keyed by entity name.
    pub sections: BTreeMap<String, EntitySection>,
    /// Percentage of all individual checks that passed, in `[0, 100]`.
    pub overall_score: f64,
}

impl QualityReport {
    /// Returns true if every check in every section passed.
    pub fn is_clean(&self) -> bool {
        self.sections.values().all(EntitySection::is_clean)
    }

    /// Serializes the report to a JSON string for downstream consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Computes the overall score: the percentage of flattened individual check
/// results whose status is Pass. A report with no checks scores 0, never a
/// placeholder that could mask failures.
fn overall_score(sections: &BTreeMap<String, EntitySection>) -> f64 {
    let (passed, total) = sections
        .values()
        .map(EntitySection::tally)
        .fold((0usize, 0usize), |(p, t), (sp, st)| (p + sp, t + st));

    if total == 0 {
        return 0.0;
    }
    (passed as f64) * 100.0 / (total as f64)
}

/// Runs quality checks across configured entities and assembles reports.
///
/// # Examples
///
/// ```rust,no_run
/// use probity::config::AuditProfile;
/// use probity::report::QualityAuditor;
/// use probity::rules::QualityRules;
///
/// # fn example() -> probity::error::Result<()> {
/// let auditor = QualityAuditor::builder()
///     .rules(QualityRules::default())
///     .entities(AuditProfile::financial_demo())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QualityAuditor {
    rules: QualityRules,
    entities: Vec<EntityConfig>,
}

impl QualityAuditor {
    /// Creates a new builder.
    pub fn builder() -> QualityAuditorBuilder {
        QualityAuditorBuilder::new()
    }

    /// Returns the rules this auditor grades against.
    pub fn rules(&self) -> &QualityRules {
        &self.rules
    }

    /// Returns the monitored entities.
    pub fn entities(&self) -> &[EntityConfig] {
        &self.entities
    }

    /// Runs all configured checks against the source and assembles a report.
    ///
    /// Entities are evaluated independently and sequentially. A failure inside
    /// one entity's checks is recorded as an `Error` section and does not
    /// abort the rest of the run; only errors outside any entity boundary
    /// (none today) would propagate.
    #[instrument(skip(self, source), fields(
        audit.entities = self.entities.len(),
        audit.completeness_threshold = %self.rules.completeness_threshold
    ))]
    pub async fn run(&self, source: &dyn MetricSource) -> Result<QualityReport> {
        info!(
            audit.entities = self.entities.len(),
            "Starting quality audit run"
        );

        let mut sections = BTreeMap::new();
        for entity in &self.entities {
            let section = match self.audit_entity(source, entity).await {
                Ok(section) => section,
                Err(e) => {
                    warn!(
                        entity.name = %entity.name,
                        entity.table = %entity.table,
                        error = %e,
                        "Entity audit failed; recording error section"
                    );
                    EntitySection::Error {
                        message: e.to_string(),
                        checks_not_run: entity.check_count(),
                    }
                }
            };
            sections.insert(entity.name.clone(), section);
        }

        let score = overall_score(&sections);
        let report = QualityReport {
            generated_at: Utc::now(),
            sections,
            overall_score: score,
        };

        info!(
            audit.sections = report.sections.len(),
            audit.overall_score = %format!("{score:.2}"),
            audit.clean = report.is_clean(),
            "Quality audit run completed"
        );

        Ok(report)
    }

    /// Evaluates one entity's checks. Any evaluator error propagates to the
    /// caller, which records it as an error section.
    async fn audit_entity(
        &self,
        source: &dyn MetricSource,
        entity: &EntityConfig,
    ) -> Result<EntitySection> {
        let mut completeness = BTreeMap::new();
        if !entity.critical_columns.is_empty() {
            let check = CompletenessCheck::new(
                &entity.table,
                entity.critical_columns.iter().cloned(),
                self.rules.completeness_threshold,
            );
            for result in check.evaluate(source).await? {
                completeness.insert(result.column.clone(), result);
            }
        }

        let duplicates = if entity.key_columns.is_empty() {
            None
        } else {
            let check = DuplicateCheck::new(&entity.table, entity.key_columns.iter().cloned());
            Some(check.evaluate(source).await?)
        };

        Ok(EntitySection::Audited {
            completeness,
            duplicates,
        })
    }
}

/// Builder for [`QualityAuditor`] instances.
#[derive(Debug, Default)]
pub struct QualityAuditorBuilder {
    rules: QualityRules,
    entities: Vec<EntityConfig>,
}

impl QualityAuditorBuilder {
    /// Creates a builder with default rules and no entities.
    pub fn new() -> Self {
        Self {
            rules: QualityRules::default(),
            entities: Vec::new(),
        }
    }

    /// Sets the threshold rules.
    pub fn rules(mut self, rules: QualityRules) -> Self {
        self.rules = rules;
        self
    }

    /// Adds a monitored entity.
    pub fn entity(mut self, entity: EntityConfig) -> Self {
        self.entities.push(entity);
        self
    }

    /// Adds multiple monitored entities.
    pub fn entities<I>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = EntityConfig>,
    {
        self.entities.extend(entities);
        self
    }

    /// Validates the configuration and builds the auditor.
    pub fn build(self) -> Result<QualityAuditor> {
        self.rules.validate()?;
        for entity in &self.entities {
            entity.validate()?;
        }
        Ok(QualityAuditor {
            rules: self.rules,
            entities: self.entities,
        })
    }
}
