//! Prelude for commonly used types and traits in probity.

pub use crate::checks::CheckStatus;
pub use crate::error::{ErrorContext, ProbityError, Result};
pub use crate::report::{EntitySection, QualityReport};
pub use crate::source::MetricSource;
