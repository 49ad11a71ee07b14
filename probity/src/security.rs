//! Security utilities for query construction.
//!
//! Table and column names reaching the metric source come from caller
//! configuration, so they are validated and escaped before ever being
//! interpolated into SQL text.

use crate::error::{ProbityError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// SQL identifier validation and escaping utilities.
pub struct SqlSecurity;

impl SqlSecurity {
    /// Validates and escapes a SQL identifier (table name, column name).
    ///
    /// # Arguments
    /// * `identifier` - The identifier to validate and escape
    ///
    /// # Returns
    /// * `Ok(String)` - The safely escaped identifier ready for SQL use
    /// * `Err(ProbityError)` - If the identifier is invalid or potentially malicious
    ///
    /// # Examples
    /// ```rust
    /// use probity::security::SqlSecurity;
    ///
    /// assert!(SqlSecurity::escape_identifier("customer_id").is_ok());
    /// assert!(SqlSecurity::escape_identifier("id; DROP TABLE users--").is_err());
    /// ```
    pub fn escape_identifier(identifier: &str) -> Result<String> {
        Self::validate_identifier(identifier)?;

        // Escape the identifier using double quotes and escape any internal double quotes
        let escaped = identifier.replace('"', "\"\"");
        Ok(format!("\"{escaped}\""))
    }

    /// Validates a SQL identifier without escaping it.
    ///
    /// Useful when the identifier is needed for error messages or report keys
    /// rather than query text.
    pub fn validate_identifier(identifier: &str) -> Result<()> {
        if identifier.is_empty() || identifier.trim().is_empty() {
            return Err(ProbityError::Security(
                "SQL identifier cannot be empty or whitespace-only".to_string(),
            ));
        }

        // Check identifier length (prevent DoS)
        if identifier.len() > 128 {
            return Err(ProbityError::Security(
                "SQL identifier too long (max 128 characters)".to_string(),
            ));
        }

        if identifier.contains('\0') {
            return Err(ProbityError::Security(
                "SQL identifier cannot contain null bytes".to_string(),
            ));
        }

        static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| {
            // Allow letters, numbers, underscores, dots (for qualified names)
            // Must start with letter or underscore
            // This regex is compile-time constant and known to be valid
            #[allow(clippy::expect_used)]
            Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*$")
                .expect("Hard-coded regex pattern should be valid")
        });

        if !IDENTIFIER_REGEX.is_match(identifier) {
            return Err(ProbityError::Security(format!(
                "Invalid SQL identifier format: '{identifier}'. Identifiers must start with a letter or underscore and contain only letters, numbers, underscores, and dots"
            )));
        }

        Self::check_dangerous_patterns(identifier)?;

        Ok(())
    }

    /// Checks for dangerous patterns in identifiers.
    fn check_dangerous_patterns(identifier: &str) -> Result<()> {
        let identifier_lower = identifier.to_lowercase();

        let dangerous_patterns = &[
            ";", "--", "/*", "*/", "'", "xp_", "sp_", "union", "select", "insert", "update",
            "delete", "drop", "create", "alter", "exec", "execute", "declare", "cursor",
        ];

        for pattern in dangerous_patterns {
            if identifier_lower.contains(pattern) {
                return Err(ProbityError::Security(format!(
                    "SQL identifier contains dangerous pattern: '{pattern}'"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(SqlSecurity::validate_identifier("customer_id").is_ok());
        assert!(SqlSecurity::validate_identifier("_internal").is_ok());
        assert!(SqlSecurity::validate_identifier("dim_customer").is_ok());
        assert!(SqlSecurity::validate_identifier("warehouse.fact_transactions").is_ok());
        assert!(SqlSecurity::validate_identifier("col1").is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(SqlSecurity::validate_identifier("").is_err());
        assert!(SqlSecurity::validate_identifier("   ").is_err());
        assert!(SqlSecurity::validate_identifier("1starts_with_digit").is_err());
        assert!(SqlSecurity::validate_identifier("has space").is_err());
        assert!(SqlSecurity::validate_identifier("has-dash").is_err());
        assert!(SqlSecurity::validate_identifier(&"x".repeat(200)).is_err());
        assert!(SqlSecurity::validate_identifier("null\0byte").is_err());
    }

    #[test]
    fn test_injection_attempts_rejected() {
        assert!(SqlSecurity::validate_identifier("id; DROP TABLE users--").is_err());
        assert!(SqlSecurity::validate_identifier("id' OR '1'='1").is_err());
        assert!(SqlSecurity::validate_identifier("union_all").is_err());
        assert!(SqlSecurity::validate_identifier("exec_plan").is_err());
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(
            SqlSecurity::escape_identifier("customer_id").unwrap(),
            "\"customer_id\""
        );
    }
}
