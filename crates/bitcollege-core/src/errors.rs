use std::fmt::Display;

use thiserror::Error;

use crate::validation::{Violation, format_violations};

/// Errors produced by entity constructors, business rules and the record store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// One or more field constraints were violated. All violations are reported together.
    #[error("{}", format_violations(.0))]
    Validation(Vec<Violation>),

    /// The grade point state bands are missing, overlapping or leave a gap.
    #[error("grade point state configuration is invalid: {0}")]
    Configuration(String),

    /// A mastery course registration would exceed the allowed number of attempts.
    #[error("attempt limit exceeded: {attempts} prior attempts, maximum is {maximum}")]
    AttemptLimitExceeded { maximum: u32, attempts: usize },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A unique key is already taken by another record.
    #[error("{0}")]
    Conflict(String),

    /// Deleting the record would leave other records pointing at nothing.
    #[error("{entity} {id} is still referenced by {referenced_by}")]
    InUse {
        entity: &'static str,
        id: String,
        referenced_by: &'static str,
    },
}

impl DomainError {
    /// Shorthand for a validation error carrying a single violation.
    pub fn validation(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation(vec![Violation::new(field, rule, message)])
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn in_use(entity: &'static str, id: impl Display, referenced_by: &'static str) -> Self {
        Self::InUse {
            entity,
            id: id.to_string(),
            referenced_by,
        }
    }

    /// Violations carried by a [`DomainError::Validation`], empty for every other kind.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_message() {
        let error = DomainError::Validation(vec![
            Violation::new("province", "regex", "province must be a Canadian province code"),
            Violation::new("student_number", "range", "student_number must have 8 digits"),
        ]);

        assert_eq!(
            error.to_string(),
            "province must be a Canadian province code, student_number must have 8 digits"
        );
        assert_eq!(error.violations().len(), 2);
        assert!(error.is_validation());
    }

    #[test]
    fn test_non_validation_errors_have_no_violations() {
        let error = DomainError::configuration("no band covers 4.2");
        assert!(error.violations().is_empty());
        assert!(error.is_configuration());
        assert_eq!(
            error.to_string(),
            "grade point state configuration is invalid: no band covers 4.2"
        );
    }

    #[test]
    fn test_attempt_limit_message() {
        let error = DomainError::AttemptLimitExceeded {
            maximum: 3,
            attempts: 3,
        };
        assert_eq!(
            error.to_string(),
            "attempt limit exceeded: 3 prior attempts, maximum is 3"
        );
    }
}
