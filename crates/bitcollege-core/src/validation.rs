//! Storage-independent entity validation.
//!
//! Field rules are declared on each entity with `#[derive(Validate)]`
//! attributes. Rules that span several fields, or that depend on a variant
//! tag, are supplied through [`EntityRules`]. [`validate`] runs both and
//! returns every violation at once.

use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::errors::DomainError;

/// A single broken constraint: which field, which rule, and a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }

    fn from_validator(field: &str, error: &ValidationError) -> Self {
        let message = error
            .message
            .as_ref()
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| format!("{} is invalid", field));
        Self::new(field, error.code.to_string(), message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.rule, self.message)
    }
}

/// Constraints that the derive attributes cannot express.
pub trait EntityRules {
    fn check_rules(&self, _violations: &mut Vec<Violation>) {}
}

/// Run the declarative field rules and the entity rules, collecting every violation.
///
/// The result is sorted by field then rule so callers get a stable report.
pub fn validate<T>(entity: &T) -> Vec<Violation>
where
    T: Validate + EntityRules,
{
    let mut violations = Vec::new();

    if let Err(errors) = entity.validate() {
        collect(&errors, None, &mut violations);
    }
    entity.check_rules(&mut violations);

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    violations.dedup();
    violations
}

/// Like [`validate`], but folds a non-empty report into [`DomainError::Validation`].
pub fn ensure_valid<T>(entity: &T) -> Result<(), DomainError>
where
    T: Validate + EntityRules,
{
    let violations = validate(entity);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(violations))
    }
}

pub fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<Violation>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => out.extend(
                field_errors
                    .iter()
                    .map(|error| Violation::from_validator(&path, error)),
            ),
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}
