//! # BIT College Core
//!
//! Foundational types shared by every BIT College crate:
//!
//! - [`errors`]: The domain error kinds returned by rules and constructors
//! - [`money`]: Integer-cent monetary amounts
//! - [`nullable`]: Clearable fields on update DTOs
//! - [`validation`]: Storage-independent validation of entities
//!
//! # Example
//!
//! ```ignore
//! use bitcollege_core::{Money, validation};
//!
//! let tuition = Money::from_dollars(500);
//! assert_eq!(tuition.scale(1.5), Some(Money::from_dollars(750)));
//!
//! let violations = validation::validate(&student);
//! assert!(violations.is_empty());
//! ```

pub mod errors;
pub mod money;
pub mod nullable;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::DomainError;
pub use money::Money;
pub use validation::{EntityRules, Violation, ensure_valid, format_violations, validate};
