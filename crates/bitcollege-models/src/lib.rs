//! # BIT College Models
//!
//! Domain entities and the business rules attached to them.
//!
//! Every entity is a plain data struct with its field constraints declared
//! through `validator` attributes, a creation DTO checked by `new`, and an
//! update DTO applied atomically by `apply_update`.
//!
//! # Modules
//!
//! - [`academic_programs`]: Academic program records
//! - [`courses`]: Courses and the graded / mastery / audit rules
//! - [`grade_point_states`]: Standing states and GPA classification
//! - [`ids`]: Strongly-typed entity IDs
//! - [`registrations`]: Student-course registrations
//! - [`students`]: Student records
//!
//! # Example
//!
//! ```ignore
//! use bitcollege_models::{StateBands, Money};
//!
//! let bands = StateBands::new(states)?;
//! let state = bands.classify(3.2)?;
//! let tuition = state.tuition_for(Money::from_dollars(500))?;
//! println!("{} pays {}", state.description(), tuition);
//! ```

pub mod academic_programs;
pub mod courses;
pub mod grade_point_states;
pub mod ids;
pub mod registrations;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use academic_programs::{AcademicProgram, NewAcademicProgram, UpdateAcademicProgram};
pub use bitcollege_core::{DomainError, Money, Violation};
pub use courses::{Course, CourseKind, NewCourse, UpdateCourse};
pub use grade_point_states::{
    GPA_MAX, GPA_MIN, GradePointState, NewGradePointState, StateBands, StateKind,
    UpdateGradePointState, classify,
};
pub use ids::{AcademicProgramId, CourseId, GradePointStateId, RegistrationId, StudentId};
pub use registrations::{NewRegistration, Registration, UNGRADED, UpdateRegistration};
pub use students::{NewStudent, Student, UpdateStudent};
