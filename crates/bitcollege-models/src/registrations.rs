//! Registration domain models and DTOs.
//!
//! A registration joins one student to one course and carries the grade,
//! if one has been recorded.

use bitcollege_core::{DomainError, EntityRules, Violation, ensure_valid};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{CourseId, RegistrationId, StudentId};

/// Displayed in place of a missing grade.
pub const UNGRADED: &str = "[Ungraded]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Registration {
    pub id: RegistrationId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    #[validate(range(min = 1, message = "registration_number must be positive"))]
    pub registration_number: i64,
    pub registration_date: NaiveDate,
    #[validate(range(min = 0.0, max = 1.0, message = "grade must be between 0 and 1"))]
    pub grade: Option<f64>,
    pub notes: Option<String>,
}

/// DTO for enrolling a student in a course.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRegistration {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub registration_date: NaiveDate,
    pub grade: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRegistration {
    pub grade: Option<f64>,
    pub notes: Option<String>,
}

impl Registration {
    /// Build a registration under an already allocated `registration_number`.
    pub fn new(registration_number: i64, dto: NewRegistration) -> Result<Self, DomainError> {
        let registration = Self {
            id: RegistrationId::new(),
            student_id: dto.student_id,
            course_id: dto.course_id,
            registration_number,
            registration_date: dto.registration_date,
            grade: dto.grade,
            notes: dto.notes,
        };
        ensure_valid(&registration)?;
        Ok(registration)
    }

    pub fn apply_update(&mut self, dto: UpdateRegistration) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        if let Some(grade) = dto.grade {
            candidate.grade = Some(grade);
        }
        if let Some(notes) = dto.notes {
            candidate.notes = Some(notes);
        }
        ensure_valid(&candidate)?;
        *self = candidate;
        Ok(())
    }

    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    /// The grade as a percentage, or [`UNGRADED`].
    pub fn grade_display(&self) -> String {
        match self.grade {
            Some(grade) => format!("{:.2}%", grade * 100.0),
            None => UNGRADED.to_string(),
        }
    }
}

impl EntityRules for Registration {
    fn check_rules(&self, violations: &mut Vec<Violation>) {
        if let Some(grade) = self.grade
            && !grade.is_finite()
        {
            violations.push(Violation::new(
                "grade",
                "finite",
                "grade must be a finite number",
            ));
        }
    }
}
