//! Course domain models and the per-variant course rules.
//!
//! Courses come in three kinds, carried by [`CourseKind`]:
//!
//! - **Graded**: the final grade is a weighted mix of assignment and exam scores
//! - **Mastery**: students may attempt the course a bounded number of times
//! - **Audit**: taken without a grade

use bitcollege_core::nullable::deserialize_nullable;
use bitcollege_core::{DomainError, EntityRules, Money, Violation, ensure_valid};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{AcademicProgramId, CourseId};

/// How far assignment and exam weights may drift from summing to exactly 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// The course variant and its variant-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CourseKind {
    Graded {
        assignment_weight: f64,
        exam_weight: f64,
    },
    Mastery {
        maximum_attempts: u32,
    },
    Audit,
}

impl CourseKind {
    pub const fn name(&self) -> &'static str {
        match self {
            CourseKind::Graded { .. } => "GradedCourse",
            CourseKind::Mastery { .. } => "MasteryCourse",
            CourseKind::Audit => "AuditCourse",
        }
    }

    /// Weighted final grade for a graded course.
    pub fn final_grade(&self, assignment_score: f64, exam_score: f64) -> Result<f64, DomainError> {
        let CourseKind::Graded {
            assignment_weight,
            exam_weight,
        } = *self
        else {
            return Err(DomainError::validation(
                "type",
                "graded",
                format!("{} does not compute weighted grades", self.name()),
            ));
        };

        let mut violations = Vec::new();
        check_fraction("assignment_score", assignment_score, &mut violations);
        check_fraction("exam_score", exam_score, &mut violations);
        check_weights(assignment_weight, exam_weight, &mut violations);
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }

        Ok(assignment_score * assignment_weight + exam_score * exam_weight)
    }

    /// Decide whether a new registration may be created.
    ///
    /// `prior_attempts` counts the student's existing registrations in this
    /// course. `grade` is the grade supplied with the registration, if any.
    pub fn admit_registration(
        &self,
        prior_attempts: usize,
        grade: Option<f64>,
    ) -> Result<(), DomainError> {
        match *self {
            CourseKind::Mastery { maximum_attempts } => {
                if prior_attempts >= maximum_attempts as usize {
                    return Err(DomainError::AttemptLimitExceeded {
                        maximum: maximum_attempts,
                        attempts: prior_attempts,
                    });
                }
                Ok(())
            }
            CourseKind::Audit => self.validate_grade(grade),
            CourseKind::Graded { .. } => Ok(()),
        }
    }

    /// Audit courses are ungraded, so any grade on them is rejected.
    pub fn validate_grade(&self, grade: Option<f64>) -> Result<(), DomainError> {
        if matches!(self, CourseKind::Audit) && grade.is_some() {
            return Err(DomainError::validation(
                "grade",
                "ungraded",
                "audit courses do not accept a grade",
            ));
        }
        Ok(())
    }

    fn check(&self, violations: &mut Vec<Violation>) {
        match *self {
            CourseKind::Graded {
                assignment_weight,
                exam_weight,
            } => {
                check_fraction("assignment_weight", assignment_weight, violations);
                check_fraction("exam_weight", exam_weight, violations);
                check_weights(assignment_weight, exam_weight, violations);
            }
            CourseKind::Mastery { maximum_attempts } => {
                if maximum_attempts == 0 {
                    violations.push(Violation::new(
                        "maximum_attempts",
                        "range",
                        "maximum_attempts must be at least 1",
                    ));
                }
            }
            CourseKind::Audit => {}
        }
    }
}

fn check_fraction(field: &str, value: f64, violations: &mut Vec<Violation>) {
    if !(0.0..=1.0).contains(&value) {
        violations.push(Violation::new(
            field,
            "range",
            format!("{} must be between 0 and 1", field),
        ));
    }
}

fn check_weights(assignment_weight: f64, exam_weight: f64, violations: &mut Vec<Violation>) {
    if ((assignment_weight + exam_weight) - 1.0).abs() > WEIGHT_TOLERANCE {
        violations.push(Violation::new(
            "exam_weight",
            "weight_sum",
            "assignment_weight and exam_weight must sum to 1",
        ));
    }
}

/// A course offered by the college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Course {
    pub id: CourseId,
    pub academic_program_id: Option<AcademicProgramId>,
    #[validate(length(min = 1, message = "course_number is required"))]
    pub course_number: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(exclusive_min = 0.0, message = "credit_hours must be greater than 0"))]
    pub credit_hours: f64,
    pub tuition_amount: Money,
    pub notes: Option<String>,
    pub kind: CourseKind,
}

/// DTO for creating a course.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub academic_program_id: Option<AcademicProgramId>,
    pub course_number: String,
    pub title: String,
    pub credit_hours: f64,
    pub tuition_amount: Money,
    pub notes: Option<String>,
    pub kind: CourseKind,
}

/// DTO for updating a course.
///
/// `kind` may change the variant's fields but not the variant itself.
/// `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub academic_program_id: Option<Option<AcademicProgramId>>,
    pub course_number: Option<String>,
    pub title: Option<String>,
    pub credit_hours: Option<f64>,
    pub tuition_amount: Option<Money>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub notes: Option<Option<String>>,
    pub kind: Option<CourseKind>,
}

impl Course {
    pub fn new(dto: NewCourse) -> Result<Self, DomainError> {
        let course = Self {
            id: CourseId::new(),
            academic_program_id: dto.academic_program_id,
            course_number: dto.course_number,
            title: dto.title,
            credit_hours: dto.credit_hours,
            tuition_amount: dto.tuition_amount,
            notes: dto.notes,
            kind: dto.kind,
        };
        ensure_valid(&course)?;
        Ok(course)
    }

    pub fn apply_update(&mut self, dto: UpdateCourse) -> Result<(), DomainError> {
        if let Some(kind) = &dto.kind
            && kind.name() != self.kind.name()
        {
            return Err(DomainError::validation(
                "type",
                "immutable",
                format!("a {} cannot become a {}", self.kind.name(), kind.name()),
            ));
        }

        let mut candidate = self.clone();
        if let Some(academic_program_id) = dto.academic_program_id {
            candidate.academic_program_id = academic_program_id;
        }
        if let Some(course_number) = dto.course_number {
            candidate.course_number = course_number;
        }
        if let Some(title) = dto.title {
            candidate.title = title;
        }
        if let Some(credit_hours) = dto.credit_hours {
            candidate.credit_hours = credit_hours;
        }
        if let Some(tuition_amount) = dto.tuition_amount {
            candidate.tuition_amount = tuition_amount;
        }
        if let Some(notes) = dto.notes {
            candidate.notes = notes;
        }
        if let Some(kind) = dto.kind {
            candidate.kind = kind;
        }
        ensure_valid(&candidate)?;
        *self = candidate;
        Ok(())
    }

    pub fn course_type(&self) -> &'static str {
        self.kind.name()
    }

    pub fn final_grade(&self, assignment_score: f64, exam_score: f64) -> Result<f64, DomainError> {
        self.kind.final_grade(assignment_score, exam_score)
    }

    pub fn admit_registration(
        &self,
        prior_attempts: usize,
        grade: Option<f64>,
    ) -> Result<(), DomainError> {
        self.kind.admit_registration(prior_attempts, grade)
    }

    pub fn validate_grade(&self, grade: Option<f64>) -> Result<(), DomainError> {
        self.kind.validate_grade(grade)
    }
}

impl EntityRules for Course {
    fn check_rules(&self, violations: &mut Vec<Violation>) {
        if self.tuition_amount.is_negative() {
            violations.push(Violation::new(
                "tuition_amount",
                "non_negative",
                "tuition_amount must not be negative",
            ));
        }
        self.kind.check(violations);
    }
}
