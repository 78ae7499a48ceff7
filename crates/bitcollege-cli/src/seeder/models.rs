//! Seed records produced by the generators.
//!
//! Generation runs in parallel and touches no store; insertion afterwards is
//! sequential so uniqueness and enrollment rules are applied in order.

use bitcollege_core::Money;
use bitcollege_models::{
    AcademicProgramId, CourseId, CourseKind, NewAcademicProgram, NewCourse, StudentId,
};
use chrono::NaiveDate;

/// Seed data for creating an academic program.
pub struct ProgramSeed {
    pub program_acronym: String,
    pub description: String,
}

impl From<ProgramSeed> for NewAcademicProgram {
    fn from(seed: ProgramSeed) -> Self {
        Self {
            program_acronym: seed.program_acronym,
            description: seed.description,
        }
    }
}

/// Seed data for creating a course.
pub struct CourseSeed {
    pub academic_program_id: AcademicProgramId,
    pub course_number: String,
    pub title: String,
    pub credit_hours: f64,
    pub tuition_amount: Money,
    pub kind: CourseKind,
}

impl From<CourseSeed> for NewCourse {
    fn from(seed: CourseSeed) -> Self {
        Self {
            academic_program_id: Some(seed.academic_program_id),
            course_number: seed.course_number,
            title: seed.title,
            credit_hours: seed.credit_hours,
            tuition_amount: seed.tuition_amount,
            notes: None,
            kind: seed.kind,
        }
    }
}

/// Seed data for creating a student. The state is derived from the GPA at insert time.
pub struct StudentSeed {
    pub academic_program_id: AcademicProgramId,
    pub student_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub date_created: NaiveDate,
    pub grade_point_average: Option<f64>,
}

/// A planned registration and the scores to record once it exists.
pub struct RegistrationSeed {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub registration_date: NaiveDate,
    pub assignment_score: f64,
    pub exam_score: f64,
}

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub programs: usize,
    pub courses: usize,
    pub students: usize,
    pub registrations: usize,
    /// Registrations refused by a mastery course's attempt limit.
    pub refused: usize,
}
