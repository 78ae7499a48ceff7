//! Fake data generation sizes.
//!
//! - `SEED_PROGRAMS`: Academic programs to create (default: 3)
//! - `SEED_COURSES`: Courses per program (default: 6)
//! - `SEED_STUDENTS`: Students per program (default: 40)
//! - `SEED_REGISTRATIONS`: Registrations per student (default: 4)

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub programs: usize,
    pub courses_per_program: usize,
    pub students_per_program: usize,
    pub registrations_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            programs: 3,
            courses_per_program: 6,
            students_per_program: 40,
            registrations_per_student: 4,
        }
    }
}

impl SeedConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            programs: env_or("SEED_PROGRAMS", defaults.programs),
            courses_per_program: env_or("SEED_COURSES", defaults.courses_per_program),
            students_per_program: env_or("SEED_STUDENTS", defaults.students_per_program),
            registrations_per_student: env_or(
                "SEED_REGISTRATIONS",
                defaults.registrations_per_student,
            ),
        }
    }

    pub fn total_students(&self) -> usize {
        self.programs * self.students_per_program
    }

    pub fn total_courses(&self) -> usize {
        self.programs * self.courses_per_program
    }
}
