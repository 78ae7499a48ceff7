//! Student domain models and DTOs.
//!
//! A student belongs to exactly one grade point state and at most one
//! academic program. Registrations, the program and the state are linked by
//! ID only; reverse traversal is the record store's job.

use std::sync::LazyLock;

use bitcollege_core::nullable::deserialize_nullable;
use bitcollege_core::{DomainError, EntityRules, Money, Violation, ensure_valid};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::grade_point_states::StateBands;
use crate::ids::{AcademicProgramId, GradePointStateId, StudentId};

/// Canadian province and territory postal abbreviations.
static PROVINCE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(N[BLSTU]|[AMN]B|[BQ]C|ON|PE|SK|YT)$").expect("province pattern compiles")
});

/// A student enrolled at the college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Student {
    pub id: StudentId,
    pub grade_point_state_id: GradePointStateId,
    pub academic_program_id: Option<AcademicProgramId>,
    #[validate(range(
        min = 10_000_000,
        max = 99_999_999,
        message = "student_number must be an 8-digit number"
    ))]
    pub student_number: i64,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(regex(
        path = *PROVINCE_CODE,
        message = "province must be a Canadian province or territory code"
    ))]
    pub province: String,
    pub date_created: NaiveDate,
    #[validate(range(
        min = 0.0,
        max = 4.5,
        message = "grade_point_average must be between 0 and 4.5"
    ))]
    pub grade_point_average: Option<f64>,
    pub outstanding_fees: Money,
    pub notes: Option<String>,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub grade_point_state_id: GradePointStateId,
    pub academic_program_id: Option<AcademicProgramId>,
    pub student_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub date_created: NaiveDate,
    pub grade_point_average: Option<f64>,
    #[serde(default)]
    pub outstanding_fees: Money,
    pub notes: Option<String>,
}

/// DTO for updating an existing student.
///
/// All fields are optional; only provided fields will be updated. The
/// nullable fields take `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    pub grade_point_state_id: Option<GradePointStateId>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub academic_program_id: Option<Option<AcademicProgramId>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub grade_point_average: Option<Option<f64>>,
    pub outstanding_fees: Option<Money>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub notes: Option<Option<String>>,
}

impl Student {
    pub fn new(dto: NewStudent) -> Result<Self, DomainError> {
        let student = Self {
            id: StudentId::new(),
            grade_point_state_id: dto.grade_point_state_id,
            academic_program_id: dto.academic_program_id,
            student_number: dto.student_number,
            first_name: dto.first_name,
            last_name: dto.last_name,
            address: dto.address,
            city: dto.city,
            province: dto.province,
            date_created: dto.date_created,
            grade_point_average: dto.grade_point_average,
            outstanding_fees: dto.outstanding_fees,
            notes: dto.notes,
        };
        ensure_valid(&student)?;
        Ok(student)
    }

    /// Apply `dto` only if the resulting student is valid.
    pub fn apply_update(&mut self, dto: UpdateStudent) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        if let Some(grade_point_state_id) = dto.grade_point_state_id {
            candidate.grade_point_state_id = grade_point_state_id;
        }
        if let Some(academic_program_id) = dto.academic_program_id {
            candidate.academic_program_id = academic_program_id;
        }
        if let Some(first_name) = dto.first_name {
            candidate.first_name = first_name;
        }
        if let Some(last_name) = dto.last_name {
            candidate.last_name = last_name;
        }
        if let Some(address) = dto.address {
            candidate.address = address;
        }
        if let Some(city) = dto.city {
            candidate.city = city;
        }
        if let Some(province) = dto.province {
            candidate.province = province;
        }
        if let Some(grade_point_average) = dto.grade_point_average {
            candidate.grade_point_average = grade_point_average;
        }
        if let Some(outstanding_fees) = dto.outstanding_fees {
            candidate.outstanding_fees = outstanding_fees;
        }
        if let Some(notes) = dto.notes {
            candidate.notes = notes;
        }
        ensure_valid(&candidate)?;
        *self = candidate;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn full_address(&self) -> String {
        format!("{} {} {}", self.address, self.city, self.province)
    }

    /// Check that the student's state exists and agrees with their GPA.
    pub fn standing_violations(&self, bands: &StateBands) -> Vec<Violation> {
        let Some(current) = bands.get(self.grade_point_state_id) else {
            return vec![Violation::new(
                "grade_point_state_id",
                "exists",
                "grade_point_state_id must reference a configured grade point state",
            )];
        };

        let Some(gpa) = self.grade_point_average else {
            return Vec::new();
        };

        match bands.classify(gpa) {
            Ok(expected) if expected.id != current.id => vec![Violation::new(
                "grade_point_state_id",
                "consistent",
                format!(
                    "a grade point average of {:.2} belongs in {}, not {}",
                    gpa,
                    expected.description(),
                    current.description()
                ),
            )],
            Ok(_) => Vec::new(),
            Err(DomainError::Validation(violations)) => violations,
            Err(err) => vec![Violation::new(
                "grade_point_state_id",
                "consistent",
                err.to_string(),
            )],
        }
    }
}

impl EntityRules for Student {
    fn check_rules(&self, violations: &mut Vec<Violation>) {
        if let Some(gpa) = self.grade_point_average
            && !gpa.is_finite()
        {
            violations.push(Violation::new(
                "grade_point_average",
                "finite",
                "grade_point_average must be a finite number",
            ));
        }
        if self.outstanding_fees.is_negative() {
            violations.push(Violation::new(
                "outstanding_fees",
                "non_negative",
                "outstanding_fees must not be negative",
            ));
        }
    }
}
