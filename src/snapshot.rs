//! Plain-data exchange format and standalone auditing.
//!
//! A [`CollegeSnapshot`] is the JSON document a persistence collaborator
//! hands over: every record of every kind, with foreign keys filled in.
//! [`audit`] checks it without loading it into a store, so a single bad row
//! does not hide the problems in the rest of the document.

use std::collections::{HashMap, HashSet};

use bitcollege_core::{DomainError, Violation, validate};
use bitcollege_models::StateBands;
use bitcollege_models::{AcademicProgram, Course, GradePointState, Registration, Student};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollegeSnapshot {
    #[serde(default)]
    pub grade_point_states: Vec<GradePointState>,
    #[serde(default)]
    pub academic_programs: Vec<AcademicProgram>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

/// Violations found on one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub entity: &'static str,
    pub id: String,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
    /// Why the grade point states do not form a valid band table, if they don't.
    pub configuration_error: Option<String>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty() && self.configuration_error.is_none()
    }

    pub fn violation_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.violations.len()).sum()
    }

    fn push(&mut self, entity: &'static str, id: impl ToString, violations: Vec<Violation>) {
        if !violations.is_empty() {
            self.entries.push(AuditEntry {
                entity,
                id: id.to_string(),
                violations,
            });
        }
    }
}

/// Validate every record of `snapshot` and the band configuration.
///
/// Besides field rules this checks that foreign keys resolve, that student
/// and registration numbers are unique, that audit registrations carry no
/// grade, that no student exceeds a mastery course's attempt limit, and
/// that each student's state matches their GPA.
pub fn audit(snapshot: &CollegeSnapshot) -> AuditReport {
    let mut report = AuditReport::default();

    let bands = match StateBands::new(snapshot.grade_point_states.iter().cloned()) {
        Ok(bands) => Some(bands),
        Err(err) => {
            report.configuration_error = Some(err.to_string());
            None
        }
    };

    for state in &snapshot.grade_point_states {
        report.push("grade point state", state.id, validate(state));
    }

    let program_ids: HashSet<_> = snapshot.academic_programs.iter().map(|p| p.id).collect();
    for program in &snapshot.academic_programs {
        report.push("academic program", program.id, validate(program));
    }

    for course in &snapshot.courses {
        let mut violations = validate(course);
        if let Some(program_id) = course.academic_program_id
            && !program_ids.contains(&program_id)
        {
            violations.push(missing("academic_program_id", "academic program"));
        }
        report.push("course", course.id, violations);
    }

    let state_ids: HashSet<_> = snapshot.grade_point_states.iter().map(|s| s.id).collect();
    let mut student_numbers = HashSet::new();
    for student in &snapshot.students {
        let mut violations = validate(student);
        if !student_numbers.insert(student.student_number) {
            violations.push(duplicate("student_number"));
        }
        if let Some(program_id) = student.academic_program_id
            && !program_ids.contains(&program_id)
        {
            violations.push(missing("academic_program_id", "academic program"));
        }
        match &bands {
            Some(bands) => violations.extend(student.standing_violations(bands)),
            None if !state_ids.contains(&student.grade_point_state_id) => {
                violations.push(missing("grade_point_state_id", "grade point state"));
            }
            None => {}
        }
        report.push("student", student.id, violations);
    }

    let student_ids: HashSet<_> = snapshot.students.iter().map(|s| s.id).collect();
    let mut registration_numbers = HashSet::new();
    let mut attempts: HashMap<_, usize> = HashMap::new();
    for registration in &snapshot.registrations {
        let mut violations = validate(registration);
        if !registration_numbers.insert(registration.registration_number) {
            violations.push(duplicate("registration_number"));
        }
        if !student_ids.contains(&registration.student_id) {
            violations.push(missing("student_id", "student"));
        }
        match snapshot
            .courses
            .iter()
            .find(|course| course.id == registration.course_id)
        {
            Some(course) => {
                let prior = attempts
                    .entry((registration.student_id, course.id))
                    .or_default();
                match course.admit_registration(*prior, registration.grade) {
                    Ok(()) => {}
                    Err(err @ DomainError::AttemptLimitExceeded { .. }) => {
                        violations.push(Violation::new("course_id", "attempts", err.to_string()));
                    }
                    Err(err) => violations.extend(err.violations().iter().cloned()),
                }
                *prior += 1;
            }
            None => violations.push(missing("course_id", "course")),
        }
        report.push("registration", registration.id, violations);
    }

    report
}

fn missing(field: &str, entity: &str) -> Violation {
    Violation::new(
        field,
        "exists",
        format!("{} must reference an existing {}", field, entity),
    )
}

fn duplicate(field: &str) -> Violation {
    Violation::new(field, "unique", format!("{} is already in use", field))
}
