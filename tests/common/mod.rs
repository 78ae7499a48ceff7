#![allow(dead_code)]

use bitcollege::config::StandingConfig;
use bitcollege::models::{
    AcademicProgram, AcademicProgramId, Course, CourseId, CourseKind, GradePointStateId,
    NewAcademicProgram, NewCourse, NewRegistration, NewStudent, Student, StudentId,
};
use bitcollege::{CollegeStore, Money, StandingService};
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};

/// A store with the default states, one program and one course of each kind.
pub struct TestCollege {
    pub store: CollegeStore,
    pub program_id: AcademicProgramId,
    pub graded_course_id: CourseId,
    pub mastery_course_id: CourseId,
    pub audit_course_id: CourseId,
}

impl TestCollege {
    pub fn new() -> Self {
        let mut store = CollegeStore::new();
        StandingService::install_states(&mut store, &StandingConfig::default()).unwrap();

        let program = AcademicProgram::new(NewAcademicProgram {
            program_acronym: "BIT".to_string(),
            description: "Business Information Technology".to_string(),
        })
        .unwrap();
        let program_id = program.id;
        store.save_academic_program(program).unwrap();

        let graded_course_id = add_course(
            &mut store,
            program_id,
            "COMP-1001",
            Money::from_dollars(500),
            CourseKind::Graded {
                assignment_weight: 0.4,
                exam_weight: 0.6,
            },
        );
        let mastery_course_id = add_course(
            &mut store,
            program_id,
            "COMP-2002",
            Money::from_dollars(400),
            CourseKind::Mastery {
                maximum_attempts: 2,
            },
        );
        let audit_course_id = add_course(
            &mut store,
            program_id,
            "COMP-3003",
            Money::from_dollars(200),
            CourseKind::Audit,
        );

        Self {
            store,
            program_id,
            graded_course_id,
            mastery_course_id,
            audit_course_id,
        }
    }

    /// Add a student whose state matches `gpa`.
    pub fn add_student(&mut self, student_number: i64, gpa: Option<f64>) -> StudentId {
        let grade_point_state_id = StandingService::state_for(&self.store, gpa).unwrap();
        let student = Student::new(new_student(
            grade_point_state_id,
            Some(self.program_id),
            student_number,
            gpa,
        ))
        .unwrap();
        let id = student.id;
        self.store.save_student(student).unwrap();
        id
    }

    pub fn student(&self, id: StudentId) -> &Student {
        self.store.student(id).unwrap()
    }
}

pub fn add_course(
    store: &mut CollegeStore,
    program_id: AcademicProgramId,
    course_number: &str,
    tuition_amount: Money,
    kind: CourseKind,
) -> CourseId {
    let course = Course::new(new_course(Some(program_id), course_number, tuition_amount, kind))
        .unwrap();
    let id = course.id;
    store.save_course(course).unwrap();
    id
}

pub fn new_course(
    academic_program_id: Option<AcademicProgramId>,
    course_number: &str,
    tuition_amount: Money,
    kind: CourseKind,
) -> NewCourse {
    NewCourse {
        academic_program_id,
        course_number: course_number.to_string(),
        title: format!("{} Fundamentals", course_number),
        credit_hours: 3.0,
        tuition_amount,
        notes: None,
        kind,
    }
}

pub fn new_student(
    grade_point_state_id: GradePointStateId,
    academic_program_id: Option<AcademicProgramId>,
    student_number: i64,
    grade_point_average: Option<f64>,
) -> NewStudent {
    NewStudent {
        grade_point_state_id,
        academic_program_id,
        student_number,
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        address: StreetName().fake(),
        city: CityName().fake(),
        province: "ON".to_string(),
        date_created: date(2024, 9, 3),
        grade_point_average,
        outstanding_fees: Money::ZERO,
        notes: None,
    }
}

pub fn new_registration(student_id: StudentId, course_id: CourseId) -> NewRegistration {
    NewRegistration {
        student_id,
        course_id,
        registration_date: date(2025, 1, 6),
        grade: None,
        notes: None,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
