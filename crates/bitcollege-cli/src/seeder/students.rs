//! Student and registration seeding.
//!
//! Registrations go through [`EnrollmentService`] so tuition is charged and
//! mastery attempt limits are enforced exactly as for real enrollments.

use bitcollege::{CollegeStore, EnrollmentService, StandingService};
use bitcollege_core::DomainError;
use bitcollege_models::{
    AcademicProgramId, CourseId, CourseKind, NewRegistration, NewStudent, Student, StudentId,
};
use chrono::{Days, Local, NaiveDate};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use std::time::Instant;

use super::models::{RegistrationSeed, StudentSeed};

pub const PROVINCES: [&str; 13] = [
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];

/// First student number handed out to seeded students.
pub const FIRST_STUDENT_NUMBER: i64 = 10_000_001;

fn days_ago(today: NaiveDate, max_days: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new((0..max_days).fake()))
        .unwrap_or(today)
}

/// Generates students for each program. Student numbers are consecutive from `first_number`.
pub fn generate_students(
    program_ids: &[AcademicProgramId],
    students_per_program: usize,
    first_number: i64,
) -> Vec<StudentSeed> {
    let today = Local::now().date_naive();

    program_ids
        .par_iter()
        .enumerate()
        .flat_map(|(program_idx, &program_id)| {
            (0..students_per_program)
                .map(|student_idx| {
                    let offset = (program_idx * students_per_program + student_idx) as i64;
                    let street: String = StreetName().fake();
                    let building: String = BuildingNumber().fake();
                    // Roughly one in ten students has no GPA yet
                    let grade_point_average = if (0..10).fake::<u8>() == 0 {
                        None
                    } else {
                        Some(((0.0..4.5).fake::<f64>() * 100.0).round() / 100.0)
                    };

                    StudentSeed {
                        academic_program_id: program_id,
                        student_number: first_number + offset,
                        first_name: FirstName().fake(),
                        last_name: LastName().fake(),
                        address: format!("{} {}", building, street),
                        city: CityName().fake(),
                        province: PROVINCES[(0..PROVINCES.len()).fake::<usize>()].to_string(),
                        date_created: days_ago(today, 1500),
                        grade_point_average,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Picks `per_student` courses (with repeats) from each student's program.
pub fn generate_registrations(
    students: &[(StudentId, Vec<CourseId>)],
    per_student: usize,
) -> Vec<RegistrationSeed> {
    let today = Local::now().date_naive();

    students
        .par_iter()
        .flat_map(|(student_id, courses)| {
            if courses.is_empty() {
                return Vec::new();
            }
            (0..per_student)
                .map(|_| RegistrationSeed {
                    student_id: *student_id,
                    course_id: courses[(0..courses.len()).fake::<usize>()],
                    registration_date: days_ago(today, 365),
                    assignment_score: ((0.4..1.0).fake::<f64>() * 100.0).round() / 100.0,
                    exam_score: ((0.3..1.0).fake::<f64>() * 100.0).round() / 100.0,
                })
                .collect()
        })
        .collect()
}

/// Seeds students into the store, placing each in the state matching their GPA
pub fn seed_students(
    store: &mut CollegeStore,
    program_ids: &[AcademicProgramId],
    students_per_program: usize,
) -> Result<Vec<StudentId>, DomainError> {
    let start_time = Instant::now();
    println!(
        "👨‍🎓 Seeding {} students per program...",
        students_per_program
    );

    let first_number = store
        .students()
        .map(|student| student.student_number)
        .max()
        .map_or(FIRST_STUDENT_NUMBER, |highest| highest + 1);

    let seeds = generate_students(program_ids, students_per_program, first_number);
    let mut student_ids = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let grade_point_state_id = StandingService::state_for(store, seed.grade_point_average)?;
        let student = Student::new(NewStudent {
            grade_point_state_id,
            academic_program_id: Some(seed.academic_program_id),
            student_number: seed.student_number,
            first_name: seed.first_name,
            last_name: seed.last_name,
            address: seed.address,
            city: seed.city,
            province: seed.province,
            date_created: seed.date_created,
            grade_point_average: seed.grade_point_average,
            outstanding_fees: Default::default(),
            notes: None,
        })?;
        student_ids.push(student.id);
        store.save_student(student)?;
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        student_ids.len(),
        start_time.elapsed()
    );

    Ok(student_ids)
}

/// Registers students in courses of their own program and records grades.
///
/// Returns the number of registrations created and the number refused by
/// attempt limits.
pub fn seed_registrations(
    store: &mut CollegeStore,
    student_ids: &[StudentId],
    per_student: usize,
) -> Result<(usize, usize), DomainError> {
    let start_time = Instant::now();
    println!("📝 Seeding {} registrations per student...", per_student);

    let mut plans = Vec::with_capacity(student_ids.len());
    for &student_id in student_ids {
        let courses: Vec<CourseId> = match store.student(student_id)?.academic_program_id {
            Some(program_id) => store
                .courses_in_program(program_id)
                .into_iter()
                .map(|course| course.id)
                .collect(),
            None => Vec::new(),
        };
        plans.push((student_id, courses));
    }

    let mut created = 0;
    let mut refused = 0;
    for seed in generate_registrations(&plans, per_student) {
        let registration = match EnrollmentService::register(
            store,
            NewRegistration {
                student_id: seed.student_id,
                course_id: seed.course_id,
                registration_date: seed.registration_date,
                grade: None,
                notes: None,
            },
        ) {
            Ok(registration) => registration,
            Err(DomainError::AttemptLimitExceeded { .. }) => {
                refused += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        created += 1;

        match store.course(seed.course_id)?.kind {
            CourseKind::Graded { .. } => {
                EnrollmentService::record_scores(
                    store,
                    registration.id,
                    seed.assignment_score,
                    seed.exam_score,
                )?;
            }
            CourseKind::Mastery { .. } => {
                EnrollmentService::record_grade(store, registration.id, seed.exam_score)?;
            }
            CourseKind::Audit => {}
        }
    }

    println!(
        "   ✓ Inserted {} registrations ({} refused by attempt limits) in {:?}",
        created,
        refused,
        start_time.elapsed()
    );

    Ok((created, refused))
}
