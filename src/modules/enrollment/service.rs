use bitcollege_core::{DomainError, ensure_valid};
use bitcollege_models::{NewRegistration, Registration, RegistrationId, UpdateRegistration};
use tracing::{info, instrument};

use crate::store::CollegeStore;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll a student in a course.
    ///
    /// The course variant decides whether the registration is admitted
    /// (attempt limits, audit grades). On success the student's outstanding
    /// fees grow by the course tuition scaled by their standing factor.
    #[instrument(skip(store))]
    pub fn register(
        store: &mut CollegeStore,
        dto: NewRegistration,
    ) -> Result<Registration, DomainError> {
        let course = store.course(dto.course_id)?;
        let mut student = store.student(dto.student_id)?.clone();
        let state = store.grade_point_state(student.grade_point_state_id)?;

        let prior_attempts = store.attempts(student.id, course.id);
        course.admit_registration(prior_attempts, dto.grade)?;

        let charge = state.tuition_for(course.tuition_amount)?;
        let course_number = course.course_number.clone();

        let registration = Registration::new(store.next_registration_number(), dto)?;
        student.outstanding_fees = student
            .outstanding_fees
            .checked_add(charge)
            .ok_or_else(|| {
                DomainError::validation(
                    "outstanding_fees",
                    "overflow",
                    "outstanding_fees would exceed the largest representable amount",
                )
            })?;
        ensure_valid(&student)?;

        store.save_registration(registration.clone())?;
        store.save_student(student.clone())?;

        info!(
            registration_number = registration.registration_number,
            student_number = student.student_number,
            course_number = %course_number,
            charge = %charge,
            "student registered"
        );
        Ok(registration)
    }

    /// Record a grade on an existing registration.
    #[instrument(skip(store))]
    pub fn record_grade(
        store: &mut CollegeStore,
        registration_id: RegistrationId,
        grade: f64,
    ) -> Result<Registration, DomainError> {
        let mut registration = store.registration(registration_id)?.clone();
        store
            .course(registration.course_id)?
            .validate_grade(Some(grade))?;

        registration.apply_update(UpdateRegistration {
            grade: Some(grade),
            ..Default::default()
        })?;
        store.save_registration(registration.clone())?;
        Ok(registration)
    }

    /// Compute the weighted grade of a graded course and record it.
    #[instrument(skip(store))]
    pub fn record_scores(
        store: &mut CollegeStore,
        registration_id: RegistrationId,
        assignment_score: f64,
        exam_score: f64,
    ) -> Result<Registration, DomainError> {
        let registration = store.registration(registration_id)?;
        let grade = store
            .course(registration.course_id)?
            .final_grade(assignment_score, exam_score)?;
        Self::record_grade(store, registration_id, grade)
    }
}
