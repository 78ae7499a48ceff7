use bitcollege::models::{CourseKind, DomainError, StateKind, UNGRADED};
use bitcollege::{EnrollmentService, Money, StandingService};

mod common;

use common::{TestCollege, add_course, new_registration};

#[test]
fn test_registration_charges_tuition_at_state_factor() {
    let mut college = TestCollege::new();
    let regular = college.add_student(10_000_001, Some(3.0));
    let honours = college.add_student(10_000_002, Some(4.0));

    EnrollmentService::register(
        &mut college.store,
        new_registration(regular, college.graded_course_id),
    )
    .unwrap();
    EnrollmentService::register(
        &mut college.store,
        new_registration(honours, college.graded_course_id),
    )
    .unwrap();

    assert_eq!(
        college.student(regular).outstanding_fees,
        Money::from_dollars(500)
    );
    assert_eq!(
        college.student(honours).outstanding_fees,
        Money::from_dollars(450)
    );
}

#[test]
fn test_fees_accumulate_across_registrations() {
    let mut college = TestCollege::new();
    let suspended = college.add_student(10_000_001, Some(0.5));

    for course_id in [college.graded_course_id, college.audit_course_id] {
        EnrollmentService::register(&mut college.store, new_registration(suspended, course_id))
            .unwrap();
    }

    // 500 * 1.1 + 200 * 1.1
    assert_eq!(
        college.student(suspended).outstanding_fees,
        Money::from_cents(77_000)
    );
}

#[test]
fn test_registration_numbers_are_sequential() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, None);

    let first = EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.graded_course_id),
    )
    .unwrap();
    let second = EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.audit_course_id),
    )
    .unwrap();

    assert_eq!(first.registration_number, 1);
    assert_eq!(second.registration_number, 2);
    assert_eq!(first.grade_display(), UNGRADED);
}

#[test]
fn test_mastery_attempt_limit_is_enforced() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(2.5));
    let course_id = college.mastery_course_id;

    for _ in 0..2 {
        EnrollmentService::register(&mut college.store, new_registration(student, course_id))
            .unwrap();
    }
    let fees = college.student(student).outstanding_fees;

    let err =
        EnrollmentService::register(&mut college.store, new_registration(student, course_id))
            .unwrap_err();

    assert_eq!(
        err,
        DomainError::AttemptLimitExceeded {
            maximum: 2,
            attempts: 2
        }
    );
    assert_eq!(college.store.attempts(student, course_id), 2);
    assert_eq!(college.student(student).outstanding_fees, fees);
}

#[test]
fn test_attempts_are_counted_per_student() {
    let mut college = TestCollege::new();
    let first = college.add_student(10_000_001, Some(2.5));
    let second = college.add_student(10_000_002, Some(2.5));
    let course_id = add_course(
        &mut college.store,
        college.program_id,
        "COMP-4004",
        Money::from_dollars(100),
        CourseKind::Mastery {
            maximum_attempts: 1,
        },
    );

    EnrollmentService::register(&mut college.store, new_registration(first, course_id)).unwrap();
    EnrollmentService::register(&mut college.store, new_registration(second, course_id)).unwrap();
    assert!(
        EnrollmentService::register(&mut college.store, new_registration(first, course_id))
            .is_err()
    );
}

#[test]
fn test_audit_registration_with_grade_is_rejected() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(2.5));

    let mut dto = new_registration(student, college.audit_course_id);
    dto.grade = Some(0.8);
    let err = EnrollmentService::register(&mut college.store, dto).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(college.store.counts().registrations, 0);
    assert_eq!(college.student(student).outstanding_fees, Money::ZERO);
}

#[test]
fn test_unknown_student_or_course_is_not_found() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, None);

    let err = EnrollmentService::register(
        &mut college.store,
        new_registration(student, bitcollege::models::CourseId::new()),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "course", .. }));

    let err = EnrollmentService::register(
        &mut college.store,
        new_registration(
            bitcollege::models::StudentId::new(),
            college.graded_course_id,
        ),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "student", .. }));
}

#[test]
fn test_record_scores_stores_weighted_grade() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, None);
    let registration = EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.graded_course_id),
    )
    .unwrap();

    // weights 0.4 / 0.6
    let graded =
        EnrollmentService::record_scores(&mut college.store, registration.id, 0.9, 0.8).unwrap();

    let grade = graded.grade.unwrap();
    assert!((grade - 0.84).abs() < 1e-12);
    assert_eq!(graded.grade_display(), "84.00%");
    assert_eq!(
        college.store.registration(registration.id).unwrap().grade,
        Some(grade)
    );
}

#[test]
fn test_audit_registrations_cannot_be_graded_later() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, None);
    let registration = EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.audit_course_id),
    )
    .unwrap();

    assert!(EnrollmentService::record_grade(&mut college.store, registration.id, 0.7).is_err());
    assert!(
        EnrollmentService::record_scores(&mut college.store, registration.id, 0.7, 0.7).is_err()
    );
    assert!(!college.store.registration(registration.id).unwrap().is_graded());
}

#[test]
fn test_quote_matches_the_amount_charged() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(1.5));

    let quote =
        StandingService::tuition_quote(&college.store, student, college.mastery_course_id)
            .unwrap();
    EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.mastery_course_id),
    )
    .unwrap();

    // 400 * 1.075
    assert_eq!(quote, Money::from_cents(43_000));
    assert_eq!(college.student(student).outstanding_fees, quote);

    let state = college
        .store
        .grade_point_state(college.student(student).grade_point_state_id)
        .unwrap();
    assert_eq!(state.kind, StateKind::Probation);
}

#[test]
fn test_fee_overflow_rejects_registration() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(3.0));
    let mut indebted = college.student(student).clone();
    indebted.outstanding_fees = Money::from_cents(i64::MAX - 10);
    college.store.save_student(indebted).unwrap();

    let err = EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.graded_course_id),
    )
    .unwrap_err();

    assert_eq!(err.violations()[0].field, "outstanding_fees");
    assert_eq!(err.violations()[0].rule, "overflow");
    assert_eq!(college.store.counts().registrations, 0);
    assert_eq!(
        college.student(student).outstanding_fees,
        Money::from_cents(i64::MAX - 10)
    );
}

#[test]
fn test_non_finite_grade_is_not_recorded() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, None);
    let registration = EnrollmentService::register(
        &mut college.store,
        new_registration(student, college.graded_course_id),
    )
    .unwrap();

    let err =
        EnrollmentService::record_grade(&mut college.store, registration.id, f64::NAN).unwrap_err();

    assert_eq!(err.violations()[0].rule, "finite");
    assert_eq!(college.store.registration(registration.id).unwrap().grade, None);
}
