use bitcollege::config::StandingConfig;
use bitcollege::models::{StateKind, UpdateGradePointState};
use bitcollege::{CollegeStore, StandingService};

mod common;

use common::TestCollege;

fn kind_of(college: &TestCollege, student: bitcollege::models::StudentId) -> StateKind {
    let state_id = college.student(student).grade_point_state_id;
    college.store.grade_point_state(state_id).unwrap().kind
}

#[test]
fn test_gpa_update_moves_student_between_states() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(2.5));
    assert_eq!(kind_of(&college, student), StateKind::Regular);

    StandingService::update_gpa(&mut college.store, student, 3.9).unwrap();
    assert_eq!(kind_of(&college, student), StateKind::Honours);
    assert_eq!(college.student(student).grade_point_average, Some(3.9));

    StandingService::update_gpa(&mut college.store, student, 0.4).unwrap();
    assert_eq!(kind_of(&college, student), StateKind::Suspended);
}

#[test]
fn test_invalid_gpa_update_is_rejected() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(2.5));

    let err = StandingService::update_gpa(&mut college.store, student, 4.6).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(college.student(student).grade_point_average, Some(2.5));
    assert_eq!(kind_of(&college, student), StateKind::Regular);
}

#[test]
fn test_state_index_follows_gpa_updates() {
    let mut college = TestCollege::new();
    let student = college.add_student(10_000_001, Some(2.5));
    let bands = college.store.state_bands().unwrap();
    let regular = bands.by_kind(StateKind::Regular).unwrap().id;
    let honours = bands.by_kind(StateKind::Honours).unwrap().id;

    StandingService::update_gpa(&mut college.store, student, 4.2).unwrap();

    assert!(college.store.students_in_state(regular).is_empty());
    assert_eq!(college.store.students_in_state(honours).len(), 1);
}

#[test]
fn test_reassign_after_band_change() {
    let mut college = TestCollege::new();
    let borderline = college.add_student(10_000_001, Some(3.5));
    let settled = college.add_student(10_000_002, Some(2.2));
    let fresh = college.add_student(10_000_003, None);

    // Lower the honours threshold to 3.4
    let bands = college.store.state_bands().unwrap();
    let mut regular = bands.by_kind(StateKind::Regular).unwrap().clone();
    let mut honours = bands.by_kind(StateKind::Honours).unwrap().clone();
    regular
        .apply_update(UpdateGradePointState {
            upper_limit: Some(3.4),
            ..Default::default()
        })
        .unwrap();
    honours
        .apply_update(UpdateGradePointState {
            lower_limit: Some(3.4),
            ..Default::default()
        })
        .unwrap();
    college.store.save_grade_point_state(regular).unwrap();
    college.store.save_grade_point_state(honours).unwrap();

    let moved = StandingService::reassign_all(&mut college.store).unwrap();

    assert_eq!(moved, vec![borderline]);
    assert_eq!(kind_of(&college, borderline), StateKind::Honours);
    assert_eq!(kind_of(&college, settled), StateKind::Regular);
    assert_eq!(kind_of(&college, fresh), StateKind::Regular);
}

#[test]
fn test_classification_fails_without_configured_states() {
    let store = CollegeStore::new();
    let err = StandingService::classify(&store, 2.0).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_custom_thresholds_from_config() {
    let config = StandingConfig {
        suspended_upper: 1.5,
        probation_upper: 2.5,
        regular_upper: 3.5,
        suspended_factor: 1.5,
        ..StandingConfig::default()
    };
    let mut store = CollegeStore::new();
    StandingService::install_states(&mut store, &config).unwrap();

    let state = StandingService::classify(&store, 1.2).unwrap();
    assert_eq!(state.kind, StateKind::Suspended);
    assert_eq!(state.tuition_rate_factor, 1.5);
    assert_eq!(
        StandingService::classify(&store, 3.5).unwrap().kind,
        StateKind::Honours
    );
}

#[test]
fn test_second_row_for_a_kind_is_a_conflict() {
    let mut college = TestCollege::new();
    let states = bitcollege::modules::standing::configured_states(&StandingConfig::default())
        .unwrap();

    let err = college
        .store
        .save_grade_point_state(states[0].clone())
        .unwrap_err();
    assert!(matches!(err, bitcollege::DomainError::Conflict(_)));
}
