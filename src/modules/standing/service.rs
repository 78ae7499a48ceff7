use bitcollege_config::StandingConfig;
use bitcollege_core::{DomainError, Money};
use bitcollege_models::{
    CourseId, GradePointState, GradePointStateId, NewGradePointState, StateBands, StateKind,
    Student, StudentId, UpdateStudent,
};
use tracing::{debug, info, instrument};

use crate::store::CollegeStore;

/// Build the four standard state rows from configuration.
///
/// A row that fails validation is reported as a configuration error.
pub fn configured_states(config: &StandingConfig) -> Result<Vec<GradePointState>, DomainError> {
    [
        (
            StateKind::Suspended,
            0.0,
            config.suspended_upper,
            config.suspended_factor,
        ),
        (
            StateKind::Probation,
            config.suspended_upper,
            config.probation_upper,
            config.probation_factor,
        ),
        (
            StateKind::Regular,
            config.probation_upper,
            config.regular_upper,
            config.regular_factor,
        ),
        (
            StateKind::Honours,
            config.regular_upper,
            bitcollege_models::GPA_MAX,
            config.honours_factor,
        ),
    ]
    .into_iter()
    .map(|(kind, lower_limit, upper_limit, tuition_rate_factor)| {
        GradePointState::new(NewGradePointState {
            kind,
            lower_limit,
            upper_limit,
            tuition_rate_factor,
        })
        .map_err(|err| DomainError::configuration(format!("{} band is invalid: {}", kind, err)))
    })
    .collect()
}

pub struct StandingService;

impl StandingService {
    /// Store the configured state rows after checking they partition the GPA range.
    #[instrument(skip(store))]
    pub fn install_states(
        store: &mut CollegeStore,
        config: &StandingConfig,
    ) -> Result<StateBands, DomainError> {
        let states = configured_states(config)?;
        let bands = StateBands::new(states.iter().cloned())?;
        // nothing is written unless every row can be
        if let Some(existing) = store.grade_point_states().find(|existing| {
            states
                .iter()
                .any(|state| state.kind == existing.kind && state.id != existing.id)
        }) {
            return Err(DomainError::Conflict(format!(
                "{} is already configured as {}",
                existing.kind, existing.id
            )));
        }
        for state in states {
            store.save_grade_point_state(state)?;
        }
        info!(states = bands.iter().count(), "grade point states installed");
        Ok(bands)
    }

    pub fn classify(store: &CollegeStore, gpa: f64) -> Result<GradePointState, DomainError> {
        let bands = store.state_bands()?;
        let state = bands.classify(gpa)?;
        debug!(gpa, state = %state.kind, "classified grade point average");
        Ok(state.clone())
    }

    /// The state a student with `gpa` belongs in. Students without a GPA
    /// start in regular standing.
    pub fn state_for(
        store: &CollegeStore,
        gpa: Option<f64>,
    ) -> Result<GradePointStateId, DomainError> {
        let bands = store.state_bands()?;
        match gpa {
            Some(gpa) => Ok(bands.classify(gpa)?.id),
            None => bands
                .by_kind(StateKind::Regular)
                .map(|state| state.id)
                .ok_or_else(|| DomainError::configuration("RegularState is missing")),
        }
    }

    /// Record a new GPA and move the student into the matching state.
    #[instrument(skip(store))]
    pub fn update_gpa(
        store: &mut CollegeStore,
        student_id: StudentId,
        gpa: f64,
    ) -> Result<Student, DomainError> {
        let bands = store.state_bands()?;
        let state = bands.classify(gpa)?;

        let mut student = store.student(student_id)?.clone();
        let previous = student.grade_point_state_id;
        student.apply_update(UpdateStudent {
            grade_point_average: Some(Some(gpa)),
            grade_point_state_id: Some(state.id),
            ..Default::default()
        })?;
        store.save_student(student.clone())?;

        if previous != state.id {
            info!(
                student_number = student.student_number,
                state = %state.kind,
                "grade point state changed"
            );
        }
        Ok(student)
    }

    /// Re-derive every student's state from their GPA.
    ///
    /// Returns the students that moved. Students without a GPA keep their state.
    #[instrument(skip(store))]
    pub fn reassign_all(store: &mut CollegeStore) -> Result<Vec<StudentId>, DomainError> {
        let bands = store.state_bands()?;

        let mut moves = Vec::new();
        for student in store.students() {
            if let Some(gpa) = student.grade_point_average {
                let expected = bands.classify(gpa)?.id;
                if expected != student.grade_point_state_id {
                    moves.push((student.id, expected));
                }
            }
        }

        let mut moved = Vec::with_capacity(moves.len());
        for (student_id, state_id) in moves {
            let mut student = store.student(student_id)?.clone();
            student.apply_update(UpdateStudent {
                grade_point_state_id: Some(state_id),
                ..Default::default()
            })?;
            store.save_student(student)?;
            moved.push(student_id);
        }

        info!(moved = moved.len(), "grade point states reconciled");
        Ok(moved)
    }

    /// Tuition the student would pay for the course in their current state.
    pub fn tuition_quote(
        store: &CollegeStore,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Money, DomainError> {
        let student = store.student(student_id)?;
        let course = store.course(course_id)?;
        let state = store.grade_point_state(student.grade_point_state_id)?;
        state.tuition_for(course.tuition_amount)
    }
}
