//! Grade point standing states and the GPA classification rule.
//!
//! A college configures exactly four states, one per [`StateKind`]. Each
//! covers a GPA band and carries the factor applied to tuition for students
//! in that state. [`StateBands`] checks that the four bands partition
//! `[0, 4.5]` and maps a GPA onto its state.
//!
//! Boundary policy: bands are lower-inclusive and upper-exclusive, except the
//! topmost band which also includes its upper limit.

use std::fmt;

use bitcollege_core::{DomainError, EntityRules, Money, Violation, ensure_valid};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::GradePointStateId;

/// Lowest GPA a student can hold.
pub const GPA_MIN: f64 = 0.0;
/// Highest GPA a student can hold.
pub const GPA_MAX: f64 = 4.5;

/// The four standing categories, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateKind {
    Suspended,
    Probation,
    Regular,
    Honours,
}

impl StateKind {
    pub const ALL: [StateKind; 4] = [
        StateKind::Suspended,
        StateKind::Probation,
        StateKind::Regular,
        StateKind::Honours,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            StateKind::Suspended => "SuspendedState",
            StateKind::Probation => "ProbationState",
            StateKind::Regular => "RegularState",
            StateKind::Honours => "HonoursState",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A configured standing state row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GradePointState {
    pub id: GradePointStateId,
    pub kind: StateKind,
    #[validate(range(min = 0.0, max = 4.5, message = "lower_limit must be between 0 and 4.5"))]
    pub lower_limit: f64,
    #[validate(range(min = 0.0, max = 4.5, message = "upper_limit must be between 0 and 4.5"))]
    pub upper_limit: f64,
    #[validate(range(
        exclusive_min = 0.0,
        message = "tuition_rate_factor must be greater than 0"
    ))]
    pub tuition_rate_factor: f64,
}

/// DTO for creating a standing state row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGradePointState {
    pub kind: StateKind,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub tuition_rate_factor: f64,
}

/// DTO for updating a standing state row. The kind of a state never changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGradePointState {
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    pub tuition_rate_factor: Option<f64>,
}

impl GradePointState {
    pub fn new(dto: NewGradePointState) -> Result<Self, DomainError> {
        let state = Self {
            id: GradePointStateId::new(),
            kind: dto.kind,
            lower_limit: dto.lower_limit,
            upper_limit: dto.upper_limit,
            tuition_rate_factor: dto.tuition_rate_factor,
        };
        ensure_valid(&state)?;
        Ok(state)
    }

    /// Apply `dto` only if the resulting row is valid.
    pub fn apply_update(&mut self, dto: UpdateGradePointState) -> Result<(), DomainError> {
        let mut candidate = self.clone();
        if let Some(lower_limit) = dto.lower_limit {
            candidate.lower_limit = lower_limit;
        }
        if let Some(upper_limit) = dto.upper_limit {
            candidate.upper_limit = upper_limit;
        }
        if let Some(tuition_rate_factor) = dto.tuition_rate_factor {
            candidate.tuition_rate_factor = tuition_rate_factor;
        }
        ensure_valid(&candidate)?;
        *self = candidate;
        Ok(())
    }

    pub fn description(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether `gpa` falls in this band. `inclusive_top` closes the upper end.
    pub fn covers(&self, gpa: f64, inclusive_top: bool) -> bool {
        gpa >= self.lower_limit
            && (gpa < self.upper_limit || (inclusive_top && gpa == self.upper_limit))
    }

    /// Base tuition scaled by this state's tuition-rate factor.
    pub fn tuition_for(&self, amount: Money) -> Result<Money, DomainError> {
        amount.scale(self.tuition_rate_factor).ok_or_else(|| {
            DomainError::validation(
                "tuition_amount",
                "overflow",
                format!(
                    "{} scaled by {} is out of range",
                    amount, self.tuition_rate_factor
                ),
            )
        })
    }
}

impl EntityRules for GradePointState {
    fn check_rules(&self, violations: &mut Vec<Violation>) {
        // range() compares, and comparisons with NaN are always false
        for (field, value) in [
            ("lower_limit", self.lower_limit),
            ("upper_limit", self.upper_limit),
            ("tuition_rate_factor", self.tuition_rate_factor),
        ] {
            if !value.is_finite() {
                violations.push(Violation::new(
                    field,
                    "finite",
                    format!("{} must be a finite number", field),
                ));
            }
        }
        if self.lower_limit >= self.upper_limit {
            violations.push(Violation::new(
                "upper_limit",
                "order",
                "upper_limit must be greater than lower_limit",
            ));
        }
    }
}

/// A verified partition of `[0, 4.5]` into the four standing states.
#[derive(Debug, Clone, PartialEq)]
pub struct StateBands {
    // sorted by lower_limit
    states: Vec<GradePointState>,
}

impl StateBands {
    /// Build the classification table, rejecting any configuration that does
    /// not cover `[0, 4.5]` exactly once.
    pub fn new(states: impl IntoIterator<Item = GradePointState>) -> Result<Self, DomainError> {
        let mut states: Vec<GradePointState> = states.into_iter().collect();

        for state in &states {
            ensure_valid(state).map_err(|err| {
                DomainError::configuration(format!("{} band is invalid: {}", state.kind, err))
            })?;
        }

        for kind in StateKind::ALL {
            match states.iter().filter(|state| state.kind == kind).count() {
                0 => {
                    return Err(DomainError::configuration(format!("{} is missing", kind)));
                }
                1 => {}
                n => {
                    return Err(DomainError::configuration(format!(
                        "{} is configured {} times",
                        kind, n
                    )));
                }
            }
        }

        states.sort_by(|a, b| a.lower_limit.total_cmp(&b.lower_limit));

        let first = &states[0];
        if first.lower_limit != GPA_MIN {
            return Err(DomainError::configuration(format!(
                "no band covers {:.2} to {:.2}",
                GPA_MIN, first.lower_limit
            )));
        }

        for pair in states.windows(2) {
            let (below, above) = (&pair[0], &pair[1]);
            if above.lower_limit > below.upper_limit {
                return Err(DomainError::configuration(format!(
                    "no band covers {:.2} to {:.2}",
                    below.upper_limit, above.lower_limit
                )));
            }
            if above.lower_limit < below.upper_limit {
                return Err(DomainError::configuration(format!(
                    "{} and {} overlap between {:.2} and {:.2}",
                    below.kind,
                    above.kind,
                    above.lower_limit,
                    below.upper_limit.min(above.upper_limit)
                )));
            }
        }

        let last = &states[states.len() - 1];
        if last.upper_limit != GPA_MAX {
            return Err(DomainError::configuration(format!(
                "no band covers {:.2} to {:.2}",
                last.upper_limit, GPA_MAX
            )));
        }

        Ok(Self { states })
    }

    /// The single state whose band contains `gpa`.
    ///
    /// A GPA outside `[0, 4.5]` is a validation error. Zero or several matching
    /// bands is a configuration error.
    pub fn classify(&self, gpa: f64) -> Result<&GradePointState, DomainError> {
        if !(GPA_MIN..=GPA_MAX).contains(&gpa) {
            return Err(DomainError::validation(
                "grade_point_average",
                "range",
                "grade_point_average must be between 0 and 4.5",
            ));
        }

        let top = self.states.len() - 1;
        let mut matches = self
            .states
            .iter()
            .enumerate()
            .filter(|(index, state)| state.covers(gpa, *index == top))
            .map(|(_, state)| state);

        match (matches.next(), matches.next()) {
            (Some(state), None) => Ok(state),
            (None, _) => Err(DomainError::configuration(format!(
                "no band covers {:.2}",
                gpa
            ))),
            (Some(first), Some(second)) => Err(DomainError::configuration(format!(
                "{} and {} both cover {:.2}",
                first.kind, second.kind, gpa
            ))),
        }
    }

    pub fn get(&self, id: GradePointStateId) -> Option<&GradePointState> {
        self.states.iter().find(|state| state.id == id)
    }

    pub fn by_kind(&self, kind: StateKind) -> Option<&GradePointState> {
        self.states.iter().find(|state| state.kind == kind)
    }

    /// States in ascending band order.
    pub fn iter(&self) -> impl Iterator<Item = &GradePointState> {
        self.states.iter()
    }
}

/// One-shot classification against an unverified set of states.
pub fn classify(gpa: f64, states: &[GradePointState]) -> Result<GradePointState, DomainError> {
    StateBands::new(states.iter().cloned())?
        .classify(gpa)
        .cloned()
}
