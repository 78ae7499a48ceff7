//! Grade point standing configuration.
//!
//! The four standing bands share their edges, so only the three inner edges
//! are configured: suspended covers `[0, suspended_upper)`, probation
//! `[suspended_upper, probation_upper)`, regular
//! `[probation_upper, regular_upper)` and honours `[regular_upper, 4.5]`.
//!
//! # Configuration
//!
//! - `GPA_SUSPENDED_UPPER`: Top of the suspended band (default: 1.0)
//! - `GPA_PROBATION_UPPER`: Top of the probation band (default: 2.0)
//! - `GPA_REGULAR_UPPER`: Top of the regular band (default: 3.7)
//! - `TUITION_FACTOR_SUSPENDED`: Tuition multiplier while suspended (default: 1.1)
//! - `TUITION_FACTOR_PROBATION`: Tuition multiplier on probation (default: 1.075)
//! - `TUITION_FACTOR_REGULAR`: Tuition multiplier in regular standing (default: 1.0)
//! - `TUITION_FACTOR_HONOURS`: Tuition multiplier with honours (default: 0.9)

use crate::env_or;

/// Band edges and tuition factors for the four standing states.
#[derive(Clone, Debug, PartialEq)]
pub struct StandingConfig {
    pub suspended_upper: f64,
    pub probation_upper: f64,
    pub regular_upper: f64,
    pub suspended_factor: f64,
    pub probation_factor: f64,
    pub regular_factor: f64,
    pub honours_factor: f64,
}

impl Default for StandingConfig {
    fn default() -> Self {
        Self {
            suspended_upper: 1.0,
            probation_upper: 2.0,
            regular_upper: 3.7,
            suspended_factor: 1.1,
            probation_factor: 1.075,
            regular_factor: 1.0,
            honours_factor: 0.9,
        }
    }
}

impl StandingConfig {
    /// Load from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            suspended_upper: env_or("GPA_SUSPENDED_UPPER", defaults.suspended_upper),
            probation_upper: env_or("GPA_PROBATION_UPPER", defaults.probation_upper),
            regular_upper: env_or("GPA_REGULAR_UPPER", defaults.regular_upper),
            suspended_factor: env_or("TUITION_FACTOR_SUSPENDED", defaults.suspended_factor),
            probation_factor: env_or("TUITION_FACTOR_PROBATION", defaults.probation_factor),
            regular_factor: env_or("TUITION_FACTOR_REGULAR", defaults.regular_factor),
            honours_factor: env_or("TUITION_FACTOR_HONOURS", defaults.honours_factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_edges_ascend() {
        let config = StandingConfig::default();
        assert!(config.suspended_upper < config.probation_upper);
        assert!(config.probation_upper < config.regular_upper);
        assert!(config.regular_upper < 4.5);
    }

    #[test]
    fn test_unset_variables_use_defaults() {
        // These keys are never set by the test suite.
        assert_eq!(env_or("BITCOLLEGE_TEST_UNSET_FACTOR", 1.25), 1.25);
        assert_eq!(env_or("BITCOLLEGE_TEST_UNSET_COUNT", 7usize), 7);
    }
}
