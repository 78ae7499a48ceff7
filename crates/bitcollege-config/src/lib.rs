//! # BIT College Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`standing`]: Default grade point state bands and tuition-rate factors
//! - [`seed`]: Sizes used when generating fake records
//!
//! # Example
//!
//! ```ignore
//! use bitcollege_config::CollegeConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = CollegeConfig::from_env();
//! println!("honours starts at {}", config.standing.regular_upper);
//! ```

pub mod seed;
pub mod standing;

// Re-export commonly used types at crate root
pub use seed::SeedConfig;
pub use standing::StandingConfig;

/// All configuration sections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollegeConfig {
    pub standing: StandingConfig,
    pub seed: SeedConfig,
}

impl CollegeConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            standing: StandingConfig::from_env(),
            seed: SeedConfig::from_env(),
        }
    }
}

/// Read `key` and parse it, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
