//! # BIT College
//!
//! Domain model and business rules for a small college registration system:
//! students, academic programs, courses, registrations and the grade point
//! states that decide a student's standing and tuition.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── bitcollege-core/           # DomainError, Money, validation layer
//! ├── bitcollege-models/         # Entities, DTOs, typed IDs, state bands
//! ├── bitcollege-config/         # Environment-driven thresholds and seed sizes
//! ├── bitcollege-observability/  # Console logging setup
//! └── bitcollege-cli/            # Seeder and command-line tools
//! src/
//! ├── modules/
//! │   ├── enrollment/  # Registering students, recording grades
//! │   └── standing/    # GPA classification, state reassignment, tuition
//! ├── snapshot.rs      # JSON exchange format and auditing
//! └── store.rs         # In-memory store with uniqueness and reverse indexes
//! ```
//!
//! ## Grade point states
//!
//! | State            | GPA range    | Tuition factor |
//! |------------------|--------------|----------------|
//! | SuspendedState   | 0.00 - 1.00  | 1.10           |
//! | ProbationState   | 1.00 - 2.00  | 1.075          |
//! | RegularState     | 2.00 - 3.70  | 1.00           |
//! | HonoursState     | 3.70 - 4.50  | 0.90           |
//!
//! Bands include their lower limit and exclude their upper limit, except the
//! top band which also includes 4.50.
//!
//! ## Example
//!
//! ```
//! use bitcollege::config::StandingConfig;
//! use bitcollege::modules::StandingService;
//! use bitcollege::store::CollegeStore;
//!
//! let mut store = CollegeStore::new();
//! StandingService::install_states(&mut store, &StandingConfig::default()).unwrap();
//!
//! let state = StandingService::classify(&store, 3.9).unwrap();
//! assert_eq!(state.kind.name(), "HonoursState");
//! ```

pub mod modules;
pub mod snapshot;
pub mod store;

pub use bitcollege_config as config;
pub use bitcollege_core::{DomainError, Money};
pub use bitcollege_models as models;

pub use modules::{EnrollmentService, StandingService};
pub use snapshot::{AuditEntry, AuditReport, CollegeSnapshot, audit};
pub use store::{CollegeStore, StoreCounts};
