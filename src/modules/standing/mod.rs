pub mod service;

pub use service::{StandingService, configured_states};
