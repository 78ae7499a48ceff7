pub mod enrollment;
pub mod standing;

pub use self::enrollment::EnrollmentService;
pub use self::standing::StandingService;
