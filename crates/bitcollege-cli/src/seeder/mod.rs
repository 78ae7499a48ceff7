//! Fake data seeding for a [`CollegeStore`].
//!
//! Records are generated in parallel with Rayon and `fake`, then inserted in
//! dependency order: grade point states, programs, courses, students and
//! finally registrations.

pub mod models;
pub mod programs;
pub mod students;

use bitcollege::{CollegeStore, StandingService};
use bitcollege_config::CollegeConfig;
use bitcollege_core::DomainError;
use std::time::Instant;
use tracing::info;

pub use models::SeedSummary;

/// Seeds a complete college into `store` using the sizes in `config.seed`.
pub fn seed_all(
    store: &mut CollegeStore,
    config: &CollegeConfig,
) -> Result<SeedSummary, DomainError> {
    let start_time = Instant::now();
    let seed = &config.seed;
    println!("\n🌱 Starting seed...");
    println!(
        "   {} programs, {} courses, {} students, up to {} registrations\n",
        seed.programs,
        seed.total_courses(),
        seed.total_students(),
        seed.total_students() * seed.registrations_per_student
    );

    if store.state_bands().is_err() {
        StandingService::install_states(store, &config.standing)?;
    }

    let programs = programs::seed_programs(store, seed.programs)?;
    let courses = programs::seed_courses(store, &programs, seed.courses_per_program)?;

    let program_ids: Vec<_> = programs.iter().map(|(id, _)| *id).collect();
    let student_ids = students::seed_students(store, &program_ids, seed.students_per_program)?;
    let (registrations, refused) =
        students::seed_registrations(store, &student_ids, seed.registrations_per_student)?;

    let summary = SeedSummary {
        programs: programs.len(),
        courses: courses.len(),
        students: student_ids.len(),
        registrations,
        refused,
    };

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    info!(?summary, "college seeded");
    Ok(summary)
}
