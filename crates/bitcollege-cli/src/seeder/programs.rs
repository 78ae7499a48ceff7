//! Academic program and course seeding.

use bitcollege::CollegeStore;
use bitcollege_core::{DomainError, Money};
use bitcollege_models::{AcademicProgram, AcademicProgramId, Course, CourseId, CourseKind};
use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use fake::faker::lorem::en::Words;
use rayon::prelude::*;
use std::time::Instant;

use super::models::{CourseSeed, ProgramSeed};

const WEIGHTS: [(f64, f64); 3] = [(0.3, 0.7), (0.4, 0.6), (0.5, 0.5)];
const CREDIT_HOURS: [f64; 3] = [3.0, 4.0, 5.0];

/// Generates program data in parallel using Rayon
pub fn generate_programs(count: usize) -> Vec<ProgramSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let description: String = CatchPhrase().fake();
            let initials: String = description
                .split_whitespace()
                .filter_map(|word| word.chars().next())
                .filter(|c| c.is_ascii_alphabetic())
                .take(3)
                .collect::<String>()
                .to_uppercase();

            ProgramSeed {
                program_acronym: format!("{}{}", initials, idx + 1),
                description,
            }
        })
        .collect()
}

/// Generates courses for each program, cycling through graded, mastery and audit
pub fn generate_courses(
    programs: &[(AcademicProgramId, String)],
    courses_per_program: usize,
) -> Vec<CourseSeed> {
    programs
        .par_iter()
        .flat_map(|(program_id, acronym)| {
            (0..courses_per_program)
                .map(|course_idx| {
                    let words: Vec<String> = Words(1..3).fake();
                    let buzzword: String = Buzzword().fake();
                    let kind = match course_idx % 3 {
                        0 => {
                            let (assignment_weight, exam_weight) =
                                WEIGHTS[(0..WEIGHTS.len()).fake::<usize>()];
                            CourseKind::Graded {
                                assignment_weight,
                                exam_weight,
                            }
                        }
                        1 => CourseKind::Mastery {
                            maximum_attempts: (1..4).fake(),
                        },
                        _ => CourseKind::Audit,
                    };

                    CourseSeed {
                        academic_program_id: *program_id,
                        course_number: format!("{}-{:03}", acronym, 100 + course_idx),
                        title: format!("{} {}", capitalize(&buzzword), words.join(" ")),
                        credit_hours: CREDIT_HOURS[(0..CREDIT_HOURS.len()).fake::<usize>()],
                        tuition_amount: Money::from_dollars((300..900).fake::<i64>()),
                        kind,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Seeds programs into the store
pub fn seed_programs(
    store: &mut CollegeStore,
    count: usize,
) -> Result<Vec<(AcademicProgramId, String)>, DomainError> {
    let start_time = Instant::now();
    println!("📚 Seeding {} academic programs...", count);

    let mut programs = Vec::with_capacity(count);
    for seed in generate_programs(count) {
        let program = AcademicProgram::new(seed.into())?;
        programs.push((program.id, program.program_acronym.clone()));
        store.save_academic_program(program)?;
    }

    println!(
        "   ✓ Inserted {} programs in {:?}",
        programs.len(),
        start_time.elapsed()
    );

    Ok(programs)
}

/// Seeds courses for the given programs into the store
pub fn seed_courses(
    store: &mut CollegeStore,
    programs: &[(AcademicProgramId, String)],
    courses_per_program: usize,
) -> Result<Vec<CourseId>, DomainError> {
    let start_time = Instant::now();
    println!(
        "📖 Seeding {} courses per program...",
        courses_per_program
    );

    let seeds = generate_courses(programs, courses_per_program);
    let mut course_ids = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let course = Course::new(seed.into())?;
        course_ids.push(course.id);
        store.save_course(course)?;
    }

    println!(
        "   ✓ Inserted {} courses in {:?}",
        course_ids.len(),
        start_time.elapsed()
    );

    Ok(course_ids)
}
