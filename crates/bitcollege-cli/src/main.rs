use std::path::PathBuf;

use anyhow::Context;
use bitcollege::{CollegeSnapshot, CollegeStore, StandingService, audit};
use bitcollege_cli::seeder;
use bitcollege_config::CollegeConfig;
use bitcollege_core::Money;
use bitcollege_observability::init_basic_console_logging;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bitcollege-cli")]
#[command(about = "BIT College CLI - Seeding and standing tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fake college and optionally write it out as JSON
    Seed {
        /// Number of academic programs (overrides SEED_PROGRAMS)
        #[arg(long)]
        programs: Option<usize>,

        /// Courses per program (overrides SEED_COURSES)
        #[arg(long)]
        courses: Option<usize>,

        /// Students per program (overrides SEED_STUDENTS)
        #[arg(long)]
        students: Option<usize>,

        /// Registrations per student (overrides SEED_REGISTRATIONS)
        #[arg(long)]
        registrations: Option<usize>,

        /// Write the seeded records to this file
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Show the grade point state a GPA falls in
    Classify {
        #[arg(long)]
        gpa: f64,
    },
    /// Show the tuition charged for a course amount at a given GPA
    Tuition {
        #[arg(long)]
        gpa: f64,

        /// Course tuition in dollars
        #[arg(long)]
        amount: f64,
    },
    /// Audit a JSON snapshot and report every violation
    Validate {
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();
    let config = CollegeConfig::from_env();

    match cli.command {
        Commands::Seed {
            programs,
            courses,
            students,
            registrations,
            output,
        } => {
            let mut config = config;
            if let Some(programs) = programs {
                config.seed.programs = programs;
            }
            if let Some(courses) = courses {
                config.seed.courses_per_program = courses;
            }
            if let Some(students) = students {
                config.seed.students_per_program = students;
            }
            if let Some(registrations) = registrations {
                config.seed.registrations_per_student = registrations;
            }
            handle_seed(&config, output)
        }
        Commands::Classify { gpa } => handle_classify(&config, gpa),
        Commands::Tuition { gpa, amount } => handle_tuition(&config, gpa, amount),
        Commands::Validate { file, json } => handle_validate(file, json),
    }
}

fn standing_store(config: &CollegeConfig) -> anyhow::Result<CollegeStore> {
    let mut store = CollegeStore::new();
    StandingService::install_states(&mut store, &config.standing)
        .context("Failed to install grade point states")?;
    Ok(store)
}

fn handle_seed(config: &CollegeConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let mut store = CollegeStore::new();
    let summary = seeder::seed_all(&mut store, config).context("Failed to seed college")?;

    println!("   Programs:      {}", summary.programs);
    println!("   Courses:       {}", summary.courses);
    println!("   Students:      {}", summary.students);
    println!("   Registrations: {}", summary.registrations);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&store.snapshot())?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\n💾 Wrote snapshot to {}", path.display());
    }
    Ok(())
}

fn handle_classify(config: &CollegeConfig, gpa: f64) -> anyhow::Result<()> {
    let store = standing_store(config)?;
    match StandingService::classify(&store, gpa) {
        Ok(state) => {
            println!(
                "{:.2} → {} (tuition factor {})",
                gpa,
                state.description(),
                state.tuition_rate_factor
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_tuition(config: &CollegeConfig, gpa: f64, amount: f64) -> anyhow::Result<()> {
    let store = standing_store(config)?;
    let state = match StandingService::classify(&store, gpa) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let base = Money::from_cents((amount * 100.0).round() as i64);
    match state.tuition_for(base) {
        Ok(charge) => {
            println!("{} at {} → {}", base, state.description(), charge);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_validate(file: PathBuf, json: bool) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot: CollegeSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a college snapshot", file.display()))?;

    let report = audit(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("✅ {} is valid", file.display());
    } else {
        if let Some(error) = &report.configuration_error {
            println!("❌ {}", error);
        }
        for entry in &report.entries {
            println!("❌ {} {}", entry.entity, entry.id);
            for violation in &entry.violations {
                println!("   - {}", violation);
            }
        }
        println!(
            "\n{} violations across {} records",
            report.violation_count(),
            report.entries.len()
        );
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
