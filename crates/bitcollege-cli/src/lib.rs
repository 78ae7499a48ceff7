//! # BIT College CLI
//!
//! Fake data generation for BIT College testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use bitcollege::CollegeStore;
//! use bitcollege_cli::seeder::seed_all;
//!
//! let mut store = CollegeStore::new();
//! let summary = seed_all(&mut store, &CollegeConfig::from_env())?;
//! ```

pub mod seeder;
