//! Database integration for seeding test data.
//!
//! The [`Seeder`] inserts a generated [`Scenario`](crate::builders::Scenario)
//! into the tables the export server reads.

mod seeder;

pub use seeder::{SeedError, Seeder};
