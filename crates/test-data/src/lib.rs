//! Test data generation for meetfile.
//!
//! This crate generates realistic swim meets (a host club, an event catalog,
//! a roster, individual entries with seed times and relay teams) for manual
//! verification of exported files and for integration testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let scenario = ScenarioBuilder::new()
//!     .with_swimmers(50)
//!     .with_course(Course::ShortCourseYards)
//!     .with_relay_teams_per_event(2)
//!     .build_data(&mut rng);
//!
//! let store = scenario.to_store();
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Scenario, ScenarioBuilder, ScenarioMetrics};
    pub use crate::config::{AgeDistribution, SeedConfig};
    pub use crate::db::Seeder;
    pub use crate::generators::{
        ClubGenerator, EntryGenerator, MeetGenerator, SwimmerGenerator, standard_events,
    };
    pub use meetfile::models::{Course, Sex, Stroke};
}
