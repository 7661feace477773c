//! Configuration types for test data generation.

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use meetfile::models::Course;

/// Configuration for seeding operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of swimmers on the club roster.
    pub swimmer_count: usize,

    /// Individual events per swimmer (range).
    pub events_per_swimmer: (usize, usize),

    /// Relay teams formed per relay event.
    pub relay_teams_per_event: usize,

    /// Pool configuration of the generated meet.
    pub course: Course,

    pub meet_date: Date,

    /// Batch size for database insertions.
    pub batch_size: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            swimmer_count: 40,
            events_per_swimmer: (1, 4),
            relay_teams_per_event: 2,
            course: Course::ShortCourseYards,
            meet_date: date!(2024 - 03 - 15),
            batch_size: 50,
        }
    }
}

/// Distribution of swimmer ages on a roster.
#[derive(Debug, Clone, Copy)]
pub enum AgeDistribution {
    /// Every age in the range is equally likely.
    Uniform { min: u8, max: u8 },
    /// Ages cluster around a mean, clamped to the range.
    Normal { mean: f64, std_dev: f64, min: u8, max: u8 },
}

impl Default for AgeDistribution {
    fn default() -> Self {
        Self::age_group_club()
    }
}

impl AgeDistribution {
    /// A typical age-group club: mostly 9 to 14, a few younger and older.
    pub fn age_group_club() -> Self {
        Self::Normal {
            mean: 11.5,
            std_dev: 2.5,
            min: 6,
            max: 18,
        }
    }

    pub fn bounds(&self) -> (u8, u8) {
        match *self {
            Self::Uniform { min, max } | Self::Normal { min, max, .. } => (min, max),
        }
    }
}
