//! Fluent builder for constructing meet scenarios.

use std::time::Instant;

use rand::Rng;
use sqlx::PgPool;
use time::Date;

use meetfile::models::{Course, Meet, RelayTeam, SwimClub, SwimEvent, Swimmer, SwimmerMeetEvent};
use meetfile::store::InMemoryStore;

use crate::config::{AgeDistribution, SeedConfig};
use crate::db::{SeedError, Seeder};
use crate::generators::{
    ClubGenerator, EntryGenConfig, EntryGenerator, MeetGenConfig, MeetGenerator, SwimmerGenConfig,
    SwimmerGenerator, standard_events,
};

/// A generated meet with everything entered in it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub club: SwimClub,
    pub events: Vec<SwimEvent>,
    pub meet: Meet,
    pub swimmers: Vec<Swimmer>,
    pub selections: Vec<SwimmerMeetEvent>,
    pub relay_teams: Vec<RelayTeam>,
    /// Metrics from scenario generation (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

impl Scenario {
    /// An in-memory data source holding the whole scenario.
    pub fn to_store(&self) -> InMemoryStore {
        InMemoryStore::new()
            .with_club(self.club.clone())
            .with_events(self.events.iter().cloned())
            .with_meet(self.meet.clone())
            .with_swimmers(self.swimmers.iter().cloned())
            .with_selections(self.selections.iter().cloned())
            .with_relay_teams(self.relay_teams.iter().cloned())
    }

    /// Swimmers with at least one individual selection, in roster order.
    pub fn entered_swimmers(&self) -> Vec<Swimmer> {
        self.swimmers
            .iter()
            .filter(|s| self.selections.iter().any(|sel| sel.swimmer_id == s.id))
            .cloned()
            .collect()
    }
}

/// Performance metrics from scenario generation.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent seeding database (milliseconds, 0 if build_data used).
    pub seeding_time_ms: u64,
    pub swimmer_count: usize,
    pub selection_count: usize,
    pub relay_team_count: usize,
}

/// Builder for creating complete meet scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let scenario = ScenarioBuilder::new()
///     .with_swimmers(60)
///     .with_course(Course::LongCourseMeters)
///     .with_events_per_swimmer(2, 5)
///     .with_relay_teams_per_event(3)
///     .build_data(&mut rng);
/// ```
pub struct ScenarioBuilder {
    swimmer_count: usize,
    age_distribution: AgeDistribution,
    course: Course,
    meet_date: Date,
    event_offer_rate: f64,
    events_per_swimmer: (usize, usize),
    no_time_rate: f64,
    relay_teams_per_event: usize,
    batch_size: usize,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a new scenario builder with default settings.
    pub fn new() -> Self {
        Self::from_config(&SeedConfig::default())
    }

    pub fn from_config(config: &SeedConfig) -> Self {
        Self {
            swimmer_count: config.swimmer_count,
            age_distribution: AgeDistribution::default(),
            course: config.course,
            meet_date: config.meet_date,
            event_offer_rate: MeetGenConfig::default().event_offer_rate,
            events_per_swimmer: config.events_per_swimmer,
            no_time_rate: EntryGenConfig::default().no_time_rate,
            relay_teams_per_event: config.relay_teams_per_event,
            batch_size: config.batch_size,
            track_metrics: false,
        }
    }

    /// A small meet with a handful of swimmers, for quick manual checks.
    pub fn small_meet() -> Self {
        Self::new()
            .with_swimmers(12)
            .with_events_per_swimmer(1, 2)
            .with_relay_teams_per_event(1)
    }

    /// A large championship-style meet with every event offered.
    pub fn championship() -> Self {
        Self::new()
            .with_swimmers(200)
            .with_event_offer_rate(1.0)
            .with_events_per_swimmer(3, 6)
            .with_relay_teams_per_event(4)
    }

    pub fn with_swimmers(mut self, count: usize) -> Self {
        self.swimmer_count = count;
        self
    }

    pub fn with_age_distribution(mut self, distribution: AgeDistribution) -> Self {
        self.age_distribution = distribution;
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.course = course;
        self
    }

    pub fn with_meet_date(mut self, date: Date) -> Self {
        self.meet_date = date;
        self
    }

    /// Sets the probability that each catalog event is offered at the meet.
    pub fn with_event_offer_rate(mut self, rate: f64) -> Self {
        self.event_offer_rate = rate;
        self
    }

    pub fn with_events_per_swimmer(mut self, min: usize, max: usize) -> Self {
        self.events_per_swimmer = (min, max);
        self
    }

    /// Sets the fraction of selections entered without a seed time.
    pub fn with_no_time_rate(mut self, rate: f64) -> Self {
        self.no_time_rate = rate;
        self
    }

    pub fn with_relay_teams_per_event(mut self, count: usize) -> Self {
        self.relay_teams_per_event = count;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Builds the scenario (generates data but doesn't seed database).
    pub fn build_data(&self, rng: &mut impl Rng) -> Scenario {
        let start_time = self.track_metrics.then(Instant::now);

        let club = ClubGenerator::new().generate(rng);
        let events = standard_events(self.course);
        let meet = MeetGenerator::with_config(MeetGenConfig {
            event_offer_rate: self.event_offer_rate,
            ..Default::default()
        })
        .generate(&club, &events, self.meet_date, rng);

        let swimmers = SwimmerGenerator::with_config(SwimmerGenConfig {
            age_distribution: self.age_distribution,
            ..Default::default()
        })
        .generate_batch(self.swimmer_count, self.meet_date, rng);

        let entry_gen = EntryGenerator::with_config(EntryGenConfig {
            events_per_swimmer: self.events_per_swimmer,
            no_time_rate: self.no_time_rate,
            relay_teams_per_event: self.relay_teams_per_event,
            ..Default::default()
        });
        let selections = entry_gen.generate_selections(&meet, &events, &swimmers, rng);
        let relay_teams = entry_gen.generate_relay_teams(&meet, &events, &swimmers, rng);

        let metrics = start_time.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            seeding_time_ms: 0,
            swimmer_count: swimmers.len(),
            selection_count: selections.len(),
            relay_team_count: relay_teams.len(),
        });

        Scenario {
            club,
            events,
            meet,
            swimmers,
            selections,
            relay_teams,
            metrics,
        }
    }

    /// Builds the scenario and seeds it into the database.
    pub async fn build(self, pool: &PgPool, rng: &mut impl Rng) -> Result<Scenario, SeedError> {
        let mut scenario = self.build_data(rng);
        let seed_start = self.track_metrics.then(Instant::now);

        Seeder::new(pool.clone())
            .with_batch_size(self.batch_size)
            .seed_scenario(&scenario)
            .await?;

        if let (Some(start), Some(metrics)) = (seed_start, scenario.metrics.as_mut()) {
            metrics.seeding_time_ms = start.elapsed().as_millis() as u64;
        }

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_build_data_is_consistent() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
        let scenario = ScenarioBuilder::new()
            .with_swimmers(30)
            .with_metrics(true)
            .build_data(&mut rng);

        assert_eq!(scenario.swimmers.len(), 30);
        assert_eq!(scenario.meet.club_id.as_deref(), Some(scenario.club.id.as_str()));

        let roster: HashSet<&str> = scenario.swimmers.iter().map(|s| s.id.as_str()).collect();
        for sel in &scenario.selections {
            assert!(roster.contains(sel.swimmer_id.as_str()));
            assert!(scenario.meet.offers_event(&sel.event_id));
        }
        for team in &scenario.relay_teams {
            assert!(scenario.meet.offers_event(&team.event_id));
            assert!(team.swimmers.iter().all(|id| roster.contains(id.as_str())));
        }

        let metrics = scenario.metrics.unwrap();
        assert_eq!(metrics.swimmer_count, 30);
        assert_eq!(metrics.selection_count, scenario.selections.len());
    }

    #[test]
    fn test_entered_swimmers_keep_roster_order() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let scenario = ScenarioBuilder::small_meet().build_data(&mut rng);
        let entered = scenario.entered_swimmers();

        let positions: Vec<usize> = entered
            .iter()
            .map(|s| scenario.swimmers.iter().position(|r| r.id == s.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_no_time_rate_one_leaves_seeds_empty() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let scenario = ScenarioBuilder::small_meet()
            .with_no_time_rate(1.0)
            .build_data(&mut rng);
        assert!(scenario.selections.iter().all(|s| s.seed_time.is_none()));
    }
}
