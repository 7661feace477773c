//! Meet entry generation: individual selections with seed times, and relay
//! teams.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, LogNormal};
use uuid::Uuid;

use meetfile::models::{
    Meet, RelaySex, RelayTeam, Sex, Stroke, SwimEvent, Swimmer, SwimmerMeetEvent,
    age_group_for_age,
};

/// Configuration for entry generation.
#[derive(Debug, Clone)]
pub struct EntryGenConfig {
    /// Individual events per swimmer, inclusive.
    pub events_per_swimmer: (usize, usize),
    /// Probability that a selection has no seed time.
    pub no_time_rate: f64,
    /// Spread of seed times around the expected pace.
    pub time_variance: f64,
    /// Relay teams formed per relay event, at most.
    pub relay_teams_per_event: usize,
}

impl Default for EntryGenConfig {
    fn default() -> Self {
        Self {
            events_per_swimmer: (1, 4),
            no_time_rate: 0.15,
            time_variance: 0.08,
            relay_teams_per_event: 2,
        }
    }
}

/// Seconds per 50 for a 12-year-old, by stroke.
fn base_pace(stroke: Stroke) -> f64 {
    match stroke {
        Stroke::Freestyle => 32.0,
        Stroke::Backstroke => 37.0,
        Stroke::Breaststroke => 42.0,
        Stroke::Butterfly => 36.0,
        Stroke::Medley | Stroke::Unknown => 39.0,
    }
}

/// `M:SS.hh`.
pub fn format_seed_time(seconds: f64) -> String {
    let centis = (seconds * 100.0).round().max(0.0) as u64;
    let minutes = centis / 6000;
    let secs = (centis % 6000) / 100;
    let hundredths = centis % 100;
    format!("{minutes}:{secs:02}.{hundredths:02}")
}

/// Generates individual selections and relay teams for one meet.
pub struct EntryGenerator {
    config: EntryGenConfig,
}

impl EntryGenerator {
    pub fn new() -> Self {
        Self {
            config: EntryGenConfig::default(),
        }
    }

    pub fn with_config(config: EntryGenConfig) -> Self {
        Self { config }
    }

    /// Expected time in seconds for a swimmer of `age` in `event`.
    pub fn expected_time(&self, event: &SwimEvent, age: u8) -> f64 {
        let lengths = f64::from(event.distance) / 50.0;
        // Longer races are swum at a slower pace.
        let fade = 1.0 + 0.06 * lengths.log2().max(0.0);
        // Younger swimmers are slower, older ones faster, flattening out in the teens.
        let age_factor = (1.0 + 0.05 * (12.0 - f64::from(age.min(18)))).max(0.75);
        base_pace(event.stroke) * lengths * fade * age_factor
    }

    /// Picks individual events for each swimmer among the events the meet
    /// offers and the swimmer's age group may enter.
    pub fn generate_selections(
        &self,
        meet: &Meet,
        events: &[SwimEvent],
        swimmers: &[Swimmer],
        rng: &mut impl Rng,
    ) -> Vec<SwimmerMeetEvent> {
        let offered: Vec<&SwimEvent> = events
            .iter()
            .filter(|e| !e.is_relay && meet.offers_event(&e.id))
            .collect();
        let (min, max) = self.config.events_per_swimmer;

        let mut selections = Vec::new();
        for swimmer in swimmers {
            let age = swimmer.age_on(meet.date);
            let bucket = age_group_for_age(age);
            let eligible: Vec<&SwimEvent> = offered
                .iter()
                .copied()
                .filter(|e| e.age_groups.is_empty() || e.age_groups.iter().any(|g| g == bucket))
                .collect();

            let count = rng.gen_range(min..=max.max(min)).min(eligible.len());
            for event in eligible.choose_multiple(rng, count) {
                selections.push(SwimmerMeetEvent {
                    swimmer_id: swimmer.id.clone(),
                    meet_id: meet.id.clone(),
                    event_id: event.id.clone(),
                    seed_time: self.generate_seed_time(event, age, rng),
                });
            }
        }
        selections
    }

    fn generate_seed_time(
        &self,
        event: &SwimEvent,
        age: u8,
        rng: &mut impl Rng,
    ) -> Option<String> {
        if rng.r#gen::<f64>() < self.config.no_time_rate {
            return None;
        }
        let expected = self.expected_time(event, age);
        let noise = LogNormal::new(0.0, self.config.time_variance)
            .map(|d| d.sample(rng))
            .unwrap_or(1.0);
        Some(format_seed_time(expected * noise))
    }

    /// Forms relay teams of four for every offered relay event, grouping
    /// swimmers by sex. Team age group is the oldest leg's bucket.
    pub fn generate_relay_teams(
        &self,
        meet: &Meet,
        events: &[SwimEvent],
        swimmers: &[Swimmer],
        rng: &mut impl Rng,
    ) -> Vec<RelayTeam> {
        let mut by_sex: BTreeMap<char, Vec<&Swimmer>> = BTreeMap::new();
        for swimmer in swimmers {
            by_sex.entry(swimmer.sex.code()).or_default().push(swimmer);
        }

        let mut teams = Vec::new();
        for event in events.iter().filter(|e| e.is_relay && meet.offers_event(&e.id)) {
            for (sex, pool) in &by_sex {
                let mut pool = pool.clone();
                pool.shuffle(rng);
                for (idx, legs) in pool
                    .chunks_exact(4)
                    .take(self.config.relay_teams_per_event)
                    .enumerate()
                {
                    let oldest = legs.iter().map(|s| s.age_on(meet.date)).max().unwrap_or(0);
                    let letter = char::from(b'A' + idx as u8);
                    teams.push(RelayTeam {
                        id: Uuid::new_v4().to_string(),
                        meet_id: meet.id.clone(),
                        event_id: event.id.clone(),
                        name: format!("{letter} {}", event.name),
                        swimmers: legs.iter().map(|s| s.id.clone()).collect(),
                        age_group: age_group_for_age(oldest).to_string(),
                        sex: if *sex == Sex::Female.code() {
                            RelaySex::Female
                        } else {
                            RelaySex::Male
                        },
                    });
                }
            }
        }
        teams
    }
}

impl Default for EntryGenerator {
    fn default() -> Self {
        Self::new()
    }
}
