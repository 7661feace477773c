//! Event catalog and meet generation.

use rand::Rng;
use rand::seq::SliceRandom;
use time::Date;
use uuid::Uuid;

use meetfile::models::{Course, Meet, Stroke, SwimClub, SwimEvent};

const MEET_NAMES: &[&str] = &[
    "Spring Classic",
    "Winter Invitational",
    "Summer Splash",
    "Turkey Trot",
    "Polar Bear Open",
    "Harvest Sprints",
];

/// Individual events swum at a typical age-group meet.
const INDIVIDUAL: &[(u16, Stroke)] = &[
    (50, Stroke::Freestyle),
    (100, Stroke::Freestyle),
    (200, Stroke::Freestyle),
    (50, Stroke::Backstroke),
    (100, Stroke::Backstroke),
    (50, Stroke::Breaststroke),
    (100, Stroke::Breaststroke),
    (50, Stroke::Butterfly),
    (100, Stroke::Butterfly),
    (200, Stroke::Medley),
];

const RELAYS: &[(u16, Stroke)] = &[(200, Stroke::Freestyle), (200, Stroke::Medley)];

fn event_name(distance: u16, stroke: Stroke, is_relay: bool) -> String {
    let stroke = match stroke {
        Stroke::Freestyle => "Freestyle",
        Stroke::Backstroke => "Backstroke",
        Stroke::Breaststroke => "Breaststroke",
        Stroke::Butterfly => "Butterfly",
        Stroke::Unknown => "Swim",
        Stroke::Medley => {
            if is_relay {
                "Medley"
            } else {
                "IM"
            }
        }
    };
    if is_relay {
        format!("{distance} {stroke} Relay")
    } else {
        format!("{distance} {stroke}")
    }
}

fn event_id(distance: u16, stroke: Stroke, course: Course, is_relay: bool) -> String {
    let stroke = match stroke {
        Stroke::Freestyle => "free",
        Stroke::Backstroke => "back",
        Stroke::Breaststroke => "breast",
        Stroke::Butterfly => "fly",
        Stroke::Medley if is_relay => "medley",
        Stroke::Medley => "im",
        Stroke::Unknown => "swim",
    };
    let relay = if is_relay { "-relay" } else { "" };
    format!("{distance}-{stroke}{relay}-{}", course.as_str().to_ascii_lowercase())
}

/// The standard catalog for one course: individual events first, then
/// relays. Ids look like `50-free-scy`.
pub fn standard_events(course: Course) -> Vec<SwimEvent> {
    let individual = INDIVIDUAL.iter().map(|&(d, s)| (d, s, false));
    let relays = RELAYS.iter().map(|&(d, s)| (d, s, true));
    individual
        .chain(relays)
        .map(|(distance, stroke, is_relay)| SwimEvent {
            id: event_id(distance, stroke, course, is_relay),
            name: event_name(distance, stroke, is_relay),
            distance,
            stroke,
            course,
            is_relay,
            // 200s are closed to the youngest swimmers.
            age_groups: if distance >= 200 && !is_relay {
                vec![
                    "9-10".to_string(),
                    "11-12".to_string(),
                    "13-14".to_string(),
                    "15-18".to_string(),
                ]
            } else {
                vec![]
            },
        })
        .collect()
}

/// Configuration for meet generation.
#[derive(Debug, Clone)]
pub struct MeetGenConfig {
    /// Probability that a catalog event is offered.
    pub event_offer_rate: f64,
    /// Offer every relay in the catalog regardless of the offer rate.
    pub always_offer_relays: bool,
}

impl Default for MeetGenConfig {
    fn default() -> Self {
        Self {
            event_offer_rate: 0.8,
            always_offer_relays: true,
        }
    }
}

/// Generates meets hosted by a club over an event catalog.
pub struct MeetGenerator {
    config: MeetGenConfig,
}

impl MeetGenerator {
    pub fn new() -> Self {
        Self {
            config: MeetGenConfig::default(),
        }
    }

    pub fn with_config(config: MeetGenConfig) -> Self {
        Self { config }
    }

    /// Generates a meet offering a random subset of `catalog`, in catalog
    /// order. At least one individual event is always offered.
    pub fn generate(
        &self,
        host: &SwimClub,
        catalog: &[SwimEvent],
        date: Date,
        rng: &mut impl Rng,
    ) -> Meet {
        let mut available: Vec<String> = catalog
            .iter()
            .filter(|e| {
                (e.is_relay && self.config.always_offer_relays)
                    || rng.r#gen::<f64>() < self.config.event_offer_rate
            })
            .map(|e| e.id.clone())
            .collect();

        let offers_individual = catalog
            .iter()
            .any(|e| !e.is_relay && available.contains(&e.id));
        if !offers_individual {
            if let Some(first) = catalog.iter().find(|e| !e.is_relay) {
                available.insert(0, first.id.clone());
            }
        }

        let name = MEET_NAMES.choose(rng).copied().unwrap_or("Invitational");

        Meet {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            date,
            location: format!("{} Aquatic Center", host.city),
            club_id: Some(host.id.clone()),
            available_events: available,
            is_active: true,
        }
    }
}

impl Default for MeetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_standard_events() {
        let events = standard_events(Course::ShortCourseYards);
        assert_eq!(events.len(), INDIVIDUAL.len() + RELAYS.len());
        assert_eq!(events[0].id, "50-free-scy");
        assert_eq!(events[0].name, "50 Freestyle");
        assert!(events.iter().any(|e| e.id == "200-medley-relay-scy" && e.is_relay));
        assert!(events.iter().all(|e| e.course == Course::ShortCourseYards));
    }

    #[test]
    fn test_generated_meet_offers_catalog_events() {
        let mut rng = rand::thread_rng();
        let catalog = standard_events(Course::LongCourseMeters);
        let host = SwimClub {
            id: "c1".to_string(),
            city: "Bend".to_string(),
            ..Default::default()
        };
        let meet = MeetGenerator::with_config(MeetGenConfig {
            event_offer_rate: 0.0,
            always_offer_relays: true,
        })
        .generate(&host, &catalog, date!(2024 - 06 - 01), &mut rng);

        assert_eq!(meet.club_id.as_deref(), Some("c1"));
        assert_eq!(meet.location, "Bend Aquatic Center");
        // one individual event is forced in, then both relays
        assert_eq!(meet.available_events.len(), 1 + RELAYS.len());
        assert_eq!(meet.event_number("50-free-lcm"), Some(1));
    }
}
