use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;
use utoipa::ToSchema;

/// Swim stroke. The relay-only codes for freestyle and medley are chosen by
/// the code tables, not by separate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(alias = "im")]
    Medley,
    /// A stroke label the tables do not know. Encodes as the fallback code.
    Unknown,
}

impl Stroke {
    pub const ALL: [Stroke; 5] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::Medley,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "freestyle",
            Stroke::Backstroke => "backstroke",
            Stroke::Breaststroke => "breaststroke",
            Stroke::Butterfly => "butterfly",
            Stroke::Medley => "medley",
            Stroke::Unknown => "unknown",
        }
    }

    /// Lenient parse for stored labels: anything unrecognized is
    /// [`Stroke::Unknown`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Stroke::Unknown)
    }
}

impl FromStr for Stroke {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freestyle" | "free" | "fr" => Ok(Stroke::Freestyle),
            "backstroke" | "back" | "bk" => Ok(Stroke::Backstroke),
            "breaststroke" | "breast" | "br" => Ok(Stroke::Breaststroke),
            "butterfly" | "fly" | "fl" => Ok(Stroke::Butterfly),
            "medley" | "im" => Ok(Stroke::Medley),
            other => Err(format!("unknown stroke: {other}")),
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pool configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Course {
    #[serde(rename = "SCY")]
    ShortCourseYards,
    #[serde(rename = "SCM")]
    ShortCourseMeters,
    #[serde(rename = "LCM")]
    LongCourseMeters,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Course {
    pub const ALL: [Course; 3] = [
        Course::ShortCourseYards,
        Course::ShortCourseMeters,
        Course::LongCourseMeters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::ShortCourseYards => "SCY",
            Course::ShortCourseMeters => "SCM",
            Course::LongCourseMeters => "LCM",
            Course::Unknown => "unknown",
        }
    }

    /// Lenient parse for stored labels: anything unrecognized is
    /// [`Course::Unknown`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Course::Unknown)
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCY" => Ok(Course::ShortCourseYards),
            "SCM" => Ok(Course::ShortCourseMeters),
            "LCM" => Ok(Course::LongCourseMeters),
            other => Err(format!("unknown course: {other}")),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swimmer sex as recorded on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn code(&self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" | "male" | "Male" => Ok(Sex::Male),
            "F" | "f" | "female" | "Female" => Ok(Sex::Female),
            other => Err(format!("unknown sex: {other}")),
        }
    }
}

/// Sex classification of a relay team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RelaySex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    Mixed,
}

impl RelaySex {
    pub fn code(&self) -> char {
        match self {
            RelaySex::Male => 'M',
            RelaySex::Female => 'F',
            RelaySex::Mixed => 'X',
        }
    }
}

impl FromStr for RelaySex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" | "male" | "Male" => Ok(RelaySex::Male),
            "F" | "f" | "female" | "Female" => Ok(RelaySex::Female),
            "Mixed" | "mixed" | "X" => Ok(RelaySex::Mixed),
            other => Err(format!("unknown relay sex: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Swimmer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    #[serde(alias = "gender")]
    pub sex: Sex,
}

impl Swimmer {
    /// Age in whole years on `on`.
    pub fn age_on(&self, on: Date) -> u8 {
        let mut age = on.year() - self.date_of_birth.year();
        if (on.month() as u8, on.day()) < (self.date_of_birth.month() as u8, self.date_of_birth.day())
        {
            age -= 1;
        }
        age.clamp(0, 99) as u8
    }

    /// Age-group bucket on `on`.
    pub fn age_group_on(&self, on: Date) -> &'static str {
        age_group_for_age(self.age_on(on))
    }
}

/// Maps an age in years to its age-group label.
pub fn age_group_for_age(age: u8) -> &'static str {
    match age {
        0..=8 => "8&U",
        9..=10 => "9-10",
        11..=12 => "11-12",
        13..=14 => "13-14",
        15..=18 => "15-18",
        _ => "Open",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwimEvent {
    pub id: String,
    pub name: String,
    pub distance: u16,
    pub stroke: Stroke,
    pub course: Course,
    #[serde(default)]
    pub is_relay: bool,
    #[serde(default)]
    pub age_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meet {
    pub id: String,
    pub name: String,
    pub date: Date,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub club_id: Option<String>,
    /// Ordered; the position of an event here is its event number.
    #[serde(default)]
    pub available_events: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Meet {
    pub fn offers_event(&self, event_id: &str) -> bool {
        self.available_events.iter().any(|id| id == event_id)
    }

    /// 1-based event number, if the event is offered.
    pub fn event_number(&self, event_id: &str) -> Option<usize> {
        self.available_events
            .iter()
            .position(|id| id == event_id)
            .map(|idx| idx + 1)
    }
}

/// An individual entry: one swimmer in one event at one meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwimmerMeetEvent {
    pub swimmer_id: String,
    pub meet_id: String,
    pub event_id: String,
    /// `MM:SS.ss`, or `NT` / absent for no time.
    #[serde(default)]
    pub seed_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelayTeam {
    pub id: String,
    pub meet_id: String,
    pub event_id: String,
    pub name: String,
    /// Swimmer ids in leg order.
    pub swimmers: Vec<String>,
    pub age_group: String,
    #[serde(alias = "gender")]
    pub sex: RelaySex,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwimClub {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn swimmer(dob: Date) -> Swimmer {
        Swimmer {
            id: "s1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: dob,
            sex: Sex::Male,
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let s = swimmer(date!(2012 - 06 - 15));
        assert_eq!(s.age_on(date!(2024 - 06 - 14)), 11);
        assert_eq!(s.age_on(date!(2024 - 06 - 15)), 12);
    }

    #[test]
    fn test_age_group_buckets() {
        assert_eq!(age_group_for_age(6), "8&U");
        assert_eq!(age_group_for_age(10), "9-10");
        assert_eq!(age_group_for_age(12), "11-12");
        assert_eq!(age_group_for_age(13), "13-14");
        assert_eq!(age_group_for_age(17), "15-18");
        assert_eq!(age_group_for_age(25), "Open");
    }

    #[test]
    fn test_event_number_is_one_based() {
        let meet = Meet {
            id: "m1".to_string(),
            name: "Spring Classic".to_string(),
            date: date!(2024 - 03 - 15),
            location: String::new(),
            club_id: None,
            available_events: vec!["a".to_string(), "b".to_string()],
            is_active: true,
        };
        assert_eq!(meet.event_number("b"), Some(2));
        assert_eq!(meet.event_number("c"), None);
        assert!(meet.offers_event("a"));
    }

    #[test]
    fn test_deserialize_swimmer_from_json() {
        let s: Swimmer = serde_json::from_str(
            r#"{"id":"s1","firstName":"John","lastName":"Doe","dateOfBirth":"2012-01-01","gender":"M"}"#,
        )
        .unwrap();
        assert_eq!(s.sex, Sex::Male);
        assert_eq!(s.date_of_birth, date!(2012 - 01 - 01));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Free".parse::<Stroke>(), Ok(Stroke::Freestyle));
        assert_eq!("lcm".parse::<Course>(), Ok(Course::LongCourseMeters));
        assert_eq!("Mixed".parse::<RelaySex>(), Ok(RelaySex::Mixed));
        assert!("sidestroke".parse::<Stroke>().is_err());
    }

    #[test]
    fn test_lenient_labels() {
        assert_eq!(Stroke::from_label("IM"), Stroke::Medley);
        assert_eq!(Stroke::from_label("sidestroke"), Stroke::Unknown);
        assert_eq!(Course::from_label("scm"), Course::ShortCourseMeters);
        assert_eq!(Course::from_label("LCY"), Course::Unknown);
    }
}
