//! Swim club generation.

use fake::{
    Fake,
    faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode},
};
use rand::Rng;
use uuid::Uuid;

use meetfile::models::SwimClub;

const MASCOTS: &[&str] = &[
    "Sharks", "Dolphins", "Marlins", "Stingrays", "Barracudas", "Otters", "Orcas", "Seahawks",
];

/// Generates clubs with a mascot name and a short abbreviation.
pub struct ClubGenerator;

impl ClubGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, rng: &mut impl Rng) -> SwimClub {
        let city: String = CityName().fake_with_rng(rng);
        let mascot = MASCOTS[rng.gen_range(0..MASCOTS.len())];
        let name = format!("{city} {mascot}");
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);

        SwimClub {
            id: Uuid::new_v4().to_string(),
            abbreviation: abbreviate(&name),
            name,
            address: format!("{number} {street}"),
            city,
            state: StateAbbr().fake_with_rng(rng),
            postal_code: ZipCode().fake_with_rng(rng),
        }
    }
}

impl Default for ClubGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initials of each word plus the tail of the last word, up to six letters.
pub fn abbreviate(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let mut abbr: String = words
        .iter()
        .filter_map(|w| w.chars().find(char::is_ascii_alphabetic))
        .collect();
    if let Some(last) = words.last() {
        abbr.extend(last.chars().filter(char::is_ascii_alphabetic).skip(1));
    }
    abbr.chars().take(6).collect::<String>().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("Portland Sharks"), "PSHARK");
        assert_eq!(abbreviate("Lake Oswego Orcas"), "LOORCA");
        assert_eq!(abbreviate(""), "");
    }

    #[test]
    fn test_generate_club() {
        let mut rng = rand::thread_rng();
        let club = ClubGenerator::new().generate(&mut rng);
        assert!(!club.name.is_empty());
        assert!(!club.abbreviation.is_empty());
        assert!(club.abbreviation.len() <= 6);
    }
}
