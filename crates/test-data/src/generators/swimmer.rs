//! Swimmer generation for club rosters.

use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use time::{Date, Duration};
use uuid::Uuid;

use meetfile::models::{Sex, Swimmer};

use crate::config::AgeDistribution;

/// Configuration for swimmer generation.
#[derive(Debug, Clone)]
pub struct SwimmerGenConfig {
    pub age_distribution: AgeDistribution,
    /// Probability that a swimmer is female.
    pub female_fraction: f64,
}

impl Default for SwimmerGenConfig {
    fn default() -> Self {
        Self {
            age_distribution: AgeDistribution::default(),
            female_fraction: 0.55,
        }
    }
}

/// Generates roster swimmers with ages measured against a meet date.
pub struct SwimmerGenerator {
    config: SwimmerGenConfig,
}

impl SwimmerGenerator {
    pub fn new() -> Self {
        Self {
            config: SwimmerGenConfig::default(),
        }
    }

    pub fn with_config(config: SwimmerGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single swimmer whose age on `on` follows the configured
    /// distribution.
    pub fn generate(&self, on: Date, rng: &mut impl Rng) -> Swimmer {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let sex = if rng.r#gen::<f64>() < self.config.female_fraction {
            Sex::Female
        } else {
            Sex::Male
        };

        let age = self.generate_age(rng);
        // Last birthday falls somewhere in the year before `on`.
        let days_since_birthday = rng.gen_range(0..360);
        let date_of_birth =
            Date::from_calendar_date(on.year() - i32::from(age), on.month(), on.day().min(28))
                .unwrap_or(on)
                .saturating_sub(Duration::days(days_since_birthday));

        Swimmer {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            date_of_birth,
            sex,
        }
    }

    /// Generates multiple swimmers.
    pub fn generate_batch(&self, count: usize, on: Date, rng: &mut impl Rng) -> Vec<Swimmer> {
        (0..count).map(|_| self.generate(on, rng)).collect()
    }

    fn generate_age(&self, rng: &mut impl Rng) -> u8 {
        match self.config.age_distribution {
            AgeDistribution::Uniform { min, max } => rng.gen_range(min..=max),
            AgeDistribution::Normal {
                mean,
                std_dev,
                min,
                max,
            } => match Normal::new(mean, std_dev) {
                Ok(normal) => {
                    let age = normal.sample(rng).round() as i64;
                    age.clamp(i64::from(min), i64::from(max)) as u8
                }
                Err(_) => rng.gen_range(min..=max),
            },
        }
    }
}

impl Default for SwimmerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_generate_swimmer() {
        let swimmer_gen = SwimmerGenerator::new();
        let mut rng = rand::thread_rng();
        let swimmer = swimmer_gen.generate(date!(2024 - 03 - 15), &mut rng);

        assert!(!swimmer.first_name.is_empty());
        assert!(!swimmer.last_name.is_empty());
        let (min, max) = AgeDistribution::default().bounds();
        let age = swimmer.age_on(date!(2024 - 03 - 15));
        assert!((min..=max).contains(&age), "age {age}");
    }

    #[test]
    fn test_uniform_ages_stay_in_range() {
        let swimmer_gen = SwimmerGenerator::with_config(SwimmerGenConfig {
            age_distribution: AgeDistribution::Uniform { min: 9, max: 10 },
            ..Default::default()
        });
        let mut rng = rand::thread_rng();
        let meet_date = date!(2024 - 03 - 15);
        for swimmer in swimmer_gen.generate_batch(25, meet_date, &mut rng) {
            assert_eq!(swimmer.age_group_on(meet_date), "9-10");
        }
    }

    #[test]
    fn test_generate_batch() {
        let swimmer_gen = SwimmerGenerator::new();
        let mut rng = rand::thread_rng();
        let swimmers = swimmer_gen.generate_batch(10, date!(2024 - 03 - 15), &mut rng);

        assert_eq!(swimmers.len(), 10);

        // All ids should be unique
        let ids: std::collections::HashSet<_> = swimmers.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 10);
    }
}
