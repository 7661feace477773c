//! Database seeding utilities.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use meetfile::models::{Meet, RelayTeam, SwimClub, SwimEvent, Swimmer, SwimmerMeetEvent};

use crate::builders::Scenario;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Database seeder for inserting generated test data.
pub struct Seeder {
    pool: PgPool,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            batch_size: 50,
        }
    }

    /// Sets the batch size for bulk operations.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Seeds a whole scenario in dependency order.
    pub async fn seed_scenario(&self, scenario: &Scenario) -> Result<(), SeedError> {
        self.seed_club(&scenario.club).await?;
        self.seed_events(&scenario.events).await?;
        self.seed_meet(&scenario.meet).await?;
        self.seed_swimmers(&scenario.swimmers).await?;
        self.seed_selections(&scenario.selections).await?;
        self.seed_relay_teams(&scenario.relay_teams).await?;
        Ok(())
    }

    pub async fn seed_club(&self, club: &SwimClub) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO swim_clubs (id, name, abbreviation, address, city, state, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&club.id)
        .bind(&club.name)
        .bind(&club.abbreviation)
        .bind(&club.address)
        .bind(&club.city)
        .bind(&club.state)
        .bind(&club.postal_code)
        .execute(&self.pool)
        .await?;

        info!("Seeded club {}", club.name);
        Ok(())
    }

    /// Seeds the event catalog. Catalog position becomes the sort order.
    pub async fn seed_events(&self, events: &[SwimEvent]) -> Result<(), SeedError> {
        for (idx, event) in events.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO swim_events (id, name, distance, stroke, course, is_relay, age_groups, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&event.id)
            .bind(&event.name)
            .bind(i32::from(event.distance))
            .bind(event.stroke.as_str())
            .bind(event.course.as_str())
            .bind(event.is_relay)
            .bind(&event.age_groups)
            .bind(idx as i32)
            .execute(&self.pool)
            .await?;
        }

        info!("Seeded {} events", events.len());
        Ok(())
    }

    pub async fn seed_meet(&self, meet: &Meet) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO meets (id, name, meet_date, location, club_id, available_events, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&meet.id)
        .bind(&meet.name)
        .bind(meet.date)
        .bind(&meet.location)
        .bind(&meet.club_id)
        .bind(&meet.available_events)
        .bind(meet.is_active)
        .execute(&self.pool)
        .await?;

        info!("Seeded meet {} ({})", meet.name, meet.id);
        Ok(())
    }

    /// Seeds swimmers into the database.
    pub async fn seed_swimmers(&self, swimmers: &[Swimmer]) -> Result<(), SeedError> {
        info!("Seeding {} swimmers...", swimmers.len());

        for chunk in swimmers.chunks(self.batch_size) {
            for swimmer in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO swimmers (id, first_name, last_name, date_of_birth, sex)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO NOTHING
                    "#,
                )
                .bind(&swimmer.id)
                .bind(&swimmer.first_name)
                .bind(&swimmer.last_name)
                .bind(swimmer.date_of_birth)
                .bind(swimmer.sex.code().to_string())
                .execute(&self.pool)
                .await?;
            }
        }

        info!("Seeded {} swimmers", swimmers.len());
        Ok(())
    }

    pub async fn seed_selections(&self, selections: &[SwimmerMeetEvent]) -> Result<(), SeedError> {
        info!("Seeding {} individual entries...", selections.len());

        for (i, sel) in selections.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO swimmer_meet_events (swimmer_id, meet_id, event_id, seed_time, created_at)
                VALUES ($1, $2, $3, $4, NOW() + make_interval(secs => $5))
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(&sel.swimmer_id)
            .bind(&sel.meet_id)
            .bind(&sel.event_id)
            .bind(&sel.seed_time)
            .bind(i as f64 / 1000.0)
            .execute(&self.pool)
            .await?;

            if (i + 1) % self.batch_size == 0 {
                info!("  Seeded {}/{} entries", i + 1, selections.len());
            }
        }

        Ok(())
    }

    pub async fn seed_relay_teams(&self, teams: &[RelayTeam]) -> Result<(), SeedError> {
        for (i, team) in teams.iter().enumerate() {
            let sex = match team.sex.code() {
                'X' => "Mixed".to_string(),
                code => code.to_string(),
            };
            sqlx::query(
                r#"
                INSERT INTO relay_teams (id, meet_id, event_id, name, swimmers, age_group, sex, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, NOW() + make_interval(secs => $8))
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&team.id)
            .bind(&team.meet_id)
            .bind(&team.event_id)
            .bind(&team.name)
            .bind(&team.swimmers)
            .bind(&team.age_group)
            .bind(sex)
            .bind(i as f64 / 1000.0)
            .execute(&self.pool)
            .await?;
        }

        info!("Seeded {} relay teams", teams.len());
        Ok(())
    }
}
