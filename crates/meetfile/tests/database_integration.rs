//! Export tests against PostgreSQL.
//!
//! To run these tests, you need a PostgreSQL database and `DATABASE_URL` set.
//! Migrations are applied by the tests themselves.
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p meetfile database`
//!
//! Every test writes rows under unique ids and removes them afterwards, so
//! they can safely run against a development database.

use std::sync::Arc;

use meetfile::{
    assembler::MeetFileExporter,
    config::ExportOptions,
    database::Database,
    errors::StoreError,
    records::{RecordCounts, RecordKind},
    store::MeetDataSource,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use time::macros::date;
use uuid::Uuid;

/// Get database pool, skipping tests if DATABASE_URL is not set.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

struct Fixture {
    meet_id: String,
    club_id: String,
    event_ids: Vec<String>,
    swimmer_ids: Vec<String>,
}

async fn create_fixture(pool: &PgPool) -> Fixture {
    let tag = Uuid::new_v4().simple().to_string();
    let club_id = format!("club-{tag}");
    let meet_id = format!("meet-{tag}");
    let free = format!("50-free-{tag}");
    let relay = format!("200-free-relay-{tag}");
    let ada = format!("ada-{tag}");
    let alan = format!("alan-{tag}");

    sqlx::query(
        "INSERT INTO swim_clubs (id, name, abbreviation, city, state) VALUES ($1, 'Seaside Sharks', 'SEA', 'Portland', 'OR')",
    )
    .bind(&club_id)
    .execute(pool)
    .await
    .unwrap();

    for (id, distance, stroke, is_relay) in [(&free, 50, "free", false), (&relay, 200, "free", true)] {
        sqlx::query(
            "INSERT INTO swim_events (id, name, distance, stroke, course, is_relay) VALUES ($1, $1, $2, $3, 'SCY', $4)",
        )
        .bind(id)
        .bind(distance)
        .bind(stroke)
        .bind(is_relay)
        .execute(pool)
        .await
        .unwrap();
    }

    sqlx::query(
        "INSERT INTO meets (id, name, meet_date, club_id, available_events) VALUES ($1, 'Spring Classic', $2, $3, $4)",
    )
    .bind(&meet_id)
    .bind(date!(2024 - 03 - 15))
    .bind(&club_id)
    .bind(vec![free.clone(), relay.clone()])
    .execute(pool)
    .await
    .unwrap();

    for (id, first, last, sex) in [(&ada, "Ada", "Lovelace", "F"), (&alan, "Alan", "Turing", "M")] {
        sqlx::query(
            "INSERT INTO swimmers (id, first_name, last_name, date_of_birth, sex) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(first)
        .bind(last)
        .bind(date!(2011 - 07 - 04))
        .bind(sex)
        .execute(pool)
        .await
        .unwrap();
    }

    sqlx::query(
        "INSERT INTO swimmer_meet_events (swimmer_id, meet_id, event_id, seed_time) VALUES ($1, $2, $3, '0:31.50')",
    )
    .bind(&ada)
    .bind(&meet_id)
    .bind(&free)
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO relay_teams (id, meet_id, event_id, name, swimmers, age_group, sex) VALUES ($1, $2, $3, 'A', $4, '11-12', 'Mixed')",
    )
    .bind(format!("relay-{tag}"))
    .bind(&meet_id)
    .bind(&relay)
    .bind(vec![ada.clone(), alan.clone()])
    .execute(pool)
    .await
    .unwrap();

    Fixture {
        meet_id,
        club_id,
        event_ids: vec![free, relay],
        swimmer_ids: vec![ada, alan],
    }
}

async fn cleanup(pool: &PgPool, fixture: &Fixture) {
    sqlx::query("DELETE FROM meets WHERE id = $1")
        .bind(&fixture.meet_id)
        .execute(pool)
        .await
        .ok();
    sqlx::query("DELETE FROM swimmers WHERE id = ANY($1)")
        .bind(&fixture.swimmer_ids)
        .execute(pool)
        .await
        .ok();
    sqlx::query("DELETE FROM swim_events WHERE id = ANY($1)")
        .bind(&fixture.event_ids)
        .execute(pool)
        .await
        .ok();
    sqlx::query("DELETE FROM swim_clubs WHERE id = $1")
        .bind(&fixture.club_id)
        .execute(pool)
        .await
        .ok();
}

#[tokio::test]
async fn test_database_export() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let fixture = create_fixture(&pool).await;

    let exporter = MeetFileExporter::new(Arc::new(Database::new(pool.clone())), ExportOptions::default());
    let file = exporter.export_meet(&fixture.meet_id).await.unwrap().unwrap();

    let kinds: Vec<RecordKind> = file.lines().filter_map(RecordKind::of_line).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::FileHeader,
            RecordKind::MeetHeader,
            RecordKind::TeamHeader,
            RecordKind::IndividualEntry,
            RecordKind::RelayHeader,
            RecordKind::RelayLeg,
            RecordKind::RelayLeg,
            RecordKind::Trailer,
        ]
    );
    let counts = RecordCounts::from_trailer_line(file.lines().last().unwrap()).unwrap();
    assert_eq!(counts.swimmers, 2);
    assert!(file.content.contains("SEA"));

    cleanup(&pool, &fixture).await;
}

#[tokio::test]
async fn test_corrupt_swimmer_is_reported() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let id = format!("bad-{}", Uuid::new_v4().simple());
    sqlx::query(
        "INSERT INTO swimmers (id, first_name, last_name, date_of_birth, sex) VALUES ($1, 'X', 'Y', $2, 'unknown')",
    )
    .bind(&id)
    .bind(date!(2010 - 01 - 01))
    .execute(&pool)
    .await
    .unwrap();

    let db = Database::new(pool.clone());
    let result = db.get_swimmer(&id).await;

    sqlx::query("DELETE FROM swimmers WHERE id = $1")
        .bind(&id)
        .execute(&pool)
        .await
        .ok();

    assert!(matches!(result, Err(StoreError::Corrupt(_))));
}
