//! Default seed script - creates a meet with entries in the database
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! ```

use sqlx::postgres::PgPoolOptions;
use test_data::builders::ScenarioBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://docker:pg@0.0.0.0".to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    let mut rng = rand::thread_rng();

    let result = ScenarioBuilder::new()
        .with_metrics(true)
        .build(&pool, &mut rng)
        .await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Meet: {} ({})", result.meet.name, result.meet.id);
    tracing::info!("  Club: {}", result.club.name);
    tracing::info!("  Swimmers: {}", result.swimmers.len());
    tracing::info!("  Individual entries: {}", result.selections.len());
    tracing::info!("  Relay teams: {}", result.relay_teams.len());
    if let Some(metrics) = result.metrics {
        tracing::info!(
            "  Generated in {}ms, seeded in {}ms",
            metrics.generation_time_ms,
            metrics.seeding_time_ms
        );
    }

    Ok(())
}
