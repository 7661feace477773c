//! Generates a meet in memory and writes its entries file.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin generate -- [output-dir] [swimmer-count]
//! ```

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;
use meetfile::{assembler::MeetFileExporter, config::ExportOptions};
use rand::{SeedableRng, rngs::StdRng};
use test_data::builders::ScenarioBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let swimmers = match args.next() {
        Some(count) => count
            .parse::<usize>()
            .with_context(|| format!("invalid swimmer count: {count}"))?,
        None => 40,
    };

    // Reproducible data
    let mut rng = StdRng::seed_from_u64(12345);
    let scenario = ScenarioBuilder::new()
        .with_swimmers(swimmers)
        .build_data(&mut rng);

    let exporter = MeetFileExporter::new(Arc::new(scenario.to_store()), ExportOptions::from_env());
    let file = exporter
        .generate_meet_file(
            Some(&scenario.meet),
            &scenario.entered_swimmers(),
            &scenario.relay_teams,
        )
        .await?;

    let path = output_dir.join(&file.suggested_file_name);
    tokio::fs::write(&path, &file.content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("Wrote {}", path.display());
    tracing::info!("  Individual entries: {}", file.counts.d_records);
    tracing::info!("  Relay teams: {}", file.counts.e_records);
    tracing::info!("  Swimmers: {}", file.counts.swimmers);

    Ok(())
}
