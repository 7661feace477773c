//! Meet file assembly.

use std::sync::Arc;
use time::Date;
use tracing::info;

use crate::aggregator::{ExportSnapshot, collect_snapshot, plan_export};
use crate::config::ExportOptions;
use crate::errors::ExportError;
use crate::models::{Meet, RelayTeam, Swimmer};
use crate::records::RecordCounts;
use crate::store::MeetDataSource;

pub const FILE_EXTENSION: &str = "sd3";

/// An encoded meet file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetFile {
    pub content: String,
    pub suggested_file_name: String,
    pub counts: RecordCounts,
}

impl MeetFile {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// Encodes a collected snapshot into file content.
pub fn assemble_meet_file(snapshot: &ExportSnapshot, options: &ExportOptions) -> MeetFile {
    let plan = plan_export(snapshot, options);
    let content: String = plan
        .records
        .iter()
        .map(|record| record.encode(&options.organization_code))
        .collect();

    info!(
        "Exported meet {} for team {}: {} individual entries, {} relays, {} relay legs, {} swimmers",
        snapshot.meet.id,
        plan.team_code,
        plan.counts.d_records,
        plan.counts.e_records,
        plan.counts.f_records,
        plan.counts.swimmers
    );

    MeetFile {
        content,
        suggested_file_name: suggested_file_name(&snapshot.meet),
        counts: plan.counts,
    }
}

/// `<MeetName>_<YYYYMMDD>.sd3`, keeping only alphanumerics of the meet name.
pub fn suggested_file_name(meet: &Meet) -> String {
    let stem: String = meet
        .name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let stem = if stem.is_empty() { "Meet" } else { stem.as_str() };
    format!("{stem}_{}.{FILE_EXTENSION}", compact_date(meet.date))
}

fn compact_date(date: Date) -> String {
    format!(
        "{:04}{:02}{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Produces meet files from a data source it owns.
#[derive(Clone)]
pub struct MeetFileExporter {
    source: Arc<dyn MeetDataSource>,
    options: ExportOptions,
}

impl MeetFileExporter {
    pub fn new(source: Arc<dyn MeetDataSource>, options: ExportOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Builds the file for `meet` from the given entrants and relay teams.
    ///
    /// Fails with [`ExportError::NoMeetSelected`] when `meet` is `None`. Entries
    /// that cannot be resolved are skipped with a warning rather than failing
    /// the export.
    pub async fn generate_meet_file(
        &self,
        meet: Option<&Meet>,
        swimmers: &[Swimmer],
        relay_teams: &[RelayTeam],
    ) -> Result<MeetFile, ExportError> {
        let snapshot = collect_snapshot(self.source.as_ref(), meet, swimmers, relay_teams).await?;
        Ok(assemble_meet_file(&snapshot, &self.options))
    }

    /// Loads the meet and everything entered in it, then builds the file.
    ///
    /// Returns `Ok(None)` when the meet does not exist.
    pub async fn export_meet(&self, meet_id: &str) -> Result<Option<MeetFile>, ExportError> {
        let Some(meet) = self.source.get_meet(meet_id).await? else {
            return Ok(None);
        };
        let swimmers = self.source.list_meet_swimmers(&meet.id).await?;
        let relay_teams = self.source.list_relay_teams(&meet.id).await?;
        self.generate_meet_file(Some(&meet), &swimmers, &relay_teams)
            .await
            .map(Some)
    }
}
