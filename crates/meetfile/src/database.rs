use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::Date;
use tracing::warn;

use crate::errors::StoreError;
use crate::models::{
    Course, Meet, RelaySex, RelayTeam, Sex, Stroke, SwimClub, SwimEvent, Swimmer,
    SwimmerMeetEvent,
};
use crate::store::MeetDataSource;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MeetRow {
    id: String,
    name: String,
    meet_date: Date,
    location: String,
    club_id: Option<String>,
    available_events: Vec<String>,
    is_active: bool,
}

impl From<MeetRow> for Meet {
    fn from(row: MeetRow) -> Self {
        Meet {
            id: row.id,
            name: row.name,
            date: row.meet_date,
            location: row.location,
            club_id: row.club_id,
            available_events: row.available_events,
            is_active: row.is_active,
        }
    }
}

#[derive(FromRow)]
struct EventRow {
    id: String,
    name: String,
    distance: i32,
    stroke: String,
    course: String,
    is_relay: bool,
    age_groups: Vec<String>,
}

/// Unrecognized stroke and course labels are kept as `Unknown` and encode
/// as the fallback code.
impl TryFrom<EventRow> for SwimEvent {
    type Error = StoreError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let corrupt = |msg: String| StoreError::Corrupt(format!("event {}: {msg}", row.id));
        Ok(SwimEvent {
            distance: u16::try_from(row.distance)
                .map_err(|_| corrupt(format!("distance {} out of range", row.distance)))?,
            stroke: Stroke::from_label(&row.stroke),
            course: Course::from_label(&row.course),
            id: row.id,
            name: row.name,
            is_relay: row.is_relay,
            age_groups: row.age_groups,
        })
    }
}

#[derive(FromRow)]
struct SwimmerRow {
    id: String,
    first_name: String,
    last_name: String,
    date_of_birth: Date,
    sex: String,
}

impl TryFrom<SwimmerRow> for Swimmer {
    type Error = StoreError;

    fn try_from(row: SwimmerRow) -> Result<Self, Self::Error> {
        let sex: Sex = row
            .sex
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("swimmer {}: {e}", row.id)))?;
        Ok(Swimmer {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            sex,
        })
    }
}

#[derive(FromRow)]
struct RelayTeamRow {
    id: String,
    meet_id: String,
    event_id: String,
    name: String,
    swimmers: Vec<String>,
    age_group: String,
    sex: String,
}

impl TryFrom<RelayTeamRow> for RelayTeam {
    type Error = StoreError;

    fn try_from(row: RelayTeamRow) -> Result<Self, Self::Error> {
        let sex: RelaySex = row
            .sex
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("relay team {}: {e}", row.id)))?;
        Ok(RelayTeam {
            id: row.id,
            meet_id: row.meet_id,
            event_id: row.event_id,
            name: row.name,
            swimmers: row.swimmers,
            age_group: row.age_group,
            sex,
        })
    }
}

#[derive(FromRow)]
struct ClubRow {
    id: String,
    name: String,
    abbreviation: String,
    address: String,
    city: String,
    state: String,
    postal_code: String,
}

impl From<ClubRow> for SwimClub {
    fn from(row: ClubRow) -> Self {
        SwimClub {
            id: row.id,
            name: row.name,
            abbreviation: row.abbreviation,
            address: row.address,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
        }
    }
}

#[derive(FromRow)]
struct SelectionRow {
    swimmer_id: String,
    meet_id: String,
    event_id: String,
    seed_time: Option<String>,
}

impl From<SelectionRow> for SwimmerMeetEvent {
    fn from(row: SelectionRow) -> Self {
        SwimmerMeetEvent {
            swimmer_id: row.swimmer_id,
            meet_id: row.meet_id,
            event_id: row.event_id,
            seed_time: row.seed_time,
        }
    }
}

/// Converts listed rows, dropping the ones that do not map to domain values
/// so one bad row cannot fail the whole listing.
fn keep_valid<R, T>(rows: Vec<R>) -> Vec<T>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping row: {e}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl MeetDataSource for Database {
    async fn get_meet(&self, id: &str) -> Result<Option<Meet>, StoreError> {
        let row: Option<MeetRow> = sqlx::query_as(
            r#"
            SELECT id, name, meet_date, location, club_id, available_events, is_active
            FROM meets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Meet::from))
    }

    async fn list_events(&self) -> Result<Vec<SwimEvent>, StoreError> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
            SELECT id, name, distance, stroke, course, is_relay, age_groups
            FROM swim_events
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(keep_valid(rows))
    }

    async fn get_club(&self, id: &str) -> Result<Option<SwimClub>, StoreError> {
        let row: Option<ClubRow> = sqlx::query_as(
            r#"
            SELECT id, name, abbreviation, address, city, state, postal_code
            FROM swim_clubs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SwimClub::from))
    }

    async fn get_swimmer(&self, id: &str) -> Result<Option<Swimmer>, StoreError> {
        let row: Option<SwimmerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, date_of_birth, sex
            FROM swimmers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Swimmer::try_from).transpose()
    }

    async fn list_meet_swimmers(&self, meet_id: &str) -> Result<Vec<Swimmer>, StoreError> {
        let rows: Vec<SwimmerRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.first_name, s.last_name, s.date_of_birth, s.sex
            FROM swimmers s
            WHERE EXISTS (
                SELECT 1 FROM swimmer_meet_events sme
                WHERE sme.swimmer_id = s.id AND sme.meet_id = $1
            )
            ORDER BY s.last_name, s.first_name, s.id
            "#,
        )
        .bind(meet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(keep_valid(rows))
    }

    async fn get_swimmer_meet_events(
        &self,
        swimmer_id: &str,
        meet_id: &str,
    ) -> Result<Vec<SwimmerMeetEvent>, StoreError> {
        let rows: Vec<SelectionRow> = sqlx::query_as(
            r#"
            SELECT swimmer_id, meet_id, event_id, seed_time
            FROM swimmer_meet_events
            WHERE swimmer_id = $1 AND meet_id = $2
            ORDER BY created_at, event_id
            "#,
        )
        .bind(swimmer_id)
        .bind(meet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SwimmerMeetEvent::from).collect())
    }

    async fn list_relay_teams(&self, meet_id: &str) -> Result<Vec<RelayTeam>, StoreError> {
        let rows: Vec<RelayTeamRow> = sqlx::query_as(
            r#"
            SELECT id, meet_id, event_id, name, swimmers, age_group, sex
            FROM relay_teams
            WHERE meet_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(meet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(keep_valid(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_row(stroke: &str, course: &str, distance: i32) -> EventRow {
        EventRow {
            id: "e1".to_string(),
            name: "50 Sidestroke".to_string(),
            distance,
            stroke: stroke.to_string(),
            course: course.to_string(),
            is_relay: false,
            age_groups: vec![],
        }
    }

    #[test]
    fn test_unknown_stroke_and_course_are_kept() {
        let event = SwimEvent::try_from(event_row("sidestroke", "LCY", 50)).unwrap();
        assert_eq!(event.stroke, Stroke::Unknown);
        assert_eq!(event.course, Course::Unknown);
        assert_eq!(event.distance, 50);

        let event = SwimEvent::try_from(event_row("free", "scy", 100)).unwrap();
        assert_eq!(event.stroke, Stroke::Freestyle);
        assert_eq!(event.course, Course::ShortCourseYards);
    }

    #[test]
    fn test_keep_valid_drops_only_bad_rows() {
        let mut bad = event_row("free", "SCY", -50);
        bad.id = "e2".to_string();
        let events: Vec<SwimEvent> = keep_valid(vec![event_row("sidestroke", "SCY", 50), bad]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
    }
}
