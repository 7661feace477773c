//! Entry aggregation.
//!
//! An export runs in two steps. [`collect_snapshot`] fetches everything the
//! file needs from a [`MeetDataSource`]; [`plan_export`] then walks that
//! snapshot synchronously and produces every record in file order together
//! with the trailer counts. Nothing is fetched once planning starts.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::codes::{FALLBACK_CODE, age_code, course_code, stroke_code, time_to_centiseconds};
use crate::config::ExportOptions;
use crate::errors::ExportError;
use crate::models::{Meet, RelayTeam, SwimClub, SwimEvent, Swimmer, SwimmerMeetEvent};
use crate::records::{
    FileHeader, IndividualEntry, MeetHeader, Record, RecordCounts, RelayHeader, RelayLeg,
    TeamHeader, Trailer, id_token, swimmer_name,
};
use crate::store::MeetDataSource;

/// Team code used when the meet's club cannot be resolved.
pub const PLACEHOLDER_TEAM_CODE: &str = "TEAM";

pub const TEAM_CODE_WIDTH: usize = 6;

/// Legs beyond this are not encoded.
pub const MAX_RELAY_LEGS: usize = 4;

/// Everything an export reads, resolved up front.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub meet: Meet,
    pub club: Option<SwimClub>,
    /// The full event catalog, keyed by event id.
    pub events: HashMap<String, SwimEvent>,
    /// Individual entrants in caller order.
    pub swimmers: Vec<Swimmer>,
    /// Each swimmer's selections for the meet, keyed by swimmer id.
    pub selections: HashMap<String, Vec<SwimmerMeetEvent>>,
    pub relay_teams: Vec<RelayTeam>,
    /// Relay swimmers that are not among `swimmers`.
    pub relay_swimmers: HashMap<String, Swimmer>,
}

/// Fetches the data for one export.
///
/// Fails only when no meet is selected or a fetch fails. An unresolvable
/// club is logged and left empty.
pub async fn collect_snapshot(
    source: &dyn MeetDataSource,
    meet: Option<&Meet>,
    swimmers: &[Swimmer],
    relay_teams: &[RelayTeam],
) -> Result<ExportSnapshot, ExportError> {
    let meet = meet.ok_or(ExportError::NoMeetSelected)?.clone();

    let events = source
        .list_events()
        .await?
        .into_iter()
        .map(|event| (event.id.clone(), event))
        .collect::<HashMap<_, _>>();

    let club = match &meet.club_id {
        Some(club_id) => match source.get_club(club_id).await {
            Ok(club) => {
                if club.is_none() {
                    warn!("Club {club_id} for meet {} not found", meet.id);
                }
                club
            }
            Err(e) => {
                warn!("Failed to resolve club {club_id} for meet {}: {e}", meet.id);
                None
            }
        },
        None => None,
    };

    let mut selections = HashMap::with_capacity(swimmers.len());
    for swimmer in swimmers {
        let picked = source.get_swimmer_meet_events(&swimmer.id, &meet.id).await?;
        selections.insert(swimmer.id.clone(), picked);
    }

    let known: HashSet<&str> = swimmers.iter().map(|s| s.id.as_str()).collect();
    let mut relay_swimmers = HashMap::new();
    for team in relay_teams {
        for swimmer_id in &team.swimmers {
            if known.contains(swimmer_id.as_str()) || relay_swimmers.contains_key(swimmer_id) {
                continue;
            }
            if let Some(swimmer) = source.get_swimmer(swimmer_id).await? {
                relay_swimmers.insert(swimmer_id.clone(), swimmer);
            }
        }
    }

    debug!(
        "Collected snapshot for meet {}: {} events, {} swimmers, {} relay teams",
        meet.id,
        events.len(),
        swimmers.len(),
        relay_teams.len()
    );

    Ok(ExportSnapshot {
        meet,
        club,
        events,
        swimmers: swimmers.to_vec(),
        selections,
        relay_teams: relay_teams.to_vec(),
        relay_swimmers,
    })
}

/// Every record of one file, in file order.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub team_code: String,
    pub records: Vec<Record>,
    pub counts: RecordCounts,
}

/// Tracks what has been emitted so the trailer can summarize it.
#[derive(Debug, Default)]
struct Emitter {
    records: Vec<Record>,
    counts: RecordCounts,
    swimmers: HashSet<String>,
}

impl Emitter {
    fn emit(&mut self, record: Record) {
        self.counts.record(record.kind());
        self.records.push(record);
    }

    fn emit_for(&mut self, swimmer_id: &str, record: Record) {
        self.swimmers.insert(swimmer_id.to_string());
        self.emit(record);
    }

    fn finish(mut self, options: &ExportOptions) -> (Vec<Record>, RecordCounts) {
        self.counts.meets = 1;
        self.counts.teams = 1;
        self.counts.swimmers = self.swimmers.len();
        self.records.push(Record::Trailer(Trailer {
            file_code: options.file_code.clone(),
            notes: String::new(),
            counts: self.counts,
            batch_number: 1,
        }));
        (self.records, self.counts)
    }
}

/// Derives the short team code from the club abbreviation.
pub fn team_code(club: Option<&SwimClub>) -> String {
    club.map(|c| c.abbreviation.trim())
        .filter(|abbr| !abbr.is_empty())
        .map(|abbr| {
            abbr.chars()
                .take(TEAM_CODE_WIDTH)
                .collect::<String>()
                .to_ascii_uppercase()
        })
        .unwrap_or_else(|| PLACEHOLDER_TEAM_CODE.to_string())
}

/// First alphanumeric character of a relay team name, `A` if there is none.
pub fn relay_initial(name: &str) -> char {
    name.chars()
        .find(char::is_ascii_alphanumeric)
        .map_or('A', |c| c.to_ascii_uppercase())
}

/// Walks the snapshot: header, meet, team, individual entries swimmer by
/// swimmer, relay teams each followed by their legs, trailer.
pub fn plan_export(snapshot: &ExportSnapshot, options: &ExportOptions) -> ExportPlan {
    let meet = &snapshot.meet;
    let team_code = team_code(snapshot.club.as_ref());
    let mut out = Emitter::default();

    out.emit(Record::FileHeader(FileHeader {
        version: options.format_version.clone(),
        file_code: options.file_code.clone(),
        description: options.file_description.clone(),
        software_name: options.software_name.clone(),
        software_version: options.software_version.clone(),
        contact_name: options.contact_name.clone(),
        contact_phone: options.contact_phone.clone(),
        created_on: options.creation_date(),
    }));

    out.emit(Record::MeetHeader(MeetHeader {
        name: meet.name.clone(),
        address: meet.location.clone(),
        city: String::new(),
        state: String::new(),
        postal_code: String::new(),
        meet_type: options.meet_type,
        start: meet.date,
        end: meet.date,
        course: meet_course_code(snapshot),
    }));

    let club = snapshot.club.clone().unwrap_or_default();
    out.emit(Record::TeamHeader(TeamHeader {
        team_code: team_code.clone(),
        name: club.name,
        abbreviated_name: club.abbreviation,
        address: club.address,
        city: club.city,
        state: club.state,
        postal_code: club.postal_code,
    }));

    plan_individual_entries(snapshot, &mut out);
    plan_relay_entries(snapshot, &team_code, &mut out);

    let (records, counts) = out.finish(options);
    ExportPlan {
        team_code,
        records,
        counts,
    }
}

/// Course shared by every offered event, or the fallback code.
fn meet_course_code(snapshot: &ExportSnapshot) -> char {
    let mut courses = snapshot
        .meet
        .available_events
        .iter()
        .filter_map(|id| snapshot.events.get(id))
        .map(|event| event.course);
    match courses.next() {
        Some(first) if courses.all(|c| c == first) => course_code(first),
        _ => FALLBACK_CODE,
    }
}

fn plan_individual_entries(snapshot: &ExportSnapshot, out: &mut Emitter) {
    let meet = &snapshot.meet;
    for swimmer in &snapshot.swimmers {
        let Some(selections) = snapshot.selections.get(&swimmer.id) else {
            continue;
        };
        for selection in selections {
            if selection.meet_id != meet.id {
                warn!(
                    "Skipping selection of swimmer {} for event {}: belongs to meet {}",
                    swimmer.id, selection.event_id, selection.meet_id
                );
                continue;
            }
            let Some(event) = snapshot.events.get(&selection.event_id) else {
                warn!(
                    "Skipping entry of swimmer {}: event {} not found",
                    swimmer.id, selection.event_id
                );
                continue;
            };
            if event.is_relay {
                warn!(
                    "Skipping entry of swimmer {}: event {} is a relay",
                    swimmer.id, event.id
                );
                continue;
            }
            if !meet.offers_event(&event.id) {
                warn!(
                    "Skipping entry of swimmer {}: event {} is not offered at meet {}",
                    swimmer.id, event.id, meet.id
                );
                continue;
            }

            let seed = selection.seed_time.as_deref().unwrap_or("NT");
            let entry = IndividualEntry {
                swimmer_name: swimmer_name(&swimmer.last_name, &swimmer.first_name),
                swimmer_token: id_token(&swimmer.id),
                birth_date: swimmer.date_of_birth,
                age: swimmer.age_on(meet.date),
                sex: swimmer.sex.code(),
                event_sex: swimmer.sex.code(),
                distance: event.distance,
                stroke: stroke_code(event.stroke, false),
                event_number: meet.event_number(&event.id),
                age_code: age_code(entry_age_group(swimmer, event, meet)).to_string(),
                meet_date: meet.date,
                seed_time: time_to_centiseconds(seed),
                seed_course: course_code(event.course),
            };
            out.emit_for(&swimmer.id, Record::IndividualEntry(entry));
        }
    }
}

/// The swimmer's own bucket when the event accepts it, otherwise the event's
/// first eligible group.
fn entry_age_group<'a>(swimmer: &Swimmer, event: &'a SwimEvent, meet: &Meet) -> &'a str {
    let bucket = swimmer.age_group_on(meet.date);
    if event.age_groups.is_empty() || event.age_groups.iter().any(|g| g == bucket) {
        return bucket;
    }
    event.age_groups[0].as_str()
}

fn plan_relay_entries(snapshot: &ExportSnapshot, team_code: &str, out: &mut Emitter) {
    let meet = &snapshot.meet;
    let roster: HashMap<&str, &Swimmer> = snapshot
        .swimmers
        .iter()
        .chain(snapshot.relay_swimmers.values())
        .map(|s| (s.id.as_str(), s))
        .collect();

    for team in &snapshot.relay_teams {
        if team.meet_id != meet.id || !meet.offers_event(&team.event_id) {
            warn!(
                "Skipping relay team {}: event {} is not offered at meet {}",
                team.id, team.event_id, meet.id
            );
            continue;
        }
        let Some(event) = snapshot.events.get(&team.event_id) else {
            warn!("Skipping relay team {}: event {} not found", team.id, team.event_id);
            continue;
        };
        if !event.is_relay {
            warn!("Relay team {} is entered in non-relay event {}", team.id, event.id);
        }
        if team.swimmers.len() > MAX_RELAY_LEGS {
            warn!(
                "Relay team {} lists {} swimmers, encoding the first {MAX_RELAY_LEGS}",
                team.id,
                team.swimmers.len()
            );
        }

        let initial = relay_initial(&team.name);
        let mut legs = Vec::with_capacity(MAX_RELAY_LEGS);
        for (idx, swimmer_id) in team.swimmers.iter().take(MAX_RELAY_LEGS).enumerate() {
            let Some(swimmer) = roster.get(swimmer_id.as_str()) else {
                warn!("Skipping leg {} of relay team {}: swimmer {swimmer_id} not found", idx + 1, team.id);
                continue;
            };
            legs.push((
                swimmer.id.as_str(),
                RelayLeg {
                    team_code: team_code.to_string(),
                    team_initial: initial,
                    swimmer_name: swimmer_name(&swimmer.last_name, &swimmer.first_name),
                    swimmer_token: id_token(&swimmer.id),
                    birth_date: swimmer.date_of_birth,
                    age: swimmer.age_on(meet.date),
                    sex: swimmer.sex.code(),
                    leg_order: (idx + 1) as u8,
                },
            ));
        }

        out.emit(Record::RelayHeader(RelayHeader {
            team_initial: initial,
            team_code: team_code.to_string(),
            leg_count: legs.len(),
            sex: team.sex.code(),
            distance: event.distance,
            stroke: stroke_code(event.stroke, true),
            event_number: meet.event_number(&event.id),
            age_code: age_code(&team.age_group).to_string(),
            total_age: legs.iter().map(|(_, leg)| u16::from(leg.age)).sum(),
            meet_date: meet.date,
            seed_time: time_to_centiseconds("NT"),
            seed_course: course_code(event.course),
        }));
        for (swimmer_id, leg) in legs {
            out.emit_for(swimmer_id, Record::RelayLeg(leg));
        }
    }
}
