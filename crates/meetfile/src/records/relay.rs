//! Relay header (E0) and relay leg (F0) records.

use time::Date;

use super::fields::LineWriter;
use super::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayHeader {
    pub team_initial: char,
    pub team_code: String,
    /// Number of F0 records that follow this header.
    pub leg_count: usize,
    pub sex: char,
    pub distance: u16,
    pub stroke: char,
    pub event_number: Option<usize>,
    pub age_code: String,
    /// Sum of the legs' ages.
    pub total_age: u16,
    pub meet_date: Date,
    pub seed_time: String,
    pub seed_course: char,
}

/// E0 layout:
///
/// | cols    | width | field                                 |
/// |---------|-------|---------------------------------------|
/// | 6-13    | 8     | future use                            |
/// | 14      | 1     | relay team initial                    |
/// | 15-20   | 6     | team code                             |
/// | 21-22   | 2     | number of F0 records                  |
/// | 23      | 1     | event sex                             |
/// | 24-27   | 4     | distance                              |
/// | 28      | 1     | stroke                                |
/// | 29-32   | 4     | event number                          |
/// | 33-36   | 4     | event age code                        |
/// | 37-39   | 3     | total age of legs                     |
/// | 40-47   | 8     | meet date                             |
/// | 48-54   | 7     | seed time                             |
/// | 55      | 1     | seed course                           |
/// | 56-110  | 55    | results: times, heats, lanes, places  |
/// | 111-160 | 50    | future use                            |
pub fn encode_relay_header(organization: &str, relay: &RelayHeader) -> String {
    let mut w = LineWriter::new(RecordKind::RelayHeader.tag(), organization);
    w.spaces(8)
        .char(relay.team_initial, 1)
        .upper(&relay.team_code, 6)
        .number(relay.leg_count as u64, 2)
        .char(relay.sex, 1)
        .number(u64::from(relay.distance), 4)
        .char(relay.stroke, 1);
    match relay.event_number {
        Some(number) => w.number(number as u64, 4),
        None => w.spaces(4),
    };
    w.text(&relay.age_code, 4)
        .number(u64::from(relay.total_age), 3)
        .date(relay.meet_date)
        .text(&relay.seed_time, 7)
        .char(relay.seed_course, 1)
        .spaces(55)
        .spaces(50);
    w.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayLeg {
    pub team_code: String,
    pub team_initial: char,
    pub swimmer_name: String,
    pub swimmer_token: String,
    pub birth_date: Date,
    pub age: u8,
    pub sex: char,
    /// 1-based position in the team.
    pub leg_order: u8,
}

/// F0 layout:
///
/// | cols    | width | field                          |
/// |---------|-------|--------------------------------|
/// | 6-20    | 15    | future use                     |
/// | 21-26   | 6     | team code                      |
/// | 27      | 1     | relay team initial             |
/// | 28-55   | 28    | swimmer name                   |
/// | 56-67   | 12    | swimmer id token               |
/// | 68-70   | 3     | citizenship (blank)            |
/// | 71-78   | 8     | birth date                     |
/// | 79-80   | 2     | age                            |
/// | 81      | 1     | sex                            |
/// | 82      | 1     | prelim leg order               |
/// | 83      | 1     | swim-off leg order             |
/// | 84      | 1     | finals leg order               |
/// | 85-92   | 8     | leg time (blank)               |
/// | 93      | 1     | leg course (blank)             |
/// | 94-97   | 4     | take-off time (blank)          |
/// | 98-160  | 63    | future use                     |
pub fn encode_relay_leg(organization: &str, leg: &RelayLeg) -> String {
    let mut w = LineWriter::new(RecordKind::RelayLeg.tag(), organization);
    w.spaces(15)
        .upper(&leg.team_code, 6)
        .char(leg.team_initial, 1)
        .text(&leg.swimmer_name, 28)
        .text(&leg.swimmer_token, 12)
        .spaces(3)
        .date(leg.birth_date)
        .number(u64::from(leg.age), 2)
        .char(leg.sex, 1);
    // No per-round seeding, so the same order stands for every round.
    for _ in 0..3 {
        w.number(u64::from(leg.leg_order), 1);
    }
    w.spaces(8).spaces(1).spaces(4).spaces(63);
    w.finish()
}
