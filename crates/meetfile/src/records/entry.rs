//! Individual entry (D0) and split (G0) records.

use time::Date;

use super::fields::LineWriter;
use super::RecordKind;
use crate::codes::time_to_centiseconds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualEntry {
    /// Already in `"Last, First"` form.
    pub swimmer_name: String,
    pub swimmer_token: String,
    pub birth_date: Date,
    pub age: u8,
    pub sex: char,
    pub event_sex: char,
    pub distance: u16,
    pub stroke: char,
    pub event_number: Option<usize>,
    pub age_code: String,
    pub meet_date: Date,
    /// Seven-digit centiseconds, see [`time_to_centiseconds`].
    pub seed_time: String,
    pub seed_course: char,
}

/// D0 layout:
///
/// | cols    | width | field                                   |
/// |---------|-------|-----------------------------------------|
/// | 6-13    | 8     | future use                              |
/// | 14-41   | 28    | swimmer name                            |
/// | 42-53   | 12    | swimmer id token                        |
/// | 54      | 1     | attach code (blank)                     |
/// | 55-57   | 3     | citizenship (blank)                     |
/// | 58-65   | 8     | birth date                              |
/// | 66-67   | 2     | age                                     |
/// | 68      | 1     | sex                                     |
/// | 69      | 1     | event sex                               |
/// | 70-73   | 4     | distance                                |
/// | 74      | 1     | stroke                                  |
/// | 75-78   | 4     | event number                            |
/// | 79-82   | 4     | event age code                          |
/// | 83-90   | 8     | meet date                               |
/// | 91-97   | 7     | seed time                               |
/// | 98      | 1     | seed course                             |
/// | 99-145  | 47    | results: times, heats, lanes, places    |
/// | 146-160 | 15    | future use                              |
pub fn encode_individual_entry(organization: &str, entry: &IndividualEntry) -> String {
    let mut w = LineWriter::new(RecordKind::IndividualEntry.tag(), organization);
    w.spaces(8)
        .text(&entry.swimmer_name, 28)
        .text(&entry.swimmer_token, 12)
        .spaces(1)
        .spaces(3)
        .date(entry.birth_date)
        .number(u64::from(entry.age), 2)
        .char(entry.sex, 1)
        .char(entry.event_sex, 1)
        .number(u64::from(entry.distance), 4)
        .char(entry.stroke, 1);
    match entry.event_number {
        Some(number) => w.number(number as u64, 4),
        None => w.spaces(4),
    };
    w.text(&entry.age_code, 4)
        .date(entry.meet_date)
        .text(&entry.seed_time, 7)
        .char(entry.seed_course, 1)
        .spaces(47)
        .spaces(15);
    w.finish()
}

/// Split times recorded for one swim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSet {
    pub swimmer_name: String,
    pub swimmer_token: String,
    /// Distance covered by each split.
    pub split_distance: u16,
    /// `true` when times are running totals rather than per-segment.
    pub cumulative: bool,
    /// `M:SS.hh` strings in swim order.
    pub times: Vec<String>,
}

/// One G0 line: at most [`SPLITS_PER_RECORD`] times of a [`SplitSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecord {
    pub swimmer_name: String,
    pub swimmer_token: String,
    /// 1-based line number within the set.
    pub sequence: u8,
    pub total_splits: usize,
    pub split_distance: u16,
    pub cumulative: bool,
    /// Seven-digit centiseconds.
    pub times: Vec<String>,
}

pub const SPLITS_PER_RECORD: usize = 10;

/// Breaks a split set into G0 records of up to ten times each.
pub fn split_records(set: &SplitSet) -> Vec<SplitRecord> {
    set.times
        .chunks(SPLITS_PER_RECORD)
        .enumerate()
        .map(|(idx, chunk)| SplitRecord {
            swimmer_name: set.swimmer_name.clone(),
            swimmer_token: set.swimmer_token.clone(),
            sequence: (idx + 1).min(9) as u8,
            total_splits: set.times.len(),
            split_distance: set.split_distance,
            cumulative: set.cumulative,
            times: chunk.iter().map(|t| time_to_centiseconds(t)).collect(),
        })
        .collect()
}

/// G0 layout:
///
/// | cols    | width | field                            |
/// |---------|-------|----------------------------------|
/// | 6-17    | 12    | future use                       |
/// | 18-45   | 28    | swimmer name                     |
/// | 46-57   | 12    | swimmer id token                 |
/// | 58      | 1     | sequence number                  |
/// | 59-60   | 2     | total splits for the swim        |
/// | 61-64   | 4     | split distance                   |
/// | 65      | 1     | `C` cumulative / `I` interval    |
/// | 66-135  | 70    | ten 7-column split times         |
/// | 136     | 1     | prelim/final code                |
/// | 137-160 | 24    | future use                       |
pub fn encode_splits(organization: &str, splits: &SplitRecord) -> String {
    let mut w = LineWriter::new(RecordKind::Splits.tag(), organization);
    w.spaces(12)
        .text(&splits.swimmer_name, 28)
        .text(&splits.swimmer_token, 12)
        .number(u64::from(splits.sequence), 1)
        .number(splits.total_splits as u64, 2)
        .number(u64::from(splits.split_distance), 4)
        .char(if splits.cumulative { 'C' } else { 'I' }, 1);
    for slot in 0..SPLITS_PER_RECORD {
        match splits.times.get(slot) {
            Some(time) => w.text(time, 7),
            None => w.spaces(7),
        };
    }
    w.char('F', 1).spaces(24);
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RECORD_WIDTH;
    use time::macros::date;

    fn entry(name: &str, token: &str) -> IndividualEntry {
        IndividualEntry {
            swimmer_name: name.to_string(),
            swimmer_token: token.to_string(),
            birth_date: date!(2012 - 01 - 01),
            age: 12,
            sex: 'M',
            event_sex: 'M',
            distance: 50,
            stroke: '1',
            event_number: Some(1),
            age_code: "1112".to_string(),
            meet_date: date!(2024 - 03 - 15),
            seed_time: time_to_centiseconds("0:32.10"),
            seed_course: 'Y',
        }
    }

    #[test]
    fn test_individual_entry_columns() {
        let line = encode_individual_entry("USS", &entry("Doe, John", "S1"));
        assert_eq!(line.len(), RECORD_WIDTH + 1);
        assert_eq!(&line[0..5], "D0USS");
        assert_eq!(line[13..41].trim_end(), "Doe, John");
        assert_eq!(line[41..53].trim_end(), "S1");
        assert_eq!(&line[57..65], "20120101");
        assert_eq!(&line[65..67], "12");
        assert_eq!(&line[67..69], "MM");
        assert_eq!(&line[69..73], "0050");
        assert_eq!(&line[73..74], "1");
        assert_eq!(&line[74..78], "0001");
        assert_eq!(&line[78..82], "1112");
        assert_eq!(&line[82..90], "20240315");
        assert_eq!(&line[90..97], "0003210");
        assert_eq!(&line[97..98], "Y");
    }

    #[test]
    fn test_individual_entry_width_extremes() {
        let long = "W".repeat(100);
        for (name, token) in [("", ""), (long.as_str(), long.as_str())] {
            let mut e = entry(name, token);
            e.event_number = None;
            e.distance = 65_535;
            let line = encode_individual_entry("USS", &e);
            assert_eq!(line.len(), RECORD_WIDTH + 1);
        }
    }

    #[test]
    fn test_split_records_chunk_by_ten() {
        let set = SplitSet {
            swimmer_name: "Doe, John".to_string(),
            swimmer_token: "S1".to_string(),
            split_distance: 50,
            cumulative: true,
            times: (1..=12).map(|i| format!("0:{:02}.00", i * 3)).collect(),
        };
        let records = split_records(&set);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].times.len(), 10);
        assert_eq!(records[1].sequence, 2);
        assert_eq!(records[1].times, vec!["0003300", "0003600"]);

        for record in &records {
            let line = encode_splits("USS", record);
            assert_eq!(line.len(), RECORD_WIDTH + 1);
            assert_eq!(&line[0..2], "G0");
            assert_eq!(&line[58..60], "12");
            assert_eq!(&line[64..65], "C");
        }
        let second = encode_splits("USS", &records[1]);
        assert_eq!(&second[65..72], "0003300");
        assert_eq!(second[79..135].trim(), "");
    }
}
