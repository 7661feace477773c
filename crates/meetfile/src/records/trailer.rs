//! Trailer record (Z0) and the record counts it carries.

use serde::Serialize;

use super::fields::LineWriter;
use super::RecordKind;

/// Running counts of emitted records, summarized by the trailer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCounts {
    pub b_records: usize,
    pub c_records: usize,
    pub d_records: usize,
    pub e_records: usize,
    pub f_records: usize,
    pub g_records: usize,
    pub meets: usize,
    pub teams: usize,
    /// Distinct swimmers across D0 and F0 records.
    pub swimmers: usize,
}

impl RecordCounts {
    /// Counts one emitted record of `kind`. Headers and trailers that are
    /// not summarized are ignored.
    pub fn record(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::MeetHeader => self.b_records += 1,
            RecordKind::TeamHeader => self.c_records += 1,
            RecordKind::IndividualEntry => self.d_records += 1,
            RecordKind::RelayHeader => self.e_records += 1,
            RecordKind::RelayLeg => self.f_records += 1,
            RecordKind::Splits => self.g_records += 1,
            RecordKind::FileHeader | RecordKind::Trailer => {}
        }
    }

    /// Reads the counts back out of an encoded Z0 line.
    pub fn from_trailer_line(line: &str) -> Option<Self> {
        if RecordKind::of_line(line)? != RecordKind::Trailer {
            return None;
        }
        let field = |start: usize, end: usize| -> Option<usize> {
            line.get(start..end)?.trim().parse().ok()
        };
        Some(Self {
            b_records: field(40, 43)?,
            meets: field(43, 46)?,
            c_records: field(46, 50)?,
            teams: field(50, 54)?,
            d_records: field(54, 60)?,
            swimmers: field(60, 66)?,
            e_records: field(66, 71)?,
            f_records: field(71, 77)?,
            g_records: field(77, 83)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub file_code: String,
    pub notes: String,
    pub counts: RecordCounts,
    pub batch_number: u32,
}

/// Z0 layout:
///
/// | cols    | width | field                 |
/// |---------|-------|-----------------------|
/// | 6-8     | 3     | future use            |
/// | 9-10    | 2     | file code             |
/// | 11-40   | 30    | notes                 |
/// | 41-43   | 3     | B1 records            |
/// | 44-46   | 3     | meets                 |
/// | 47-50   | 4     | C1 records            |
/// | 51-54   | 4     | teams                 |
/// | 55-60   | 6     | D0 records            |
/// | 61-66   | 6     | distinct swimmers     |
/// | 67-71   | 5     | E0 records            |
/// | 72-77   | 6     | F0 records            |
/// | 78-83   | 6     | G0 records            |
/// | 84-88   | 5     | batch number          |
/// | 89-160  | 72    | future use            |
pub fn encode_trailer(organization: &str, trailer: &Trailer) -> String {
    let c = &trailer.counts;
    let mut w = LineWriter::new(RecordKind::Trailer.tag(), organization);
    w.spaces(3)
        .text(&trailer.file_code, 2)
        .text(&trailer.notes, 30)
        .number(c.b_records as u64, 3)
        .number(c.meets as u64, 3)
        .number(c.c_records as u64, 4)
        .number(c.teams as u64, 4)
        .number(c.d_records as u64, 6)
        .number(c.swimmers as u64, 6)
        .number(c.e_records as u64, 5)
        .number(c.f_records as u64, 6)
        .number(c.g_records as u64, 6)
        .number(u64::from(trailer.batch_number), 5)
        .spaces(72);
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RECORD_WIDTH;

    fn counts() -> RecordCounts {
        RecordCounts {
            b_records: 1,
            c_records: 1,
            d_records: 12,
            e_records: 2,
            f_records: 8,
            g_records: 0,
            meets: 1,
            teams: 1,
            swimmers: 9,
        }
    }

    #[test]
    fn test_trailer_columns() {
        let line = encode_trailer(
            "USS",
            &Trailer {
                file_code: "02".to_string(),
                notes: String::new(),
                counts: counts(),
                batch_number: 1,
            },
        );
        assert_eq!(line.len(), RECORD_WIDTH + 1);
        assert_eq!(&line[0..5], "Z0USS");
        assert_eq!(&line[8..10], "02");
        assert_eq!(&line[40..43], "001");
        assert_eq!(&line[54..60], "000012");
        assert_eq!(&line[60..66], "000009");
        assert_eq!(&line[71..77], "000008");
    }

    #[test]
    fn test_counts_read_back_from_line() {
        let trailer = Trailer {
            file_code: "02".to_string(),
            notes: "X".repeat(50),
            counts: counts(),
            batch_number: 1,
        };
        let line = encode_trailer("USS", &trailer);
        assert_eq!(RecordCounts::from_trailer_line(&line), Some(counts()));
        assert_eq!(RecordCounts::from_trailer_line("D0USS"), None);
    }

    #[test]
    fn test_record_ignores_unsummarized_kinds() {
        let mut c = RecordCounts::default();
        c.record(RecordKind::FileHeader);
        c.record(RecordKind::IndividualEntry);
        c.record(RecordKind::RelayLeg);
        c.record(RecordKind::Trailer);
        assert_eq!(c.d_records, 1);
        assert_eq!(c.f_records, 1);
        assert_eq!(c.b_records, 0);
    }
}
