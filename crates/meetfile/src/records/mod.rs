//! Fixed-width record encoders.
//!
//! Every record kind is a plain struct with one encode function producing a
//! single [`RECORD_WIDTH`]-column line terminated by `\n`. Consumers parse by
//! column, so each encoder documents its layout and never omits a region.

pub mod entry;
pub mod fields;
pub mod header;
pub mod relay;
pub mod trailer;

pub use entry::{IndividualEntry, SplitRecord, SplitSet, encode_individual_entry, encode_splits, split_records};
pub use fields::{LineWriter, RECORD_WIDTH, id_token, swimmer_name};
pub use header::{
    FileHeader, MeetHeader, TeamHeader, encode_file_header, encode_meet_header,
    encode_team_header,
};
pub use relay::{RelayHeader, RelayLeg, encode_relay_header, encode_relay_leg};
pub use trailer::{RecordCounts, Trailer, encode_trailer};

/// Record type, identified by the two-column tag that starts each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    FileHeader,
    MeetHeader,
    TeamHeader,
    IndividualEntry,
    RelayHeader,
    RelayLeg,
    Splits,
    Trailer,
}

impl RecordKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::FileHeader => "A0",
            RecordKind::MeetHeader => "B1",
            RecordKind::TeamHeader => "C1",
            RecordKind::IndividualEntry => "D0",
            RecordKind::RelayHeader => "E0",
            RecordKind::RelayLeg => "F0",
            RecordKind::Splits => "G0",
            RecordKind::Trailer => "Z0",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "A0" => Some(RecordKind::FileHeader),
            "B1" => Some(RecordKind::MeetHeader),
            "C1" => Some(RecordKind::TeamHeader),
            "D0" => Some(RecordKind::IndividualEntry),
            "E0" => Some(RecordKind::RelayHeader),
            "F0" => Some(RecordKind::RelayLeg),
            "G0" => Some(RecordKind::Splits),
            "Z0" => Some(RecordKind::Trailer),
            _ => None,
        }
    }

    /// Kind of an encoded line, from its first two columns.
    pub fn of_line(line: &str) -> Option<Self> {
        line.get(..2).and_then(Self::from_tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    FileHeader(FileHeader),
    MeetHeader(MeetHeader),
    TeamHeader(TeamHeader),
    IndividualEntry(IndividualEntry),
    RelayHeader(RelayHeader),
    RelayLeg(RelayLeg),
    Splits(SplitRecord),
    Trailer(Trailer),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::FileHeader(_) => RecordKind::FileHeader,
            Record::MeetHeader(_) => RecordKind::MeetHeader,
            Record::TeamHeader(_) => RecordKind::TeamHeader,
            Record::IndividualEntry(_) => RecordKind::IndividualEntry,
            Record::RelayHeader(_) => RecordKind::RelayHeader,
            Record::RelayLeg(_) => RecordKind::RelayLeg,
            Record::Splits(_) => RecordKind::Splits,
            Record::Trailer(_) => RecordKind::Trailer,
        }
    }

    pub fn encode(&self, organization: &str) -> String {
        match self {
            Record::FileHeader(r) => encode_file_header(organization, r),
            Record::MeetHeader(r) => encode_meet_header(organization, r),
            Record::TeamHeader(r) => encode_team_header(organization, r),
            Record::IndividualEntry(r) => encode_individual_entry(organization, r),
            Record::RelayHeader(r) => encode_relay_header(organization, r),
            Record::RelayLeg(r) => encode_relay_leg(organization, r),
            Record::Splits(r) => encode_splits(organization, r),
            Record::Trailer(r) => encode_trailer(organization, r),
        }
    }
}
