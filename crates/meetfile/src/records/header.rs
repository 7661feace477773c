//! File, meet and team header records (A0, B1, C1).

use time::Date;

use super::fields::LineWriter;
use super::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub version: String,
    pub file_code: String,
    pub description: String,
    pub software_name: String,
    pub software_version: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub created_on: Date,
}

/// A0 layout:
///
/// | cols    | width | field                |
/// |---------|-------|----------------------|
/// | 1-2     | 2     | `A0`                 |
/// | 3-5     | 3     | organization         |
/// | 6-13    | 8     | format version       |
/// | 14-15   | 2     | file code            |
/// | 16-45   | 30    | file description     |
/// | 46-65   | 20    | software name        |
/// | 66-75   | 10    | software version     |
/// | 76-95   | 20    | contact name         |
/// | 96-107  | 12    | contact phone        |
/// | 108-115 | 8     | creation date        |
/// | 116-160 | 45    | future use           |
pub fn encode_file_header(organization: &str, header: &FileHeader) -> String {
    let mut w = LineWriter::new(RecordKind::FileHeader.tag(), organization);
    w.text(&header.version, 8)
        .text(&header.file_code, 2)
        .text(&header.description, 30)
        .text(&header.software_name, 20)
        .text(&header.software_version, 10)
        .text(&header.contact_name, 20)
        .text(&header.contact_phone, 12)
        .date(header.created_on)
        .spaces(45);
    w.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetHeader {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub meet_type: char,
    pub start: Date,
    pub end: Date,
    pub course: char,
}

/// B1 layout:
///
/// | cols    | width | field                  |
/// |---------|-------|------------------------|
/// | 6-13    | 8     | future use             |
/// | 14-43   | 30    | meet name              |
/// | 44-65   | 22    | address line 1         |
/// | 66-87   | 22    | address line 2 (blank) |
/// | 88-107  | 20    | city                   |
/// | 108-109 | 2     | state                  |
/// | 110-119 | 10    | postal code            |
/// | 120-122 | 3     | country (blank)        |
/// | 123     | 1     | meet type              |
/// | 124-131 | 8     | start date             |
/// | 132-139 | 8     | end date               |
/// | 140-143 | 4     | pool altitude (blank)  |
/// | 144-151 | 8     | future use             |
/// | 152     | 1     | course                 |
/// | 153-160 | 8     | future use             |
pub fn encode_meet_header(organization: &str, meet: &MeetHeader) -> String {
    let mut w = LineWriter::new(RecordKind::MeetHeader.tag(), organization);
    w.spaces(8)
        .text(&meet.name, 30)
        .text(&meet.address, 22)
        .spaces(22)
        .text(&meet.city, 20)
        .upper(&meet.state, 2)
        .text(&meet.postal_code, 10)
        .spaces(3)
        .char(meet.meet_type, 1)
        .date(meet.start)
        .date(meet.end)
        .spaces(4) // altitude
        .spaces(8)
        .char(meet.course, 1)
        .spaces(8);
    w.finish()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamHeader {
    pub team_code: String,
    pub name: String,
    pub abbreviated_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// C1 layout:
///
/// | cols    | width | field                     |
/// |---------|-------|---------------------------|
/// | 6-13    | 8     | future use                |
/// | 14-19   | 6     | team code                 |
/// | 20-49   | 30    | full team name            |
/// | 50-65   | 16    | abbreviated team name     |
/// | 66-87   | 22    | address line 1            |
/// | 88-109  | 22    | address line 2 (blank)    |
/// | 110-129 | 20    | city                      |
/// | 130-131 | 2     | state                     |
/// | 132-141 | 10    | postal code               |
/// | 142-144 | 3     | country (blank)           |
/// | 145     | 1     | region (blank)            |
/// | 146-151 | 6     | future use                |
/// | 152     | 1     | team code suffix (blank)  |
/// | 153-160 | 8     | future use                |
pub fn encode_team_header(organization: &str, team: &TeamHeader) -> String {
    let mut w = LineWriter::new(RecordKind::TeamHeader.tag(), organization);
    w.spaces(8)
        .upper(&team.team_code, 6)
        .text(&team.name, 30)
        .text(&team.abbreviated_name, 16)
        .text(&team.address, 22)
        .spaces(22)
        .text(&team.city, 20)
        .upper(&team.state, 2)
        .text(&team.postal_code, 10)
        .spaces(3) // country
        .spaces(1) // region
        .spaces(6)
        .spaces(1) // team code suffix
        .spaces(8);
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RECORD_WIDTH;
    use time::macros::date;

    fn file_header(text: &str) -> FileHeader {
        FileHeader {
            version: text.to_string(),
            file_code: "02".to_string(),
            description: text.to_string(),
            software_name: text.to_string(),
            software_version: text.to_string(),
            contact_name: text.to_string(),
            contact_phone: text.to_string(),
            created_on: date!(2024 - 03 - 01),
        }
    }

    fn meet_header(text: &str) -> MeetHeader {
        MeetHeader {
            name: text.to_string(),
            address: text.to_string(),
            city: text.to_string(),
            state: text.to_string(),
            postal_code: text.to_string(),
            meet_type: '1',
            start: date!(2024 - 03 - 15),
            end: date!(2024 - 03 - 15),
            course: 'Y',
        }
    }

    fn team_header(text: &str) -> TeamHeader {
        TeamHeader {
            team_code: text.to_string(),
            name: text.to_string(),
            abbreviated_name: text.to_string(),
            address: text.to_string(),
            city: text.to_string(),
            state: text.to_string(),
            postal_code: text.to_string(),
        }
    }

    #[test]
    fn test_headers_are_fixed_width() {
        let long = "X".repeat(200);
        for text in ["", "Short", long.as_str()] {
            for line in [
                encode_file_header("USS", &file_header(text)),
                encode_meet_header("USS", &meet_header(text)),
                encode_team_header("USS", &team_header(text)),
            ] {
                assert_eq!(line.len(), RECORD_WIDTH + 1);
                assert!(line.ends_with('\n'));
                assert_eq!(line.matches('\n').count(), 1);
            }
        }
    }

    #[test]
    fn test_file_header_columns() {
        let line = encode_file_header("USS", &file_header("V3"));
        assert_eq!(&line[0..5], "A0USS");
        assert_eq!(&line[5..13], "V3      ");
        assert_eq!(&line[13..15], "02");
        assert_eq!(&line[107..115], "20240301");
        assert_eq!(line[115..160].trim(), "");
    }

    #[test]
    fn test_meet_header_columns() {
        let line = encode_meet_header("USS", &meet_header("Spring Classic"));
        assert_eq!(&line[0..2], "B1");
        assert_eq!(line[13..43].trim_end(), "Spring Classic");
        assert_eq!(&line[122..123], "1");
        assert_eq!(&line[123..131], "20240315");
        assert_eq!(&line[131..139], "20240315");
        assert_eq!(&line[151..152], "Y");
    }

    #[test]
    fn test_team_header_columns() {
        let line = encode_team_header("USS", &team_header("sharks"));
        assert_eq!(&line[0..2], "C1");
        assert_eq!(&line[13..19], "SHARKS");
        assert_eq!(line[19..49].trim_end(), "sharks");
    }
}
