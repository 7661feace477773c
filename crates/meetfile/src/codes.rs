//! Interchange code tables.
//!
//! Every lookup is total: unknown inputs fall back to a documented code
//! instead of failing, so a bad row never aborts an export.

use crate::models::{Course, Stroke};

/// Code emitted for any value the tables do not know.
pub const FALLBACK_CODE: char = '1';

/// Seed-time sentinel meaning "no time".
pub const NO_TIME: &str = "9999999";

const AGE_CODES: &[(&str, &str)] = &[
    ("8&U", "UN08"),
    ("10&U", "UN10"),
    ("9-10", "0910"),
    ("11-12", "1112"),
    ("13-14", "1314"),
    ("15-16", "1516"),
    ("17-18", "1718"),
    ("15-18", "1518"),
    ("13&O", "13OV"),
    ("15&O", "15OV"),
    ("Open", "UNOV"),
];

/// Stroke code. Relay freestyle and medley use their own codes; the other
/// strokes have no relay form and fall back.
pub fn stroke_code(stroke: Stroke, is_relay: bool) -> char {
    match (stroke, is_relay) {
        (Stroke::Freestyle, false) => '1',
        (Stroke::Backstroke, false) => '2',
        (Stroke::Breaststroke, false) => '3',
        (Stroke::Butterfly, false) => '4',
        (Stroke::Medley, false) => '5',
        (Stroke::Freestyle, true) => '6',
        (Stroke::Medley, true) => '7',
        (Stroke::Unknown, _) | (_, true) => FALLBACK_CODE,
    }
}

/// Inverse of [`stroke_code`]: the stroke and whether it is the relay form.
pub fn stroke_from_code(code: char) -> Option<(Stroke, bool)> {
    match code {
        '1' => Some((Stroke::Freestyle, false)),
        '2' => Some((Stroke::Backstroke, false)),
        '3' => Some((Stroke::Breaststroke, false)),
        '4' => Some((Stroke::Butterfly, false)),
        '5' => Some((Stroke::Medley, false)),
        '6' => Some((Stroke::Freestyle, true)),
        '7' => Some((Stroke::Medley, true)),
        _ => None,
    }
}

pub fn course_code(course: Course) -> char {
    match course {
        Course::ShortCourseYards => 'Y',
        Course::LongCourseMeters => 'L',
        Course::ShortCourseMeters => 'S',
        Course::Unknown => FALLBACK_CODE,
    }
}

pub fn course_from_code(code: char) -> Option<Course> {
    match code {
        'Y' => Some(Course::ShortCourseYards),
        'L' => Some(Course::LongCourseMeters),
        'S' => Some(Course::ShortCourseMeters),
        _ => None,
    }
}

/// Four-character age code for an age-group label, `"1"` when unknown.
pub fn age_code(label: &str) -> &'static str {
    let label = label.trim();
    AGE_CODES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(label))
        .map_or("1", |(_, code)| *code)
}

pub fn age_label_from_code(code: &str) -> Option<&'static str> {
    AGE_CODES
        .iter()
        .find(|(_, known)| *known == code)
        .map(|(label, _)| *label)
}

/// All age-group labels the tables know about.
pub fn age_labels() -> impl Iterator<Item = &'static str> {
    AGE_CODES.iter().map(|(label, _)| *label)
}

/// Converts `M:SS.hh` (or `SS.hh`) to a 7-digit zero-padded centisecond
/// count. Missing input and `NT` give [`NO_TIME`]; unparseable segments count
/// as zero.
pub fn time_to_centiseconds(time: &str) -> String {
    let time = time.trim();
    if time.is_empty() || time.eq_ignore_ascii_case("NT") {
        return NO_TIME.to_string();
    }

    let (minutes, rest) = match time.split_once(':') {
        Some((m, rest)) => (m, rest),
        None => ("0", time),
    };
    let (seconds, fraction) = rest.split_once('.').unwrap_or((rest, "00"));

    let minutes: u64 = minutes.trim().parse().unwrap_or(0);
    let seconds: u64 = seconds.trim().parse().unwrap_or(0);
    let hundredths = parse_hundredths(fraction);

    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .and_then(|s| s.checked_mul(100))
        .and_then(|c| c.checked_add(hundredths));
    match total {
        Some(total) if total <= 9_999_998 => format!("{total:07}"),
        _ => NO_TIME.to_string(),
    }
}

/// `"5"` is fifty hundredths, `"123"` rounds down to twelve.
fn parse_hundredths(fraction: &str) -> u64 {
    let digits: String = fraction
        .chars()
        .take_while(char::is_ascii_digit)
        .chain("00".chars())
        .take(2)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Inverse of [`time_to_centiseconds`]. The sentinel maps back to `NT`.
pub fn centiseconds_to_time(code: &str) -> Option<String> {
    if code == NO_TIME {
        return Some("NT".to_string());
    }
    if code.len() != 7 || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let total: u64 = code.parse().ok()?;
    let (minutes, rest) = (total / 6000, total % 6000);
    Some(format!("{}:{:02}.{:02}", minutes, rest / 100, rest % 100))
}
