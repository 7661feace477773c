//! Positional field writer for fixed-column records.

use time::Date;

/// Width of every record line, excluding the newline.
pub const RECORD_WIDTH: usize = 160;

/// Builds one fixed-width line field by field.
///
/// Text fields are left-justified, space-padded and truncated. Numeric
/// fields are right-justified and zero-padded; a number wider than its field
/// keeps its low-order digits.
#[derive(Debug)]
pub struct LineWriter {
    buf: String,
}

impl LineWriter {
    /// Starts a line with the record tag and the 3-column organization code.
    pub fn new(tag: &str, organization: &str) -> Self {
        let mut writer = Self {
            buf: String::with_capacity(RECORD_WIDTH + 1),
        };
        writer.text(tag, 2).text(organization, 3);
        writer
    }

    pub fn text(&mut self, value: &str, width: usize) -> &mut Self {
        let mut written = 0;
        for c in value.chars().take(width) {
            // Control characters and non-ASCII would shift later columns.
            self.buf.push(if c.is_ascii() && !c.is_ascii_control() { c } else { ' ' });
            written += 1;
        }
        self.spaces(width - written)
    }

    pub fn upper(&mut self, value: &str, width: usize) -> &mut Self {
        self.text(&value.to_ascii_uppercase(), width)
    }

    pub fn char(&mut self, value: char, width: usize) -> &mut Self {
        let mut tmp = [0u8; 4];
        self.text(value.encode_utf8(&mut tmp), width)
    }

    pub fn number(&mut self, value: u64, width: usize) -> &mut Self {
        let digits = format!("{value:0width$}");
        self.buf.push_str(&digits[digits.len() - width..]);
        self
    }

    /// `YYYYMMDD`.
    pub fn date(&mut self, value: Date) -> &mut Self {
        let formatted = format!(
            "{:04}{:02}{:02}",
            value.year().clamp(0, 9999),
            value.month() as u8,
            value.day()
        );
        self.text(&formatted, 8)
    }

    /// Blank columns: future-use regions and fields this system does not model.
    pub fn spaces(&mut self, width: usize) -> &mut Self {
        self.buf.extend(std::iter::repeat_n(' ', width));
        self
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Terminates the line, padding or cutting it to [`RECORD_WIDTH`].
    pub fn finish(mut self) -> String {
        debug_assert_eq!(self.buf.len(), RECORD_WIDTH, "record layout drifted");
        self.buf.truncate(RECORD_WIDTH);
        let pad = RECORD_WIDTH - self.buf.len();
        self.spaces(pad);
        self.buf.push('\n');
        self.buf
    }
}

/// `"Last, First"` as used in every name window.
pub fn swimmer_name(last: &str, first: &str) -> String {
    match (last.trim(), first.trim()) {
        ("", first) => first.to_string(),
        (last, "") => last.to_string(),
        (last, first) => format!("{last}, {first}"),
    }
}

/// Alphanumeric characters of an id, upper-cased.
pub fn id_token(id: &str) -> String {
    id.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_text_pads_and_truncates() {
        let mut w = LineWriter::new("A0", "USS");
        w.text("ab", 4).text("abcdef", 3);
        assert_eq!(w.position(), 12);
        w.spaces(RECORD_WIDTH - 12);
        let line = w.finish();
        assert_eq!(&line[..12], "A0USSab  abc");
        assert_eq!(line.len(), RECORD_WIDTH + 1);
    }

    #[test]
    fn test_number_is_zero_padded() {
        let mut w = LineWriter::new("Z0", "USS");
        w.number(7, 3).number(123_456, 4);
        assert_eq!(&w.buf[5..], "0073456");
    }

    #[test]
    fn test_date_is_compact() {
        let mut w = LineWriter::new("B1", "USS");
        w.date(date!(2024 - 03 - 15));
        assert_eq!(&w.buf[5..], "20240315");
    }

    #[test]
    fn test_non_ascii_is_blanked() {
        let mut w = LineWriter::new("D0", "USS");
        w.text("Zoë\tX", 5);
        assert_eq!(&w.buf[5..], "Zo  X");
    }

    #[test]
    fn test_swimmer_name_and_token() {
        assert_eq!(swimmer_name("Doe", "John"), "Doe, John");
        assert_eq!(swimmer_name("", "John"), "John");
        assert_eq!(id_token("a1b2-c3d4"), "A1B2C3D4");
    }
}
