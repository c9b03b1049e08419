//! Offset and line/column conversion for one text buffer.
//!
//! The engine works in UTF-8 byte offsets. Linters written in JavaScript
//! report columns and fix ranges in UTF-16 code units, so this index converts
//! between the two.

use lattelint_ast::{Position, to_offset};

/// A text buffer together with the offset of every line start.
///
/// Lines are separated by `\n` only; a `\r` before it belongs to the line.
/// Built once per buffer in O(n).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: String,
    /// Byte offset of each line start.
    line_starts: Vec<u32>,
    /// UTF-16 offset of each line start.
    utf16_line_starts: Vec<u32>,
}

impl LineIndex {
    /// Builds the index for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        let mut utf16_line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        utf16_line_starts.push(0);

        let mut units: u32 = 0;
        for (i, c) in text.char_indices() {
            units = units.saturating_add(c.len_utf16() as u32);
            if c == '\n' {
                line_starts.push(to_offset(i + 1));
                utf16_line_starts.push(units);
            }
        }

        Self {
            text,
            line_starts,
            utf16_line_starts,
        }
    }

    /// Returns the indexed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the indexed text in bytes.
    pub fn len(&self) -> u32 {
        to_offset(self.text.len())
    }

    /// Returns the length of the indexed text in UTF-16 code units.
    pub fn utf16_len(&self) -> u32 {
        self.to_utf16(self.len())
    }

    /// Returns true if the indexed text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of lines. An empty text has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a UTF-16 offset.
    ///
    /// Offsets past the end clamp to the end; offsets inside a character
    /// round down to its start.
    pub fn to_utf16(&self, offset: u32) -> u32 {
        let (line_idx, end) = self.locate_byte(offset);
        let line_start = self.line_starts[line_idx] as usize;
        let units = self.text[line_start..end].encode_utf16().count() as u32;
        self.utf16_line_starts[line_idx].saturating_add(units)
    }

    /// Converts a UTF-16 offset to a byte offset.
    ///
    /// Offsets past the end clamp to the end; an offset between the two
    /// halves of a surrogate pair rounds down to the character's start.
    pub fn to_byte(&self, offset: u32) -> u32 {
        let line_idx = self
            .utf16_line_starts
            .partition_point(|&start| start <= offset)
            - 1;
        let line_start = self.line_starts[line_idx] as usize;

        let mut units = self.utf16_line_starts[line_idx];
        for (i, c) in self.text[line_start..].char_indices() {
            let next = units.saturating_add(c.len_utf16() as u32);
            if next > offset {
                return to_offset(line_start + i);
            }
            units = next;
        }

        self.len()
    }

    /// Converts a byte offset to a 1-indexed line and UTF-16 column.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn position_of(&self, offset: u32) -> Position {
        let (line_idx, _) = self.locate_byte(offset);
        let column = self.to_utf16(offset) - self.utf16_line_starts[line_idx] + 1;

        Position::new(line_idx as u32 + 1, column)
    }

    /// Converts a 1-indexed line and UTF-16 column to a byte offset.
    ///
    /// Zero line or column values are treated as 1. A column past the end of
    /// its line keeps counting into the following characters, newline
    /// included; anything past the end of the text clamps to its length.
    pub fn offset_of(&self, position: Position) -> u32 {
        let line_idx = position.line.max(1) as usize - 1;
        let Some(&line_start) = self.utf16_line_starts.get(line_idx) else {
            return self.len();
        };

        self.to_byte(line_start.saturating_add(position.column.max(1) - 1))
    }

    /// Returns the line containing a byte offset and the offset clamped to a
    /// character boundary.
    fn locate_byte(&self, offset: u32) -> (usize, usize) {
        let mut end = offset.min(self.len()) as usize;
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        let line_idx = self
            .line_starts
            .partition_point(|&start| start as usize <= end)
            - 1;
        (line_idx, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_text_has_one_line() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position_of(0), Position::new(1, 1));
        assert_eq!(index.offset_of(Position::new(1, 1)), 0);
        assert_eq!(index.utf16_len(), 0);
    }

    #[test]
    fn test_trailing_newline_starts_new_line() {
        let index = LineIndex::new("a\nb\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position_of(4), Position::new(3, 1));
    }

    #[rstest]
    #[case(0, 1, 1)]
    #[case(4, 1, 5)]
    #[case(5, 1, 6)]
    #[case(6, 2, 1)]
    #[case(9, 2, 4)]
    #[case(11, 3, 1)]
    fn test_position_of(#[case] offset: u32, #[case] line: u32, #[case] column: u32) {
        let index = LineIndex::new("line1\nabcd\nxyz");
        assert_eq!(index.position_of(offset), Position::new(line, column));
    }

    #[rstest]
    #[case(1, 1, 0)]
    #[case(1, 6, 5)]
    #[case(2, 1, 6)]
    #[case(2, 3, 8)]
    #[case(3, 4, 14)]
    fn test_offset_of(#[case] line: u32, #[case] column: u32, #[case] offset: u32) {
        let index = LineIndex::new("line1\nabcd\nxyz");
        assert_eq!(index.offset_of(Position::new(line, column)), offset);
    }

    #[test]
    fn test_offset_of_column_past_line_end_continues_into_next_line() {
        let index = LineIndex::new("ab\ncd");
        // Column 4 on line 1 is the first character of line 2.
        assert_eq!(index.offset_of(Position::new(1, 4)), 3);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset_of(Position::new(9, 1)), 5);
        assert_eq!(index.offset_of(Position::new(2, 40)), 5);
        assert_eq!(index.position_of(100), Position::new(2, 3));
        assert_eq!(index.to_byte(100), 5);
        assert_eq!(index.to_utf16(100), 5);
    }

    #[test]
    fn test_zero_line_and_column_treated_as_one() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset_of(Position::new(0, 0)), 0);
    }

    #[test]
    fn test_columns_count_code_units_not_bytes() {
        let index = LineIndex::new("é = {$x};\nü");
        // 'é' is two bytes, so `{` sits at byte 5 but column 5.
        assert_eq!(index.position_of(5), Position::new(1, 5));
        assert_eq!(index.offset_of(Position::new(1, 5)), 5);
        assert_eq!(index.offset_of(Position::new(2, 2)), index.len());
    }

    #[test]
    fn test_astral_characters_take_two_units() {
        // '😀' is four bytes and a surrogate pair.
        let index = LineIndex::new("😀{$a}\n😀x");

        assert_eq!(index.position_of(4), Position::new(1, 3));
        assert_eq!(index.offset_of(Position::new(1, 3)), 4);
        assert_eq!(index.offset_of(Position::new(2, 3)), 14);
        assert_eq!(index.utf16_len(), 11);
    }

    #[rstest]
    #[case::ascii(0, 0)]
    #[case::before_pair(1, 1)]
    #[case::after_pair(5, 3)]
    #[case::end(7, 5)]
    fn test_to_utf16(#[case] byte: u32, #[case] utf16: u32) {
        let index = LineIndex::new("a😀bč");
        assert_eq!(index.to_utf16(byte), utf16);
        assert_eq!(index.to_byte(utf16), byte);
    }

    #[test]
    fn test_to_byte_inside_surrogate_pair_rounds_down() {
        let index = LineIndex::new("a😀b");
        assert_eq!(index.to_byte(2), 1);
    }

    #[test]
    fn test_to_utf16_inside_character_rounds_down() {
        let index = LineIndex::new("čx");
        assert_eq!(index.to_utf16(1), 0);
    }

    #[test]
    fn test_round_trip_on_every_char_boundary() {
        let text = "čau {$a}\n\tžluť 😀 {if}\n";
        let index = LineIndex::new(text);
        for (offset, _) in text.char_indices() {
            let pos = index.position_of(offset as u32);
            assert_eq!(index.offset_of(pos), offset as u32);
            assert_eq!(index.to_byte(index.to_utf16(offset as u32)), offset as u32);
        }
    }

    #[test]
    fn test_crlf_keeps_carriage_return_in_line() {
        let index = LineIndex::new("a\r\nb");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.position_of(1), Position::new(1, 2));
        assert_eq!(index.position_of(3), Position::new(2, 1));
    }
}
