//! Translating diagnostics from transformed text back to the original.

use lattelint_ast::Position;

use crate::diagnostic::Diagnostic;
use crate::line_index::LineIndex;
use crate::rewriter::MappingRecord;

/// Which edge of a substitution an offset inside it snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Start of a range: snap to the directive's start.
    Start,
    /// End of a half-open range: snap to the directive's end.
    End,
}

/// Maps offsets and diagnostics through a set of mapping records.
#[derive(Debug, Clone, Copy)]
pub struct Remapper<'a> {
    records: &'a [MappingRecord],
    original: &'a LineIndex,
    transformed: &'a LineIndex,
}

impl<'a> Remapper<'a> {
    /// `records` must be ascending and disjoint, as produced by the rewriter.
    pub fn new(
        records: &'a [MappingRecord],
        original: &'a LineIndex,
        transformed: &'a LineIndex,
    ) -> Self {
        Self {
            records,
            original,
            transformed,
        }
    }

    /// Converts a transformed-text offset to an original-text offset.
    ///
    /// Text outside substitutions maps one to one. An offset inside a
    /// substitution has no counterpart in the directive it replaced, so it
    /// snaps to the directive's start or end depending on `anchor`. For
    /// [`Anchor::End`] the offset is an exclusive bound: one equal to the
    /// substitution's first byte covers none of it and maps to the start.
    pub fn to_original_offset(&self, offset: u32, anchor: Anchor) -> u32 {
        // First record not entirely before `offset`.
        let idx = self
            .records
            .partition_point(|r| r.transformed.end <= offset);

        if let Some(record) = self.records.get(idx)
            && record.transformed.start <= offset
        {
            return match anchor {
                Anchor::End if offset > record.transformed.start => record.original.end,
                _ => record.original.start,
            };
        }

        match idx.checked_sub(1).map(|i| &self.records[i]) {
            Some(prev) => prev.original.end + (offset - prev.transformed.end),
            None => offset,
        }
    }

    /// Converts a transformed-text position to an original-text position.
    pub fn to_original_position(&self, position: Position, anchor: Anchor) -> Position {
        let offset = self.transformed.offset_of(position);
        self.original
            .position_of(self.to_original_offset(offset, anchor))
    }

    /// Converts a transformed-text UTF-16 offset, as used by fix ranges, to an
    /// original-text UTF-16 offset.
    pub fn to_original_utf16(&self, offset: u32, anchor: Anchor) -> u32 {
        let byte = self.to_original_offset(self.transformed.to_byte(offset), anchor);
        self.original.to_utf16(byte)
    }

    /// Returns true if an original-text offset lies inside a replaced range.
    pub fn is_in_directive(&self, offset: u32) -> bool {
        let idx = self.records.partition_point(|r| r.original.end <= offset);
        self.records
            .get(idx)
            .is_some_and(|r| r.original.contains(offset))
    }

    /// Returns true if the diagnostic concerns a substitution rather than the
    /// surrounding code: its location, or its fix's start, resolves inside a
    /// replaced range.
    pub fn concerns_directive(&self, diagnostic: &Diagnostic) -> bool {
        if let Some(position) = diagnostic.position() {
            let start = self.transformed.offset_of(position);
            if self.is_in_directive(self.to_original_offset(start, Anchor::Start)) {
                return true;
            }
        }

        diagnostic.fix.as_ref().is_some_and(|fix| {
            let start = self.transformed.to_byte(fix.range[0]);
            self.is_in_directive(self.to_original_offset(start, Anchor::Start))
        })
    }

    /// Returns a copy of `diagnostic` in original-text coordinates.
    ///
    /// Only the location, the end location (when both of its fields are
    /// present) and the fix range change. A diagnostic without a location
    /// keeps it absent.
    pub fn remap(&self, diagnostic: &Diagnostic) -> Diagnostic {
        let mut out = diagnostic.clone();

        if let Some(position) = diagnostic.position() {
            let start = self.to_original_position(position, Anchor::Start);
            out.line = Some(start.line);
            out.column = Some(start.column);
        }

        if let (Some(end_line), Some(end_column)) = (diagnostic.end_line, diagnostic.end_column) {
            let end = self.to_original_position(Position::new(end_line, end_column), Anchor::End);
            out.end_line = Some(end.line);
            out.end_column = Some(end.column);
        }

        if let Some(fix) = out.fix.as_mut() {
            fix.range = [
                self.to_original_utf16(fix.range[0], Anchor::Start),
                self.to_original_utf16(fix.range[1], Anchor::End),
            ];
        }

        out
    }
}
