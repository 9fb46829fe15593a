//! Line/column lookup for spans.

use nikl_ir::Span;

/// Byte offsets of every line start, for O(log L) line lookups.
///
/// ```
/// use nikl_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "let a = 1\nprint(a)";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 16), (2, 7));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// offsets[0] = 0; offsets[n] = byte after the n-th newline.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// 1-based (line, column). Columns count characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start(line);
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX).saturating_add(1))
    }

    /// Text of a 1-based line, without its trailing newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> &'s str {
        let start = self.line_start(line).min(source.len());
        let rest = source.get(start..).unwrap_or("");
        let text = rest.split('\n').next().unwrap_or("");
        text.strip_suffix('\r').unwrap_or(text)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    fn line_start(&self, line: u32) -> usize {
        let idx = (line as usize).saturating_sub(1);
        self.offsets.get(idx).copied().unwrap_or(0) as usize
    }
}

/// 1-based (line, column) of a span's start. Builds a throwaway table;
/// use [`LineOffsetTable`] directly for repeated lookups.
pub fn span_to_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}
