//! Resolving compact spans to line and column.
//!
//! [`SourceMap`] owns every text loaded during one compilation (the entry
//! stylesheet plus imports), indexed by [`SourceId`]. Each entry keeps a
//! [`LineOffsetTable`] so lookups are a binary search.

use sable_ir::{SourceId, SourceSpan, Span};

/// Byte offset of each line start.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            newline_offsets(source.as_bytes()).map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column); the column counts characters.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let start = self.offsets.get((line - 1) as usize).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(start..end)
            .map_or(0, |s| u32::try_from(s.chars().count()).unwrap_or(u32::MAX - 1));
        (line, col + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

fn newline_offsets(bytes: &[u8]) -> impl Iterator<Item = usize> + '_ {
    bytes
        .iter()
        .enumerate()
        .filter_map(|(i, &b)| (b == b'\n').then_some(i))
}

#[derive(Clone, Debug)]
struct SourceFile {
    name: String,
    text: String,
    lines: LineOffsetTable,
}

/// All source texts of one compilation.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a text. The first one added gets [`SourceId::ROOT`].
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) -> SourceId {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        let id = SourceId(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile {
            name: name.into(),
            text,
            lines,
        });
        id
    }

    pub fn text(&self, id: SourceId) -> Option<&str> {
        self.files.get(id.0 as usize).map(|f| f.text.as_str())
    }

    pub fn name(&self, id: SourceId) -> Option<&str> {
        self.files.get(id.0 as usize).map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a span; unknown sources resolve to line 1, column 1.
    pub fn resolve(&self, span: Span) -> SourceSpan {
        let (line, column) = self
            .files
            .get(span.source.0 as usize)
            .map_or((1, 1), |f| f.lines.offset_to_line_col(&f.text, span.start));
        SourceSpan {
            source: span.source,
            offset: span.start,
            length: span.len(),
            line,
            column,
        }
    }
}
