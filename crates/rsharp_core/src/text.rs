//! Byte offsets, spans and line maps.
//!
//! Tokens, trivia and diagnostics all carry byte offsets into the parsed
//! text. Missing tokens have empty spans at the position where they were
//! expected.

use std::fmt;

/// A byte offset from the start of the source text.
pub type TextPos = u32;

/// A half-open byte range `start..start + length`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// A span from `start` to `end`. An `end` before `start` gives an empty span.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self::new(start, end.saturating_sub(start))
    }

    /// The zero-width span of a missing token.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self::new(pos, 0)
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        (self.start..self.end()).contains(&pos)
    }

    /// Whether `other` lies inside this span. An empty span sitting on the
    /// end boundary is inside.
    #[inline]
    pub fn contains_span(&self, other: &TextSpan) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// The smallest span covering both spans.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        TextSpan::from_bounds(self.start.min(other.start), self.end().max(other.end()))
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A 0-based line and byte column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

impl fmt::Display for LineAndColumn {
    /// Renders as the 1-based `(line,column)` pair compilers print.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line + 1, self.character + 1)
    }
}

/// Line start offsets of a source text.
///
/// `\r\n`, `\r`, `\n`, U+0085, U+2028 and U+2029 all end a line, matching
/// the scanner's end-of-line trivia.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            let next_line = match ch {
                '\r' if matches!(chars.peek(), Some(&(_, '\n'))) => {
                    chars.next();
                    i + 2
                }
                '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}' => i + ch.len_utf8(),
                _ => continue,
            };
            line_starts.push(next_line as TextPos);
        }
        Self { line_starts }
    }

    /// The 0-based line containing `pos`.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        let after = self.line_starts.partition_point(|&start| start <= pos);
        after.saturating_sub(1) as u32
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let start = self.line_start(line).unwrap_or(0);
        LineAndColumn {
            line,
            character: pos - start,
        }
    }

    pub fn line_start(&self, line: u32) -> Option<TextPos> {
        self.line_starts.get(line as usize).copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert_eq!(TextSpan::from_bounds(5, 15), span);
        assert!(TextSpan::empty(3).is_empty());
    }

    #[test]
    fn test_contains_span_accepts_missing_token_at_end() {
        let span = TextSpan::new(0, 4);
        assert!(span.contains_span(&TextSpan::empty(4)));
        assert!(span.contains_span(&TextSpan::new(1, 3)));
        assert!(!span.contains_span(&TextSpan::new(3, 2)));
    }

    #[test]
    fn test_union() {
        let joined = TextSpan::new(2, 3).union(&TextSpan::empty(9));
        assert_eq!(joined, TextSpan::new(2, 7));
    }

    #[test]
    fn test_line_map() {
        let map = LineMap::new("class C\n{\n}");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(7), 0);
        assert_eq!(map.line_of(8), 1);
        assert_eq!(map.line_of(10), 2);

        let position = map.line_and_column_of(9);
        assert_eq!(position, LineAndColumn { line: 1, character: 1 });
        assert_eq!(position.to_string(), "(2,2)");
    }

    #[test]
    fn test_line_map_crlf_and_unicode_terminators() {
        let map = LineMap::new("a\r\nb\rc\u{2028}d");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.line_of(4), 1);
        assert_eq!(map.line_start(1), Some(3));
        assert_eq!(map.line_start(2), Some(5));
        assert_eq!(map.line_start(3), Some(9));
        assert_eq!(map.line_start(4), None);
    }
}
