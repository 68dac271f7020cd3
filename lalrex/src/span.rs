//! Source locations carried alongside every stack frame.
//!
//! The engine never interprets positions; it only combines them when a rule
//! is reduced (see [`Span::join`] and [`Span::empty_at`]) and hands them back
//! to the caller in diagnostics.

/// A 0-based line/column position.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    /// Counted in whatever unit the scanner uses; the engine only copies it.
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The half-open range `[start, end)` a token or reduced symbol covers.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The location of an empty rule: zero width at `pos`.
    #[inline]
    pub const fn empty_at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// The span of a reduced right-hand side: from the start of `self`
    /// (the leftmost symbol) to the end of `last` (the rightmost one).
    #[inline]
    pub const fn join(&self, last: &Span) -> Span {
        Span {
            start: self.start,
            end: last.end,
        }
    }

    /// Moves the start up to the end, leaving an empty span where `self`
    /// ended. Used for the location of end of input.
    pub fn collapse(&mut self) {
        self.start = self.end;
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Build a `Span` inline from 0-based line/column coordinates.
///
/// # Examples
///
/// ```rust
/// # use lalrex::span;
/// let s = span!(0, 0, 1, 4);
/// assert_eq!(s.end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        $crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(sl: usize, sc: usize, el: usize, ec: usize) -> Span {
        Span::new(Position::new(sl, sc), Position::new(el, ec))
    }

    #[test]
    fn join_keeps_operand_order() {
        let first = sp(0, 4, 0, 5);
        let last = sp(2, 0, 2, 3);
        assert_eq!(first.join(&last), sp(0, 4, 2, 3));
    }

    #[test]
    fn empty_at_is_zero_width() {
        let s = Span::empty_at(Position::new(3, 7));
        assert_eq!(s.start, s.end);
        assert_eq!(s, sp(3, 7, 3, 7));
    }

    #[test]
    fn collapse_moves_start_to_end() {
        let mut s = sp(0, 1, 0, 6);
        s.collapse();
        assert_eq!(s, sp(0, 6, 0, 6));
    }

    #[test]
    fn display_formats() {
        assert_eq!(sp(1, 2, 1, 10).to_string(), "1:2-10");
        assert_eq!(sp(1, 2, 4, 0).to_string(), "1:2-4:0");
    }

    #[test]
    fn macro_builds_span() {
        assert_eq!(crate::span!(0, 1, 0, 2), sp(0, 1, 0, 2));
    }
}
