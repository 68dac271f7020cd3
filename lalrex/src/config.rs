//! Parser limits and reporting knobs.

/// Policy settings for one [`Parser`](crate::Parser).
///
/// The defaults match the classic yacc skeleton: a 200-frame initial stack
/// that may grow to 10 000 frames, and at most 50 reported syntax errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Initial stack capacity in frames.
    pub initial_depth: usize,
    /// Maximum stack depth in frames, sentinel included.
    pub max_depth: usize,
    /// Syntax errors allowed before the parse is abandoned.
    pub max_errors: usize,
    /// Render expected tokens in diagnostics.
    pub verbose_errors: bool,
    /// More expected tokens than this are not listed.
    pub max_expected: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            initial_depth: 200,
            max_depth: 10_000,
            max_errors: 50,
            verbose_errors: true,
            max_expected: 4,
        }
    }
}

impl ParserConfig {
    pub fn with_initial_depth(mut self, depth: usize) -> Self {
        self.initial_depth = depth;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_errors(mut self, errors: usize) -> Self {
        self.max_errors = errors;
        self
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn with_max_expected(mut self, count: usize) -> Self {
        self.max_expected = count;
        self
    }
}
