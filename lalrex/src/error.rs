//! Error types surfaced by the engine.
//!
//! [`ParseError`] covers everything that can terminate [`Parser::parse`]
//! with a non-success result. Plain syntax errors are not in here: they are
//! reported through [`ParserDriver::on_error`] and recovered from inside the
//! engine. [`TableError`] is raised while loading or building a table set.
//!
//! [`Parser::parse`]: crate::Parser::parse
//! [`ParserDriver::on_error`]: crate::ParserDriver::on_error

use crate::{RuleID, Span};
use smartstring::alias::String;
use thiserror::Error;

/// A fatal parse outcome.
///
/// The first three variants are the engine's own policy limits. The rest
/// come from the collaborators the engine is parameterized with.
#[derive(Debug, Error)]
pub enum ParseError {
    /// More syntax errors were reported than [`ParserConfig::max_errors`]
    /// allows.
    ///
    /// [`ParserConfig::max_errors`]: crate::ParserConfig::max_errors
    #[error("more than {limit} syntax errors, giving up at {span}")]
    SyntaxErrorLimitExceeded { limit: usize, span: Span },

    /// A push would have taken the stack past [`ParserConfig::max_depth`].
    ///
    /// [`ParserConfig::max_depth`]: crate::ParserConfig::max_depth
    #[error("parser stack exhausted (maximum depth {max_depth}) at {span}")]
    StackExhausted { max_depth: usize, span: Span },

    /// End of input was reached while discarding tokens after a failed
    /// recovery, or no frame on the stack accepts the error token.
    #[error("unexpected end of input at {span}")]
    UnexpectedEndOfInput { span: Span },

    /// The scanner failed to produce a token.
    #[error("scanner error: {0:#}")]
    Scanner(anyhow::Error),

    /// A semantic action returned an error.
    #[error("semantic action for rule {rule} failed: {error:#}")]
    Action { rule: RuleID, error: anyhow::Error },

    /// The tables contradict themselves (e.g. a missing goto).
    #[error("internal parser error: {0}")]
    Internal(String),

    /// The start symbol was accepted without a semantic value.
    #[error("start symbol accepted without a semantic value")]
    MissingValue,
}

impl ParseError {
    /// `true` for the three outcomes produced by the engine's own limits
    /// rather than by a collaborator or a table defect.
    pub fn is_policy_abort(&self) -> bool {
        matches!(
            self,
            ParseError::SyntaxErrorLimitExceeded { .. }
                | ParseError::StackExhausted { .. }
                | ParseError::UnexpectedEndOfInput { .. }
        )
    }
}

/// A defect found while validating or building a table set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table `{name}` has length {len}, expected {expected}")]
    Length {
        name: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("{context}: state {state} out of range (0..{count})")]
    StateOutOfRange {
        context: String,
        state: i64,
        count: usize,
    },

    #[error("{context}: rule {rule} out of range (0..{count})")]
    RuleOutOfRange {
        context: String,
        rule: i64,
        count: usize,
    },

    #[error("{context}: symbol {symbol} out of range")]
    SymbolOutOfRange { context: String, symbol: i64 },

    #[error("conflicting entries for state {state}, symbol `{symbol}`")]
    Conflict { state: u32, symbol: String },

    #[error("{0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn parse_error_is_send_sync_static() {
        _assert_send_sync_static::<ParseError>();
        _assert_send_sync_static::<TableError>();
    }

    #[test]
    fn policy_aborts_are_classified() {
        let e = ParseError::StackExhausted {
            max_depth: 10,
            span: span!(0, 0, 0, 1),
        };
        assert!(e.is_policy_abort());
        assert!(e.to_string().contains("maximum depth 10"));

        let e = ParseError::Scanner(anyhow::anyhow!("bad byte"));
        assert!(!e.is_policy_abort());
        assert!(e.to_string().contains("bad byte"));
    }

    #[test]
    fn action_error_names_rule() {
        let e = ParseError::Action {
            rule: RuleID(7),
            error: anyhow::anyhow!("overflow"),
        };
        let msg = e.to_string();
        assert!(msg.contains("rule 7"));
        assert!(msg.contains("overflow"));
    }
}
