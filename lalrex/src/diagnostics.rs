//! Syntax error descriptions.
//!
//! A [`Diagnostic`] is built once per fresh syntax error, from the state
//! the parser faulted in and the offending lookahead. Building one never
//! touches parser state.

use crate::{ParseTables, Span, StateID, SymbolID};
use smartstring::alias::String;
use std::fmt;

/// A reported syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Rendered message, e.g. `syntax error, unexpected ')', expecting 'x'`.
    pub message: String,
    /// Location of the offending lookahead.
    pub span: Span,
    /// The state the parser faulted in.
    pub state: StateID,
    /// The offending lookahead, if one had been read.
    pub unexpected: Option<SymbolID>,
    /// Every token with an explicit action in `state`, error token excluded.
    pub expected: Vec<SymbolID>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}

/// Builds the diagnostic for a fault in `state` on `unexpected`.
///
/// With `verbose` off, or without a lookahead, the message is just
/// `syntax error`. Otherwise the unexpected token is named, followed by the
/// expected ones unless there are none or more than `max_expected`.
pub fn describe(
    tables: &ParseTables,
    state: StateID,
    unexpected: Option<SymbolID>,
    span: Span,
    verbose: bool,
    max_expected: usize,
) -> Diagnostic {
    let expected = match unexpected {
        Some(_) if verbose => tables.expected_tokens(state),
        _ => Vec::new(),
    };
    let mut message = String::from("syntax error");
    if let (true, Some(token)) = (verbose, unexpected) {
        message.push_str(", unexpected ");
        message.push_str(&tnamerr(tables.symbol_name(token)));
        if !expected.is_empty() && expected.len() <= max_expected {
            for (i, symbol) in expected.iter().enumerate() {
                message.push_str(if i == 0 { ", expecting " } else { " or " });
                message.push_str(&tnamerr(tables.symbol_name(*symbol)));
            }
        }
    }
    Diagnostic {
        message,
        span,
        state,
        unexpected,
        expected,
    }
}

/// Strips the double quotes yacc puts around string-literal token names.
///
/// `"\"end of file\""` becomes `end of file`. Names containing an
/// apostrophe, a comma or a backslash other than `\\` are returned as is,
/// as are names without a closing quote.
pub fn tnamerr(name: &str) -> String {
    let Some(inner) = name.strip_prefix('"') else {
        return name.into();
    };
    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' | ',' => return name.into(),
            '\\' => match chars.next() {
                Some('\\') => out.push('\\'),
                _ => return name.into(),
            },
            '"' => return out,
            c => out.push(c),
        }
    }
    name.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;
    use crate::test_grammar_data::{list_grammar, paren_grammar};

    #[test]
    fn tnamerr_unquotes_plain_strings() {
        assert_eq!(tnamerr("\"end of file\""), "end of file");
        assert_eq!(tnamerr("\"a\\\\b\""), "a\\b");
        assert_eq!(tnamerr("IDENT"), "IDENT");
        assert_eq!(tnamerr("'('"), "'('");
    }

    #[test]
    fn tnamerr_keeps_awkward_names() {
        assert_eq!(tnamerr("\"it's\""), "\"it's\"");
        assert_eq!(tnamerr("\"a,b\""), "\"a,b\"");
        assert_eq!(tnamerr("\"a\\nb\""), "\"a\\nb\"");
        assert_eq!(tnamerr("\"open"), "\"open");
    }

    #[test]
    fn lists_expected_tokens() {
        let g = list_grammar();
        let d = describe(
            &g.tables,
            StateID(1),
            Some(g.semi),
            span!(0, 0, 0, 1),
            true,
            4,
        );
        assert_eq!(
            d.message,
            "syntax error, unexpected ';', expecting $end or 'x'"
        );
        assert_eq!(d.expected, vec![SymbolID::END, g.x]);
        assert_eq!(d.unexpected, Some(g.semi));
        assert_eq!(d.to_string(), "0:0-1: syntax error, unexpected ';', expecting $end or 'x'");
    }

    #[test]
    fn too_many_alternatives_are_omitted() {
        let g = list_grammar();
        let d = describe(&g.tables, StateID(1), Some(g.semi), Span::default(), true, 1);
        assert_eq!(d.message, "syntax error, unexpected ';'");
        assert_eq!(d.expected.len(), 2);
    }

    #[test]
    fn default_only_state_expects_nothing() {
        let g = paren_grammar();
        let d = describe(&g.tables, StateID(2), Some(g.x), Span::default(), true, 4);
        assert_eq!(d.message, "syntax error, unexpected 'x'");
    }

    #[test]
    fn terse_and_lookahead_free_forms() {
        let g = paren_grammar();
        let d = describe(&g.tables, StateID(5), Some(g.x), Span::default(), false, 4);
        assert_eq!(d.message, "syntax error");
        assert!(d.expected.is_empty());
        let d = describe(&g.tables, StateID(5), None, Span::default(), true, 4);
        assert_eq!(d.message, "syntax error");
    }

    #[test]
    fn unknown_tokens_are_named() {
        let g = paren_grammar();
        let d = describe(
            &g.tables,
            StateID(5),
            Some(SymbolID::UNDEFINED),
            Span::default(),
            true,
            4,
        );
        assert_eq!(d.message, "syntax error, unexpected $undefined, expecting ')'");
    }
}
