//! # lalrex
//!
//! A deterministic, table-driven LALR(1) parsing engine.
//!
//! Given packed parse tables ([`ParseTables`]) and a token source
//! ([`Scanner`]), a [`Parser`] shifts tokens and reduces right-hand sides,
//! calling a [`ParserDriver`] for every reduction, until the start symbol is
//! accepted. Syntax errors are reported through the driver and recovered
//! from with yacc's `error` token discipline.
//!
//! ## Overview
//!
//! - [`tables`]: the packed two-level action/goto tables, their raw
//!   generator-style form and validation.
//! - [`builder`]: [`TableBuilder`], which packs an explicitly described
//!   automaton into [`ParseTables`].
//! - [`stack`]: the bounded parse stack of `(state, value, span)` frames.
//! - [`parser`]: the shift/reduce loop, error recovery and the
//!   [`ParserDriver`] callback seam.
//! - [`diagnostics`]: rendering of syntax error messages.
//! - [`scanner`]: the [`Scanner`] trait and an iterator adapter.
//!
//! ## Example
//!
//! ```rust
//! use lalrex::{IterScanner, Parser, ParserDriver, Reduction, RuleID, SymbolID, TableBuilder, Token, span};
//!
//! // S → ( S ) | x | ( error
//! let mut b = TableBuilder::new();
//! let lp = b.terminal("'('", '(' as i32).unwrap();
//! let rp = b.terminal("')'", ')' as i32).unwrap();
//! let x = b.terminal("'x'", 'x' as i32).unwrap();
//! let s = b.nonterminal("S").unwrap();
//! let nest = b.rule(s, &[lp, s, rp]);
//! let atom = b.rule(s, &[x]);
//! let recover = b.rule(s, &[lp, SymbolID::ERROR]);
//! b.shift(0, lp, 1).shift(0, x, 2).goto(0, s, 3)
//!     .shift(1, lp, 1).shift(1, x, 2).shift(1, SymbolID::ERROR, 4).goto(1, s, 5)
//!     .default_reduce(2, atom)
//!     .shift(3, SymbolID::END, 6)
//!     .default_reduce(4, recover)
//!     .shift(5, rp, 7)
//!     .default_reduce(7, nest)
//!     .final_state(6);
//! let tables = b.build().unwrap();
//!
//! struct Depth;
//! impl ParserDriver for Depth {
//!     type Value = u32;
//!     fn reduce(&mut self, rule: RuleID, rhs: &mut Reduction<'_, u32>) -> anyhow::Result<Option<u32>> {
//!         Ok(Some(match rhs.len() {
//!             3 => rhs.take(2).unwrap_or(0) + 1,
//!             _ => 0,
//!         }))
//!     }
//! }
//!
//! let input = "((x)";
//! let tokens = input
//!     .bytes()
//!     .enumerate()
//!     .map(|(i, c)| Token::new(c as i32, 0, span!(0, i, 0, i + 1)));
//! let mut parser = Parser::new(&tables, IterScanner::new(tokens), Depth);
//! assert_eq!(parser.parse().unwrap(), 0);
//! assert_eq!(parser.stats().syntax_errors, 1);
//! assert_eq!(
//!     parser.last_diagnostic().unwrap().message,
//!     "syntax error, unexpected $end, expecting ')'"
//! );
//! ```
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod span;
pub mod stack;
pub mod tables;

#[cfg(test)]
mod test_grammar_data;

pub use builder::{ERROR_CODE, MAX_TOKEN_CODE, TableBuilder};
pub use config::ParserConfig;
pub use diagnostics::Diagnostic;
pub use error::{ParseError, TableError};
pub use parser::{Discard, Parser, ParserDriver, ParserStats, Reduction};
pub use scanner::{END_OF_INPUT, IterScanner, Scanner, Token};
pub use span::{Position, Span};
pub use stack::{ParseStack, StackExhausted, StackFrame};
pub use tables::{ParseTables, ParserAction, RawTables, Rule, RuleID, StateID, SymbolID};
