//! # lalrex-paren
//!
//! A small demonstration crate built on **lalrex**: a byte lexer, a hand-
//! described LALR(1) automaton and semantic actions for nested
//! parenthesized atoms,
//!
//! ```text
//! S : '(' S ')' | ATOM | '(' error ;
//! ```
//!
//! The `'(' error` rule lets an unfinished term come back as a
//! [`Tree::Missing`] hole instead of failing the whole parse.
//!
//! ## Example
//!
//! ```rust
//! use lalrex_paren::{ParenParser, Tree};
//!
//! let mut parser = ParenParser::try_new("((answer))".bytes()).unwrap();
//! let (tree, diagnostics) = parser.parse().unwrap();
//! assert_eq!(tree.to_string(), "((answer))");
//! assert!(diagnostics.is_empty());
//! assert!(!tree.is_partial());
//! ```
//!
//! ## Modules
//!
//! - [`lexer`]: tokenization of raw bytes
//! - [`grammar`]: the packed tables and rule identifiers
//! - [`parser`]: semantic actions and the parser front end
//! - [`tree`]: the parse result
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use lexer::ParenLexer;
pub use parser::{ParenDriver, ParenError, ParenParser, TokenValue};
pub use tree::Tree;
