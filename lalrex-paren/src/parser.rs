//! # Paren parser
//!
//! Couples the paren tables with semantic actions that build a [`Tree`].
//!
//! - [`ParenDriver`]: the reduction hooks; it also collects every reported
//!   [`Diagnostic`],
//! - [`ParenParser`]: the [`ParenLexer`] and the engine wired together.
//!
//! A term the parser had to give up on, e.g. an unclosed `(`, comes back
//! as [`Tree::Missing`] inside its parentheses, so `((x)` parses as `(?)`
//! with one diagnostic.

use crate::grammar::{self, ProdID};
use crate::{ParenLexer, Tree};
use anyhow::bail;
use lalrex::{
    Diagnostic, Discard, ParseError, Parser, ParserConfig, ParserDriver, ParserStats, Reduction,
    RuleID, Span, SymbolID, TableError,
};
use smartstring::alias::String;
use thiserror::Error;

/// The payload of tokens and of reduced nonterminals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TokenValue {
    /// Punctuation, unknown bytes and end of input.
    #[default]
    None,
    /// The text of an `ATOM`.
    Atom(String),
    /// A reduced `S`.
    Tree(Tree),
}

#[derive(Debug, Error)]
pub enum ParenError {
    #[error("paren tables: {0}")]
    Tables(#[from] TableError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("parse produced {0:?} instead of a tree")]
    NotATree(TokenValue),
}

/// Semantic actions for the paren grammar.
#[derive(Debug, Default)]
pub struct ParenDriver {
    diagnostics: Vec<Diagnostic>,
}

impl ParenDriver {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl ParserDriver for ParenDriver {
    type Value = TokenValue;

    fn reduce(
        &mut self,
        rule: RuleID,
        rhs: &mut Reduction<'_, TokenValue>,
    ) -> anyhow::Result<Option<TokenValue>> {
        let tree = match ProdID::try_from(rule)? {
            ProdID::Start => bail!("the start rule is never reduced"),
            ProdID::Nest => {
                // S -> ( S )
                let Some(TokenValue::Tree(inner)) = rhs.take(2) else {
                    bail!("nested term without a tree at {}", rhs.span());
                };
                Tree::Nest(Box::new(inner))
            }
            ProdID::Atom => {
                // S -> ATOM
                let Some(TokenValue::Atom(name)) = rhs.take(1) else {
                    bail!("atom without text at {}", rhs.span());
                };
                Tree::Atom(name)
            }
            ProdID::Recover => {
                // S -> ( error
                Tree::Nest(Box::new(Tree::Missing))
            }
        };
        Ok(Some(TokenValue::Tree(tree)))
    }

    fn on_error(&mut self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic.clone());
    }

    fn discard(&mut self, symbol: SymbolID, value: TokenValue, span: Span, reason: Discard) {
        log::debug!("discarding {:?} ({:?}) at {}: {:?}", symbol, value, span, reason);
    }
}

/// Parses one parenthesized term from a byte stream.
///
/// # Example
/// ```rust
/// # use lalrex_paren::ParenParser;
/// let mut parser = ParenParser::try_new("((x)".bytes()).unwrap();
/// let (tree, diagnostics) = parser.parse().unwrap();
/// assert_eq!(tree.to_string(), "(?)");
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(
///     diagnostics[0].to_string(),
///     "0:4-4: syntax error, unexpected $end, expecting ')'"
/// );
/// ```
pub struct ParenParser<I>
where
    I: Iterator<Item = u8>,
{
    parser: Parser<'static, ParenLexer<I>, ParenDriver>,
}

impl<I> ParenParser<I>
where
    I: Iterator<Item = u8>,
{
    pub fn try_new(input: I) -> Result<Self, ParenError> {
        let tables = grammar::tables()?;
        Ok(Self {
            parser: Parser::new(tables, ParenLexer::new(input), ParenDriver::default()),
        })
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.parser = self.parser.with_config(config);
        self
    }

    /// Parses the input and returns the tree with the diagnostics reported
    /// on the way. Recovered errors leave [`Tree::Missing`] holes.
    pub fn parse(&mut self) -> Result<(Tree, Vec<Diagnostic>), ParenError> {
        self.parser.driver_mut().take_diagnostics();
        let value = self.parser.parse()?;
        let diagnostics = self.parser.driver_mut().take_diagnostics();
        match value {
            TokenValue::Tree(tree) => Ok((tree, diagnostics)),
            other => Err(ParenError::NotATree(other)),
        }
    }

    /// Diagnostics of a parse that failed.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.parser.driver().diagnostics()
    }

    pub fn stats(&self) -> ParserStats {
        self.parser.stats()
    }
}
