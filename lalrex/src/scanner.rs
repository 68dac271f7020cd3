//! The token source consumed by the parser.

use crate::Span;
use anyhow::Result;

/// External token code that marks end of input. Any code `<= 0` does.
pub const END_OF_INPUT: i32 = 0;

/// A scanned token: external code, semantic value and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V> {
    pub code: i32,
    pub value: V,
    pub span: Span,
}

impl<V> Token<V> {
    pub fn new(code: i32, value: V, span: Span) -> Self {
        Self { code, value, span }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.code <= END_OF_INPUT
    }
}

/// A pull-based token source.
///
/// Once the input is exhausted a scanner keeps returning an end-of-input
/// token. The parser never asks again after consuming one, except while
/// recovering from errors.
pub trait Scanner {
    type Value;

    fn next_token(&mut self) -> Result<Token<Self::Value>>;
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
    type Value = S::Value;

    #[inline]
    fn next_token(&mut self) -> Result<Token<Self::Value>> {
        (**self).next_token()
    }
}

/// Adapts an iterator of tokens into a [`Scanner`].
///
/// After the iterator runs dry every call yields an end-of-input token with
/// a default value and an empty span at the end of the last token.
///
/// ```rust
/// use lalrex::{IterScanner, Scanner, Token, span};
///
/// let mut scanner = IterScanner::new(vec![Token::new(120, 'x', span!(0, 0, 0, 1))]);
/// assert_eq!(scanner.next_token().unwrap().code, 120);
/// let end = scanner.next_token().unwrap();
/// assert!(end.is_end());
/// assert_eq!(end.span, span!(0, 1, 0, 1));
/// assert!(scanner.next_token().unwrap().is_end());
/// ```
#[derive(Debug, Clone)]
pub struct IterScanner<I> {
    tokens: I,
    last: Span,
}

impl<I, V> IterScanner<I>
where
    I: Iterator<Item = Token<V>>,
{
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter(),
            last: Span::default(),
        }
    }
}

impl<I, V> Scanner for IterScanner<I>
where
    I: Iterator<Item = Token<V>>,
    V: Default,
{
    type Value = V;

    fn next_token(&mut self) -> Result<Token<V>> {
        match self.tokens.next() {
            Some(token) => {
                self.last = token.span;
                Ok(token)
            }
            None => {
                let mut span = self.last;
                span.collapse();
                Ok(Token::new(END_OF_INPUT, V::default(), span))
            }
        }
    }
}
