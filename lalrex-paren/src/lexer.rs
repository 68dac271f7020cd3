//! # Byte lexer
//!
//! Turns a stream of bytes into [`Token`]s for the paren grammar:
//!
//! - `(` and `)` are returned with their character codes,
//! - `[A-Za-z_][A-Za-z0-9_]*` is an [`ATOM`] carrying its text,
//! - blanks are skipped, and `\n` starts a new line,
//! - any other byte is returned as a token of its own code, which the
//!   tables translate to `$undefined`.
//!
//! Positions are 0-based; columns count bytes.

use crate::grammar::{ATOM, LPAREN, RPAREN};
use crate::parser::TokenValue;
use lalrex::{END_OF_INPUT, Position, Scanner, Span, Token};
use smartstring::alias::String;
use std::iter::Peekable;

/// Scanner over the bytes of an input source.
///
/// # Example
/// ```rust
/// # use lalrex::{Scanner, span};
/// # use lalrex_paren::{ParenLexer, TokenValue, grammar::ATOM};
/// let mut lexer = ParenLexer::new("(ab)".bytes());
/// assert_eq!(lexer.next_token().unwrap().code, '(' as i32);
/// let atom = lexer.next_token().unwrap();
/// assert_eq!(atom.code, ATOM);
/// assert_eq!(atom.span, span!(0, 1, 0, 3));
/// assert!(matches!(atom.value, TokenValue::Atom(ref s) if s == "ab"));
/// ```
pub struct ParenLexer<I>
where
    I: Iterator<Item = u8>,
{
    input: Peekable<I>,
    pos: Position,
    tokens: usize,
}

impl<I> ParenLexer<I>
where
    I: Iterator<Item = u8>,
{
    pub fn new(input: I) -> Self {
        Self {
            input: input.peekable(),
            pos: Position::default(),
            tokens: 0,
        }
    }

    /// Tokens returned so far, end of input included.
    pub fn tokens(&self) -> usize {
        self.tokens
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.input.next()?;
        if b == b'\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
        Some(b)
    }

    fn skip_blanks(&mut self) {
        while let Some(b) = self.input.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn atom(&mut self, first: u8) -> String {
        let mut text = String::new();
        text.push(first as char);
        while let Some(&b) = self.input.peek() {
            if !is_ident_continue(b) {
                break;
            }
            text.push(b as char);
            self.bump();
        }
        text
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<I> Scanner for ParenLexer<I>
where
    I: Iterator<Item = u8>,
{
    type Value = TokenValue;

    fn next_token(&mut self) -> anyhow::Result<Token<TokenValue>> {
        self.skip_blanks();
        let start = self.pos;
        self.tokens += 1;
        let Some(b) = self.bump() else {
            return Ok(Token::new(END_OF_INPUT, TokenValue::None, Span::empty_at(start)));
        };
        let (code, value) = match b {
            b'(' => (LPAREN, TokenValue::None),
            b')' => (RPAREN, TokenValue::None),
            b if is_ident_start(b) => (ATOM, TokenValue::Atom(self.atom(b))),
            b => (b as i32, TokenValue::None),
        };
        let token = Token::new(code, value, Span::new(start, self.pos));
        log::trace!("token {} at {}", token.code, token.span);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lalrex::span;

    fn lex(text: &str) -> Vec<Token<TokenValue>> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut lexer = ParenLexer::new(text.bytes());
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let end = token.is_end();
            out.push(token);
            if end {
                break;
            }
        }
        out
    }

    #[test]
    fn punctuation_and_atoms() {
        let toks = lex("( foo_1 )");
        let codes: Vec<i32> = toks.iter().map(|t| t.code).collect();
        assert_eq!(codes, vec![LPAREN, ATOM, RPAREN, END_OF_INPUT]);
        assert_eq!(toks[1].span, span!(0, 2, 0, 7));
        assert!(matches!(toks[1].value, TokenValue::Atom(ref s) if s == "foo_1"));
        assert_eq!(toks[3].span, span!(0, 9, 0, 9));
    }

    #[test]
    fn newlines_advance_the_line() {
        let toks = lex("(\n  x\n)");
        assert_eq!(toks[1].span, span!(1, 2, 1, 3));
        assert_eq!(toks[2].span, span!(2, 0, 2, 1));
    }

    #[test]
    fn unknown_bytes_pass_through() {
        let toks = lex("(#)");
        assert_eq!(toks[1].code, '#' as i32);
        assert!(matches!(toks[1].value, TokenValue::None));
    }

    #[test]
    fn end_of_input_repeats() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut lexer = ParenLexer::new("".bytes());
        assert!(lexer.next_token().unwrap().is_end());
        assert!(lexer.next_token().unwrap().is_end());
        assert_eq!(lexer.tokens(), 2);
    }

    #[test]
    fn digits_do_not_start_an_atom() {
        let toks = lex("1a");
        assert_eq!(toks[0].code, '1' as i32);
        assert_eq!(toks[1].code, ATOM);
    }
}
