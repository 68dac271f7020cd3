//! # Shift/reduce driver
//!
//! [`Parser`] runs the LALR(1) automaton described by a [`ParseTables`]
//! over the tokens of a [`Scanner`], calling back into a [`ParserDriver`]
//! for every reduction.
//!
//! ## Error recovery
//!
//! Recovery follows the yacc error-token discipline:
//!
//! - a fault with no recovery in progress is reported once through
//!   [`ParserDriver::on_error`]; more than [`ParserConfig::max_errors`]
//!   reports abort the parse;
//! - the stack is unwound until a state that can shift `error` is on top,
//!   and a synthetic error frame is pushed;
//! - for the next three shifts further faults are not reported, and a fault
//!   straight after a recovery discards the offending lookahead instead
//!   (end of input cannot be discarded and aborts).
//!
//! Every value the engine drops without handing it to a reduction goes to
//! [`ParserDriver::discard`].

use crate::diagnostics::{self, Diagnostic};
use crate::{
    ParseError, ParseStack, ParseTables, ParserAction, ParserConfig, RuleID, Scanner, Span,
    StateID, SymbolID,
};
use smartstring::alias::String;

/// Shifts remaining before syntax errors are reported again.
const ERROR_COOLDOWN: u8 = 3;

/// Why a value was dropped by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// Popped while unwinding to a state that can shift `error`.
    Unwinding,
    /// The lookahead was skipped because it faulted right after a recovery.
    Lookahead,
    /// The lookahead was dropped by [`Reduction::clearin`].
    ClearIn,
    /// Still held by the parser when the parse ended.
    Cleanup,
}

/// Semantic hooks for one grammar.
///
/// Only [`reduce`](Self::reduce) is required. The default
/// [`on_error`](Self::on_error) logs the diagnostic and the default
/// [`discard`](Self::discard) simply drops the value.
pub trait ParserDriver {
    type Value;

    /// Runs the semantic action of `rule`.
    ///
    /// Returning `Ok(None)` leaves the result unset: the rule then yields
    /// its first right-hand side value, if it has one. An `Err` aborts the
    /// parse with [`ParseError::Action`].
    fn reduce(
        &mut self,
        rule: RuleID,
        rhs: &mut Reduction<'_, Self::Value>,
    ) -> anyhow::Result<Option<Self::Value>>;

    /// Receives each reported syntax error.
    fn on_error(&mut self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
    }

    /// Receives every value the parser drops on its own.
    fn discard(&mut self, symbol: SymbolID, value: Self::Value, span: Span, reason: Discard) {
        let _ = (symbol, value, span, reason);
    }
}

/// The right-hand side of a rule being reduced.
///
/// Slots are numbered from 1, like `$1 .. $n` in a yacc grammar.
pub struct Reduction<'a, V> {
    rule: RuleID,
    values: &'a mut [Option<V>],
    spans: &'a [Span],
    span: Span,
    errok: bool,
    clearin: bool,
    raise_error: bool,
}

impl<'a, V> Reduction<'a, V> {
    pub fn rule(&self) -> RuleID {
        self.rule
    }

    /// Number of right-hand side symbols.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Moves the value of slot `slot` out. Error tokens have no value.
    pub fn take(&mut self, slot: usize) -> Option<V> {
        let i = slot.checked_sub(1)?;
        self.values.get_mut(i)?.take()
    }

    pub fn get(&self, slot: usize) -> Option<&V> {
        let i = slot.checked_sub(1)?;
        self.values.get(i)?.as_ref()
    }

    pub fn span_of(&self, slot: usize) -> Option<Span> {
        let i = slot.checked_sub(1)?;
        self.spans.get(i).copied()
    }

    /// The span the result will carry: first slot start to last slot end,
    /// or an empty span after the previous frame for an empty rule.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    /// Ends an error recovery early, so the next fault is reported.
    pub fn errok(&mut self) {
        self.errok = true;
    }

    /// Drops the current lookahead, if any; a fresh one is read when needed.
    pub fn clearin(&mut self) {
        self.clearin = true;
    }

    /// Treats this reduction as a syntax error: its result is dropped and
    /// recovery starts right away, without a diagnostic.
    pub fn raise_error(&mut self) {
        self.raise_error = true;
    }
}

/// Counters for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Tokens read from the scanner, end of input included.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    /// Syntax errors reported through the driver.
    pub syntax_errors: usize,
    /// Lookaheads skipped during recovery.
    pub discarded: usize,
    /// Frames popped during recovery.
    pub popped: usize,
    /// Deepest stack seen, sentinel included.
    pub max_depth: usize,
}

struct Lookahead<V> {
    symbol: SymbolID,
    value: V,
    span: Span,
}

/// Mutable state of a single parse.
struct ParserSession<V> {
    stack: ParseStack<V>,
    lookahead: Option<Lookahead<V>>,
    /// Location of the most recently read token.
    last_span: Span,
    /// Shifts left before errors are reported again.
    error_status: u8,
    error_count: usize,
    /// Start of the region covered by the next error frame.
    error_start: Span,
    values: Vec<Option<V>>,
    spans: Vec<Span>,
}

impl<V> ParserSession<V> {
    fn new(config: &ParserConfig) -> Self {
        Self {
            stack: ParseStack::new(config.initial_depth, config.max_depth, Span::default()),
            lookahead: None,
            last_span: Span::default(),
            error_status: 0,
            error_count: 0,
            error_start: Span::default(),
            values: Vec::new(),
            spans: Vec::new(),
        }
    }

    fn lookahead_span(&self) -> Span {
        self.lookahead
            .as_ref()
            .map_or(self.last_span, |la| la.span)
    }
}

/// A table-driven LALR(1) parser.
///
/// Couples borrowed [`ParseTables`] with a [`Scanner`] and a
/// [`ParserDriver`]. Each call to [`parse`](Self::parse) starts from a
/// fresh stack and reads tokens until the input is accepted or the parse is
/// abandoned.
///
/// # Example
///
/// ```rust
/// use lalrex::{
///     IterScanner, Parser, ParserDriver, Reduction, RuleID, SymbolID, TableBuilder, Token, span,
/// };
///
/// // S → S '+' 'n' | 'n'
/// let mut b = TableBuilder::new();
/// let plus = b.terminal("'+'", '+' as i32).unwrap();
/// let n = b.terminal("'n'", 'n' as i32).unwrap();
/// let s = b.nonterminal("S").unwrap();
/// let add = b.rule(s, &[s, plus, n]);
/// let one = b.rule(s, &[n]);
/// b.shift(0, n, 1)
///     .goto(0, s, 2)
///     .default_reduce(1, one)
///     .shift(2, SymbolID::END, 3)
///     .shift(2, plus, 4)
///     .shift(4, n, 5)
///     .default_reduce(5, add)
///     .final_state(3);
/// let tables = b.build().unwrap();
///
/// struct Sum;
/// impl ParserDriver for Sum {
///     type Value = i64;
///     fn reduce(&mut self, _rule: RuleID, rhs: &mut Reduction<'_, i64>) -> anyhow::Result<Option<i64>> {
///         Ok(match rhs.len() {
///             3 => Some(rhs.take(1).unwrap_or(0) + rhs.take(3).unwrap_or(0)),
///             _ => None,
///         })
///     }
/// }
///
/// let tokens = [(b'n', 4), (b'+', 0), (b'n', 5)]
///     .into_iter()
///     .enumerate()
///     .map(|(i, (c, v))| Token::new(c as i32, v, span!(0, i, 0, i + 1)));
/// let mut parser = Parser::new(&tables, IterScanner::new(tokens), Sum);
/// assert_eq!(parser.parse().unwrap(), 9);
/// assert_eq!(parser.stats().syntax_errors, 0);
/// ```
pub struct Parser<'t, S, D> {
    tables: &'t ParseTables,
    scanner: S,
    driver: D,
    config: ParserConfig,
    stats: ParserStats,
    last_diagnostic: Option<Diagnostic>,
}

impl<'t, S, D> Parser<'t, S, D>
where
    S: Scanner,
    D: ParserDriver<Value = S::Value>,
{
    pub fn new(tables: &'t ParseTables, scanner: S, driver: D) -> Self {
        Self {
            tables,
            scanner,
            driver,
            config: ParserConfig::default(),
            stats: ParserStats::default(),
            last_diagnostic: None,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn tables(&self) -> &'t ParseTables {
        self.tables
    }

    /// Counters of the most recent parse.
    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    /// The last diagnostic reported during the most recent parse.
    pub fn last_diagnostic(&self) -> Option<&Diagnostic> {
        self.last_diagnostic.as_ref()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    pub fn into_parts(self) -> (S, D) {
        (self.scanner, self.driver)
    }

    /// Parses one start symbol and returns its semantic value.
    ///
    /// Syntax errors the grammar recovers from do not make this fail; check
    /// [`stats`](Self::stats)`().syntax_errors` to tell a clean parse from
    /// a recovered one.
    pub fn parse(&mut self) -> Result<S::Value, ParseError> {
        self.stats = ParserStats {
            max_depth: 1,
            ..ParserStats::default()
        };
        self.last_diagnostic = None;
        let mut session = ParserSession::new(&self.config);
        log::trace!("Starting parse");
        let outcome = self.run(&mut session);
        match &outcome {
            Ok(_) => log::debug!(
                "Parse accepted with {} syntax error(s)",
                self.stats.syntax_errors
            ),
            Err(e) => log::debug!("Parse aborted: {}", e),
        }
        self.cleanup(&mut session);
        outcome
    }

    fn run(&mut self, s: &mut ParserSession<S::Value>) -> Result<S::Value, ParseError> {
        let tables = self.tables;
        loop {
            let state = s.stack.top_state();
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("Entering state {}", state);
                self.dump_state(s);
            }
            if state == tables.final_state() {
                return self.accept(s);
            }
            let action = match tables.base(state) {
                None => tables.default_action(state),
                Some(base) => {
                    let token = self.lookahead(s)?;
                    tables
                        .checked_action(base, token)
                        .unwrap_or_else(|| tables.default_action(state))
                }
            };
            match action {
                ParserAction::Shift(next) => {
                    if self.shift(s, next)? {
                        return self.accept(s);
                    }
                }
                ParserAction::Reduce(rule) => self.reduce(s, rule)?,
                ParserAction::Accept => return self.accept(s),
                ParserAction::Error => self.syntax_error(s)?,
            }
        }
    }

    /// Reads a token unless one is already buffered.
    fn lookahead(&mut self, s: &mut ParserSession<S::Value>) -> Result<SymbolID, ParseError> {
        if let Some(la) = &s.lookahead {
            return Ok(la.symbol);
        }
        log::trace!("Reading a token");
        let token = self.scanner.next_token().map_err(ParseError::Scanner)?;
        let symbol = self.tables.translate(token.code);
        self.stats.tokens += 1;
        log::trace!(
            "Next token is {} ({}) at {}",
            self.tables.symbol_name(symbol),
            token.code,
            token.span
        );
        s.last_span = token.span;
        s.lookahead = Some(Lookahead {
            symbol,
            value: token.value,
            span: token.span,
        });
        Ok(symbol)
    }

    /// Shifts the lookahead. Returns `true` when `next` is the final state,
    /// in which case nothing is pushed.
    fn shift(&mut self, s: &mut ParserSession<S::Value>, next: StateID) -> Result<bool, ParseError> {
        let Some(Lookahead {
            symbol,
            value,
            span,
        }) = s.lookahead.take()
        else {
            return Err(ParseError::Internal("shift without a lookahead".into()));
        };
        log::trace!(
            "Shifting {} to state {}",
            self.tables.symbol_name(symbol),
            next
        );
        s.error_status = s.error_status.saturating_sub(1);
        self.stats.shifts += 1;
        if next == self.tables.final_state() {
            self.discard(symbol, value, span, Discard::Cleanup);
            return Ok(true);
        }
        self.push(s, next, Some(value), span)?;
        Ok(false)
    }

    fn reduce(&mut self, s: &mut ParserSession<S::Value>, rule: RuleID) -> Result<(), ParseError> {
        let tables = self.tables;
        let Some(meta) = tables.rule(rule) else {
            return Err(ParseError::Internal(format!("unknown rule {}", rule).into()));
        };
        let arity = meta.arity;
        if arity >= s.stack.depth() {
            return Err(ParseError::Internal(
                format!(
                    "rule {} needs {} frames, stack holds {}",
                    rule,
                    arity,
                    s.stack.depth() - 1
                )
                .into(),
            ));
        }
        log::trace!(
            "Reducing stack by rule {} (line {}) to {}",
            rule,
            meta.line,
            tables.symbol_name(meta.lhs)
        );

        let top = s.stack.top().span;
        let span = match s.stack.peek(arity.wrapping_sub(1)) {
            Some(first) if arity > 0 => first.span.join(&top),
            _ => Span::empty_at(top.end),
        };
        s.values.clear();
        s.spans.clear();
        for frame in s.stack.pop(arity) {
            s.values.push(frame.value);
            s.spans.push(frame.span);
        }

        let mut rhs = Reduction {
            rule,
            values: &mut s.values,
            spans: &s.spans,
            span,
            errok: false,
            clearin: false,
            raise_error: false,
        };
        let result = self
            .driver
            .reduce(rule, &mut rhs)
            .map_err(|error| ParseError::Action { rule, error })?;
        let Reduction {
            span,
            errok,
            clearin,
            raise_error,
            ..
        } = rhs;
        let value = match result {
            Some(value) => Some(value),
            None => s.values.first_mut().and_then(Option::take),
        };
        s.values.clear();
        self.stats.reductions += 1;

        if errok {
            log::debug!("Recovery ended by rule {}", rule);
            s.error_status = 0;
        }
        if clearin {
            if let Some(la) = s.lookahead.take() {
                self.discard(la.symbol, la.value, la.span, Discard::ClearIn);
            }
        }
        if raise_error {
            log::debug!("Rule {} raised a syntax error", rule);
            if let Some(value) = value {
                self.discard(meta.lhs, value, span, Discard::Unwinding);
            }
            s.error_start = span;
            return self.recover(s);
        }

        let from = s.stack.top_state();
        let Some(next) = tables.goto(from, meta.lhs) else {
            return Err(ParseError::Internal(
                format!(
                    "no goto from state {} on {}",
                    from,
                    tables.symbol_name(meta.lhs)
                )
                .into(),
            ));
        };
        log::trace!("Goto state {}", next);
        self.push(s, next, value, span)
    }

    fn syntax_error(&mut self, s: &mut ParserSession<S::Value>) -> Result<(), ParseError> {
        let state = s.stack.top_state();
        if s.error_status == 0 {
            s.error_count += 1;
            self.stats.syntax_errors += 1;
            let diagnostic = diagnostics::describe(
                self.tables,
                state,
                s.lookahead.as_ref().map(|la| la.symbol),
                s.lookahead_span(),
                self.config.verbose_errors,
                self.config.max_expected,
            );
            log::debug!(
                "Syntax error #{} in state {}: {}",
                s.error_count,
                state,
                diagnostic.message
            );
            self.driver.on_error(&diagnostic);
            self.last_diagnostic = Some(diagnostic);
            if s.error_count > self.config.max_errors {
                return Err(ParseError::SyntaxErrorLimitExceeded {
                    limit: self.config.max_errors,
                    span: s.lookahead_span(),
                });
            }
        }
        s.error_start = s.last_span;

        if s.error_status == ERROR_COOLDOWN {
            // a state with no actions right after an error shift would
            // otherwise fault forever without consuming input
            self.lookahead(s)?;
            if let Some(la) = s.lookahead.take() {
                if la.symbol == SymbolID::END {
                    let span = la.span;
                    s.lookahead = Some(la);
                    return Err(ParseError::UnexpectedEndOfInput { span });
                }
                log::debug!(
                    "Error: discarding {} at {}",
                    self.tables.symbol_name(la.symbol),
                    la.span
                );
                self.stats.discarded += 1;
                self.discard(la.symbol, la.value, la.span, Discard::Lookahead);
            }
        }
        self.recover(s)
    }

    /// Unwinds to a state that shifts `error` and pushes the error frame.
    fn recover(&mut self, s: &mut ParserSession<S::Value>) -> Result<(), ParseError> {
        let tables = self.tables;
        s.error_status = ERROR_COOLDOWN;
        let target = loop {
            let state = s.stack.top_state();
            if let Some(target) = tables.error_shift(state) {
                break target;
            }
            let Some(frame) = s.stack.pop_frame() else {
                log::debug!("Error: no state on the stack shifts the error token");
                return Err(ParseError::UnexpectedEndOfInput {
                    span: s.lookahead_span(),
                });
            };
            self.stats.popped += 1;
            s.error_start = frame.span;
            let symbol = tables.accessing_symbol(frame.state);
            log::trace!(
                "Error: popping {} in state {}",
                tables.symbol_name(symbol),
                frame.state
            );
            if let Some(value) = frame.value {
                self.discard(symbol, value, frame.span, Discard::Unwinding);
            }
        };
        let span = s.error_start.join(&s.last_span);
        log::trace!("Shifting error to state {}", target);
        self.push(s, target, None, span)
    }

    fn accept(&mut self, s: &mut ParserSession<S::Value>) -> Result<S::Value, ParseError> {
        log::trace!("Accept");
        s.stack
            .pop_frame()
            .and_then(|frame| frame.value)
            .ok_or(ParseError::MissingValue)
    }

    fn push(
        &mut self,
        s: &mut ParserSession<S::Value>,
        state: StateID,
        value: Option<S::Value>,
        span: Span,
    ) -> Result<(), ParseError> {
        if let Err(e) = s.stack.grow_if_needed() {
            log::debug!("Stack exhausted at depth {}", s.stack.depth());
            if let Some(value) = value {
                let symbol = self.tables.accessing_symbol(state);
                self.discard(symbol, value, span, Discard::Cleanup);
            }
            return Err(ParseError::StackExhausted {
                max_depth: e.max_depth,
                span,
            });
        }
        s.stack
            .push(state, value, span)
            .map_err(|e| ParseError::StackExhausted {
                max_depth: e.max_depth,
                span,
            })?;
        self.stats.max_depth = self.stats.max_depth.max(s.stack.depth());
        Ok(())
    }

    fn discard(&mut self, symbol: SymbolID, value: S::Value, span: Span, reason: Discard) {
        log::trace!(
            "{:?}: discarding {} at {}",
            reason,
            self.tables.symbol_name(symbol),
            span
        );
        self.driver.discard(symbol, value, span, reason);
    }

    /// Hands everything still held to the driver.
    fn cleanup(&mut self, s: &mut ParserSession<S::Value>) {
        if let Some(la) = s.lookahead.take() {
            self.discard(la.symbol, la.value, la.span, Discard::Cleanup);
        }
        while let Some(frame) = s.stack.pop_frame() {
            if let Some(value) = frame.value {
                let symbol = self.tables.accessing_symbol(frame.state);
                self.discard(symbol, value, frame.span, Discard::Cleanup);
            }
        }
    }

    fn dump_state(&self, s: &ParserSession<S::Value>) {
        let mut output = String::new();
        for (i, frame) in s.stack.iter().enumerate() {
            if i == 0 {
                output.push_str(&format!("<{}>  ", frame.state));
            } else {
                output.push_str(&format!(
                    "<{}> {}  ",
                    frame.state,
                    self.tables
                        .symbol_name(self.tables.accessing_symbol(frame.state))
                ));
            }
        }
        if let Some(la) = &s.lookahead {
            output.push_str(&format!("<-  {}", self.tables.symbol_name(la.symbol)));
        }
        log::trace!("{}", output);
    }
}
