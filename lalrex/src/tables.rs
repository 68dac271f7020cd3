//! # Parse tables
//!
//! The read-only automaton consumed by the [`Parser`](crate::Parser). The
//! layout is the compact two-level form produced by yacc-family generators:
//!
//! - `pact[state]` is a *base* index into the shared `table`/`check` arrays.
//!   The explicit action of `state` on token `t` lives at `table[base + t]`
//!   when `check[base + t] == t`; anything else falls back to
//!   `defact[state]`, the state's default reduction (`0` meaning none).
//! - `pgoto[nt]` is the base of the goto column of nonterminal `nt`, with
//!   `check` holding the source state and `defgoto[nt]` as the fallback.
//!
//! Packed action entries are decoded as: `table_ninf` is an explicit
//! error, a positive value shifts to that state, zero accepts and a
//! negative value reduces by rule `-value`.
//!
//! A [`ParseTables`] is built either from a [`RawTables`] bundle with
//! [`ParseTables::from_raw`], which validates it, or with the
//! [`TableBuilder`](crate::TableBuilder).

use crate::TableError;
use smartstring::alias::String;
use std::fmt;
use std::io::{self, Write};

/// Identifier of an automaton state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateID(pub u32);

/// Identifier of a grammar symbol: terminals first, then nonterminals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolID(pub u32);

/// Identifier of a grammar rule. Rule 0 is the augmenting accept rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleID(pub u32);

macro_rules! impl_id {
    ($($id:ident),*) => {
        $(
            impl From<$id> for usize {
                fn from(id: $id) -> Self {
                    id.0 as usize
                }
            }

            impl fmt::Display for $id {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_id!(StateID, SymbolID, RuleID);

impl SymbolID {
    /// The end-of-input terminal, `$end`.
    pub const END: SymbolID = SymbolID(0);
    /// The reserved error token.
    pub const ERROR: SymbolID = SymbolID(1);
    /// The token every unknown external code translates to.
    pub const UNDEFINED: SymbolID = SymbolID(2);
}

/// A decoded action table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserAction {
    Error,
    Accept,
    Shift(StateID),
    Reduce(RuleID),
}

/// Metadata of one grammar rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    pub lhs: SymbolID,
    pub arity: usize,
    /// Source line of the rule in its grammar file, for tracing.
    pub line: u32,
}

/// Table arrays exactly as a yacc-family generator lays them out.
///
/// Field names follow the generator's conventions with the `yy` prefix
/// removed. Nothing here is checked; see [`ParseTables::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTables {
    /// Number of terminal symbols, including `$end`, `error` and
    /// `$undefined`.
    pub ntokens: usize,
    pub final_state: u32,
    /// Per-state action base, or `pact_ninf` for default-only states.
    pub pact: Vec<i32>,
    pub pact_ninf: i32,
    /// Per-state default reduction; `0` means none.
    pub defact: Vec<u32>,
    /// Per-nonterminal goto base, indexed by `symbol - ntokens`.
    pub pgoto: Vec<i32>,
    /// Per-nonterminal default goto, or `-1` when there is none.
    pub defgoto: Vec<i32>,
    pub table: Vec<i32>,
    pub table_ninf: i32,
    pub check: Vec<i32>,
    /// Left-hand side symbol of every rule.
    pub r1: Vec<u32>,
    /// Right-hand side length of every rule.
    pub r2: Vec<u32>,
    pub rline: Vec<u32>,
    /// Accessing symbol of every state.
    pub stos: Vec<u32>,
    /// External token code to internal symbol.
    pub translate: Vec<u32>,
    /// Symbol names, terminals first.
    pub tname: Vec<String>,
}

/// A validated, immutable table set.
///
/// `ParseTables` is `Send + Sync` and is meant to be built once and shared
/// by reference between any number of parses.
///
/// # Example
///
/// ```rust
/// use lalrex::{ParserAction, StateID, SymbolID, TableBuilder};
///
/// let mut b = TableBuilder::new();
/// let x = b.terminal("'x'", 'x' as i32).unwrap();
/// let s = b.nonterminal("S").unwrap();
/// let atom = b.rule(s, &[x]);
/// b.shift(0, x, 1)
///     .goto(0, s, 2)
///     .default_reduce(1, atom)
///     .shift(2, SymbolID::END, 3)
///     .final_state(3);
/// let tables = b.build().unwrap();
///
/// assert_eq!(tables.action(StateID(0), x), ParserAction::Shift(StateID(1)));
/// assert_eq!(tables.action(StateID(1), x), ParserAction::Reduce(atom));
/// assert_eq!(tables.translate('x' as i32), x);
/// ```
#[derive(Debug, Clone)]
pub struct ParseTables {
    raw: RawTables,
}

impl ParseTables {
    /// Validates `raw` and wraps it.
    ///
    /// Checks array lengths against each other, that every shift and goto
    /// target is a state, that every reduction names a rule, and that every
    /// rule's left-hand side is a nonterminal.
    pub fn from_raw(raw: RawTables) -> Result<Self, TableError> {
        validate(&raw)?;
        Ok(Self { raw })
    }

    /// Borrows the underlying arrays.
    pub fn raw(&self) -> &RawTables {
        &self.raw
    }

    pub fn into_raw(self) -> RawTables {
        self.raw
    }

    pub fn num_states(&self) -> usize {
        self.raw.pact.len()
    }

    pub fn num_tokens(&self) -> usize {
        self.raw.ntokens
    }

    pub fn num_symbols(&self) -> usize {
        self.raw.tname.len()
    }

    pub fn num_rules(&self) -> usize {
        self.raw.r1.len()
    }

    pub fn final_state(&self) -> StateID {
        StateID(self.raw.final_state)
    }

    #[inline]
    pub fn is_terminal(&self, symbol: SymbolID) -> bool {
        (symbol.0 as usize) < self.raw.ntokens
    }

    /// Translates an external token code into an internal symbol.
    ///
    /// Codes `<= 0` are end of input. Codes outside the translation map
    /// become [`SymbolID::UNDEFINED`].
    #[inline]
    pub fn translate(&self, code: i32) -> SymbolID {
        if code <= 0 {
            return SymbolID::END;
        }
        match self.raw.translate.get(code as usize) {
            Some(&symbol) => SymbolID(symbol),
            None => SymbolID::UNDEFINED,
        }
    }

    /// The grammar name of `symbol`, as it appears in the tables.
    pub fn symbol_name(&self, symbol: SymbolID) -> &str {
        self.raw
            .tname
            .get(symbol.0 as usize)
            .map(|s| s.as_str())
            .unwrap_or("$unknown")
    }

    /// The symbol whose shift or goto enters `state`.
    pub fn accessing_symbol(&self, state: StateID) -> SymbolID {
        SymbolID(self.raw.stos.get(state.0 as usize).copied().unwrap_or(0))
    }

    /// Rule metadata, or `None` for an unknown rule.
    pub fn rule(&self, rule: RuleID) -> Option<Rule> {
        let r = rule.0 as usize;
        Some(Rule {
            lhs: SymbolID(*self.raw.r1.get(r)?),
            arity: *self.raw.r2.get(r)? as usize,
            line: self.raw.rline.get(r).copied().unwrap_or(0),
        })
    }

    /// The action base of `state`, or `None` when the state only has a
    /// default action and never needs a lookahead.
    #[inline]
    pub fn base(&self, state: StateID) -> Option<i32> {
        match self.raw.pact.get(state.0 as usize) {
            Some(&base) if base != self.raw.pact_ninf => Some(base),
            _ => None,
        }
    }

    /// The explicit entry for `token` in the row starting at `base`, if the
    /// owner check matches.
    #[inline]
    pub fn checked_action(&self, base: i32, token: SymbolID) -> Option<ParserAction> {
        self.checked_entry(base, token.0 as i64)
            .map(|entry| self.decode(entry))
    }

    /// The default reduction of `state`, if it has one.
    #[inline]
    pub fn default_reduction(&self, state: StateID) -> Option<RuleID> {
        match self.raw.defact.get(state.0 as usize) {
            Some(&rule) if rule != 0 => Some(RuleID(rule)),
            _ => None,
        }
    }

    /// What `state` does when no explicit entry applies.
    #[inline]
    pub fn default_action(&self, state: StateID) -> ParserAction {
        match self.default_reduction(state) {
            Some(rule) => ParserAction::Reduce(rule),
            None => ParserAction::Error,
        }
    }

    /// The full two-level action lookup: explicit entry first, then the
    /// default reduction, then error.
    pub fn action(&self, state: StateID, token: SymbolID) -> ParserAction {
        self.base(state)
            .and_then(|base| self.checked_action(base, token))
            .unwrap_or_else(|| self.default_action(state))
    }

    /// The state entered after reducing to `lhs` on top of `state`.
    ///
    /// `None` means the tables are inconsistent: there is neither an entry
    /// nor a default for this nonterminal.
    pub fn goto(&self, state: StateID, lhs: SymbolID) -> Option<StateID> {
        let nt = (lhs.0 as usize).checked_sub(self.raw.ntokens)?;
        let base = *self.raw.pgoto.get(nt)?;
        let target = match self.checked_entry(base, state.0 as i64) {
            Some(target) => target,
            None => *self.raw.defgoto.get(nt)?,
        };
        if target >= 0 && (target as usize) < self.num_states() {
            Some(StateID(target as u32))
        } else {
            None
        }
    }

    /// The state entered by shifting the error token in `state`, if any.
    ///
    /// Only explicit entries count; default reductions are not consulted.
    pub fn error_shift(&self, state: StateID) -> Option<StateID> {
        let base = self.base(state)?;
        match self.checked_action(base, SymbolID::ERROR)? {
            ParserAction::Shift(target) => Some(target),
            _ => None,
        }
    }

    /// All terminals with an explicit, non-error entry in `state`, except
    /// the error token itself, in symbol order.
    pub fn expected_tokens(&self, state: StateID) -> Vec<SymbolID> {
        let Some(base) = self.base(state) else {
            return Vec::new();
        };
        let base = base as i64;
        let last = self.raw.table.len() as i64 - 1;
        let begin = if base < 0 { -base } else { 0 };
        let end = (last - base + 1).min(self.raw.ntokens as i64);
        (begin..end.max(begin))
            .filter(|&x| x != SymbolID::ERROR.0 as i64)
            .filter(|&x| {
                let idx = (base + x) as usize;
                self.raw.check[idx] as i64 == x && self.raw.table[idx] != self.raw.table_ninf
            })
            .map(|x| SymbolID(x as u32))
            .collect()
    }

    #[inline]
    fn checked_entry(&self, base: i32, key: i64) -> Option<i32> {
        let idx = base as i64 + key;
        if idx < 0 {
            return None;
        }
        let idx = idx as usize;
        match self.raw.check.get(idx) {
            Some(&owner) if owner as i64 == key => Some(self.raw.table[idx]),
            _ => None,
        }
    }

    #[inline]
    fn decode(&self, entry: i32) -> ParserAction {
        if entry == self.raw.table_ninf {
            ParserAction::Error
        } else if entry > 0 {
            ParserAction::Shift(StateID(entry as u32))
        } else if entry == 0 {
            ParserAction::Accept
        } else {
            ParserAction::Reduce(RuleID(entry.unsigned_abs()))
        }
    }

    /// Writes a human-readable dump of rules, symbols and per-state
    /// actions.
    pub fn write_tables<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "SYMBOLS,{},{}", self.num_symbols(), self.num_tokens())?;
        for (i, name) in self.raw.tname.iter().enumerate() {
            let kind = if i < self.num_tokens() { "T" } else { "N" };
            writeln!(out, "{},{},{}", kind, i, name)?;
        }
        writeln!(out, "RULES,{}", self.num_rules())?;
        for r in 0..self.num_rules() {
            let Some(rule) = self.rule(RuleID(r as u32)) else {
                continue;
            };
            writeln!(
                out,
                "R,{},{} -> {} symbol(s),line {}",
                r,
                self.symbol_name(rule.lhs),
                rule.arity,
                rule.line
            )?;
        }
        writeln!(
            out,
            "STATES,{},final {}",
            self.num_states(),
            self.raw.final_state
        )?;
        for s in 0..self.num_states() {
            let state = StateID(s as u32);
            writeln!(
                out,
                "S,{},via {}",
                s,
                self.symbol_name(self.accessing_symbol(state))
            )?;
            if let Some(base) = self.base(state) {
                for t in 0..self.num_tokens() {
                    let token = SymbolID(t as u32);
                    if let Some(action) = self.checked_action(base, token) {
                        writeln!(
                            out,
                            "A,{},{},{}",
                            s,
                            self.symbol_name(token),
                            DisplayAction(action)
                        )?;
                    }
                }
            }
            if let Some(rule) = self.default_reduction(state) {
                writeln!(out, "A,{},$default,reduce {}", s, rule)?;
            }
            for nt in self.num_tokens()..self.num_symbols() {
                let lhs = SymbolID(nt as u32);
                let nt_idx = nt - self.num_tokens();
                let explicit = self
                    .raw
                    .pgoto
                    .get(nt_idx)
                    .and_then(|&base| self.checked_entry(base, s as i64));
                if let Some(target) = explicit {
                    writeln!(out, "G,{},{},{}", s, self.symbol_name(lhs), target)?;
                }
            }
        }
        for nt in self.num_tokens()..self.num_symbols() {
            let target = self.raw.defgoto[nt - self.num_tokens()];
            if target >= 0 {
                writeln!(
                    out,
                    "G,$default,{},{}",
                    self.symbol_name(SymbolID(nt as u32)),
                    target
                )?;
            }
        }
        Ok(())
    }
}

struct DisplayAction(ParserAction);

impl fmt::Display for DisplayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ParserAction::Error => write!(f, "error"),
            ParserAction::Accept => write!(f, "accept"),
            ParserAction::Shift(s) => write!(f, "shift {}", s),
            ParserAction::Reduce(r) => write!(f, "reduce {}", r),
        }
    }
}

fn check_len(name: &'static str, len: usize, expected: usize) -> Result<(), TableError> {
    if len != expected {
        return Err(TableError::Length {
            name,
            len,
            expected,
        });
    }
    Ok(())
}

fn validate(raw: &RawTables) -> Result<(), TableError> {
    let nstates = raw.pact.len();
    let nrules = raw.r1.len();
    let nsyms = raw.tname.len();
    let ntokens = raw.ntokens;

    check_len("defact", raw.defact.len(), nstates)?;
    check_len("stos", raw.stos.len(), nstates)?;
    check_len("r2", raw.r2.len(), nrules)?;
    check_len("rline", raw.rline.len(), nrules)?;
    check_len("check", raw.check.len(), raw.table.len())?;

    if nstates == 0 {
        return Err(TableError::Malformed("no states".into()));
    }
    if nrules == 0 {
        return Err(TableError::Malformed("no rules".into()));
    }
    if ntokens < 3 || ntokens >= nsyms {
        return Err(TableError::Malformed(
            format!("{} tokens out of {} symbols", ntokens, nsyms).into(),
        ));
    }
    let nnts = nsyms - ntokens;
    check_len("pgoto", raw.pgoto.len(), nnts)?;
    check_len("defgoto", raw.defgoto.len(), nnts)?;

    if raw.final_state as usize >= nstates {
        return Err(TableError::StateOutOfRange {
            context: "final state".into(),
            state: raw.final_state as i64,
            count: nstates,
        });
    }

    for (r, (&lhs, &arity)) in raw.r1.iter().zip(raw.r2.iter()).enumerate() {
        if (lhs as usize) < ntokens || lhs as usize >= nsyms {
            return Err(TableError::SymbolOutOfRange {
                context: format!("lhs of rule {}", r).into(),
                symbol: lhs as i64,
            });
        }
        if arity as usize > u16::MAX as usize {
            return Err(TableError::Malformed(
                format!("rule {} has arity {}", r, arity).into(),
            ));
        }
    }
    for (code, &symbol) in raw.translate.iter().enumerate() {
        if symbol as usize >= ntokens {
            return Err(TableError::SymbolOutOfRange {
                context: format!("translation of code {}", code).into(),
                symbol: symbol as i64,
            });
        }
    }
    for (s, &symbol) in raw.stos.iter().enumerate() {
        if symbol as usize >= nsyms {
            return Err(TableError::SymbolOutOfRange {
                context: format!("accessing symbol of state {}", s).into(),
                symbol: symbol as i64,
            });
        }
    }

    let entry = |base: i32, key: usize| -> Option<i32> {
        let idx = base as i64 + key as i64;
        if idx < 0 {
            return None;
        }
        match raw.check.get(idx as usize) {
            Some(&owner) if owner as i64 == key as i64 => Some(raw.table[idx as usize]),
            _ => None,
        }
    };

    for (s, (&base, &defact)) in raw.pact.iter().zip(raw.defact.iter()).enumerate() {
        if defact as usize >= nrules {
            return Err(TableError::RuleOutOfRange {
                context: format!("default reduction of state {}", s).into(),
                rule: defact as i64,
                count: nrules,
            });
        }
        if base == raw.pact_ninf {
            continue;
        }
        for t in 0..ntokens {
            let Some(value) = entry(base, t) else {
                continue;
            };
            if value == raw.table_ninf {
                continue;
            }
            if value > 0 && value as usize >= nstates {
                return Err(TableError::StateOutOfRange {
                    context: format!("shift in state {} on {}", s, raw.tname[t]).into(),
                    state: value as i64,
                    count: nstates,
                });
            }
            if value < 0 && value.unsigned_abs() as usize >= nrules {
                return Err(TableError::RuleOutOfRange {
                    context: format!("reduction in state {} on {}", s, raw.tname[t]).into(),
                    rule: -(value as i64),
                    count: nrules,
                });
            }
        }
    }

    for (nt, (&base, &default)) in raw.pgoto.iter().zip(raw.defgoto.iter()).enumerate() {
        if default >= nstates as i32 || default < -1 {
            return Err(TableError::StateOutOfRange {
                context: format!("default goto on {}", raw.tname[ntokens + nt]).into(),
                state: default as i64,
                count: nstates,
            });
        }
        for s in 0..nstates {
            let Some(target) = entry(base, s) else {
                continue;
            };
            if target < 0 || target as usize >= nstates {
                return Err(TableError::StateOutOfRange {
                    context: format!("goto from state {} on {}", s, raw.tname[ntokens + nt])
                        .into(),
                    state: target as i64,
                    count: nstates,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_grammar_data::{list_grammar, paren_grammar};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn tables_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseTables>();
    }

    #[test]
    fn lookups_follow_explicit_then_default() {
        init_logger();
        let g = paren_grammar();
        let t = &g.tables;
        assert_eq!(t.action(StateID(0), g.lparen), ParserAction::Shift(StateID(1)));
        assert_eq!(t.action(StateID(1), SymbolID::ERROR), ParserAction::Shift(StateID(4)));
        assert_eq!(t.action(StateID(0), g.rparen), ParserAction::Error);
        assert_eq!(t.base(StateID(2)), None);
        assert_eq!(t.action(StateID(2), g.rparen), ParserAction::Reduce(g.atom));
        assert_eq!(t.default_reduction(StateID(7)), Some(g.nest));
        assert_eq!(t.default_reduction(StateID(0)), None);
    }

    #[test]
    fn gotos_use_column_then_default() {
        let g = paren_grammar();
        let t = &g.tables;
        assert_eq!(t.goto(StateID(0), g.s), Some(StateID(3)));
        assert_eq!(t.goto(StateID(1), g.s), Some(StateID(5)));
        // terminals have no goto column
        assert_eq!(t.goto(StateID(0), g.x), None);
    }

    #[test]
    fn translate_handles_end_and_unknown_codes() {
        let g = paren_grammar();
        let t = &g.tables;
        assert_eq!(t.translate(0), SymbolID::END);
        assert_eq!(t.translate(-5), SymbolID::END);
        assert_eq!(t.translate('(' as i32), g.lparen);
        assert_eq!(t.translate('z' as i32), SymbolID::UNDEFINED);
        assert_eq!(t.translate(1_000_000), SymbolID::UNDEFINED);
    }

    #[test]
    fn error_shift_ignores_defaults() {
        let g = list_grammar();
        let t = &g.tables;
        assert_eq!(t.error_shift(StateID(1)), Some(StateID(4)));
        assert_eq!(t.error_shift(StateID(0)), None);
        assert_eq!(t.error_shift(StateID(5)), None);
    }

    #[test]
    fn expected_tokens_skip_error_token() {
        let g = list_grammar();
        let t = &g.tables;
        assert_eq!(t.expected_tokens(StateID(1)), vec![SymbolID::END, g.x]);
        assert_eq!(t.expected_tokens(StateID(3)), vec![g.semi]);
        assert!(t.expected_tokens(StateID(5)).is_empty());
    }

    #[test]
    fn accessing_symbols_and_rules() {
        let g = paren_grammar();
        let t = &g.tables;
        assert_eq!(t.accessing_symbol(StateID(1)), g.lparen);
        assert_eq!(t.accessing_symbol(StateID(4)), SymbolID::ERROR);
        assert_eq!(t.accessing_symbol(StateID(5)), g.s);
        assert_eq!(t.accessing_symbol(StateID(6)), SymbolID::END);
        let rule = t.rule(g.nest).unwrap();
        assert_eq!(rule.lhs, g.s);
        assert_eq!(rule.arity, 3);
        assert_eq!(t.rule(RuleID(0)).unwrap().arity, 2);
        assert!(t.rule(RuleID(99)).is_none());
        assert_eq!(t.symbol_name(g.s), "S");
        assert_eq!(t.symbol_name(SymbolID(t.num_tokens() as u32)), "$accept");
    }

    #[test]
    fn from_raw_round_trips_builder_output() {
        let g = paren_grammar();
        let raw = g.tables.raw().clone();
        let t = ParseTables::from_raw(raw.clone()).unwrap();
        assert_eq!(t.raw(), &raw);
    }

    #[test]
    fn from_raw_rejects_length_mismatch() {
        let mut raw = paren_grammar().tables.into_raw();
        raw.defact.pop();
        assert!(matches!(
            ParseTables::from_raw(raw),
            Err(TableError::Length { name: "defact", .. })
        ));
    }

    #[test]
    fn from_raw_rejects_bad_shift_target() {
        let mut raw = paren_grammar().tables.into_raw();
        let idx = raw
            .table
            .iter()
            .zip(raw.check.iter())
            .position(|(&v, &c)| v > 0 && c >= 0)
            .unwrap();
        raw.table[idx] = 1000;
        assert!(matches!(
            ParseTables::from_raw(raw),
            Err(TableError::StateOutOfRange { state: 1000, .. })
        ));
    }

    #[test]
    fn from_raw_rejects_terminal_lhs() {
        let mut raw = paren_grammar().tables.into_raw();
        raw.r1[1] = 3;
        assert!(matches!(
            ParseTables::from_raw(raw),
            Err(TableError::SymbolOutOfRange { symbol: 3, .. })
        ));
    }

    #[test]
    fn from_raw_rejects_bad_default_reduction() {
        let mut raw = paren_grammar().tables.into_raw();
        raw.defact[0] = 42;
        assert!(matches!(
            ParseTables::from_raw(raw),
            Err(TableError::RuleOutOfRange { rule: 42, .. })
        ));
    }

    #[test]
    fn dump_lists_states_and_actions() {
        let g = paren_grammar();
        let mut out = Vec::new();
        g.tables.write_tables(&mut out).unwrap();
        let text = std::string::String::from_utf8(out).unwrap();
        assert!(text.contains("RULES,4"));
        assert!(text.contains("A,0,'(',shift 1"));
        assert!(text.contains("A,1,error,shift 4"));
        assert!(text.contains("A,2,$default,reduce 2"));
        assert!(text.contains("G,1,S,5"));
        assert!(text.contains("STATES,8,final 6"));
    }
}
