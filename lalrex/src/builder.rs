//! Assembling [`ParseTables`] from explicit per-state entries.
//!
//! [`TableBuilder`] is not a parser generator: it performs no item-set
//! construction and resolves no conflicts. It takes an automaton the
//! caller already knows (shift, reduce and error entries per state and
//! token, default reductions, gotos) and packs it into the two-level form
//! the parser consumes. Every packed row and goto column receives its own
//! base index, so an owner check can never accept an entry belonging to a
//! different row. Identical rows share one base.

use crate::{ParseTables, ParserAction, RawTables, RuleID, SymbolID, TableError};
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;
use std::collections::{BTreeMap, HashMap, HashSet};

/// External code of the reserved error token.
pub const ERROR_CODE: i32 = 256;

/// Largest external token code a terminal may use. The translate table
/// holds one entry per code up to the largest one declared.
pub const MAX_TOKEN_CODE: i32 = 0xFFFF;

const NINF: i32 = i32::MIN;

#[derive(Debug, Clone)]
struct RuleDef {
    lhs: SymbolID,
    rhs: Vec<SymbolID>,
    line: u32,
}

/// Incrementally collects a grammar's symbols, rules and automaton.
///
/// Terminals must be declared before nonterminals, because symbol ids
/// are laid out terminals first. The first call to
/// [`nonterminal`](Self::nonterminal) also declares `$accept`, the
/// left-hand side of the augmenting rule 0 (`$accept → start $end`).
///
/// Entry methods record and chain; all consistency checks run in
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TableBuilder {
    terminals: IndexMap<String, i32>,
    nonterminals: IndexSet<String>,
    rules: Vec<RuleDef>,
    actions: BTreeMap<(u32, SymbolID), ParserAction>,
    defaults: BTreeMap<u32, RuleID>,
    gotos: BTreeMap<(SymbolID, u32), u32>,
    final_state: Option<u32>,
    errors: Vec<TableError>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// A builder holding only the reserved terminals `$end`, `error` and
    /// `$undefined`.
    pub fn new() -> Self {
        let mut terminals = IndexMap::new();
        terminals.insert("$end".into(), 0);
        terminals.insert("error".into(), ERROR_CODE);
        terminals.insert("$undefined".into(), -1);
        Self {
            terminals,
            nonterminals: IndexSet::new(),
            rules: Vec::new(),
            actions: BTreeMap::new(),
            defaults: BTreeMap::new(),
            gotos: BTreeMap::new(),
            final_state: None,
            errors: Vec::new(),
        }
    }

    /// Declares a terminal scanned as external token `code`.
    pub fn terminal(&mut self, name: &str, code: i32) -> Result<SymbolID, TableError> {
        if !self.nonterminals.is_empty() {
            return Err(TableError::Malformed(
                format!("terminal `{}` declared after nonterminals", name).into(),
            ));
        }
        if self.terminals.contains_key(name) {
            return Err(TableError::Malformed(
                format!("duplicate symbol `{}`", name).into(),
            ));
        }
        if code > MAX_TOKEN_CODE {
            return Err(TableError::Malformed(
                format!(
                    "terminal `{}` code {} exceeds {}",
                    name, code, MAX_TOKEN_CODE
                )
                .into(),
            ));
        }
        if code <= 0 || self.terminals.values().any(|&c| c == code) {
            return Err(TableError::Malformed(
                format!("terminal `{}` has unusable code {}", name, code).into(),
            ));
        }
        let id = SymbolID(self.terminals.len() as u32);
        self.terminals.insert(name.into(), code);
        Ok(id)
    }

    /// Declares a nonterminal.
    pub fn nonterminal(&mut self, name: &str) -> Result<SymbolID, TableError> {
        if self.nonterminals.is_empty() {
            self.nonterminals.insert("$accept".into());
        }
        if self.terminals.contains_key(name) || self.nonterminals.contains(name) {
            return Err(TableError::Malformed(
                format!("duplicate symbol `{}`", name).into(),
            ));
        }
        let (idx, _) = self.nonterminals.insert_full(name.into());
        Ok(SymbolID((self.terminals.len() + idx) as u32))
    }

    /// Looks a symbol up by name.
    pub fn symbol(&self, name: &str) -> Option<SymbolID> {
        if let Some(idx) = self.terminals.get_index_of(name) {
            return Some(SymbolID(idx as u32));
        }
        self.nonterminals
            .get_index_of(name)
            .map(|idx| SymbolID((self.terminals.len() + idx) as u32))
    }

    /// Adds the rule `lhs → rhs`. Rules are numbered from 1.
    pub fn rule(&mut self, lhs: SymbolID, rhs: &[SymbolID]) -> RuleID {
        let line = self.rules.len() as u32 + 1;
        self.rule_at(lhs, rhs, line)
    }

    /// Adds a rule and records the grammar source line it came from.
    pub fn rule_at(&mut self, lhs: SymbolID, rhs: &[SymbolID], line: u32) -> RuleID {
        self.rules.push(RuleDef {
            lhs,
            rhs: rhs.to_vec(),
            line,
        });
        RuleID(self.rules.len() as u32)
    }

    fn set_action(&mut self, state: u32, token: SymbolID, action: ParserAction) -> &mut Self {
        if let Some(previous) = self.actions.insert((state, token), action) {
            if previous != action {
                let symbol = self.name_of(token);
                self.errors.push(TableError::Conflict { state, symbol });
            }
        }
        self
    }

    /// In `state`, shift `token` and enter `target`.
    pub fn shift(&mut self, state: u32, token: SymbolID, target: u32) -> &mut Self {
        self.set_action(state, token, ParserAction::Shift(crate::StateID(target)))
    }

    /// In `state`, reduce by `rule` when the lookahead is `token`.
    pub fn reduce(&mut self, state: u32, token: SymbolID, rule: RuleID) -> &mut Self {
        self.set_action(state, token, ParserAction::Reduce(rule))
    }

    /// In `state`, accept when the lookahead is `token`.
    pub fn accept(&mut self, state: u32, token: SymbolID) -> &mut Self {
        self.set_action(state, token, ParserAction::Accept)
    }

    /// In `state`, fault on `token` even if the state has a default
    /// reduction.
    pub fn error_on(&mut self, state: u32, token: SymbolID) -> &mut Self {
        self.set_action(state, token, ParserAction::Error)
    }

    /// The reduction `state` performs when no explicit entry applies.
    pub fn default_reduce(&mut self, state: u32, rule: RuleID) -> &mut Self {
        if let Some(previous) = self.defaults.insert(state, rule) {
            if previous != rule {
                self.errors.push(TableError::Conflict {
                    state,
                    symbol: "$default".into(),
                });
            }
        }
        self
    }

    /// After reducing to `lhs` on top of `state`, enter `target`.
    pub fn goto(&mut self, state: u32, lhs: SymbolID, target: u32) -> &mut Self {
        if let Some(previous) = self.gotos.insert((lhs, state), target) {
            if previous != target {
                let symbol = self.name_of(lhs);
                self.errors.push(TableError::Conflict { state, symbol });
            }
        }
        self
    }

    /// The state whose entry accepts the input.
    pub fn final_state(&mut self, state: u32) -> &mut Self {
        self.final_state = Some(state);
        self
    }

    fn name_of(&self, symbol: SymbolID) -> String {
        let idx = symbol.0 as usize;
        if let Some((name, _)) = self.terminals.get_index(idx) {
            return name.clone();
        }
        idx.checked_sub(self.terminals.len())
            .and_then(|i| self.nonterminals.get_index(i))
            .cloned()
            .unwrap_or_else(|| format!("#{}", idx).into())
    }

    /// Validates the collected entries and packs them.
    pub fn build(&self) -> Result<ParseTables, TableError> {
        if let Some(e) = self.errors.first() {
            return Err(e.clone());
        }
        if self.nonterminals.is_empty() {
            return Err(TableError::Malformed("no nonterminals declared".into()));
        }
        let Some(final_state) = self.final_state else {
            return Err(TableError::Malformed("no final state".into()));
        };
        let ntokens = self.terminals.len();
        let nsyms = ntokens + self.nonterminals.len();
        let accept = SymbolID(ntokens as u32);

        let is_nonterminal =
            |s: SymbolID| (s.0 as usize) >= ntokens && (s.0 as usize) < nsyms && s != accept;
        let nrules = self.rules.len() + 1;
        for (i, rule) in self.rules.iter().enumerate() {
            if !is_nonterminal(rule.lhs) {
                return Err(TableError::SymbolOutOfRange {
                    context: format!("lhs of rule {}", i + 1).into(),
                    symbol: rule.lhs.0 as i64,
                });
            }
            if let Some(bad) = rule.rhs.iter().find(|s| s.0 as usize >= nsyms) {
                return Err(TableError::SymbolOutOfRange {
                    context: format!("rhs of rule {}", i + 1).into(),
                    symbol: bad.0 as i64,
                });
            }
        }

        let mut nstates = final_state as usize + 1;
        for (&(state, token), action) in &self.actions {
            if token.0 as usize >= ntokens {
                return Err(TableError::SymbolOutOfRange {
                    context: format!("action in state {}", state).into(),
                    symbol: token.0 as i64,
                });
            }
            nstates = nstates.max(state as usize + 1);
            match *action {
                ParserAction::Shift(target) => nstates = nstates.max(target.0 as usize + 1),
                ParserAction::Reduce(rule) if rule.0 == 0 || rule.0 as usize >= nrules => {
                    return Err(TableError::RuleOutOfRange {
                        context: format!("reduction in state {}", state).into(),
                        rule: rule.0 as i64,
                        count: nrules,
                    });
                }
                _ => {}
            }
        }
        for (&state, &rule) in &self.defaults {
            if rule.0 == 0 || rule.0 as usize >= nrules {
                return Err(TableError::RuleOutOfRange {
                    context: format!("default reduction of state {}", state).into(),
                    rule: rule.0 as i64,
                    count: nrules,
                });
            }
            nstates = nstates.max(state as usize + 1);
        }
        for (&(lhs, state), &target) in &self.gotos {
            if !is_nonterminal(lhs) {
                return Err(TableError::SymbolOutOfRange {
                    context: format!("goto from state {}", state).into(),
                    symbol: lhs.0 as i64,
                });
            }
            nstates = nstates.max(state as usize + 1).max(target as usize + 1);
        }

        let mut stos = vec![0u32; nstates];
        let mut entered: Vec<Option<SymbolID>> = vec![None; nstates];
        let shifts = self.actions.iter().filter_map(|(&(_, token), a)| match a {
            ParserAction::Shift(target) => Some((target.0, token)),
            _ => None,
        });
        let gotos = self.gotos.iter().map(|(&(lhs, _), &target)| (target, lhs));
        for (target, symbol) in shifts.chain(gotos) {
            match entered[target as usize] {
                Some(previous) if previous != symbol => {
                    return Err(TableError::Malformed(
                        format!(
                            "state {} entered by both `{}` and `{}`",
                            target,
                            self.name_of(previous),
                            self.name_of(symbol)
                        )
                        .into(),
                    ));
                }
                _ => {
                    entered[target as usize] = Some(symbol);
                    stos[target as usize] = symbol.0;
                }
            }
        }

        let mut rows: Vec<Vec<(usize, i32)>> = vec![Vec::new(); nstates];
        for (&(state, token), action) in &self.actions {
            let value = match *action {
                ParserAction::Shift(target) => target.0 as i32,
                ParserAction::Reduce(rule) => -(rule.0 as i32),
                ParserAction::Accept => 0,
                ParserAction::Error => NINF,
            };
            rows[state as usize].push((token.0 as usize, value));
        }

        let nnts = nsyms - ntokens;
        let mut columns: Vec<Vec<(usize, i32)>> = vec![Vec::new(); nnts];
        let mut defgoto = vec![-1i32; nnts];
        for (nt, default) in defgoto.iter_mut().enumerate() {
            let lhs = SymbolID((ntokens + nt) as u32);
            let entries: Vec<(u32, u32)> = self
                .gotos
                .range((lhs, 0)..=(lhs, u32::MAX))
                .map(|(&(_, state), &target)| (state, target))
                .collect();
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for &(_, target) in &entries {
                *counts.entry(target).or_default() += 1;
            }
            // most frequent target, smallest state on ties
            let Some(most) = counts
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
                .map(|(&target, _)| target)
            else {
                continue;
            };
            *default = most as i32;
            columns[nt] = entries
                .into_iter()
                .filter(|&(_, target)| target != most)
                .map(|(state, target)| (state as usize, target as i32))
                .collect();
        }

        let mut packer = Packer::default();
        let pact = rows.iter().map(|row| packer.place(row)).collect();
        let pgoto = columns.iter().map(|col| packer.place(col)).collect();

        let mut defact = vec![0u32; nstates];
        for (&state, &rule) in &self.defaults {
            defact[state as usize] = rule.0;
        }

        let max_code = self.terminals.values().copied().max().unwrap_or(0).max(0);
        let mut translate = vec![SymbolID::UNDEFINED.0; max_code as usize + 1];
        translate[0] = SymbolID::END.0;
        for (idx, &code) in self.terminals.values().enumerate() {
            if code > 0 {
                translate[code as usize] = idx as u32;
            }
        }

        let mut r1 = vec![accept.0];
        let mut r2 = vec![2u32];
        let mut rline = vec![0u32];
        for rule in &self.rules {
            r1.push(rule.lhs.0);
            r2.push(rule.rhs.len() as u32);
            rline.push(rule.line);
        }

        let tname = self
            .terminals
            .keys()
            .chain(self.nonterminals.iter())
            .cloned()
            .collect();

        let raw = RawTables {
            ntokens,
            final_state,
            pact,
            pact_ninf: NINF,
            defact,
            pgoto,
            defgoto,
            table: packer.table,
            table_ninf: NINF,
            check: packer.check,
            r1,
            r2,
            rline,
            stos,
            translate,
            tname,
        };
        log::debug!(
            "packed {} states, {} rules into {} table cells",
            nstates,
            nrules,
            raw.table.len()
        );
        ParseTables::from_raw(raw)
    }
}

/// First-fit packing of sparse vectors into one `table`/`check` pair.
#[derive(Default)]
struct Packer {
    table: Vec<i32>,
    check: Vec<i32>,
    bases: HashSet<i64>,
    placed: HashMap<Vec<(usize, i32)>, i32>,
}

impl Packer {
    /// Returns the base of `row` (sorted by key), or `NINF` for an empty row.
    fn place(&mut self, row: &[(usize, i32)]) -> i32 {
        let (Some(&(first, _)), Some(&(last, _))) = (row.first(), row.last()) else {
            return NINF;
        };
        if let Some(&base) = self.placed.get(row) {
            return base;
        }
        let mut base = -(first as i64);
        while self.bases.contains(&base) || !row.iter().all(|&(k, _)| self.is_free(base + k as i64))
        {
            base += 1;
        }
        let end = (base + last as i64 + 1) as usize;
        if self.table.len() < end {
            self.table.resize(end, 0);
            self.check.resize(end, -1);
        }
        for &(key, value) in row {
            let idx = (base + key as i64) as usize;
            self.table[idx] = value;
            self.check[idx] = key as i32;
        }
        self.bases.insert(base);
        self.placed.insert(row.to_vec(), base as i32);
        base as i32
    }

    fn is_free(&self, idx: i64) -> bool {
        match self.check.get(idx as usize) {
            Some(&owner) => owner < 0,
            None => true,
        }
    }
}
