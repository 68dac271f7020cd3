//! # Paren grammar tables
//!
//! ```text
//! S : '(' S ')'
//!   | ATOM
//!   | '(' error
//!   ;
//! ```
//!
//! The LALR(1) automaton for this grammar is small enough to be described
//! state by state and packed with [`TableBuilder`] on first use.

use lalrex::{ParseTables, RuleID, SymbolID, TableBuilder, TableError};
use once_cell::sync::OnceCell;
use thiserror::Error;

pub const LPAREN: i32 = '(' as i32;
pub const RPAREN: i32 = ')' as i32;
pub const ATOM: i32 = 258;

/// Rules of the paren grammar, numbered as in the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProdID {
    /// `$accept : S $end`, never reduced.
    Start = 0,
    /// `S : '(' S ')'`
    Nest = 1,
    /// `S : ATOM`
    Atom = 2,
    /// `S : '(' error`
    Recover = 3,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no paren grammar rule {0}")]
pub struct UnknownRule(pub RuleID);

impl TryFrom<RuleID> for ProdID {
    type Error = UnknownRule;

    fn try_from(rule: RuleID) -> Result<Self, Self::Error> {
        match rule.0 {
            0 => Ok(ProdID::Start),
            1 => Ok(ProdID::Nest),
            2 => Ok(ProdID::Atom),
            3 => Ok(ProdID::Recover),
            _ => Err(UnknownRule(rule)),
        }
    }
}

impl From<ProdID> for RuleID {
    fn from(prod: ProdID) -> Self {
        RuleID(prod as u32)
    }
}

static TABLES: OnceCell<ParseTables> = OnceCell::new();

/// The shared, validated tables.
pub fn tables() -> Result<&'static ParseTables, TableError> {
    TABLES.get_or_try_init(build)
}

fn build() -> Result<ParseTables, TableError> {
    let mut b = TableBuilder::new();
    let lparen = b.terminal("'('", LPAREN)?;
    let rparen = b.terminal("')'", RPAREN)?;
    let atom = b.terminal("ATOM", ATOM)?;
    let s = b.nonterminal("S")?;
    let nest = b.rule(s, &[lparen, s, rparen]);
    let leaf = b.rule(s, &[atom]);
    let recover = b.rule(s, &[lparen, SymbolID::ERROR]);
    debug_assert_eq!(nest, RuleID::from(ProdID::Nest));
    debug_assert_eq!(leaf, RuleID::from(ProdID::Atom));
    debug_assert_eq!(recover, RuleID::from(ProdID::Recover));

    b.shift(0, lparen, 1)
        .shift(0, atom, 2)
        .goto(0, s, 3)
        // after '(': another term, or give up on this one
        .shift(1, lparen, 1)
        .shift(1, atom, 2)
        .shift(1, SymbolID::ERROR, 4)
        .goto(1, s, 5)
        .default_reduce(2, leaf)
        .shift(3, SymbolID::END, 6)
        .default_reduce(4, recover)
        .shift(5, rparen, 7)
        .default_reduce(7, nest)
        .final_state(6);
    let tables = b.build()?;
    log::debug!(
        "paren tables: {} states, {} rules",
        tables.num_states(),
        tables.num_rules()
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lalrex::StateID;

    #[test]
    fn rules_match_prod_ids() {
        let _ = env_logger::builder().is_test(true).try_init();
        let t = tables().unwrap();
        assert_eq!(t.num_rules(), 4);
        for prod in [ProdID::Nest, ProdID::Atom, ProdID::Recover] {
            let rule = t.rule(prod.into()).unwrap();
            assert_eq!(t.symbol_name(rule.lhs), "S");
        }
        assert_eq!(t.rule(ProdID::Nest.into()).unwrap().arity, 3);
        assert_eq!(t.rule(ProdID::Recover.into()).unwrap().arity, 2);
        assert_eq!(ProdID::try_from(RuleID(3)), Ok(ProdID::Recover));
        assert_eq!(ProdID::try_from(RuleID(9)), Err(UnknownRule(RuleID(9))));
    }

    #[test]
    fn codes_translate() {
        let t = tables().unwrap();
        assert_eq!(t.symbol_name(t.translate(LPAREN)), "'('");
        assert_eq!(t.symbol_name(t.translate(ATOM)), "ATOM");
        assert_eq!(t.translate('#' as i32), SymbolID::UNDEFINED);
        assert_eq!(t.final_state(), StateID(6));
    }

    #[test]
    fn built_once() {
        let a = tables().unwrap() as *const ParseTables;
        let b = tables().unwrap() as *const ParseTables;
        assert_eq!(a, b);
    }
}
