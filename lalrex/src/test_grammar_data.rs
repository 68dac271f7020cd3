//! Small hand-built automata shared by the unit tests.

use crate::{ParseTables, RuleID, SymbolID, TableBuilder, Token};
use smartstring::alias::String;

/// `S → ( S ) | x | ( error`
pub(crate) struct ParenGrammar {
    pub tables: ParseTables,
    pub lparen: SymbolID,
    pub rparen: SymbolID,
    pub x: SymbolID,
    pub s: SymbolID,
    pub nest: RuleID,
    pub atom: RuleID,
    pub recover: RuleID,
}

pub(crate) fn paren_grammar() -> ParenGrammar {
    let mut b = TableBuilder::new();
    let lparen = b.terminal("'('", '(' as i32).unwrap();
    let rparen = b.terminal("')'", ')' as i32).unwrap();
    let x = b.terminal("'x'", 'x' as i32).unwrap();
    let s = b.nonterminal("S").unwrap();
    let nest = b.rule(s, &[lparen, s, rparen]);
    let atom = b.rule(s, &[x]);
    let recover = b.rule(s, &[lparen, SymbolID::ERROR]);
    b.shift(0, lparen, 1)
        .shift(0, x, 2)
        .goto(0, s, 3)
        .shift(1, lparen, 1)
        .shift(1, x, 2)
        .shift(1, SymbolID::ERROR, 4)
        .goto(1, s, 5)
        .default_reduce(2, atom)
        .shift(3, SymbolID::END, 6)
        .default_reduce(4, recover)
        .shift(5, rparen, 7)
        .default_reduce(7, nest)
        .final_state(6);
    ParenGrammar {
        tables: b.build().unwrap(),
        lparen,
        rparen,
        x,
        s,
        nest,
        atom,
        recover,
    }
}

/// `L → ε | L x ; | L error ;`
pub(crate) struct ListGrammar {
    pub tables: ParseTables,
    pub x: SymbolID,
    pub semi: SymbolID,
    pub empty: RuleID,
    pub item: RuleID,
    pub recover: RuleID,
}

pub(crate) fn list_grammar() -> ListGrammar {
    let mut b = TableBuilder::new();
    let x = b.terminal("'x'", 'x' as i32).unwrap();
    let semi = b.terminal("';'", ';' as i32).unwrap();
    let l = b.nonterminal("L").unwrap();
    let empty = b.rule(l, &[]);
    let item = b.rule(l, &[l, x, semi]);
    let recover = b.rule(l, &[l, SymbolID::ERROR, semi]);
    b.default_reduce(0, empty)
        .goto(0, l, 1)
        .shift(1, SymbolID::END, 2)
        .shift(1, x, 3)
        .shift(1, SymbolID::ERROR, 4)
        .shift(3, semi, 5)
        .shift(4, semi, 6)
        .default_reduce(5, item)
        .default_reduce(6, recover)
        .final_state(2);
    ListGrammar {
        tables: b.build().unwrap(),
        x,
        semi,
        empty,
        item,
        recover,
    }
}

/// `S → x O`, `O → ε | y`
pub(crate) struct OptGrammar {
    pub tables: ParseTables,
    pub whole: RuleID,
    pub none: RuleID,
    pub some: RuleID,
}

pub(crate) fn opt_grammar() -> OptGrammar {
    let mut b = TableBuilder::new();
    let x = b.terminal("'x'", 'x' as i32).unwrap();
    let y = b.terminal("'y'", 'y' as i32).unwrap();
    let s = b.nonterminal("S").unwrap();
    let o = b.nonterminal("O").unwrap();
    let whole = b.rule(s, &[x, o]);
    let none = b.rule(o, &[]);
    let some = b.rule(o, &[y]);
    b.shift(0, x, 1)
        .goto(0, s, 2)
        .shift(1, y, 3)
        .default_reduce(1, none)
        .goto(1, o, 4)
        .shift(2, SymbolID::END, 5)
        .default_reduce(3, some)
        .default_reduce(4, whole)
        .final_state(5);
    OptGrammar {
        tables: b.build().unwrap(),
        whole,
        none,
        some,
    }
}

/// One token per non-blank character; the value is the character itself.
/// Characters are laid out on line 0, one column each.
pub(crate) fn tokens(text: &str) -> Vec<Token<String>> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(i, c)| {
            let mut value = String::new();
            value.push(c);
            Token::new(c as i32, value, crate::span!(0, i, 0, i + 1))
        })
        .collect()
}

