//! # Parenthesized trees
//!
//! The semantic value built by [`ParenParser`](crate::ParenParser).

use smartstring::alias::String;
use std::fmt;

/// A parsed term: an atom, an atom wrapped in any number of parentheses,
/// or a hole left behind by error recovery.
///
/// # Example
/// ```rust
/// # use lalrex_paren::Tree;
/// let t = Tree::Nest(Box::new(Tree::Nest(Box::new(Tree::Atom("x".into())))));
/// assert_eq!(t.to_string(), "((x))");
/// assert_eq!(t.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Atom(String),
    Nest(Box<Tree>),
    /// Whatever the parser skipped while recovering from a syntax error.
    Missing,
}

impl Tree {
    /// Number of parentheses around the innermost term.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut tree = self;
        while let Tree::Nest(inner) = tree {
            depth += 1;
            tree = inner;
        }
        depth
    }

    /// True if recovery left a hole anywhere in the tree.
    pub fn is_partial(&self) -> bool {
        match self {
            Tree::Atom(_) => false,
            Tree::Nest(inner) => inner.is_partial(),
            Tree::Missing => true,
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Atom(name) => write!(f, "{}", name),
            Tree::Nest(inner) => write!(f, "({})", inner),
            Tree::Missing => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_depth() {
        let atom = Tree::Atom("abc".into());
        assert_eq!(atom.to_string(), "abc");
        assert_eq!(atom.depth(), 0);
        assert!(!atom.is_partial());

        let hole = Tree::Nest(Box::new(Tree::Missing));
        assert_eq!(hole.to_string(), "(?)");
        assert_eq!(hole.depth(), 1);
        assert!(hole.is_partial());
    }
}
