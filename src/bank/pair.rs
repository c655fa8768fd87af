use std::fmt;

use super::term::Term;

/// Symmetric composite key over two distinct terms.
///
/// The members are stored in canonical order (`term0 <= term1` under the
/// natural [`Term`] ordering), so `new(a, b) == new(b, a)` and both hash
/// identically. The derived ordering of the pair is therefore
/// (term0, term1), which is the tie-break used when ranking pairs.
///
/// Callers must not build a pair from a term and itself; self-pairs carry no
/// co-occurrence meaning. This is checked in debug builds only.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnorderedTermPair {
    term0: Term,
    term1: Term,
}

impl UnorderedTermPair {
    pub fn new(a: Term, b: Term) -> Self {
        debug_assert!(a != b, "unordered term pair built from a single term: {a}");
        if a <= b {
            Self { term0: a, term1: b }
        } else {
            Self { term0: b, term1: a }
        }
    }

    /// The lesser member under the natural term ordering
    #[inline]
    pub fn term0(&self) -> &Term {
        &self.term0
    }

    /// The greater member under the natural term ordering
    #[inline]
    pub fn term1(&self) -> &Term {
        &self.term1
    }

    /// Whether `term` is one of the two members
    pub fn contains(&self, term: &Term) -> bool {
        &self.term0 == term || &self.term1 == term
    }
}

impl fmt::Display for UnorderedTermPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.term0, self.term1)
    }
}

impl fmt::Debug for UnorderedTermPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnorderedTermPair({})", self)
    }
}
