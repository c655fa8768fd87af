use std::{fmt, sync::Arc};

/// Term struct
/// Identity of a linguistic unit to be ranked: surface form, language code and type.
///
/// Two terms are equal only if all three fields are equal. An empty language
/// code is a concrete value for equality, not a wildcard (see [`Term::close_match`]).
///
/// The natural ordering is lexicographic over (surface, language code, type).
/// It is used for deterministic tie-breaking only; a term does not know its score.
///
/// Fields are shared strings, so cloning a term into several maps is cheap.
///
/// # Examples
/// ```
/// use termbank::Term;
/// let a = Term::new("cell", "en", "SingleWord");
/// let b = Term::new("cell", "", "SingleWord");
/// assert_ne!(a, b);
/// assert!(a.close_match(&b));
/// assert_eq!(a.to_string(), "cell (en,SingleWord)");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    // declaration order defines the derived ordering
    surface: Arc<str>,
    language_code: Arc<str>,
    term_type: Arc<str>,
}

impl Term {
    /// Create a new term
    ///
    /// # Arguments
    /// * `surface` - surface string of the term
    /// * `language_code` - language code, empty when unspecified
    /// * `term_type` - annotation kind the term came from
    pub fn new(surface: &str, language_code: &str, term_type: &str) -> Self {
        Self {
            surface: Arc::from(surface),
            language_code: Arc::from(language_code),
            term_type: Arc::from(term_type),
        }
    }

    /// Surface string
    #[inline]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Language code, empty when unspecified
    #[inline]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Annotation kind
    #[inline]
    pub fn term_type(&self) -> &str {
        &self.term_type
    }

    /// Whether an entry from an external frequency table is usable for this term.
    /// Surface and type must match exactly; the language code is ignored when
    /// either side is empty, but must match when both are set.
    pub fn close_match(&self, other: &Term) -> bool {
        if self.surface != other.surface || self.term_type != other.term_type {
            return false;
        }
        if self.language_code.is_empty() || other.language_code.is_empty() {
            return true;
        }
        self.language_code == other.language_code
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.language_code.is_empty() {
            write!(f, "{} ({})", self.surface, self.term_type)
        } else {
            write!(f, "{} ({},{})", self.surface, self.language_code, self.term_type)
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self)
    }
}
