use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Lightweight reference to a source document.
///
/// Used as a deduplicating key for "which documents mention this term",
/// never as a handle to document content.
/// Identity is (identifier, index): two positions of the same logical
/// document are distinct. The source URL is carried along but ignored.
#[derive(Clone)]
pub struct DocumentIdentifier {
    identifier: Arc<str>,
    index: usize,
    source_url: Option<Arc<str>>,
}

impl DocumentIdentifier {
    pub fn new(identifier: &str, index: usize) -> Self {
        Self {
            identifier: Arc::from(identifier),
            index,
            source_url: None,
        }
    }

    pub fn with_source_url(mut self, url: &str) -> Self {
        self.source_url = Some(Arc::from(url));
        self
    }

    /// Logical document id or source URL string
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Position within the processed corpus
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }
}

impl PartialEq for DocumentIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.identifier == other.identifier
    }
}

impl Eq for DocumentIdentifier {}

impl Hash for DocumentIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
        self.index.hash(state);
    }
}

impl PartialOrd for DocumentIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocumentIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier
            .cmp(&other.identifier)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl fmt::Display for DocumentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.identifier, self.index)
    }
}

impl fmt::Debug for DocumentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentIdentifier({})", self)
    }
}
