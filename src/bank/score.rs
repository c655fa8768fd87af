use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Named score dimension, used as a key into per-term score tables.
///
/// `name` is the stable key, `label` is what the CSV header shows.
/// Several score types can be active on one store; the first registered one
/// is the default used for ranking and thresholds.
///
/// Equality, hashing and ordering look at the name only, so a score type
/// rebuilt from its name finds the tables registered under any label.
#[derive(Clone)]
pub struct ScoreType {
    name: Arc<str>,
    label: Arc<str>,
}

impl ScoreType {
    /// Score type whose display label is its name
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            label: Arc::from(name),
        }
    }

    pub fn with_label(name: &str, label: &str) -> Self {
        Self {
            name: Arc::from(name),
            label: Arc::from(label),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for ScoreType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ScoreType {}

impl Hash for ScoreType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for ScoreType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl fmt::Debug for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScoreType({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn identity_is_the_name() {
        let labelled = ScoreType::with_label("termFrequency", "Term frequency");
        let bare = ScoreType::new("termFrequency");
        assert_eq!(labelled, bare);
        assert_ne!(labelled, ScoreType::new("tfIdf"));
        assert_eq!(labelled.to_string(), "Term frequency");

        let set: HashSet<ScoreType> = [labelled, bare].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
