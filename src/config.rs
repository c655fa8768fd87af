//! Aggregation parameters.
//!
//! [`TermbankConfig`] names which annotation kinds count as terms, which
//! document feature supplies the document identifier, and how close two
//! occurrences must be to count as a co-occurrence.
//!
//! ```rust
//! use termbank::TermbankConfig;
//!
//! let config = TermbankConfig::default();
//! config.validate().expect("default configuration is valid");
//! assert!(config.input_annotation_types.contains("SingleWord"));
//! ```
use std::{collections::BTreeSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TermbankError};

pub const DEFAULT_PAIR_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermbankConfig {
    /// Annotation kinds that become terms
    pub input_annotation_types: BTreeSet<String>,
    /// Document feature holding the identifier; `None` uses the source URL,
    /// falling back to the document name
    pub id_document_feature: Option<String>,
    /// Maximum position distance between two occurrences counted as co-occurring
    pub pair_window: usize,
}

impl Default for TermbankConfig {
    fn default() -> Self {
        Self {
            input_annotation_types: ["SingleWord", "MultiWord"].iter().map(|s| s.to_string()).collect(),
            id_document_feature: None,
            pair_window: DEFAULT_PAIR_WINDOW,
        }
    }
}

impl TermbankConfig {
    /// Check the configuration before any aggregation starts
    pub fn validate(&self) -> Result<()> {
        if self.input_annotation_types.is_empty() {
            return Err(TermbankError::InvalidConfig(
                "input_annotation_types must name at least one annotation type".to_string(),
            ));
        }
        if self.input_annotation_types.iter().any(|t| t.trim().is_empty()) {
            return Err(TermbankError::InvalidConfig(
                "input_annotation_types contains a blank entry".to_string(),
            ));
        }
        if matches!(&self.id_document_feature, Some(f) if f.trim().is_empty()) {
            return Err(TermbankError::InvalidConfig(
                "id_document_feature is blank; omit it to use the source URL".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TermbankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TermbankConfig =
            serde_json::from_str(&text).map_err(|source| TermbankError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Whether annotations of this kind become terms
    #[inline]
    pub fn accepts(&self, annotation_type: &str) -> bool {
        self.input_annotation_types.contains(annotation_type)
    }
}
