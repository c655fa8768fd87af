use std::{collections::BTreeMap, fs, path::Path};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    bank::DocumentIdentifier,
    config::TermbankConfig,
    error::{Result, TermbankError},
};

/// One term candidate produced by the external annotation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermAnnotation {
    /// Annotation kind, e.g. `SingleWord`
    #[serde(rename = "type")]
    pub annotation_type: String,
    /// Surface string (or the annotation's string feature)
    pub surface: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Offset of the occurrence within its document
    pub position: usize,
}

impl TermAnnotation {
    pub fn new(annotation_type: &str, surface: &str, position: usize) -> Self {
        Self {
            annotation_type: annotation_type.to_string(),
            surface: surface.to_string(),
            language: None,
            position,
        }
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

/// A document already annotated with term candidates.
///
/// The core never parses document text; this is all it sees of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub name: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub features: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: Vec<TermAnnotation>,
}

impl AnnotatedDocument {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_source_url(mut self, url: &str) -> Self {
        self.source_url = Some(url.to_string());
        self
    }

    pub fn with_feature(mut self, key: &str, value: &str) -> Self {
        self.features.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_annotation(mut self, annotation: TermAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Load a corpus stored as one JSON document per line
    /// Blank lines are skipped. Lines are parsed in parallel; when several are
    /// malformed the error reports the first of them.
    pub fn read_json_lines<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TermbankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();
        let parsed: Vec<Result<Self>> = lines
            .into_par_iter()
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|source| TermbankError::Input {
                    path: path.to_path_buf(),
                    line: i + 1,
                    source,
                })
            })
            .collect();
        parsed.into_iter().collect()
    }

    /// Identifier for the document at `index` of the corpus.
    /// The configured feature wins, then the source URL, then the name.
    pub fn identifier(&self, index: usize, config: &TermbankConfig) -> DocumentIdentifier {
        let from_feature = config
            .id_document_feature
            .as_deref()
            .and_then(|key| self.features.get(key));
        let id = from_feature
            .or(self.source_url.as_ref())
            .unwrap_or(&self.name);
        let document = DocumentIdentifier::new(id, index);
        match &self.source_url {
            Some(url) => document.with_source_url(url),
            None => document,
        }
    }
}
