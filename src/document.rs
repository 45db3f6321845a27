//! YAML document loading and the generic tag search.
//!
//! Documents are parsed with `serde_yaml` into an untyped mapping and
//! searched for tagged fields without a fixed schema. The search only
//! descends into nested mappings; values nested inside sequences are
//! out of scope for the pack schemas this tool consumes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Error loading a pack document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse document '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("document '{path}' does not have a mapping at the top level")]
    NotAMapping { path: PathBuf },
}

/// Load and parse a YAML document, requiring a mapping at the top level.
///
/// Malformed YAML or a non-mapping top level is rejected here, before
/// any traversal happens.
pub fn load_document(path: &Path) -> Result<Mapping, DocumentError> {
    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_yaml::from_str(&raw).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(DocumentError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Search a document for every value held under `tag`, at any depth.
///
/// Traversal is depth-first in mapping entry order: a mapping's own
/// value for the tag is produced before anything found in its nested
/// mappings. Duplicate keys at different depths each produce a value.
/// Sequences are not descended into. The returned iterator is lazy;
/// call `find_tag` again to restart.
pub fn find_tag<'a>(document: &'a Mapping, tag: &str) -> TagMatches<'a> {
    TagMatches {
        key: Value::String(tag.to_string()),
        stack: vec![document],
    }
}

/// Iterator over the values found by [`find_tag`].
pub struct TagMatches<'a> {
    key: Value,
    stack: Vec<&'a Mapping>,
}

impl<'a> Iterator for TagMatches<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mapping) = self.stack.pop() {
            // Queue nested mappings before yielding the direct hit, so
            // the direct hit comes first and children keep entry order.
            let nested: Vec<&Mapping> = mapping
                .iter()
                .filter_map(|(_, value)| value.as_mapping())
                .collect();
            for child in nested.into_iter().rev() {
                self.stack.push(child);
            }

            if let Some(found) = mapping.get(&self.key) {
                return Some(found);
            }
        }
        None
    }
}
