//! Reference identifiers found in pack documents.
//!
//! Action references come in two shapes: a bare name (`run_demux`)
//! resolved inside the local pack, or a namespaced name
//! (`snpseq_packs.run_demux`) whose prefix says which pack defines the
//! action. Only references into the local namespace are validated.

/// A reference to an action, optionally qualified by a pack namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    namespace: Option<String>,
    name: String,
}

impl ActionRef {
    /// Parse a raw reference string.
    ///
    /// Splits on the first `.`: the prefix becomes the namespace and the
    /// remainder the name, so action names may themselves contain dots.
    /// A string without a `.` is a bare reference.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('.') {
            Some((namespace, name)) => Self {
                namespace: Some(namespace.to_string()),
                name: name.to_string(),
            },
            None => Self {
                namespace: None,
                name: raw.to_string(),
            },
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is an unqualified reference.
    pub fn is_bare(&self) -> bool {
        self.namespace.is_none()
    }

    /// Whether this reference is qualified with the given namespace.
    pub fn is_local(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}
