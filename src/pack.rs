//! Pack layout model.
//!
//! A pack is a directory tree of YAML documents grouped into category
//! folders: `actions/` for action definitions, `actions/workflows/` for
//! workflow definitions, and `rules/` for rule definitions. Action and
//! workflow names are assumed to match their file names, so referenced
//! names are resolved as `actions/<name>.yaml` on disk.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Folder holding action documents, relative to the pack root.
pub const ACTIONS_DIR: &str = "actions";

/// Folder holding workflow documents, relative to the pack root.
pub const WORKFLOWS_DIR: &str = "actions/workflows";

/// Folder holding rule documents, relative to the pack root.
pub const RULES_DIR: &str = "rules";

/// Root directory of an automation pack.
#[derive(Debug, Clone)]
pub struct Pack {
    root: PathBuf,
}

impl Pack {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file referenced from an action's `entry_point`,
    /// resolved relative to `actions/`.
    pub fn action_file(&self, filename: &str) -> PathBuf {
        self.root.join(ACTIONS_DIR).join(filename)
    }

    /// Path of the document defining the named action.
    pub fn action_document(&self, name: &str) -> PathBuf {
        self.action_file(&format!("{name}.yaml"))
    }

    /// Whether the named action is defined in this pack.
    pub fn has_action(&self, name: &str) -> bool {
        self.action_document(name).is_file()
    }

    /// Whether an entry-point file exists under `actions/`.
    pub fn has_action_file(&self, filename: &str) -> bool {
        self.action_file(filename).is_file()
    }

    /// List the YAML documents directly inside a category folder.
    ///
    /// Subdirectories are not descended into (`actions/workflows/` lives
    /// inside `actions/` and is scanned as its own category). A missing
    /// or unreadable folder is an error.
    pub fn documents_in(&self, folder: &str) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(folder);
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read category directory: {}", dir.display()))?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("yaml") {
                continue;
            }
            if !path.is_file() {
                continue;
            }

            documents.push(path);
        }

        // read_dir order is platform-dependent; sort for stable diagnostics
        documents.sort();
        Ok(documents)
    }
}
