//! Reference checker for pack documents.
//!
//! Walks every YAML document in the pack's category folders, searches
//! each for the tags configured for its category, and verifies that
//! every reference found resolves to an existing action document or
//! entry-point file. Unresolved references are reported through the
//! diagnostic sink and never abort the scan; unreadable or malformed
//! documents are fatal.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::document::{find_tag, load_document};
use crate::pack::{Pack, ACTIONS_DIR, RULES_DIR, WORKFLOWS_DIR};
use crate::reference::ActionRef;

/// Namespace validated when none is configured.
pub const DEFAULT_NAMESPACE: &str = "snpseq_packs";

/// Document categories scanned by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Actions,
    Workflows,
    Rules,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Actions, Category::Workflows, Category::Rules];

    /// Folder holding this category's documents, relative to the pack root.
    pub fn folder(&self) -> &'static str {
        match self {
            Category::Actions => ACTIONS_DIR,
            Category::Workflows => WORKFLOWS_DIR,
            Category::Rules => RULES_DIR,
        }
    }

    /// Tags searched in this category's documents.
    pub fn tags(&self) -> &'static [Tag] {
        match self {
            Category::Actions => &[Tag::EntryPoint, Tag::Workflow],
            Category::Workflows => &[Tag::Action],
            Category::Rules => &[Tag::Ref],
        }
    }
}

/// Reference-carrying tags, each with its own resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `entry_point` in action documents: a filename under `actions/`.
    EntryPoint,
    /// `workflow` in action documents: a block whose `default` field
    /// names a workflow as `<namespace>.<name>`.
    Workflow,
    /// `action` in workflow task definitions: bare or namespaced.
    Action,
    /// `ref` in rule documents: bare or namespaced.
    Ref,
}

impl Tag {
    /// The document key this tag is searched under.
    pub fn key(&self) -> &'static str {
        match self {
            Tag::EntryPoint => "entry_point",
            Tag::Workflow => "workflow",
            Tag::Action => "action",
            Tag::Ref => "ref",
        }
    }
}

/// The `workflow` block inside an action document.
#[derive(Debug, Deserialize)]
struct WorkflowBlock {
    default: Option<String>,
}

/// Tally of a completed scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckSummary {
    /// Documents loaded and searched.
    pub documents: usize,
    /// References whose existence was checked.
    pub references: usize,
    /// Error-level diagnostics emitted (unresolved or malformed references).
    pub errors: usize,
}

impl CheckSummary {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Validates cross-references for one pack.
pub struct Checker<'a> {
    pack: Pack,
    namespace: String,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Checker<'a> {
    pub fn new(pack: Pack, namespace: impl Into<String>, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            pack,
            namespace: namespace.into(),
            sink,
        }
    }

    /// Scan every category and validate all references found.
    ///
    /// Missing references are reported and counted; only IO and parse
    /// failures return an error.
    pub fn check_pack(&self) -> Result<CheckSummary> {
        let mut summary = CheckSummary::default();
        for category in Category::ALL {
            self.check_category(category, &mut summary)?;
        }
        Ok(summary)
    }

    fn check_category(&self, category: Category, summary: &mut CheckSummary) -> Result<()> {
        for path in self.pack.documents_in(category.folder())? {
            self.sink.emit(
                Severity::Debug,
                &format!("Found document: {}", path.display()),
            );

            let document = load_document(&path)?;
            summary.documents += 1;

            for tag in category.tags() {
                self.check_tag(&path, &document, *tag, summary);
            }
        }
        Ok(())
    }

    fn check_tag(&self, path: &Path, document: &Mapping, tag: Tag, summary: &mut CheckSummary) {
        for value in find_tag(document, tag.key()) {
            match tag {
                Tag::EntryPoint => self.check_entry_point(path, value, summary),
                Tag::Workflow => self.check_workflow(path, value, summary),
                Tag::Action | Tag::Ref => self.check_action_ref(path, value, tag, summary),
            }
        }
    }

    /// `entry_point` policy: a bare filename relative to `actions/`.
    fn check_entry_point(&self, path: &Path, value: &Value, summary: &mut CheckSummary) {
        // Runner kinds like run-local or remote-shell-cmd have no
        // value for entry_point; both `entry_point: ''` and a bare
        // `entry_point:` key count as absent.
        if value.is_null() {
            return;
        }

        let Some(entry_point) = value.as_str() else {
            self.report_malformed(path, Tag::EntryPoint, summary);
            return;
        };

        if entry_point.is_empty() {
            return;
        }

        summary.references += 1;
        if self.pack.has_action_file(entry_point) {
            self.sink.emit(
                Severity::Debug,
                &format!("In file {}: {} exists", path.display(), entry_point),
            );
        } else {
            self.report_missing(path, entry_point, summary);
        }
    }

    /// `workflow` policy: the block's `default` field names a workflow
    /// as `<namespace>.<name>`; only the local namespace is resolved.
    fn check_workflow(&self, path: &Path, value: &Value, summary: &mut CheckSummary) {
        let block: WorkflowBlock = match serde_yaml::from_value(value.clone()) {
            Ok(block) => block,
            Err(_) => {
                self.report_malformed(path, Tag::Workflow, summary);
                return;
            }
        };

        let Some(default) = block.default else {
            self.error(
                summary,
                format!(
                    "In file {}: workflow block has no 'default' reference",
                    path.display()
                ),
            );
            return;
        };

        let reference = ActionRef::parse(&default);
        if reference.is_local(&self.namespace) {
            self.check_action(path, reference.name(), summary);
        }
        // References into other packs are left unvalidated.
    }

    /// `action` / `ref` policy: bare names resolve directly; namespaced
    /// names resolve only within the local namespace.
    fn check_action_ref(&self, path: &Path, value: &Value, tag: Tag, summary: &mut CheckSummary) {
        let Some(raw) = value.as_str() else {
            self.report_malformed(path, tag, summary);
            return;
        };

        let reference = ActionRef::parse(raw);
        if reference.is_bare() || reference.is_local(&self.namespace) {
            self.check_action(path, reference.name(), summary);
        }
    }

    /// Check that `actions/<name>.yaml` exists in the pack.
    fn check_action(&self, path: &Path, name: &str, summary: &mut CheckSummary) {
        summary.references += 1;
        if self.pack.has_action(name) {
            self.sink.emit(
                Severity::Debug,
                &format!("In file {}: {} exists", path.display(), name),
            );
        } else {
            self.report_missing(path, name, summary);
        }
    }

    fn report_missing(&self, path: &Path, target: &str, summary: &mut CheckSummary) {
        self.error(
            summary,
            format!("In file {}: {} does not exist!", path.display(), target),
        );
    }

    fn report_malformed(&self, path: &Path, tag: Tag, summary: &mut CheckSummary) {
        self.error(
            summary,
            format!(
                "In file {}: '{}' value is not a usable reference",
                path.display(),
                tag.key()
            ),
        );
    }

    fn error(&self, summary: &mut CheckSummary, message: String) {
        summary.errors += 1;
        self.sink.emit(Severity::Error, &message);
    }
}
