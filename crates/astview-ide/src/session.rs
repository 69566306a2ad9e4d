use std::collections::HashMap;

use astview_compiler::Compiler;
use astview_inputs::{ContentChange, Document, DocumentId, Range};
use camino::Utf8PathBuf;

use crate::change::{ChangeBridge, TreeUpdate};
use crate::highlight::{Highlight, HighlightBridge};
use crate::tree::{NodePath, TreeAdapter, TreeItem};
use crate::{Config, ReparsePolicy};

/// Something the host has to do after an event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    /// The tree of this document changed and the view must refresh.
    /// `None` when the tree was discarded.
    TreeChanged(Option<DocumentId>),
    Highlight(Highlight),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    NoDocument,
    WithDocument,
}

/// One syntax tree panel: the open documents, which of them is focused, the
/// panel visibility and the tree of the active document.
///
/// A document is active while it is focused, open and the panel is visible.
/// Only the active document has a tree.
pub struct Session {
    tree: TreeAdapter,
    changes: ChangeBridge,
    highlights: HighlightBridge,
    documents: HashMap<DocumentId, Document>,
    focused: Option<DocumentId>,
    active: Option<DocumentId>,
    visible: bool,
}

impl Session {
    pub fn new(compiler: Box<dyn Compiler>, policy: ReparsePolicy) -> Self {
        Self {
            tree: TreeAdapter::new(compiler),
            changes: ChangeBridge::new(policy),
            highlights: HighlightBridge::default(),
            documents: HashMap::default(),
            focused: None,
            active: None,
            visible: false,
        }
    }

    pub fn with_config(compiler: Box<dyn Compiler>, config: &Config) -> Self {
        Self::new(compiler, config.reparse)
    }

    pub fn state(&self) -> SessionState {
        if self.active.is_some() { SessionState::WithDocument } else { SessionState::NoDocument }
    }

    pub fn active(&self) -> Option<&DocumentId> {
        self.active.as_ref()
    }

    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn policy(&self) -> ReparsePolicy {
        self.changes.policy()
    }

    pub fn tree(&self) -> &TreeAdapter {
        &self.tree
    }

    pub fn selection(&self) -> &[NodePath] {
        self.highlights.selection()
    }

    pub fn highlights(&self) -> &[Range] {
        self.highlights.highlights()
    }

    pub fn open(
        &mut self,
        id: DocumentId,
        path: impl Into<Utf8PathBuf>,
        text: String,
    ) -> Vec<Effect> {
        self.documents.insert(id.clone(), Document::new(path, text));

        if self.active.as_ref() == Some(&id) || self.focused.as_ref() == Some(&id) {
            return self.sync();
        }
        Vec::new()
    }

    pub fn close(&mut self, id: &DocumentId) -> Vec<Effect> {
        self.documents.remove(id);

        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
        if self.active.as_ref() == Some(id) {
            return self.sync();
        }
        Vec::new()
    }

    /// Applies an editor change batch. Signals at most one tree change.
    pub fn change(&mut self, id: &DocumentId, changes: Vec<ContentChange>) -> Vec<Effect> {
        let Some(document) = self.documents.get_mut(id) else {
            tracing::warn!(document = %id, "change for a document that is not open");
            return Vec::new();
        };

        let tree = if self.active.as_ref() == Some(id) { Some(&mut self.tree) } else { None };
        match self.changes.apply(document, changes, tree) {
            TreeUpdate::Untouched => Vec::new(),
            TreeUpdate::Incremental { .. } | TreeUpdate::Reparsed => {
                vec![Effect::TreeChanged(Some(id.clone()))]
            }
        }
    }

    /// The focused editor changed; `None` when no editor has focus.
    pub fn focus(&mut self, id: Option<DocumentId>) -> Vec<Effect> {
        self.focused = id;
        self.sync()
    }

    pub fn set_visible(&mut self, visible: bool) -> Vec<Effect> {
        if self.visible == visible {
            return Vec::new();
        }
        self.visible = visible;

        let mut effects = self.sync();
        if visible && let Some(highlight) = self.show_highlights() {
            effects.push(Effect::Highlight(highlight));
        }
        effects
    }

    /// The tree-view selection changed.
    pub fn select(&mut self, nodes: Vec<NodePath>) -> Vec<Effect> {
        let owner = self.active.clone().or_else(|| self.focused.clone());
        self.highlights.select(owner, nodes);

        if !self.visible {
            return Vec::new();
        }
        self.show_highlights().map(Effect::Highlight).into_iter().collect()
    }

    pub fn children(&self, parent: Option<&NodePath>) -> Vec<NodePath> {
        self.tree.children(parent)
    }

    pub fn describe(&self, node: &NodePath) -> Option<TreeItem> {
        let document = self.active_document()?;
        self.tree.describe(node, document.text())
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.documents.get(self.active.as_ref()?)
    }

    fn show_highlights(&mut self) -> Option<Highlight> {
        let id = self.active.as_ref()?;
        let document = self.documents.get(id)?;
        Some(self.highlights.show(id, document, &self.tree))
    }

    /// Moves to the state implied by focus, visibility and open documents.
    fn sync(&mut self) -> Vec<Effect> {
        let target = self
            .focused
            .clone()
            .filter(|id| self.visible && self.documents.contains_key(id));

        match target {
            Some(id) => self.activate(id),
            None => self.deactivate(),
        }
    }

    fn activate(&mut self, id: DocumentId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.active.as_ref() != Some(&id) {
            effects.extend(self.highlights.hide().map(Effect::Highlight));
        }
        self.highlights.retarget(&id);

        let Some(document) = self.documents.get(&id) else {
            return effects;
        };
        self.tree.parse(document.text(), document.path());
        tracing::debug!(document = %id, "active document parsed");

        self.active = Some(id.clone());
        effects.push(Effect::TreeChanged(Some(id)));
        effects
    }

    fn deactivate(&mut self) -> Vec<Effect> {
        let mut effects: Vec<_> =
            self.highlights.hide().map(Effect::Highlight).into_iter().collect();
        if let Some(id) = self.active.take() {
            self.tree.clear();
            tracing::debug!(document = %id, "tree discarded");
            effects.push(Effect::TreeChanged(None));
        }
        effects
    }
}
