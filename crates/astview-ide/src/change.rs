use astview_inputs::{ContentChange, Document};

use crate::{ReparsePolicy, TreeAdapter};

/// What a change batch did to the tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeUpdate {
    /// The document has no tree, or the batch was empty.
    Untouched,
    Incremental { edits: usize },
    Reparsed,
}

/// Feeds editor change batches into the document mirror and the tree.
#[derive(Clone, Copy, Debug)]
pub struct ChangeBridge {
    policy: ReparsePolicy,
}

impl ChangeBridge {
    pub fn new(policy: ReparsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ReparsePolicy {
        self.policy
    }

    /// Applies `changes` in delivery order to `document`, then brings `tree`
    /// up to date with a single reparse.
    pub fn apply(
        &self,
        document: &mut Document,
        changes: impl IntoIterator<Item = ContentChange>,
        tree: Option<&mut TreeAdapter>,
    ) -> TreeUpdate {
        let mut edits = Vec::new();
        let mut applied = 0;
        let mut replaced = false;
        for change in changes {
            applied += 1;
            match document.apply_change(change) {
                Some(edit) => edits.push(edit),
                None => replaced = true,
            }
        }

        let Some(tree) = tree else {
            return TreeUpdate::Untouched;
        };
        if applied == 0 {
            return TreeUpdate::Untouched;
        }

        match self.policy {
            ReparsePolicy::Incremental if !replaced && tree.is_loaded() => {
                tree.apply_edits(&edits, document.text(), document.path());
                tracing::debug!(edits = edits.len(), "tree updated incrementally");
                TreeUpdate::Incremental { edits: edits.len() }
            }
            _ => {
                tree.parse(document.text(), document.path());
                tracing::debug!(changes = applied, policy = ?self.policy, "tree reparsed");
                TreeUpdate::Reparsed
            }
        }
    }
}
