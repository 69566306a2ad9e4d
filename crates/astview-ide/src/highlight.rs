use astview_inputs::{Document, DocumentId, Range};

use crate::{NodePath, TreeAdapter};

/// A request to decorate exactly `ranges` in `document`, replacing whatever
/// was decorated there before. Empty `ranges` clear the decorations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Highlight {
    pub document: DocumentId,
    pub ranges: Vec<Range>,
}

/// Turns the tree-view selection into source highlights.
#[derive(Debug, Default)]
pub struct HighlightBridge {
    owner: Option<DocumentId>,
    selection: Vec<NodePath>,
    highlighted: Option<DocumentId>,
    ranges: Vec<Range>,
}

impl HighlightBridge {
    pub fn selection(&self) -> &[NodePath] {
        &self.selection
    }

    /// The current highlight set.
    pub fn highlights(&self) -> &[Range] {
        &self.ranges
    }

    pub fn select(&mut self, owner: Option<DocumentId>, nodes: Vec<NodePath>) {
        self.owner = owner;
        self.selection = nodes;
    }

    /// Drops the selection unless it was made in `document`.
    pub fn retarget(&mut self, document: &DocumentId) {
        if self.owner.as_ref() != Some(document) {
            self.owner = Some(document.clone());
            self.selection.clear();
        }
    }

    /// Recomputes the highlight set of `document` from the selection.
    /// Nodes that no longer resolve are skipped.
    pub fn show(&mut self, id: &DocumentId, document: &Document, tree: &TreeAdapter) -> Highlight {
        self.ranges = self
            .selection
            .iter()
            .filter_map(|node| tree.range(node))
            .map(|range| document.range(range))
            .collect();
        self.highlighted = Some(id.clone());

        Highlight { document: id.clone(), ranges: self.ranges.clone() }
    }

    /// Clears the highlight set, returning the request that clears it in the
    /// editor if anything was highlighted.
    pub fn hide(&mut self) -> Option<Highlight> {
        let document = self.highlighted.take();
        let had_ranges = !self.ranges.is_empty();
        self.ranges.clear();

        document.filter(|_| had_ranges).map(|document| Highlight { document, ranges: Vec::new() })
    }
}
