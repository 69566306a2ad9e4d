use std::fmt::Write as _;

use astview_compiler::{Compiler, SyntaxTree};
use astview_errors::Diagnostic;
use astview_inputs::Edit;
use camino::Utf8Path;
use text_size::{TextRange, TextSize};
use tree_sitter::Node;

/// Address of a node: child indices from the root node down.
///
/// The empty path is the root node itself. A path only means something
/// against the tree it was taken from.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NodePath(Vec<u32>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: u32) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for NodePath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Collapsible {
    None,
    Collapsed,
}

/// Display data of one node in the tree view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeItem {
    pub path: NodePath,
    pub label: String,
    pub description: Option<String>,
    pub collapsible: Collapsible,
    pub kind: &'static str,
    pub range: TextRange,
    pub error: bool,
}

/// Owns the syntax tree of the active document.
pub struct TreeAdapter {
    compiler: Box<dyn Compiler>,
    tree: Option<SyntaxTree>,
}

impl TreeAdapter {
    pub fn new(compiler: Box<dyn Compiler>) -> Self {
        Self { compiler, tree: None }
    }

    pub fn compiler_name(&self) -> &'static str {
        self.compiler.name()
    }

    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    /// Replaces the current tree with a fresh parse of `text`.
    pub fn parse(&mut self, text: &str, file_name: &Utf8Path) {
        self.tree = Some(self.compiler.parse(text, file_name));
    }

    /// Updates the tree over a single edit; `text` is the document after it.
    pub fn apply_edit(&mut self, edit: &Edit, text: &str, file_name: &Utf8Path) {
        self.apply_edits(std::slice::from_ref(edit), text, file_name);
    }

    /// Updates the tree over `edits`, in order, and reparses once.
    ///
    /// Falls back to a full parse when no tree is loaded.
    pub fn apply_edits(&mut self, edits: &[Edit], text: &str, file_name: &Utf8Path) {
        let Some(mut tree) = self.tree.take() else {
            self.parse(text, file_name);
            return;
        };

        for edit in edits {
            tree.edit(edit);
        }
        self.tree = Some(self.compiler.update(&tree, text));
    }

    pub fn clear(&mut self) {
        self.tree = None;
    }

    /// Children of `parent`, or of the root node when `parent` is `None`.
    pub fn children(&self, parent: Option<&NodePath>) -> Vec<NodePath> {
        let parent = parent.cloned().unwrap_or_default();
        let Some(node) = self.node(&parent) else {
            return Vec::new();
        };

        (0..node.child_count() as u32).map(|index| parent.child(index)).collect()
    }

    pub fn describe(&self, path: &NodePath, text: &str) -> Option<TreeItem> {
        let tree = self.tree.as_ref()?;
        let node = self.node(path)?;

        let kind = self.compiler.kind_name(tree.dialect(), node.kind_id());
        let range = text_range(node);
        let description = if self.compiler.is_identifier(kind) {
            text.get(node.byte_range()).map(str::to_owned)
        } else {
            None
        };
        let collapsible =
            if node.child_count() > 0 { Collapsible::Collapsed } else { Collapsible::None };

        Some(TreeItem {
            path: path.clone(),
            label: format!("{kind} [{}, {})", u32::from(range.start()), u32::from(range.end())),
            description,
            collapsible,
            kind,
            range,
            error: node.is_error() || node.is_missing(),
        })
    }

    pub fn range(&self, path: &NodePath) -> Option<TextRange> {
        self.node(path).map(text_range)
    }

    /// One diagnostic per `ERROR` node and per `MISSING` node.
    pub fn syntax_errors(&self) -> Vec<Diagnostic> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        let mut cursor = tree.root().walk();
        'walk: loop {
            let node = cursor.node();
            if node.is_error() {
                diagnostics.push(Diagnostic::error("unexpected syntax", text_range(node)));
            } else if node.is_missing() {
                let message = format!("missing `{}`", node.kind());
                diagnostics.push(Diagnostic::error(message, text_range(node)));
            }

            if !node.is_error() && node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        diagnostics
    }

    /// Renders the whole tree, one item per line, children indented.
    pub fn dump(&self, text: &str) -> String {
        let mut out = String::new();
        if self.is_loaded() {
            self.dump_node(&NodePath::root(), text, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, path: &NodePath, text: &str, depth: usize, out: &mut String) {
        let Some(item) = self.describe(path, text) else {
            return;
        };

        _ = write!(out, "{:indent$}{}", "", item.label, indent = depth * 2);
        if let Some(description) = &item.description {
            _ = write!(out, " {description:?}");
        }
        if item.error {
            out.push_str(" !");
        }
        out.push('\n');

        for child in self.children(Some(path)) {
            self.dump_node(&child, text, depth + 1, out);
        }
    }

    fn node(&self, path: &NodePath) -> Option<Node<'_>> {
        let mut node = self.tree.as_ref()?.root();
        for &index in path.indices() {
            node = node.child(index as usize)?;
        }
        Some(node)
    }
}

fn text_range(node: Node<'_>) -> TextRange {
    let offset = |byte: usize| TextSize::new(u32::try_from(byte).unwrap_or(u32::MAX));
    TextRange::new(offset(node.start_byte()), offset(node.end_byte()))
}
