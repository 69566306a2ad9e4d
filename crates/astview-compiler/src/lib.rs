//! The compiler capability behind the syntax tree view.
//!
//! A [`Compiler`] parses a document into a [`SyntaxTree`], updates an edited
//! tree incrementally and names node kinds. Implementations are registered by
//! name and picked once at startup with [`resolve`].

mod dialect;
mod resolve;
mod tree_sitter_compiler;

use astview_inputs::Edit;
use camino::Utf8Path;
use tree_sitter::{InputEdit, Node, Point, Tree};

pub use crate::dialect::Dialect;
pub use crate::resolve::{COMPILERS, ResolveError, resolve};
pub use crate::tree_sitter_compiler::TreeSitterCompiler;

/// Node kinds whose source text is shown next to the kind name.
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "property_identifier",
    "type_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "private_property_identifier",
    "statement_identifier",
];

pub trait Compiler {
    fn name(&self) -> &'static str;

    /// Dialect used for a document named `file_name`.
    fn dialect(&self, file_name: &Utf8Path) -> Dialect;

    /// Parses `text` from scratch. Syntax errors end up as `ERROR` and
    /// `MISSING` nodes, never as failures.
    fn parse(&mut self, text: &str, file_name: &Utf8Path) -> SyntaxTree;

    /// Reparses `text` reusing `tree`, which must already carry every edit
    /// that turned its source into `text`.
    fn update(&mut self, tree: &SyntaxTree, text: &str) -> SyntaxTree;

    fn kind_name(&self, dialect: Dialect, kind_id: u16) -> &'static str {
        dialect.kind_name(kind_id)
    }

    fn is_identifier(&self, kind: &str) -> bool {
        IDENTIFIER_KINDS.contains(&kind)
    }
}

/// A parsed document together with the dialect that produced it.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    tree: Tree,
    dialect: Dialect,
}

impl SyntaxTree {
    pub(crate) fn new(tree: Tree, dialect: Dialect) -> Self {
        Self { tree, dialect }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Shifts the tree over a text edit ahead of [`Compiler::update`].
    pub fn edit(&mut self, edit: &Edit) {
        self.tree.edit(&InputEdit {
            start_byte: edit.start.into(),
            old_end_byte: edit.old_end.into(),
            new_end_byte: edit.new_end.into(),
            start_position: Point::new(
                edit.start_point.line as usize,
                edit.start_point.col as usize,
            ),
            old_end_position: Point::new(
                edit.old_end_point.line as usize,
                edit.old_end_point.col as usize,
            ),
            new_end_position: Point::new(
                edit.new_end_point.line as usize,
                edit.new_end_point.col as usize,
            ),
        });
    }
}
