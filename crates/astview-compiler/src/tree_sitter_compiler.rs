use camino::Utf8Path;
use tree_sitter::Parser;

use crate::{Compiler, Dialect, ResolveError, SyntaxTree};

/// How a compiler picks the grammar for a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Selection {
    /// By file extension, TypeScript when the extension is not recognized.
    ByExtension,
    Fixed(Dialect),
}

/// [`Compiler`] backed by the tree-sitter TypeScript and JavaScript grammars.
///
/// Keeps one parser per dialect so that incremental updates reuse the
/// parser that produced the tree.
pub struct TreeSitterCompiler {
    name: &'static str,
    selection: Selection,
    typescript: Parser,
    tsx: Parser,
    javascript: Parser,
}

impl TreeSitterCompiler {
    pub(crate) fn new(name: &'static str, selection: Selection) -> Result<Self, ResolveError> {
        Ok(Self {
            name,
            selection,
            typescript: parser(Dialect::TypeScript)?,
            tsx: parser(Dialect::Tsx)?,
            javascript: parser(Dialect::JavaScript)?,
        })
    }

    pub fn typescript() -> Result<Self, ResolveError> {
        Self::new("typescript", Selection::ByExtension)
    }

    pub fn javascript() -> Result<Self, ResolveError> {
        Self::new("javascript", Selection::Fixed(Dialect::JavaScript))
    }

    fn parser(&mut self, dialect: Dialect) -> &mut Parser {
        match dialect {
            Dialect::TypeScript => &mut self.typescript,
            Dialect::Tsx => &mut self.tsx,
            Dialect::JavaScript => &mut self.javascript,
        }
    }
}

fn parser(dialect: Dialect) -> Result<Parser, ResolveError> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|source| ResolveError::IncompatibleGrammar { dialect, source })?;
    Ok(parser)
}

impl Compiler for TreeSitterCompiler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn dialect(&self, file_name: &Utf8Path) -> Dialect {
        match self.selection {
            Selection::ByExtension => Dialect::from_path(file_name).unwrap_or(Dialect::TypeScript),
            Selection::Fixed(dialect) => dialect,
        }
    }

    fn parse(&mut self, text: &str, file_name: &Utf8Path) -> SyntaxTree {
        let dialect = self.dialect(file_name);
        let tree = self
            .parser(dialect)
            .parse(text, None)
            .expect("parser has a language and no timeout or cancellation");
        tracing::trace!(%dialect, %file_name, "parsed from scratch");
        SyntaxTree::new(tree, dialect)
    }

    fn update(&mut self, tree: &SyntaxTree, text: &str) -> SyntaxTree {
        let dialect = tree.dialect();
        let updated = self
            .parser(dialect)
            .parse(text, Some(tree.tree()))
            .expect("parser has a language and no timeout or cancellation");
        SyntaxTree::new(updated, dialect)
    }
}
