use thiserror::Error;

use crate::{Compiler, Dialect, TreeSitterCompiler};

/// Names accepted by [`resolve`].
pub const COMPILERS: &[&str] = &["typescript", "javascript"];

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown compiler `{name}` (available: {})", .available.join(", "))]
    UnknownCompiler { name: String, available: Vec<&'static str> },

    #[error("the {dialect} grammar is incompatible with the tree-sitter runtime")]
    IncompatibleGrammar {
        dialect: Dialect,
        #[source]
        source: tree_sitter::LanguageError,
    },
}

/// Resolves the compiler registered under `name`.
pub fn resolve(name: &str) -> Result<Box<dyn Compiler>, ResolveError> {
    let compiler = match name {
        "typescript" => TreeSitterCompiler::typescript()?,
        "javascript" => TreeSitterCompiler::javascript()?,
        _ => {
            return Err(ResolveError::UnknownCompiler {
                name: name.to_owned(),
                available: COMPILERS.to_vec(),
            });
        }
    };

    tracing::debug!(compiler = name, "resolved compiler");
    Ok(Box::new(compiler))
}
