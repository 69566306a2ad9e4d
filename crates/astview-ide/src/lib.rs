//! Host-independent core of the syntax tree panel.

mod change;
mod highlight;
mod session;
mod shell;
#[cfg(test)]
mod tests;
mod tree;

use std::fmt;
use std::str::FromStr;

pub use astview_compiler::{COMPILERS, ResolveError};
pub use astview_inputs::{ContentChange, Document, DocumentId, Position, Range};
use serde::Deserialize;

pub use crate::change::{ChangeBridge, TreeUpdate};
pub use crate::highlight::{Highlight, HighlightBridge};
pub use crate::session::{Effect, Session, SessionState};
pub use crate::shell::{Shell, ShellState};
pub use crate::tree::{Collapsible, NodePath, TreeAdapter, TreeItem};

/// How a change batch reaches the tree.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ReparsePolicy {
    /// Edit the tree and reparse it with the old tree as a hint.
    #[default]
    Incremental,
    /// Reparse the whole document.
    Full,
}

impl FromStr for ReparsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incremental" => Ok(Self::Incremental),
            "full" => Ok(Self::Full),
            _ => Err(format!("unknown reparse policy `{s}`, expected `incremental` or `full`")),
        }
    }
}

impl fmt::Display for ReparsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Incremental => "incremental",
            Self::Full => "full",
        })
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Registered name of the compiler to resolve at startup.
    pub compiler: String,
    pub reparse: ReparsePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self { compiler: "typescript".to_owned(), reparse: ReparsePolicy::default() }
    }
}
