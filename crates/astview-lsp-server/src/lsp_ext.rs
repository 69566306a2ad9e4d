//! `astview/*` protocol extensions spoken with the panel client.

use lsp_types::notification::Notification;
use lsp_types::request::Request;
use lsp_types::{Range, Uri};
use serde::{Deserialize, Serialize};

/// Child-index path of a node from the root node.
pub type NodePath = Vec<u32>;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    None,
    Collapsed,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub path: NodePath,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub collapsible: Collapsible,
    pub kind: String,
    pub range: Range,
    pub error: bool,
}

pub enum Children {}

impl Request for Children {
    type Params = ChildrenParams;
    type Result = Vec<TreeItem>;
    const METHOD: &'static str = "astview/children";
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenParams {
    /// `None` lists the children of the root node.
    pub parent: Option<NodePath>,
}

pub enum Describe {}

impl Request for Describe {
    type Params = DescribeParams;
    type Result = Option<TreeItem>;
    const METHOD: &'static str = "astview/describe";
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeParams {
    pub node: NodePath,
}

pub enum ActiveEditorChanged {}

impl Notification for ActiveEditorChanged {
    type Params = ActiveEditorChangedParams;
    const METHOD: &'static str = "astview/activeEditorChanged";
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEditorChangedParams {
    pub uri: Option<Uri>,
}

pub enum VisibilityChanged {}

impl Notification for VisibilityChanged {
    type Params = VisibilityChangedParams;
    const METHOD: &'static str = "astview/visibilityChanged";
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityChangedParams {
    pub visible: bool,
}

pub enum SelectionChanged {}

impl Notification for SelectionChanged {
    type Params = SelectionChangedParams;
    const METHOD: &'static str = "astview/selectionChanged";
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionChangedParams {
    pub nodes: Vec<NodePath>,
}

/// Server to client: the tree of `uri` changed, or was discarded when `uri`
/// is `None`.
pub enum TreeChanged {}

impl Notification for TreeChanged {
    type Params = TreeChangedParams;
    const METHOD: &'static str = "astview/treeChanged";
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeChangedParams {
    pub uri: Option<Uri>,
}

/// Server to client: decorate exactly `ranges` in `uri`.
pub enum Highlight {}

impl Notification for Highlight {
    type Params = HighlightParams;
    const METHOD: &'static str = "astview/highlight";
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightParams {
    pub uri: Uri,
    pub ranges: Vec<Range>,
}
