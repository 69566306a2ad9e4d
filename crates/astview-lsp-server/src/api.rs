use anyhow::Result;
use astview_ide::{ContentChange, NodePath, Session, TreeItem};

use super::notifications::NotificationDispatcher;
use super::requests::RequestDispatcher;
use super::{Server, document_id, from_lsp_range, lsp_ext, to_lsp_range};

pub(crate) fn request(server: &mut Server, request: lsp_server::Request) {
    RequestDispatcher::new(request, server)
        .on::<lsp_ext::Children>(handle_children)
        .on::<lsp_ext::Describe>(handle_describe)
        .finish();
}

fn handle_children(
    server: &mut Server,
    params: lsp_ext::ChildrenParams,
) -> Result<Vec<lsp_ext::TreeItem>> {
    let Some(session) = server.shell.session() else {
        return Ok(Vec::new());
    };

    let parent = params.parent.map(NodePath::from);
    let items = session
        .children(parent.as_ref())
        .iter()
        .filter_map(|node| session.describe(node))
        .map(|item| to_lsp_item(session, item))
        .collect();
    Ok(items)
}

fn handle_describe(
    server: &mut Server,
    params: lsp_ext::DescribeParams,
) -> Result<Option<lsp_ext::TreeItem>> {
    let Some(session) = server.shell.session() else {
        return Ok(None);
    };

    let item = session.describe(&NodePath::from(params.node));
    Ok(item.map(|item| to_lsp_item(session, item)))
}

fn to_lsp_item(session: &Session, item: TreeItem) -> lsp_ext::TreeItem {
    let range = session
        .active_document()
        .map(|document| to_lsp_range(document.range(item.range)))
        .unwrap_or_default();

    lsp_ext::TreeItem {
        path: item.path.indices().to_vec(),
        label: item.label,
        description: item.description,
        collapsible: match item.collapsible {
            astview_ide::Collapsible::None => lsp_ext::Collapsible::None,
            astview_ide::Collapsible::Collapsed => lsp_ext::Collapsible::Collapsed,
        },
        kind: item.kind.to_owned(),
        range,
        error: item.error,
    }
}

pub(crate) fn notification(server: &mut Server, notification: lsp_server::Notification) {
    NotificationDispatcher::new(notification, server)
        .on::<lsp_types::notification::DidOpenTextDocument>(handle_did_open_text_document)
        .on::<lsp_types::notification::DidChangeTextDocument>(handle_did_change_text_document)
        .on::<lsp_types::notification::DidCloseTextDocument>(handle_did_close_text_document)
        .on::<lsp_ext::ActiveEditorChanged>(handle_active_editor_changed)
        .on::<lsp_ext::VisibilityChanged>(handle_visibility_changed)
        .on::<lsp_ext::SelectionChanged>(handle_selection_changed)
        .finish();
}

/// Runs `f` on the session and forwards its effects. Does nothing while the
/// view is unavailable.
fn with_session(
    server: &mut Server,
    f: impl FnOnce(&mut Session) -> Vec<astview_ide::Effect>,
) -> Result<()> {
    let Some(session) = server.shell.session_mut() else {
        return Ok(());
    };

    let effects = f(session);
    server.apply_effects(effects);
    Ok(())
}

fn handle_did_open_text_document(
    server: &mut Server,
    params: lsp_types::DidOpenTextDocumentParams,
) -> Result<()> {
    let lsp_types::TextDocumentItem { uri, language_id: _, version: _, text } =
        params.text_document;
    let path = camino::Utf8PathBuf::from(uri.path().as_str());

    with_session(server, |session| session.open(document_id(&uri), path, text))
}

fn handle_did_change_text_document(
    server: &mut Server,
    params: lsp_types::DidChangeTextDocumentParams,
) -> Result<()> {
    let id = document_id(&params.text_document.uri);
    let changes = params
        .content_changes
        .into_iter()
        .map(|change| ContentChange { range: change.range.map(from_lsp_range), text: change.text })
        .collect();

    with_session(server, |session| session.change(&id, changes))
}

#[expect(clippy::needless_pass_by_value)]
fn handle_did_close_text_document(
    server: &mut Server,
    params: lsp_types::DidCloseTextDocumentParams,
) -> Result<()> {
    let id = document_id(&params.text_document.uri);
    with_session(server, |session| session.close(&id))
}

fn handle_active_editor_changed(
    server: &mut Server,
    params: lsp_ext::ActiveEditorChangedParams,
) -> Result<()> {
    let id = params.uri.map(|uri| document_id(&uri));
    with_session(server, |session| session.focus(id))
}

#[expect(clippy::needless_pass_by_value)]
fn handle_visibility_changed(
    server: &mut Server,
    params: lsp_ext::VisibilityChangedParams,
) -> Result<()> {
    with_session(server, |session| session.set_visible(params.visible))
}

fn handle_selection_changed(
    server: &mut Server,
    params: lsp_ext::SelectionChangedParams,
) -> Result<()> {
    let nodes = params.nodes.into_iter().map(NodePath::from).collect();
    with_session(server, |session| session.select(nodes))
}
