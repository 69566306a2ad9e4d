mod api;
pub mod lsp_ext;
mod notifications;
mod requests;

use anyhow::Result;
use astview_ide::{Config, DocumentId, Effect, Highlight, ReparsePolicy, Shell};
use serde::Deserialize;

pub struct Server {
    connection: lsp_server::Connection,
    io_threads: Option<lsp_server::IoThreads>,
    shell: Shell,
}

/// The subset of [`Config`] a client may set in `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializationOptions {
    compiler: Option<String>,
    reparse: Option<ReparsePolicy>,
}

impl Server {
    fn server_capabilities() -> lsp_types::ServerCapabilities {
        lsp_types::ServerCapabilities {
            text_document_sync: Some(lsp_types::TextDocumentSyncCapability::Options(
                lsp_types::TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(lsp_types::TextDocumentSyncKind::INCREMENTAL),
                    ..lsp_types::TextDocumentSyncOptions::default()
                },
            )),
            experimental: Some(serde_json::json!({ "syntaxTreeView": true })),
            ..lsp_types::ServerCapabilities::default()
        }
    }

    /// Serves over stdin/stdout.
    pub fn stdio(config: Config) -> Result<Self> {
        let (connection, io_threads) = lsp_server::Connection::stdio();
        Self::new(connection, Some(io_threads), config)
    }

    /// Runs the initialize handshake on `connection` and resolves the
    /// compiler. `config` is overridden by the client's initialization
    /// options.
    pub fn new(
        connection: lsp_server::Connection,
        io_threads: Option<lsp_server::IoThreads>,
        mut config: Config,
    ) -> Result<Self> {
        let (initialize_id, initialize_params) = match connection.initialize_start() {
            Ok(it) => it,
            Err(protocol_error) => {
                if protocol_error.channel_is_disconnected()
                    && let Some(io_threads) = io_threads
                {
                    io_threads.join()?;
                }
                return Err(protocol_error.into());
            }
        };

        let initialize_params: lsp_types::InitializeParams =
            from_json("InitializeParams", &initialize_params)?;
        if let Some(options) = &initialize_params.initialization_options {
            match from_json::<InitializationOptions>("initializationOptions", options) {
                Ok(options) => {
                    if let Some(compiler) = options.compiler {
                        config.compiler = compiler;
                    }
                    if let Some(reparse) = options.reparse {
                        config.reparse = reparse;
                    }
                }
                Err(error) => tracing::warn!(%error, "ignoring initialization options"),
            }
        }

        let initialize_data = serde_json::json!({
            "capabilities": Self::server_capabilities(),
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        });

        if let Err(protocol_error) = connection.initialize_finish(initialize_id, initialize_data) {
            if protocol_error.channel_is_disconnected()
                && let Some(io_threads) = io_threads
            {
                io_threads.join()?;
            }
            return Err(protocol_error.into());
        }

        let mut server = Self { connection, io_threads, shell: Shell::default() };
        server.activate(&config);
        Ok(server)
    }

    fn activate(&mut self, config: &Config) {
        let message = match self.shell.activate(config) {
            Ok(_) => return,
            Err(error) => format!("Syntax tree view unavailable: {error}"),
        };

        self.notify::<lsp_types::notification::ShowMessage>(lsp_types::ShowMessageParams {
            typ: lsp_types::MessageType::ERROR,
            message,
        });
    }

    fn send(&self, message: lsp_server::Message) {
        if let Err(error) = self.connection.sender.send(message) {
            tracing::error!(%error, "client connection closed");
        }
    }

    fn respond(&self, response: lsp_server::Response) {
        self.send(response.into());
    }

    fn notify<N>(&self, params: N::Params)
    where
        N: lsp_types::notification::Notification,
    {
        self.send(lsp_server::Notification::new(N::METHOD.to_owned(), params).into());
    }

    /// Forwards what the session asked for to the client.
    fn apply_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::TreeChanged(document) => {
                    let uri = document.as_ref().and_then(to_uri);
                    self.notify::<lsp_ext::TreeChanged>(lsp_ext::TreeChangedParams { uri });
                }
                Effect::Highlight(Highlight { document, ranges }) => {
                    let Some(uri) = to_uri(&document) else {
                        continue;
                    };
                    let ranges = ranges.into_iter().map(to_lsp_range).collect();
                    self.notify::<lsp_ext::Highlight>(lsp_ext::HighlightParams { uri, ranges });
                }
            }
        }
    }

    pub fn run(mut self) -> Result<()> {
        let receiver = self.connection.receiver.clone();
        for message in &receiver {
            match message {
                lsp_server::Message::Request(request) => {
                    if self.connection.handle_shutdown(&request)? {
                        break;
                    }
                    api::request(&mut self, request);
                }
                lsp_server::Message::Response(_response) => {}
                lsp_server::Message::Notification(notification) => {
                    api::notification(&mut self, notification);
                }
            }
        }

        let Self { connection, io_threads, shell: _ } = self;
        drop(connection);
        if let Some(io_threads) = io_threads {
            io_threads.join()?;
        }
        Ok(())
    }
}

fn from_json<T: serde::de::DeserializeOwned>(
    what: &'static str,
    json: &serde_json::Value,
) -> Result<T> {
    serde_json::from_value(json.clone())
        .map_err(|e| anyhow::format_err!("Failed to deserialize {what}: {e}; {json}"))
}

fn result_to_response<R>(
    id: lsp_server::RequestId,
    result: Result<R::Result>,
) -> lsp_server::Response
where
    R: lsp_types::request::Request,
    R::Params: serde::de::DeserializeOwned,
    R::Result: serde::Serialize,
{
    match result {
        Ok(resp) => lsp_server::Response::new_ok(id, &resp),
        Err(error) => lsp_server::Response::new_err(
            id,
            lsp_server::ErrorCode::InternalError as i32,
            error.to_string(),
        ),
    }
}

fn document_id(uri: &lsp_types::Uri) -> DocumentId {
    DocumentId::from(uri.as_str())
}

fn to_uri(document: &DocumentId) -> Option<lsp_types::Uri> {
    document
        .as_str()
        .parse()
        .inspect_err(|error| tracing::warn!(%document, ?error, "document id is not a uri"))
        .ok()
}

fn to_lsp_range(range: astview_ide::Range) -> lsp_types::Range {
    lsp_types::Range {
        start: lsp_types::Position::new(range.start.line, range.start.character),
        end: lsp_types::Position::new(range.end.line, range.end.character),
    }
}

fn from_lsp_range(range: lsp_types::Range) -> astview_ide::Range {
    astview_ide::Range::new(
        astview_ide::Position::new(range.start.line, range.start.character),
        astview_ide::Position::new(range.end.line, range.end.character),
    )
}
