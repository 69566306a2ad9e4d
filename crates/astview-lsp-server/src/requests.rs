use anyhow::Result;

use super::{Server, from_json, result_to_response};

pub(crate) struct RequestDispatcher<'me> {
    request: Option<lsp_server::Request>,
    server: &'me mut Server,
}

impl<'me> RequestDispatcher<'me> {
    pub(crate) fn new(request: lsp_server::Request, server: &'me mut Server) -> Self {
        Self { request: request.into(), server }
    }

    fn parse<R>(&mut self) -> Option<(lsp_server::Request, R::Params)>
    where
        R: lsp_types::request::Request,
        R::Params: serde::de::DeserializeOwned + std::fmt::Debug,
    {
        let request = self.request.take_if(|request| request.method == R::METHOD)?;
        match from_json(R::METHOD, &request.params) {
            Ok(params) => Some((request, params)),
            Err(error) => {
                let response = lsp_server::Response::new_err(
                    request.id,
                    lsp_server::ErrorCode::InvalidParams as i32,
                    error.to_string(),
                );
                self.server.respond(response);
                None
            }
        }
    }

    pub(crate) fn on<R>(mut self, f: fn(&mut Server, R::Params) -> Result<R::Result>) -> Self
    where
        R: lsp_types::request::Request,
        R::Params: serde::de::DeserializeOwned + std::fmt::Debug,
        R::Result: serde::Serialize,
    {
        let Some((request, params)) = self.parse::<R>() else {
            return self;
        };
        tracing::trace!(method = R::METHOD, ?params, "request");

        let result = f(self.server, params);
        let response = result_to_response::<R>(request.id, result);
        self.server.respond(response);
        self
    }

    pub(crate) fn finish(self) {
        if let Some(request) = self.request {
            tracing::warn!(method = %request.method, "unknown request");
            self.server.respond(lsp_server::Response::new_err(
                request.id,
                lsp_server::ErrorCode::MethodNotFound as i32,
                "unknown request".to_owned(),
            ));
        }
    }
}
