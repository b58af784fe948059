use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path},
    http::{Extensions, HeaderMap, request::Parts},
};

/// Request state threaded through the gates of one pipeline run.
///
/// Gates read headers, path parameters and (when some gate asked for
/// it) the buffered body, and hand results to later gates and the handler
/// through the extensions.
pub struct RequestCtx {
    parts: Parts,
    body: Option<Bytes>,
}

impl RequestCtx {
    pub fn new(parts: Parts) -> Self {
        Self { parts, body: None }
    }

    pub(crate) fn set_body(&mut self, body: Bytes) {
        self.body = Some(body);
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.parts.extensions
    }

    pub fn parts_mut(&mut self) -> &mut Parts {
        &mut self.parts
    }

    /// `None` unless the pipeline buffered the body.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub async fn path_params(&mut self) -> Option<HashMap<String, String>> {
        Path::<HashMap<String, String>>::from_request_parts(&mut self.parts, &())
            .await
            .ok()
            .map(|Path(params)| params)
    }

    pub fn into_parts(self) -> Parts {
        self.parts
    }
}
