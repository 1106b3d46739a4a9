//! The network seam between the form and the registration endpoint.

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::Result;

/// Posts a JSON body and returns the parsed JSON reply.
///
/// The status code of the reply is not inspected; whatever JSON the server
/// sends back is handed to the caller.
pub trait Transport: Send + Sync {
    /// Posts `body` to `url` and parses the reply as JSON.
    fn post_json<'a>(&'a self, url: &'a str, body: &'a Value) -> BoxFuture<'a, Result<Value>>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn post_json<'a>(&'a self, url: &'a str, body: &'a Value) -> BoxFuture<'a, Result<Value>> {
        Box::pin(async move {
            // `json` also sets `Content-Type: application/json`.
            let bytes = self
                .client
                .post(url)
                .json(body)
                .send()
                .await?
                .bytes()
                .await?;
            Ok(serde_json::from_slice(&bytes)?)
        })
    }
}
