//! Shared HTTP transport for the model server endpoints.
//!
//! `HttpTransport` wraps a `reqwest::Client` with pre-configured JSON headers
//! and the server's host name. Every request goes through [`check`], so a
//! non-2xx status surfaces as [`Error::Api`] before any body is decoded.

use lcore::{Error, Result};
use reqwest::{
    Client, Method, Response,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

const EVENT_STREAM: &str = "text/event-stream";

/// HTTP transport bound to one model server.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    headers: HeaderMap,
    host: String,
}

impl HttpTransport {
    /// Create a transport for `host` (e.g. `http://localhost:8000`).
    ///
    /// A trailing `/` on the host is ignored.
    pub fn new(client: Client, host: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            client,
            headers,
            host: host.trim_end_matches('/').to_owned(),
        }
    }

    /// Full URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.host, path.trim_start_matches('/'))
    }

    /// POST a JSON body and return the checked response.
    pub async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<Response> {
        self.post(path, self.headers.clone(), body).await
    }

    /// POST a JSON body asking for a `text/event-stream` response.
    pub async fn post_sse(&self, path: &str, body: &impl Serialize) -> Result<Response> {
        let mut headers = self.headers.clone();
        headers.insert(header::ACCEPT, HeaderValue::from_static(EVENT_STREAM));
        self.post(path, headers, body).await
    }

    /// Read a response body and deserialize it as JSON.
    pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await.map_err(transport_error)?;
        tracing::trace!("response: {text}");
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Get the host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    async fn post(
        &self,
        path: &str,
        headers: HeaderMap,
        body: &impl Serialize,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        let body = serde_json::to_string(body)?;
        tracing::trace!("request: {body}");
        let response = self
            .client
            .request(Method::POST, &url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        tracing::debug!("POST {url} -> {}", response.status());
        check(response).await
    }
}

/// Turn a non-2xx response into [`Error::Api`], keeping the body.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("<unreadable body: {e}>"),
    };
    tracing::debug!("api error {status}: {body}");
    Err(Error::Api {
        status: status.as_u16(),
        body,
    })
}

/// Map a `reqwest` failure onto the client's error kinds.
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_decode() {
        Error::Decode(e.to_string())
    } else {
        Error::Connection(e.to_string())
    }
}
