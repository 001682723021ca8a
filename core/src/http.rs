//! HTTP transport for the console-dns API.
//!
//! # Design
//! Requests and responses are plain data. `ZoneClient` builds an
//! `HttpRequest` (URL, headers, optional JSON body) and hands it to a
//! [`Transport`], which performs exactly one round trip and returns the
//! status, headers and fully-read body. Status interpretation stays in the
//! client, so a transport never decides what counts as failure.
//!
//! [`UreqTransport`] is the production transport. Tests substitute their own
//! implementation to observe requests without touching the network.

use std::time::Duration;

use tracing::trace;

use crate::error::TransportError;

/// HTTP method for a request. The API only uses `GET` and `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is the configured server joined with the operation path. Headers
/// already include authorization and identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data, with the body fully read.
///
/// Bytes that are not valid UTF-8 are replaced, so an error body is never
/// lost to an encoding problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A successful operation's result together with the response it came from.
///
/// Mutations carry `()`; the status and headers stay available for
/// diagnostics either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub value: T,
}

impl<T> ApiResponse<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            value: f(self.value),
        }
    }
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Performs one HTTP round trip.
///
/// Implementations must return any response that was received, whatever its
/// status, and only fail when no response could be obtained.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::from_agent(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        )
    }

    /// Transport whose calls fail once `timeout` has elapsed in total.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_agent(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent(),
        )
    }

    /// Wrap an existing agent.
    ///
    /// The agent must be configured with `http_status_as_error(false)`,
    /// otherwise error statuses surface as transport failures and the
    /// server's error body is lost.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        // The response owns the connection; it is released when dropped,
        // on the error path below as well as after the body is read.
        let mut response = result?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // No size cap: a large zone list is still a response, not a failure.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        trace!(status, len = bytes.len(), "response body read");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
