//! Request builders, response parsers and the blocking `ZoneClient`.
//!
//! # Design
//! Every operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`;
//! neither touches the network. The public operations (`list_zones`,
//! `create_record`, ...) compose the two around a single call to the
//! client's [`Transport`]. A payload that fails to serialize is reported
//! from `build_*`, so nothing is sent for it.
//!
//! Paths are assembled by plain concatenation: zone, record name and record
//! type are inserted as given and must already be URL-safe.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{RecordUpdate, Zone, Zones};

/// Value of the `User-Agent` header sent with every request.
pub const USER_AGENT: &str = "CoreDNS-plugin-console";

const ZONES_PATH: &str = "/api/v1/zones";

/// Synchronous, stateless client for the console-dns zone API.
///
/// Holds only its configuration and transport. Safe to share between threads
/// whenever the transport is.
#[derive(Debug, Clone)]
pub struct ZoneClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ZoneClient<UreqTransport> {
    pub fn new(server: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_transport(ClientConfig::new(server, token), UreqTransport::new())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> ZoneClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_list_zones(&self) -> HttpRequest {
        self.request(HttpMethod::Get, ZONES_PATH.to_string(), None)
    }

    pub fn build_list_zone(&self, zone: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{ZONES_PATH}/{zone}"), None)
    }

    pub fn build_create_record<R>(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
        record: &R,
    ) -> Result<HttpRequest, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let body = serde_json::to_string(record).map_err(ApiError::Serialization)?;
        Ok(self.request(
            HttpMethod::Post,
            record_path(zone, name, record_type, ""),
            Some(body),
        ))
    }

    pub fn build_update_record<R>(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
        old: &R,
        next: &R,
    ) -> Result<HttpRequest, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let envelope = RecordUpdate {
            src: old,
            dst: next,
        };
        let body = serde_json::to_string(&envelope).map_err(ApiError::Serialization)?;
        Ok(self.request(
            HttpMethod::Post,
            record_path(zone, name, record_type, "/edit"),
            Some(body),
        ))
    }

    pub fn build_delete_record<R>(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
        record: &R,
    ) -> Result<HttpRequest, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let body = serde_json::to_string(record).map_err(ApiError::Serialization)?;
        Ok(self.request(
            HttpMethod::Post,
            record_path(zone, name, record_type, "/delete"),
            Some(body),
        ))
    }

    pub fn parse_list_zones(&self, response: HttpResponse) -> Result<ApiResponse<Zones>, ApiError> {
        decode(response)
    }

    pub fn parse_list_zone(&self, response: HttpResponse) -> Result<ApiResponse<Zone>, ApiError> {
        decode(response)
    }

    /// Parse the response to a create, update or delete request. The body of
    /// a successful mutation is ignored.
    pub fn parse_mutation(&self, response: HttpResponse) -> Result<ApiResponse<()>, ApiError> {
        check_status(response).map(|response| response.map(drop))
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.token),
            ),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: format!("{}{}", self.config.server, path),
            headers,
            body,
        }
    }
}

impl<T: Transport> ZoneClient<T> {
    /// List every zone on the server.
    pub fn list_zones(&self) -> Result<ApiResponse<Zones>, ApiError> {
        let response = self.send(&self.build_list_zones())?;
        self.parse_list_zones(response)
    }

    /// Fetch the records of one zone.
    pub fn list_zone(&self, zone: &str) -> Result<ApiResponse<Zone>, ApiError> {
        let response = self.send(&self.build_list_zone(zone))?;
        self.parse_list_zone(response)
    }

    /// Add `record` under `name` in `zone`.
    ///
    /// Not idempotent from the client's point of view: repeating the call may
    /// succeed or fail depending on the server.
    pub fn create_record<R>(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
        record: &R,
    ) -> Result<ApiResponse<()>, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let request = self.build_create_record(zone, name, record_type, record)?;
        self.parse_mutation(self.send(&request)?)
    }

    /// Replace `old` with `next`. Neither record is modified.
    pub fn update_record<R>(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
        old: &R,
        next: &R,
    ) -> Result<ApiResponse<()>, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let request = self.build_update_record(zone, name, record_type, old, next)?;
        self.parse_mutation(self.send(&request)?)
    }

    pub fn delete_record<R>(
        &self,
        zone: &str,
        name: &str,
        record_type: &str,
        record: &R,
    ) -> Result<ApiResponse<()>, ApiError>
    where
        R: Serialize + ?Sized,
    {
        let request = self.build_delete_record(zone, name, record_type, record)?;
        self.parse_mutation(self.send(&request)?)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "console-dns request");
        let response = self
            .transport
            .execute(request)
            .map_err(ApiError::Transport)?;
        debug!(status = response.status, len = response.body.len(), "console-dns response");
        Ok(response)
    }
}

fn record_path(zone: &str, name: &str, record_type: &str, action: &str) -> String {
    format!("{ZONES_PATH}/{zone}/{name}/{record_type}{action}")
}

/// Anything but 200 is a failure carrying the raw body.
fn check_status(response: HttpResponse) -> Result<ApiResponse<String>, ApiError> {
    let HttpResponse {
        status,
        headers,
        body,
    } = response;
    if status == 200 {
        return Ok(ApiResponse {
            status,
            headers,
            value: body,
        });
    }
    Err(ApiError::Status {
        status,
        headers,
        body,
    })
}

fn decode<V: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<V>, ApiError> {
    let response = check_status(response)?;
    let value = serde_json::from_str(&response.value).map_err(ApiError::Decode)?;
    Ok(response.map(|_| value))
}
