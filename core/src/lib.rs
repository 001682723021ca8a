//! Blocking client for the console-dns zone management API.
//!
//! # Overview
//! Lists zones and their records, and creates, updates or deletes records
//! through the service's HTTP API. Each operation performs exactly one
//! authenticated request and either decodes a 200 response or returns an
//! [`ApiError`]. There are no retries and no local state beyond the
//! configuration.
//!
//! # Design
//! - `ZoneClient` holds only a [`ClientConfig`] and a [`Transport`].
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit and the
//!   transport can be swapped for a test double.
//! - Record payloads are any `Serialize` value; [`Record`] covers the kinds
//!   this crate models.
//! - Successful operations return an [`ApiResponse`] holding the status and
//!   headers next to the decoded value.
//!
//! ```no_run
//! use std::net::Ipv4Addr;
//! use console_dns_client::{RecordA, ZoneClient};
//!
//! let client = ZoneClient::new("http://127.0.0.1:8090", "token");
//! let zones = client.list_zones()?.into_value();
//! for zone in zones.names() {
//!     let a = RecordA { ttl: 1200, ip: Ipv4Addr::new(10, 0, 1, 1) };
//!     client.create_record(zone, "www", "A", &a)?;
//! }
//! # Ok::<(), console_dns_client::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{ZoneClient, USER_AGENT};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{ApiResponse, HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{
    Record, RecordA, RecordAaaa, RecordCname, RecordMx, RecordNs, RecordSet, RecordTxt,
    RecordUpdate, Zone, Zones,
};
