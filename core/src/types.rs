//! Zone and record types for the console-dns API.
//!
//! # Design
//! A zone list is a JSON object keyed by zone name, and a zone is a JSON
//! object keyed by record name whose values group records by lower-case
//! type. Both use `BTreeMap` so iteration order is stable.
//!
//! Individual records serialize as their bare payload (`{"ttl":1200,"ip":"10.0.1.1"}`);
//! the record type travels in the request path, never in the body.

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

/// All zones known to the server, keyed by zone name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zones {
    pub zones: BTreeMap<String, Zone>,
}

impl Zones {
    /// Zone names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.zones.keys().map(String::as_str).collect()
    }

    pub fn get(&self, zone: &str) -> Option<&Zone> {
        self.zones.get(zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// The records of one zone, keyed by record name (`"@"`, `"www"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zone {
    pub records: BTreeMap<String, RecordSet>,
}

impl Zone {
    pub fn names(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RecordSet> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Records published under a single name, grouped by type.
///
/// Types this crate does not model are kept verbatim in `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub a: Vec<RecordA>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aaaa: Vec<RecordAaaa>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cname: Vec<RecordCname>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mx: Vec<RecordMx>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ns: Vec<RecordNs>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub txt: Vec<RecordTxt>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl RecordSet {
    /// Number of records of every type, including unmodelled ones.
    pub fn len(&self) -> usize {
        let other: usize = self
            .other
            .values()
            .map(|v| v.as_array().map_or(1, Vec::len))
            .sum();
        self.a.len()
            + self.aaaa.len()
            + self.cname.len()
            + self.mx.len()
            + self.ns.len()
            + self.txt.len()
            + other
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordA {
    pub ttl: u32,
    pub ip: Ipv4Addr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAaaa {
    pub ttl: u32,
    pub ip: Ipv6Addr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCname {
    pub ttl: u32,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMx {
    pub ttl: u32,
    pub preference: u16,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordNs {
    pub ttl: u32,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTxt {
    pub ttl: u32,
    pub text: String,
}

/// A record of any kind the crate models.
///
/// Serializes as the inner record, so `Record::A(a)` and `a` produce the same
/// body. Not `Deserialize`: the wire form carries no type tag, and CNAME and
/// NS payloads are indistinguishable without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    A(RecordA),
    Aaaa(RecordAaaa),
    Cname(RecordCname),
    Mx(RecordMx),
    Ns(RecordNs),
    Txt(RecordTxt),
}

impl Record {
    /// The type tag used as the record-type path segment.
    pub fn record_type(&self) -> &'static str {
        match self {
            Record::A(_) => "A",
            Record::Aaaa(_) => "AAAA",
            Record::Cname(_) => "CNAME",
            Record::Mx(_) => "MX",
            Record::Ns(_) => "NS",
            Record::Txt(_) => "TXT",
        }
    }

    pub fn ttl(&self) -> u32 {
        match self {
            Record::A(r) => r.ttl,
            Record::Aaaa(r) => r.ttl,
            Record::Cname(r) => r.ttl,
            Record::Mx(r) => r.ttl,
            Record::Ns(r) => r.ttl,
            Record::Txt(r) => r.ttl,
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(record: $ty) -> Self {
                    Record::$variant(record)
                }
            }
        )*
    };
}

impl_from_record!(
    A(RecordA),
    Aaaa(RecordAaaa),
    Cname(RecordCname),
    Mx(RecordMx),
    Ns(RecordNs),
    Txt(RecordTxt),
);

/// Body of an update request: replace `src` with `dst`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate<R> {
    pub src: R,
    pub dst: R,
}
