use serde::{Deserialize, Serialize};

/// Record and query types the monitor knows how to describe.
///
/// Closed variant so the formatter's match is exhaustive; anything else
/// carries its raw type code for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RrType {
    A,
    Aaaa,
    Any,
    Ptr,
    Srv,
    Txt,
    Other(u16),
}

/// A request for information about a name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub rtype: RrType,
    pub name: String,
}

/// A published answer associating a name with data.
///
/// Which fields are meaningful depends on `rtype`: `address` for A/AAAA
/// (pre-rendered textual form), `target` for PTR/SRV, `port` for SRV,
/// `attributes` for TXT (wire order preserved).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub rtype: RrType,
    pub name: String,
    pub target: String,
    pub address: String,
    pub port: u16,
    pub ttl: u32,
    pub attributes: Vec<(String, String)>,
}

/// One decoded mDNS packet: zero or more queries plus zero or more records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub is_response: bool,
    pub source: String,
    pub queries: Vec<Query>,
    pub records: Vec<Record>,
}
