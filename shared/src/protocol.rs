use std::net::Ipv4Addr;

/// Well-known mDNS port (RFC 6762)
pub const MDNS_PORT: u16 = 5353;

/// IPv4 multicast group for mDNS
pub const MDNS_V4_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);
