//! Address classification helpers

use lazy_static::lazy_static;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};

lazy_static! {
    static ref DOMAIN_REGEX: Regex =
        Regex::new(r"^(?i)([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$").unwrap();
}

/// Kind of an address as it appears in tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Domain,
    IPv4,
    IPv6,
    Unknown,
}

impl AddressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressKind::Domain => "Domain",
            AddressKind::IPv4 => "IPv4",
            AddressKind::IPv6 => "IPv6",
            AddressKind::Unknown => "Address",
        }
    }
}

/// Strip the brackets of a bracketed IPv6 literal
pub fn unbracket(address: &str) -> &str {
    address
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(address)
}

pub fn classify_address(address: &str) -> AddressKind {
    let address = address.trim();
    if address.parse::<Ipv4Addr>().is_ok() {
        AddressKind::IPv4
    } else if unbracket(address).parse::<Ipv6Addr>().is_ok() {
        AddressKind::IPv6
    } else if DOMAIN_REGEX.is_match(address) {
        AddressKind::Domain
    } else {
        AddressKind::Unknown
    }
}

pub fn is_domain(address: &str) -> bool {
    classify_address(address) == AddressKind::Domain
}

/// Split a `host:port` endpoint, accepting `[v6]:port`
pub fn split_endpoint(endpoint: &str) -> Option<(String, u16)> {
    let (host, port) = endpoint.trim().rsplit_once(':')?;
    let port = port.parse::<u16>().ok().filter(|port| *port != 0)?;
    let host = unbracket(host);
    if host.is_empty() || host.contains(':') && host.parse::<Ipv6Addr>().is_err() {
        return None;
    }
    Some((host.to_string(), port))
}
