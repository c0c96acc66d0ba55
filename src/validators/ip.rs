//! IPv4 / IPv6 literal validation
//!
//! IPv4 parsing is done by hand rather than through `Ipv4Addr::from_str`
//! so that every malformed octet maps to its own reason code.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use super::types::{FieldResult, ReasonCode};
use crate::patterns::DECIMAL_DIGITS;

/// IP protocol version of a validated address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpVersion {
    #[serde(rename = "4")]
    V4,
    #[serde(rename = "6")]
    V6,
}

impl IpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V4 => "4",
            Self::V6 => "6",
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated IP address with its canonical text form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddress {
    addr: IpAddr,
    canonical: String,
}

impl IpAddress {
    fn new(addr: IpAddr) -> Self {
        // Display is RFC 5952 for v6 and leading-zero-free dotted decimal for v4
        let canonical = addr.to_string();
        Self { addr, canonical }
    }

    pub fn version(&self) -> IpVersion {
        match self.addr {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Validate and canonicalize an IP literal
pub fn validate_ip(raw: &str) -> FieldResult<IpAddress> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("N/A") {
        return FieldResult::invalid(ReasonCode::Missing);
    }

    if !s.contains(':') && !s.contains('%') {
        return match parse_ipv4(s) {
            Ok(addr) => FieldResult::ok(IpAddress::new(IpAddr::V4(addr))),
            Err(reason) => FieldResult::invalid(reason),
        };
    }

    if s.contains(':') {
        // Zone identifiers (fe80::1%eth0) are not part of the address
        let literal = s.split('%').next().unwrap_or(s);
        return match literal.parse::<Ipv6Addr>() {
            Ok(addr) => FieldResult::ok(IpAddress::new(IpAddr::V6(addr))),
            Err(_) => FieldResult::invalid(ReasonCode::InvalidIpv6Format),
        };
    }

    FieldResult::invalid(ReasonCode::UnknownFormat)
}

fn parse_ipv4(s: &str) -> Result<Ipv4Addr, ReasonCode> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() < 4 {
        return Err(ReasonCode::WrongPartCount);
    }
    if parts.len() > 4 {
        return Err(ReasonCode::TooManyParts);
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(&parts) {
        *slot = parse_octet(part)?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Result<u8, ReasonCode> {
    if part.is_empty() {
        return Err(ReasonCode::EmptyOctet);
    }

    let unsigned = part.trim_start_matches('+');
    if part.starts_with('-') || unsigned.is_empty() || !DECIMAL_DIGITS.is_match(unsigned) {
        return Err(ReasonCode::NonNumericOrNegative);
    }

    // Numeric-looking but not a plain decimal literal: "++7", non-ASCII digits
    let sign_count = part.len() - unsigned.len();
    if sign_count > 1 || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReasonCode::NonDecimalFormat);
    }

    let digits = unsigned.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 3 {
        return Err(ReasonCode::OctetOutOfRange);
    }
    let value: u16 = digits.parse().map_err(|_| ReasonCode::NonDecimalFormat)?;
    u8::try_from(value).map_err(|_| ReasonCode::OctetOutOfRange)
}
