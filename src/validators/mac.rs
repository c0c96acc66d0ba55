use crate::patterns::{MAC_HEX, MAC_SEPARATORS};

use super::types::{FieldResult, ReasonCode};

/// Validate a MAC address and canonicalize it to `AA:BB:CC:DD:EE:FF`
///
/// Accepts colon, hyphen, dot (Cisco) or no separators in any case.
pub fn validate_mac(raw: &str) -> FieldResult<String> {
    if raw.is_empty() {
        return FieldResult::invalid(ReasonCode::Missing);
    }

    let upper = raw.trim().to_uppercase();
    let clean = MAC_SEPARATORS.replace_all(&upper, "");
    if !MAC_HEX.is_match(&clean) {
        return FieldResult::invalid(ReasonCode::InvalidFormat);
    }

    // MAC_HEX guarantees 12 ASCII hex digits
    let pairs: Vec<&str> = (0..12).step_by(2).map(|i| &clean[i..i + 2]).collect();
    FieldResult::ok(pairs.join(":"))
}
