//! Hostname and FQDN validation (RFC 1123 labels)

use crate::patterns::{HOSTNAME_DISALLOWED, HOSTNAME_LABEL, HYPHEN_RUN};

use super::types::{FieldResult, ReasonCode};

/// Maximum length of a single DNS label
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a full domain name (without trailing dot)
pub const MAX_FQDN_LEN: usize = 253;

/// A validated fully-qualified domain name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fqdn {
    pub name: String,
    /// Whether the name is the hostname itself or starts with `hostname.`
    pub consistent: bool,
}

/// Validate a single-label hostname, repairing disallowed characters
///
/// `My_Host!` repairs to `my-host`. Repair never rescues a purely numeric
/// name; `all_numeric` results keep the value for audit but are invalid.
pub fn validate_hostname(raw: &str) -> FieldResult<String> {
    if raw.is_empty() {
        return FieldResult::invalid(ReasonCode::Missing);
    }

    let s = raw.trim();
    if s.is_empty() {
        return FieldResult::invalid(ReasonCode::Empty);
    }
    if s.chars().count() > MAX_LABEL_LEN {
        return FieldResult::invalid(ReasonCode::TooLong);
    }

    let mut normalized = s.to_lowercase();

    if !HOSTNAME_LABEL.is_match(&normalized) {
        let replaced = HOSTNAME_DISALLOWED.replace_all(&normalized, "-");
        let collapsed = HYPHEN_RUN.replace_all(&replaced, "-");
        let cleaned = collapsed.trim_matches('-');

        if cleaned.is_empty() {
            return FieldResult::invalid(ReasonCode::InvalidCharacters);
        }

        // Only ASCII survives the replacement, so byte slicing is safe
        normalized = if cleaned.len() > MAX_LABEL_LEN {
            cleaned[..MAX_LABEL_LEN].trim_end_matches('-').to_string()
        } else {
            cleaned.to_string()
        };
    }

    if normalized.bytes().all(|b| b.is_ascii_digit()) {
        return FieldResult::invalid_with(normalized, ReasonCode::AllNumeric);
    }

    if !HOSTNAME_LABEL.is_match(&normalized) {
        return FieldResult::invalid_with(normalized, ReasonCode::InvalidFormat);
    }

    FieldResult::ok(normalized)
}

/// Validate an FQDN and check it against an already-validated hostname
///
/// An empty FQDN is synthesized as `<hostname>.<default_domain>` when a
/// hostname is available; such names are valid but never consistent, since
/// the domain was guessed.
pub fn validate_fqdn(raw: &str, hostname: Option<&str>, default_domain: &str) -> FieldResult<Fqdn> {
    let hostname = hostname.filter(|h| !h.is_empty());

    if raw.is_empty() {
        return match hostname {
            Some(host) => FieldResult::valid_with(
                Fqdn {
                    name: format!("{}.{}", host, default_domain),
                    consistent: false,
                },
                ReasonCode::ConstructedFromHostname,
            ),
            None => FieldResult::invalid(ReasonCode::Missing),
        };
    }

    let lowered = raw.trim().to_lowercase();
    let s = lowered.trim_end_matches('.');

    if s.is_empty() {
        return FieldResult::invalid(ReasonCode::Empty);
    }
    if s.chars().count() > MAX_FQDN_LEN {
        return FieldResult::invalid(ReasonCode::TooLong);
    }

    for label in s.split('.') {
        if label.is_empty() {
            return FieldResult::invalid(ReasonCode::EmptyLabel);
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return FieldResult::invalid(ReasonCode::LabelTooLong);
        }
        if !HOSTNAME_LABEL.is_match(label) {
            return FieldResult::invalid(ReasonCode::InvalidLabelFormat);
        }
    }

    let consistent = hostname.is_some_and(|host| is_consistent(s, host));

    FieldResult::ok(Fqdn {
        name: s.to_string(),
        consistent,
    })
}

fn is_consistent(fqdn: &str, hostname: &str) -> bool {
    fqdn == hostname
        || fqdn
            .strip_prefix(hostname)
            .is_some_and(|rest| rest.starts_with('.'))
}
