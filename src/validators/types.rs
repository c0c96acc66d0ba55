// Shared types for field validation
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a field validated the way it did
///
/// Serialized in snake_case; the string form is what lands in anomaly
/// entries and in `normalization_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    Ok,
    Missing,
    Empty,
    // IPv4 / IPv6
    WrongPartCount,
    TooManyParts,
    EmptyOctet,
    NonNumericOrNegative,
    NonDecimalFormat,
    OctetOutOfRange,
    InvalidIpv6Format,
    UnknownFormat,
    // Shared by MAC and hostname
    InvalidFormat,
    TooLong,
    // Hostname
    InvalidCharacters,
    AllNumeric,
    // FQDN
    ConstructedFromHostname,
    EmptyLabel,
    LabelTooLong,
    InvalidLabelFormat,
    InconsistentWithHostname,
}

/// Data-quality category of a reason code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// Nothing to validate
    MissingValue,
    /// Value present but malformed
    FormatError,
    /// Value well-formed but disagrees with a related field
    ConsistencyError,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::WrongPartCount => "wrong_part_count",
            Self::TooManyParts => "too_many_parts",
            Self::EmptyOctet => "empty_octet",
            Self::NonNumericOrNegative => "non_numeric_or_negative",
            Self::NonDecimalFormat => "non_decimal_format",
            Self::OctetOutOfRange => "octet_out_of_range",
            Self::InvalidIpv6Format => "invalid_ipv6_format",
            Self::UnknownFormat => "unknown_format",
            Self::InvalidFormat => "invalid_format",
            Self::TooLong => "too_long",
            Self::InvalidCharacters => "invalid_characters",
            Self::AllNumeric => "all_numeric",
            Self::ConstructedFromHostname => "constructed_from_hostname",
            Self::EmptyLabel => "empty_label",
            Self::LabelTooLong => "label_too_long",
            Self::InvalidLabelFormat => "invalid_label_format",
            Self::InconsistentWithHostname => "inconsistent_with_hostname",
        }
    }

    /// Reasons that never produce an anomaly on their own
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::Ok | Self::Missing | Self::ConstructedFromHostname)
    }

    pub fn kind(&self) -> Option<IssueKind> {
        match self {
            Self::Ok | Self::ConstructedFromHostname => None,
            Self::Missing | Self::Empty => Some(IssueKind::MissingValue),
            Self::InconsistentWithHostname => Some(IssueKind::ConsistencyError),
            _ => Some(IssueKind::FormatError),
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one field
///
/// An invalid result may still carry a best-effort canonical value for
/// auditing; `valid` is the only authority on whether to trust it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult<T> {
    pub valid: bool,
    pub value: Option<T>,
    pub reason: ReasonCode,
}

impl<T> FieldResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            valid: true,
            value: Some(value),
            reason: ReasonCode::Ok,
        }
    }

    pub fn valid_with(value: T, reason: ReasonCode) -> Self {
        Self {
            valid: true,
            value: Some(value),
            reason,
        }
    }

    pub fn invalid(reason: ReasonCode) -> Self {
        Self {
            valid: false,
            value: None,
            reason,
        }
    }

    /// Invalid, but keep the partially normalized value for audit
    pub fn invalid_with(value: T, reason: ReasonCode) -> Self {
        Self {
            valid: false,
            value: Some(value),
            reason,
        }
    }

    /// The value, only if the field validated
    pub fn valid_value(&self) -> Option<&T> {
        if self.valid {
            self.value.as_ref()
        } else {
            None
        }
    }
}

/// Coarse trust label on a non-authoritative classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
