//! Per-field deterministic validation and normalization
//!
//! Every function here is pure and total: malformed input becomes a
//! `ReasonCode` on an invalid `FieldResult`, never an error or a panic.

mod device;
mod email;
mod hostname;
mod ip;
mod mac;
mod types;

pub use device::{normalize_device_type, DEVICE_TYPE_LABELS, DEVICE_TYPE_SYNONYMS};
pub use email::{extract_email, name_from_email};
pub use hostname::{validate_fqdn, validate_hostname, Fqdn, MAX_FQDN_LEN, MAX_LABEL_LEN};
pub use ip::{validate_ip, IpAddress, IpVersion};
pub use mac::validate_mac;
pub use types::{Confidence, FieldResult, IssueKind, ReasonCode};
