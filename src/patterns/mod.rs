//! Pre-compiled regex patterns shared by the field validators
//!
//! Every pattern is compiled once on first use. Validators never build
//! regexes on the hot path.

use regex::Regex;
use std::sync::LazyLock;

/// RFC 1123 label: letters, digits and hyphens, no leading/trailing hyphen
pub static HOSTNAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").expect("Invalid hostname label regex")
});

/// Characters a hostname repair replaces with `-`
pub static HOSTNAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("Invalid hostname charset regex"));

/// Runs of hyphens collapsed to one during repair and site normalization
pub static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("Invalid hyphen run regex"));

/// MAC separators stripped before the hex check
pub static MAC_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-:.]").expect("Invalid MAC separator regex"));

/// Bare 48-bit MAC in uppercase hex
pub static MAC_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-F]{12}$").expect("Invalid MAC hex regex"));

/// Permissive email matcher used on free-text owner fields
pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("Invalid email regex")
});

/// Unicode decimal digits (general category Nd), ASCII or not
pub static DECIMAL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}+$").expect("Invalid decimal digit regex"));

/// Separators splitting an email local part into name tokens
pub static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._-]").expect("Invalid name separator regex"));
