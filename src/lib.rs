//! invnorm - network inventory normalizer
//!
//! Validates and normalizes raw inventory records (IP, hostname, FQDN, MAC,
//! owner, device type, site) into a canonical schema, derives subnet and
//! reverse-DNS fields, and flags anomalies for review. Ambiguous free-text
//! fields can optionally be resolved by a text-generation assistant, always
//! behind a deterministic fallback.

pub mod cli;
pub mod config;
pub mod derivation;
pub mod error;
pub mod gateway;
pub mod inventory;
pub mod patterns;
pub mod pipeline;
pub mod validators;

pub use error::{InvnormError, Result};
