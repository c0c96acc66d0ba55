// Input, output and audit records for one inventory row

use serde::{Deserialize, Serialize};

use crate::validators::ReasonCode;

/// Column names a raw record is read from
pub const RAW_COLUMNS: &[&str] = &[
    "source_row_id",
    "ip",
    "hostname",
    "fqdn",
    "mac",
    "owner",
    "device_type",
    "notes",
    "site",
];

/// Column order of the cleaned output
pub const CANONICAL_COLUMNS: &[&str] = &[
    "source_row_id",
    "ip",
    "ip_valid",
    "ip_version",
    "subnet_cidr",
    "hostname",
    "hostname_valid",
    "fqdn",
    "fqdn_consistent",
    "reverse_ptr",
    "mac",
    "mac_valid",
    "owner",
    "owner_email",
    "owner_team",
    "device_type",
    "device_type_confidence",
    "site",
    "site_normalized",
    "normalization_steps",
];

/// One input row, exactly as received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub source_row_id: String,
    pub ip: String,
    pub hostname: String,
    pub fqdn: String,
    pub mac: String,
    pub owner: String,
    pub device_type: String,
    pub notes: String,
    pub site: String,
}

impl RawRecord {
    /// Build from header/value pairs
    ///
    /// Unknown columns are ignored; columns missing from the header or cut off
    /// by a short row stay empty.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (column, value) in pairs {
            let slot = match column.trim() {
                "source_row_id" => &mut record.source_row_id,
                "ip" => &mut record.ip,
                "hostname" => &mut record.hostname,
                "fqdn" => &mut record.fqdn,
                "mac" => &mut record.mac,
                "owner" => &mut record.owner,
                "device_type" => &mut record.device_type,
                "notes" => &mut record.notes,
                "site" => &mut record.site,
                _ => continue,
            };
            *slot = value.to_string();
        }
        record
    }
}

/// One output row; field order is the CSV column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub source_row_id: String,
    pub ip: String,
    pub ip_valid: bool,
    pub ip_version: String,
    pub subnet_cidr: String,
    pub hostname: String,
    pub hostname_valid: bool,
    pub fqdn: String,
    pub fqdn_consistent: bool,
    pub reverse_ptr: String,
    pub mac: String,
    pub mac_valid: bool,
    pub owner: String,
    pub owner_email: String,
    pub owner_team: String,
    pub device_type: String,
    pub device_type_confidence: String,
    pub site: String,
    pub site_normalized: String,
    pub normalization_steps: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: ReasonCode,
    pub value: String,
}

/// A data-quality problem on one record, queued for human review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub source_row_id: String,
    pub issues: Vec<Issue>,
    pub recommended_actions: Vec<String>,
}

impl Anomaly {
    pub fn single(
        source_row_id: &str,
        field: &str,
        kind: ReasonCode,
        value: &str,
        action: &str,
    ) -> Self {
        Self {
            source_row_id: source_row_id.to_string(),
            issues: vec![Issue {
                field: field.to_string(),
                kind,
                value: value.to_string(),
            }],
            recommended_actions: vec![action.to_string()],
        }
    }
}

/// Ordered log of the steps applied to one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationTrace {
    steps: Vec<String>,
}

impl NormalizationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Pipe-joined form stored in `normalization_steps`
    pub fn joined(&self) -> String {
        self.steps.join("|")
    }
}
