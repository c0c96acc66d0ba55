use serde::{Deserialize, Serialize};

use super::prompts;
use super::{Escalation, Stage};
use crate::validators::{normalize_device_type, Confidence, DEVICE_TYPE_LABELS};

/// Device classification as written to the canonical record
///
/// Confidence stays a string: assistant replies are trusted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTypeInfo {
    pub device_type: String,
    pub device_type_confidence: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceReply {
    device_type: String,
    device_type_confidence: String,
}

impl From<DeviceReply> for DeviceTypeInfo {
    fn from(reply: DeviceReply) -> Self {
        Self {
            device_type: reply.device_type,
            device_type_confidence: reply.device_type_confidence,
        }
    }
}

pub fn device_type_stage(hostname: &str, raw_type: &str, notes: &str) -> Stage<DeviceTypeInfo> {
    let (normalized, confidence) = normalize_device_type(raw_type);
    if confidence == Confidence::High {
        return Stage::Settled(DeviceTypeInfo {
            device_type: normalized,
            device_type_confidence: confidence.to_string(),
        });
    }

    let fallback = DeviceTypeInfo {
        device_type: if normalized.is_empty() {
            "unknown".to_string()
        } else {
            normalized
        },
        device_type_confidence: Confidence::Low.to_string(),
    };

    Stage::Escalate(Escalation {
        task: "device_type",
        prompt: prompts::device_prompt(&context(hostname, raw_type, notes), DEVICE_TYPE_LABELS),
        system_prompt: prompts::device_system_prompt(),
        fallback,
    })
}

fn context(hostname: &str, raw_type: &str, notes: &str) -> String {
    [("hostname", hostname), ("provided_type", raw_type), ("notes", notes)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
