use super::types::Confidence;

/// Known device-type spellings and their canonical label
///
/// Order matters: partial matches take the first hit in this table.
pub const DEVICE_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("server", "server"),
    ("srv", "server"),
    ("switch", "switch"),
    ("router", "router"),
    ("gw", "router"),
    ("gateway", "router"),
    ("printer", "printer"),
    ("iot", "iot"),
    ("camera", "camera"),
    ("cam", "camera"),
    ("firewall", "firewall"),
    ("fw", "firewall"),
    ("load_balancer", "load_balancer"),
    ("lb", "load_balancer"),
];

/// Labels an inference reply is asked to choose from
pub const DEVICE_TYPE_LABELS: &[&str] = &[
    "server",
    "switch",
    "router",
    "printer",
    "iot",
    "camera",
    "firewall",
    "load_balancer",
    "unknown",
];

/// Deterministically classify a free-text device type
///
/// Exact synonym ⇒ high, substring either way ⇒ medium, otherwise the
/// cleaned input is returned with low confidence.
pub fn normalize_device_type(raw: &str) -> (String, Confidence) {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return (String::new(), Confidence::Low);
    }

    if let Some((_, canonical)) = DEVICE_TYPE_SYNONYMS.iter().find(|(key, _)| *key == s) {
        return (canonical.to_string(), Confidence::High);
    }

    if let Some((_, canonical)) = DEVICE_TYPE_SYNONYMS
        .iter()
        .find(|(key, _)| s.contains(key) || key.contains(s.as_str()))
    {
        return (canonical.to_string(), Confidence::Medium);
    }

    (s, Confidence::Low)
}
