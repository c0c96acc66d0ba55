// Record processor end to end, with and without the assistant
mod common;

use common::scripted_gateway;
use invnorm::gateway::InferenceGateway;
use invnorm::pipeline::{RawRecord, RecordProcessor};
use invnorm::validators::ReasonCode;

fn raw(pairs: &[(&str, &str)]) -> RawRecord {
    RawRecord::from_pairs(pairs.iter().copied())
}

#[test]
fn test_messy_row_offline() {
    let processor = RecordProcessor::new(InferenceGateway::disabled());

    let (out, anomalies) = processor.process(&raw(&[
        ("source_row_id", "12"),
        ("ip", "10.10.010.7"),
        ("hostname", "HQ_Printer#3"),
        ("mac", "0011.2233.4455"),
        ("owner", "Facilities Team"),
        ("device_type", "Printer"),
        ("site", "HQ Bldg 1"),
    ]));

    assert_eq!(out.ip, "10.10.10.7");
    assert_eq!(out.hostname, "hq-printer-3");
    assert_eq!(out.fqdn, "hq-printer-3.hq.corp.example.com");
    assert!(!out.fqdn_consistent);
    assert_eq!(out.mac, "00:11:22:33:44:55");

    // A constructed FQDN is never confirmed, so it is the only anomaly
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].issues[0].kind, ReasonCode::InconsistentWithHostname);
    assert_eq!(anomalies[0].issues[0].value, "hq-printer-3.hq.corp.example.com");
    assert_eq!(out.owner, "");
    assert_eq!(out.owner_team, "facilities");
    assert_eq!(out.device_type, "printer");
    assert_eq!(out.site_normalized, "HQ-Bldg-1");
}

#[test]
fn test_assistant_resolves_ambiguous_fields() {
    // Replies are consumed in call order: owner, device type, site
    let (gateway, prompts) = scripted_gateway(&[
        Some(r#"{"owner": "ravi kumar", "owner_email": "ravi@corp.example.com", "owner_team": "ops"}"#),
        Some(r#"{"device_type": "iot", "device_type_confidence": "medium"}"#),
        Some(r#"{"site_normalized": "BLR-Lab-2"}"#),
    ]);
    let processor = RecordProcessor::new(gateway);

    let (out, _) = processor.process(&raw(&[
        ("source_row_id", "5"),
        ("ip", "192.168.5.20"),
        ("hostname", "sensor-17"),
        ("fqdn", "sensor-17.blr.corp.example.com"),
        ("owner", "Ravi Kumar (ops) ravi@corp.example.com"),
        ("device_type", "thermostat"),
        ("notes", "HVAC sensor"),
        ("site", "Bangalore lab 2"),
    ]));

    assert_eq!(out.owner, "ravi kumar");
    assert_eq!(out.owner_team, "ops");
    assert_eq!(out.device_type, "iot");
    assert_eq!(out.device_type_confidence, "medium");
    assert_eq!(out.site, "Bangalore lab 2");
    assert_eq!(out.site_normalized, "BLR-Lab-2");
    assert!(out.normalization_steps.contains("device_type_llm_classified"));
    assert_eq!(processor.gateway().llm_calls(), 3);

    let prompts = prompts.lock().unwrap();
    assert!(prompts[1].contains("hostname: sensor-17, provided_type: thermostat, notes: HVAC sensor"));
}

#[test]
fn test_assistant_failure_never_adds_anomalies() {
    let (gateway, _) = scripted_gateway(&[None, Some("I think it's a camera"), None]);
    let processor = RecordProcessor::new(gateway);

    let (out, anomalies) = processor.process(&raw(&[
        ("source_row_id", "8"),
        ("ip", "10.0.0.8"),
        ("hostname", "cam-8"),
        ("fqdn", "cam-8.corp.example.com"),
        ("mac", "aa:bb:cc:dd:ee:08"),
        ("owner", "Lee lee@corp.example.com"),
        ("device_type", "thing"),
        ("site", "Annex West"),
    ]));

    assert!(anomalies.is_empty(), "{anomalies:?}");
    assert_eq!(out.owner, "lee");
    assert_eq!(out.owner_email, "lee@corp.example.com");
    assert_eq!(out.device_type, "thing");
    assert_eq!(out.device_type_confidence, "low");
    assert_eq!(out.site_normalized, "Annex-West");
}

#[test]
fn test_one_anomaly_per_bad_field_in_order() {
    let processor = RecordProcessor::new(InferenceGateway::disabled());

    let (out, anomalies) = processor.process(&raw(&[
        ("source_row_id", "21"),
        ("ip", "300.1.1.1"),
        ("hostname", "   "),
        ("fqdn", "-bad-.example.com"),
        ("mac", "12:34"),
    ]));

    let found: Vec<(&str, ReasonCode)> = anomalies
        .iter()
        .map(|a| (a.issues[0].field.as_str(), a.issues[0].kind))
        .collect();
    assert_eq!(
        found,
        vec![
            ("ip", ReasonCode::OctetOutOfRange),
            ("hostname", ReasonCode::Empty),
            ("fqdn", ReasonCode::InvalidLabelFormat),
            ("mac", ReasonCode::InvalidFormat),
        ]
    );
    assert!(anomalies.iter().all(|a| a.source_row_id == "21"));
    assert_eq!(
        out.normalization_steps,
        "ip_trim|ip_invalid_octet_out_of_range|hostname_invalid_empty|\
         fqdn_invalid_invalid_label_format|mac_invalid_invalid_format|device_type_llm_classified"
    );
}

#[test]
fn test_ipv6_row_gets_pointer_but_no_subnet() {
    let processor = RecordProcessor::new(InferenceGateway::disabled());

    let (out, anomalies) = processor.process(&raw(&[
        ("source_row_id", "30"),
        ("ip", " 2001:DB8:0:0:0:0:0:1 "),
        ("hostname", "edge-v6"),
        ("fqdn", "edge-v6.corp.example.com"),
        ("mac", "aa:bb:cc:00:00:30"),
        ("device_type", "router"),
    ]));

    assert!(anomalies.is_empty(), "{anomalies:?}");
    assert!(out.ip_valid);
    assert_eq!(out.ip, "2001:db8::1");
    assert_eq!(out.ip_version, "6");
    assert!(out.subnet_cidr.is_empty());
    assert_eq!(
        out.reverse_ptr,
        "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
    );
    assert!(out.normalization_steps.contains("reverse_ptr_generated"));
    assert!(!out.normalization_steps.contains("subnet_derived"));
    assert!(out
        .normalization_steps
        .starts_with("ip_trim|ip_parse|ip_normalize|reverse_ptr_generated|hostname_normalize"));
}
