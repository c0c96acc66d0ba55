// Gateway call sites with a scripted generator standing in for the assistant
mod common;

use common::scripted_gateway;
use invnorm::config::{DomainsConfig, RegionDomain};
use invnorm::gateway::{InferenceGateway, OwnerInfo, Source};

#[test]
fn test_owner_email_only_needs_no_call() {
    let (gateway, prompts) = scripted_gateway(&[]);

    let resolved = gateway.parse_owner("jane@corp.example.com");

    assert_eq!(
        resolved.value,
        OwnerInfo {
            owner: "jane".to_string(),
            owner_email: "jane@corp.example.com".to_string(),
            owner_team: String::new(),
        }
    );
    assert_eq!(resolved.source, Source::Deterministic);
    assert!(prompts.lock().unwrap().is_empty());
    assert_eq!(gateway.llm_calls(), 0);
}

#[test]
fn test_owner_reply_is_lowercased() {
    let (gateway, prompts) = scripted_gateway(&[Some(
        r#"{"owner": " Jane Doe ", "owner_email": "Jane.Doe@Corp.Example.com", "owner_team": "Platform"}"#,
    )]);

    let resolved = gateway.parse_owner("Jane Doe <jane.doe@corp.example.com> platform");

    assert_eq!(resolved.source, Source::Inferred);
    assert_eq!(resolved.value.owner, "jane doe");
    assert_eq!(resolved.value.owner_email, "jane.doe@corp.example.com");
    assert_eq!(resolved.value.owner_team, "platform");

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Jane Doe <jane.doe@corp.example.com> platform"));
}

#[test]
fn test_owner_fenced_reply_falls_back() {
    let (gateway, _) = scripted_gateway(&[Some(
        "```json\n{\"owner\": \"x\", \"owner_email\": \"x@y.io\", \"owner_team\": \"\"}\n```",
    )]);

    let resolved = gateway.parse_owner("Bob (ops) bob@corp.example.com");

    assert_eq!(resolved.source, Source::Fallback);
    assert_eq!(resolved.value.owner, "bob");
    assert_eq!(resolved.value.owner_team, "ops");
    assert_eq!(resolved.value.owner_email, "bob@corp.example.com");
}

#[test]
fn test_device_reply_trusted_verbatim() {
    let (gateway, prompts) = scripted_gateway(&[Some(
        r#"{"device_type": "camera", "device_type_confidence": "medium"}"#,
    )]);

    let resolved = gateway.classify_device_type("cam-lobby-02", "", "ceiling dome");

    assert_eq!(resolved.value.device_type, "camera");
    assert_eq!(resolved.value.device_type_confidence, "medium");
    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].contains("hostname: cam-lobby-02, notes: ceiling dome"));
}

#[test]
fn test_device_extra_key_falls_back() {
    let (gateway, _) = scripted_gateway(&[Some(
        r#"{"device_type": "camera", "device_type_confidence": "high", "reason": "name"}"#,
    )]);

    let resolved = gateway.classify_device_type("cam-01", "webcam", "");

    // "webcam" partially matches "cam", which becomes the low-confidence fallback
    assert_eq!(resolved.source, Source::Fallback);
    assert_eq!(resolved.value.device_type, "camera");
    assert_eq!(resolved.value.device_type_confidence, "low");
}

#[test]
fn test_device_high_confidence_skips_call() {
    let (gateway, _) = scripted_gateway(&[]);
    let resolved = gateway.classify_device_type("core-01", "srv", "");
    assert_eq!(resolved.value.device_type, "server");
    assert_eq!(resolved.value.device_type_confidence, "high");
    assert_eq!(gateway.llm_calls(), 0);
}

#[test]
fn test_site_alias_and_inference() {
    let (gateway, _) = scripted_gateway(&[Some(r#"{"site_normalized": "PNQ-Tower-B"}"#)]);

    assert_eq!(gateway.normalize_site("blr").value, "BLR-Campus");
    assert_eq!(gateway.normalize_site("Pune Tower B").value, "PNQ-Tower-B");
    assert_eq!(gateway.llm_calls(), 1);
}

#[test]
fn test_site_failure_uses_hyphen_form() {
    let (gateway, _) = scripted_gateway(&[None, Some(r#"{"site_normalized": 5}"#)]);

    assert_eq!(gateway.normalize_site("Pune  Tower_B").value, "Pune-Tower-B");
    assert_eq!(gateway.normalize_site("Mumbai Annex").value, "Mumbai-Annex");
    assert_eq!(gateway.llm_calls(), 2);
}

#[test]
fn test_disabled_gateway_fallbacks() {
    let gateway = InferenceGateway::disabled();

    let device = gateway.classify_device_type("", "", "").value;
    assert_eq!(device.device_type, "unknown");
    assert_eq!(device.device_type_confidence, "low");

    assert_eq!(gateway.normalize_site("Pune Tower").value, "Pune-Tower");
    assert_eq!(gateway.normalize_site("N/A").value, "");

    let spelled_out = gateway.normalize_site("HQ Bldg 1");
    assert_eq!(spelled_out.value, "HQ-Bldg-1");
    assert_eq!(spelled_out.source, Source::Fallback);
    assert_eq!(gateway.llm_calls(), 0);
}

#[test]
fn test_custom_domains() {
    let domains = DomainsConfig {
        default_domain: "example.net".to_string(),
        regions: vec![RegionDomain {
            keywords: vec!["pune".to_string()],
            domain: "pnq.example.net".to_string(),
        }],
    };
    let gateway = InferenceGateway::disabled().with_domains(domains);

    assert_eq!(gateway.infer_fqdn_domain("Pune-Tower", ""), "pnq.example.net");
    assert_eq!(gateway.infer_fqdn_domain("BLR-Campus", ""), "example.net");
    assert_eq!(gateway.infer_fqdn_domain("", "ops@lab.example.org"), "lab.example.org");
}
