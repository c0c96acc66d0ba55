// Per-record normalization
//
// Fields are processed in a fixed order because later steps read earlier
// results: the FQDN check needs the validated hostname, device-type context
// prefers it too.

mod record;

pub use record::{
    Anomaly, CanonicalRecord, Issue, NormalizationTrace, RawRecord, CANONICAL_COLUMNS, RAW_COLUMNS,
};

use tracing::debug;

use crate::derivation;
use crate::gateway::InferenceGateway;
use crate::validators::{
    normalize_device_type, validate_fqdn, validate_hostname, validate_ip, validate_mac, Confidence,
    ReasonCode,
};

const ACTION_IP: &str = "Correct IP address or mark record for review";
const ACTION_HOSTNAME: &str = "Correct hostname format per RFC 1123";
const ACTION_FQDN_INCONSISTENT: &str = "Verify FQDN matches hostname";
const ACTION_FQDN: &str = "Correct FQDN format";
const ACTION_MAC: &str = "Correct MAC address format (XX:XX:XX:XX:XX:XX)";

/// Turns raw rows into canonical rows plus anomalies
pub struct RecordProcessor {
    gateway: InferenceGateway,
}

impl RecordProcessor {
    pub fn new(gateway: InferenceGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &InferenceGateway {
        &self.gateway
    }

    /// Normalize one record
    ///
    /// Never fails: every data problem becomes an anomaly and every gateway
    /// problem becomes a fallback value.
    pub fn process(&self, raw: &RawRecord) -> (CanonicalRecord, Vec<Anomaly>) {
        let row_id = raw.source_row_id.as_str();
        let mut out = CanonicalRecord {
            source_row_id: raw.source_row_id.clone(),
            ..CanonicalRecord::default()
        };
        let mut trace = NormalizationTrace::new();
        let mut anomalies = Vec::new();

        // 1. IP address and derived fields
        trace.push("ip_trim");
        let ip = validate_ip(&raw.ip);
        match ip.valid_value() {
            Some(addr) => {
                trace.push("ip_parse");
                trace.push("ip_normalize");
                let derived = derivation::derive(addr);

                out.ip = addr.canonical().to_string();
                out.ip_valid = true;
                out.ip_version = addr.version().as_str().to_string();
                if !derived.subnet_cidr.is_empty() {
                    trace.push("subnet_derived");
                }
                if !derived.reverse_ptr.is_empty() {
                    trace.push("reverse_ptr_generated");
                }
                out.subnet_cidr = derived.subnet_cidr;
                out.reverse_ptr = derived.reverse_ptr;
            }
            None => {
                out.ip = raw.ip.trim().to_string();
                trace.push(format!("ip_invalid_{}", ip.reason));
                anomalies.push(Anomaly::single(row_id, "ip", ip.reason, &raw.ip, ACTION_IP));
            }
        }

        // 2. Hostname
        let hostname = validate_hostname(&raw.hostname);
        let valid_hostname = hostname.valid_value().cloned();
        match &valid_hostname {
            Some(name) => {
                trace.push("hostname_normalize");
                out.hostname = name.clone();
                out.hostname_valid = true;
            }
            None => {
                out.hostname = raw.hostname.trim().to_string();
                trace.push(format!("hostname_invalid_{}", hostname.reason));
                if !hostname.reason.is_benign() {
                    anomalies.push(Anomaly::single(
                        row_id,
                        "hostname",
                        hostname.reason,
                        &raw.hostname,
                        ACTION_HOSTNAME,
                    ));
                }
            }
        }

        // 3. FQDN, checked against the validated hostname
        let fqdn = validate_fqdn(
            &raw.fqdn,
            valid_hostname.as_deref(),
            &self.gateway.domains().default_domain,
        );
        let mut fqdn_name = fqdn.value.as_ref().map(|f| f.name.clone()).unwrap_or_default();
        if fqdn.reason == ReasonCode::ConstructedFromHostname {
            if let Some(host) = &valid_hostname {
                // Owner has not been parsed yet, so only the site informs the domain
                let domain = self.gateway.infer_fqdn_domain(&raw.site, "");
                fqdn_name = format!("{}.{}", host, domain);
                trace.push("fqdn_domain_inferred");
            }
        }

        match fqdn.valid_value() {
            Some(validated) => {
                trace.push("fqdn_normalize");
                out.fqdn_consistent = validated.consistent;
                if !validated.consistent {
                    trace.push("fqdn_inconsistent");
                    anomalies.push(Anomaly::single(
                        row_id,
                        "fqdn",
                        ReasonCode::InconsistentWithHostname,
                        &fqdn_name,
                        ACTION_FQDN_INCONSISTENT,
                    ));
                }
                out.fqdn = fqdn_name;
            }
            None => {
                trace.push(format!("fqdn_invalid_{}", fqdn.reason));
                if !fqdn.reason.is_benign() {
                    anomalies.push(Anomaly::single(
                        row_id,
                        "fqdn",
                        fqdn.reason,
                        &raw.fqdn,
                        ACTION_FQDN,
                    ));
                }
                out.fqdn = fqdn_name;
            }
        }

        // 4. MAC address
        let mac = validate_mac(&raw.mac);
        match mac.valid_value() {
            Some(normalized) => {
                trace.push("mac_normalize");
                out.mac = normalized.clone();
                out.mac_valid = true;
            }
            None => {
                out.mac = raw.mac.trim().to_string();
                trace.push(format!("mac_invalid_{}", mac.reason));
                if !mac.reason.is_benign() {
                    anomalies.push(Anomaly::single(row_id, "mac", mac.reason, &raw.mac, ACTION_MAC));
                }
            }
        }

        // 5. Owner
        let owner = self.gateway.parse_owner(&raw.owner).value;
        if !owner.is_empty() {
            trace.push("owner_parsed");
        }
        out.owner = owner.owner;
        out.owner_email = owner.owner_email;
        out.owner_team = owner.owner_team;

        // 6. Device type, escalating only weak local results
        let (local_type, confidence) = normalize_device_type(&raw.device_type);
        if confidence == Confidence::Low || local_type.is_empty() {
            let context_host = valid_hostname.as_deref().unwrap_or(&raw.hostname);
            let device = self
                .gateway
                .classify_device_type(context_host, &raw.device_type, &raw.notes)
                .value;
            out.device_type = device.device_type;
            out.device_type_confidence = device.device_type_confidence;
            trace.push("device_type_llm_classified");
        } else {
            out.device_type = local_type;
            out.device_type_confidence = confidence.to_string();
            trace.push("device_type_normalized");
        }

        // 7. Site; the raw value is kept alongside the normalized one
        let site = self.gateway.normalize_site(&raw.site).value;
        if !site.is_empty() {
            trace.push("site_normalized");
        }
        out.site = raw.site.clone();
        out.site_normalized = site;

        // 8. Assemble
        out.normalization_steps = trace.joined();
        debug!(
            row = row_id,
            anomalies = anomalies.len(),
            steps = %out.normalization_steps,
            "Record normalized"
        );

        (out, anomalies)
    }
}
