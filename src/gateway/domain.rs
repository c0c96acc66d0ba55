use crate::config::DomainsConfig;

/// Pick the DNS domain for a constructed FQDN
///
/// The owner's email domain wins, then the first region whose keyword
/// appears in the site, then the default domain.
pub fn infer_fqdn_domain(site: &str, owner_email: &str, domains: &DomainsConfig) -> String {
    if let Some((_, domain)) = owner_email.split_once('@') {
        return domain.to_string();
    }

    let site = site.to_lowercase();
    domains
        .regions
        .iter()
        .find(|region| {
            region
                .keywords
                .iter()
                .any(|k| !k.is_empty() && site.contains(&k.to_lowercase()))
        })
        .map(|region| region.domain.clone())
        .unwrap_or_else(|| domains.default_domain.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_domain_wins() {
        let domains = DomainsConfig::default();
        assert_eq!(infer_fqdn_domain("BLR-Campus", "a@eng.example.org", &domains), "eng.example.org");
    }

    #[test]
    fn test_site_regions() {
        let domains = DomainsConfig::default();
        assert_eq!(infer_fqdn_domain("BLR-Campus", "", &domains), "blr.corp.example.com");
        assert_eq!(infer_fqdn_domain("Bangalore", "", &domains), "blr.corp.example.com");
        assert_eq!(infer_fqdn_domain("HQ-Building-1", "", &domains), "hq.corp.example.com");
        assert_eq!(infer_fqdn_domain("DC-1", "", &domains), "dc.corp.example.com");
        assert_eq!(infer_fqdn_domain("Pune", "", &domains), "corp.example.com");
        assert_eq!(infer_fqdn_domain("", "", &domains), "corp.example.com");
    }

    #[test]
    fn test_first_region_wins() {
        // "hq" is checked before "dc"
        let domains = DomainsConfig::default();
        assert_eq!(infer_fqdn_domain("HQ-DC", "", &domains), "hq.corp.example.com");
    }
}
