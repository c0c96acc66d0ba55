use std::sync::LazyLock;

use ahash::HashMap;
use serde::Deserialize;

use super::prompts;
use super::{Escalation, Stage};
use crate::patterns::HYPHEN_RUN;

/// Known site spellings, keyed by the lowercased deterministic form
static SITE_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("blr", "BLR-Campus"),
        ("hq", "HQ-Building-1"),
        ("hq-building-1", "HQ-Building-1"),
        ("lab-1", "HQ-Lab-1"),
        ("dc-1", "DC-1"),
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteReply {
    site_normalized: String,
}

impl From<SiteReply> for String {
    fn from(reply: SiteReply) -> Self {
        reply.site_normalized
    }
}

/// Hyphenated form: spaces and underscores become `-`, runs collapse
pub fn deterministic_site(site: &str) -> String {
    let hyphenated = site.trim().replace([' ', '_'], "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").into_owned()
}

pub fn site_stage(raw: &str) -> Stage<String> {
    let site = raw.trim();
    if site.is_empty() || site.eq_ignore_ascii_case("n/a") {
        return Stage::Settled(String::new());
    }

    let normalized = deterministic_site(site);
    if let Some(alias) = SITE_ALIASES.get(normalized.to_lowercase().as_str()) {
        return Stage::Settled(alias.to_string());
    }

    Stage::Escalate(Escalation {
        task: "site",
        prompt: prompts::site_prompt(site),
        system_prompt: prompts::site_system_prompt(),
        fallback: normalized,
    })
}
