use serde::{Deserialize, Serialize};

use super::prompts;
use super::{Escalation, Stage};
use crate::validators::{extract_email, name_from_email};

/// Team vocabulary, scanned in order
pub const TEAM_KEYWORDS: &[&str] = &["platform", "ops", "operations", "sec", "security", "facilities"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnerInfo {
    pub owner: String,
    pub owner_email: String,
    pub owner_team: String,
}

impl OwnerInfo {
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() && self.owner_email.is_empty() && self.owner_team.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnerReply {
    owner: String,
    owner_email: String,
    owner_team: String,
}

impl From<OwnerReply> for OwnerInfo {
    fn from(reply: OwnerReply) -> Self {
        Self {
            owner: reply.owner.trim().to_lowercase(),
            owner_email: reply.owner_email.trim().to_lowercase(),
            owner_team: reply.owner_team.trim().to_lowercase(),
        }
    }
}

/// Settle simple owner strings locally, escalate mixed ones
pub fn owner_stage(raw: &str) -> Stage<OwnerInfo> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Stage::Settled(OwnerInfo::default());
    }

    let email = extract_email(raw);

    if let Some(email) = email.as_deref().filter(|e| *e == trimmed) {
        return Stage::Settled(OwnerInfo {
            owner: name_from_email(email),
            owner_email: email.to_string(),
            owner_team: String::new(),
        });
    }

    if !raw.contains('@') {
        let lower = raw.to_lowercase();
        if let Some(team) = TEAM_KEYWORDS.iter().find(|k| lower.contains(*k)) {
            return Stage::Settled(OwnerInfo {
                owner_team: team.to_string(),
                ..OwnerInfo::default()
            });
        }
        return Stage::Settled(OwnerInfo {
            owner: trimmed.to_lowercase(),
            ..OwnerInfo::default()
        });
    }

    Stage::Escalate(Escalation {
        task: "owner",
        prompt: prompts::owner_prompt(raw, TEAM_KEYWORDS),
        system_prompt: prompts::owner_system_prompt(),
        fallback: owner_fallback(raw, email),
    })
}

/// Whitespace token scan used when the assistant cannot help
fn owner_fallback(raw: &str, extracted: Option<String>) -> OwnerInfo {
    let mut owner = String::new();
    let mut token_email = None;
    let mut team = String::new();

    for token in raw.split_whitespace() {
        let bare = token.trim_matches(|c| c == '(' || c == ')');
        if token.contains('@') {
            token_email = Some(bare.to_string());
        } else if TEAM_KEYWORDS.contains(&bare.to_lowercase().as_str()) {
            team = bare.to_lowercase();
        } else if owner.is_empty() {
            owner = bare.to_lowercase();
        }
    }

    OwnerInfo {
        owner,
        owner_email: token_email.or(extracted).unwrap_or_default(),
        owner_team: team,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(raw: &str) -> OwnerInfo {
        match owner_stage(raw) {
            Stage::Settled(info) => info,
            Stage::Escalate(_) => panic!("{raw:?} should settle locally"),
        }
    }

    #[test]
    fn test_plain_email() {
        let info = settled(" jane@corp.example.com ");
        assert_eq!(info.owner, "jane");
        assert_eq!(info.owner_email, "jane@corp.example.com");
        assert_eq!(info.owner_team, "");
    }

    #[test]
    fn test_uppercase_email_escalates() {
        // The extracted address is lowercased, so it no longer equals the input
        assert!(matches!(owner_stage("Jane@Corp.Example.com"), Stage::Escalate(_)));
    }

    #[test]
    fn test_team_and_name() {
        assert_eq!(settled("Platform Team").owner_team, "platform");
        assert_eq!(settled("NetOps").owner_team, "ops");
        assert_eq!(settled("  Jane Doe ").owner, "jane doe");
        assert!(settled("   ").is_empty());
    }

    #[test]
    fn test_keyword_inside_name() {
        // Substring matching: "sec" hides inside this surname
        assert_eq!(settled("Priya Secunder").owner_team, "sec");
    }

    #[test]
    fn test_mixed_escalates_with_fallback() {
        let Stage::Escalate(escalation) = owner_stage("Jane Doe (platform) jane@corp.example.com")
        else {
            panic!("mixed owner text should escalate");
        };
        assert_eq!(escalation.task, "owner");
        assert!(escalation.prompt.contains("jane@corp.example.com"));
        assert_eq!(
            escalation.fallback,
            OwnerInfo {
                owner: "jane".to_string(),
                owner_email: "jane@corp.example.com".to_string(),
                owner_team: "platform".to_string(),
            }
        );
    }

    #[test]
    fn test_fallback_last_email_token_wins() {
        let info = owner_fallback("(ops) a@x.io b@y.io", None);
        assert_eq!(info.owner_email, "b@y.io");
        assert_eq!(info.owner_team, "ops");
        assert_eq!(info.owner, "");
    }

    #[test]
    fn test_fallback_uses_extracted_email() {
        let info = owner_fallback("Jane <ops>", Some("jane@x.io".to_string()));
        assert_eq!(info.owner_email, "jane@x.io");
        assert_eq!(info.owner, "jane");
    }

    #[test]
    fn test_reply_is_cleaned() {
        let reply = OwnerReply {
            owner: " Jane Doe ".to_string(),
            owner_email: "JANE@X.IO".to_string(),
            owner_team: "Ops".to_string(),
        };
        let info = OwnerInfo::from(reply);
        assert_eq!(info.owner, "jane doe");
        assert_eq!(info.owner_email, "jane@x.io");
        assert_eq!(info.owner_team, "ops");
    }
}
