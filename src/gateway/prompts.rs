// Prompt text sent to the assistant. Each prompt names the exact reply keys
// that the matching reply struct accepts.

const JSON_ONLY: &str = "You must always return valid JSON that strictly adheres to the \
specified format. Do not include any explanatory text, markdown code blocks, or formatting \
outside the JSON object.";

pub fn owner_system_prompt() -> String {
    format!(
        "You are a data parsing assistant that extracts structured fields from \
         unstructured owner text. {JSON_ONLY}"
    )
}

pub fn device_system_prompt() -> String {
    format!(
        "You are a network device classification assistant. Classify devices from \
         hostname patterns, naming conventions and notes. {JSON_ONLY}"
    )
}

pub fn site_system_prompt() -> String {
    format!(
        "You are a location normalization assistant that standardizes site and building \
         names for IT infrastructure inventories. {JSON_ONLY}"
    )
}

pub fn owner_prompt(raw: &str, teams: &[&str]) -> String {
    format!(
        r#"Parse the owner information below into a JSON object.

Input: "{raw}"

Requirements:
1. Return ONLY the JSON object, no other text and no markdown
2. Use exactly these keys: "owner", "owner_email", "owner_team"
3. Every value is a string; use "" when a field is absent
4. "owner_team" is one of: {teams}, or ""

Expected shape:
{{"owner": "person name", "owner_email": "name@domain", "owner_team": "team"}}"#,
        teams = teams.join(", "),
    )
}

pub fn device_prompt(context: &str, labels: &[&str]) -> String {
    format!(
        r#"Classify the network device described below and answer with a JSON object.

Context: {context}

Requirements:
1. Return ONLY the JSON object, no other text and no markdown
2. Use exactly these keys: "device_type", "device_type_confidence"
3. "device_type" is one of: {labels}
4. "device_type_confidence" is one of: high, medium, low
5. Use "unknown" only when nothing reasonable can be inferred

Expected shape:
{{"device_type": "server", "device_type_confidence": "medium"}}"#,
        labels = labels.join(", "),
    )
}

pub fn site_prompt(site: &str) -> String {
    format!(
        r#"Normalize the site name below to the form CITY-BUILDING-AREA and answer with a JSON object.

Input: "{site}"

Requirements:
1. Return ONLY the JSON object, no other text and no markdown
2. Use exactly one key: "site_normalized"
3. Uppercase city codes (BLR, HQ, DC), title case building and area names
4. Separate components with single hyphens
5. Use HQ when the city cannot be determined; expand "Bldg" to "Building"

Examples: "BLR Campus" -> "BLR-Campus", "HQ Bldg 1" -> "HQ-Building-1", "Lab-1" -> "HQ-Lab-1"

Expected shape:
{{"site_normalized": "HQ-Building-1"}}"#
    )
}
