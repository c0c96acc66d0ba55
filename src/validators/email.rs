use crate::patterns::{EMAIL, NAME_SEPARATORS};

/// First email address found in free text, lowercased
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_lowercase())
}

/// Person name derived from an email local part
///
/// `john.doe@corp.example.com` becomes `john doe`. Returns an empty string
/// when the input has no `@`.
pub fn name_from_email(email: &str) -> String {
    let Some((local, _)) = email.split_once('@') else {
        return String::new();
    };

    NAME_SEPARATORS
        .split(local)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email("Owner: Jane Doe <Jane.Doe@Corp.Example.com>"),
            Some("jane.doe@corp.example.com".to_string())
        );
        assert_eq!(
            extract_email("a@x.io and b@y.io"),
            Some("a@x.io".to_string())
        );
        assert_eq!(extract_email("platform team"), None);
        assert_eq!(extract_email(""), None);
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("jane@corp.example.com"), "jane");
        assert_eq!(name_from_email("john.doe@corp.example.com"), "john doe");
        assert_eq!(name_from_email("J_Smith-Jr@corp.example.com"), "j smith jr");
        assert_eq!(name_from_email("a..b@x.io"), "a b");
        assert_eq!(name_from_email("not-an-email"), "");
    }
}
