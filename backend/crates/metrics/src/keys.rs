use std::sync::OnceLock;

use pulse_records::ChangeRecord;
use regex::Regex;

fn issue_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z][A-Z0-9]+-[0-9]+\b").expect("valid issue key pattern"))
}

/// First issue-tracker key (`ABC-123`) in `text`.
pub fn extract_issue_key(text: &str) -> Option<String> {
    issue_key_pattern()
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// Issue key referenced by a change: title first, then identifier.
pub fn change_issue_key(change: &ChangeRecord) -> Option<String> {
    extract_issue_key(&change.title).or_else(|| extract_issue_key(&change.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_key_in_title() {
        assert_eq!(
            extract_issue_key("PLAT-142: fix retry loop").as_deref(),
            Some("PLAT-142")
        );
        assert_eq!(
            extract_issue_key("[OPS-7] bump deps, see OPS-8").as_deref(),
            Some("OPS-7")
        );
    }

    #[test]
    fn ignores_lowercase_and_bare_numbers() {
        assert!(extract_issue_key("plat-142 lowercase").is_none());
        assert!(extract_issue_key("release 2025-01").is_none());
        assert!(extract_issue_key("").is_none());
    }

    #[test]
    fn key_with_digits_in_project() {
        assert_eq!(extract_issue_key("A1B-9 tidy").as_deref(), Some("A1B-9"));
    }

    fn make_change(id: &str, title: &str) -> ChangeRecord {
        ChangeRecord {
            id: id.to_string(),
            title: title.to_string(),
            author: "alice".to_string(),
            merged: true,
            state: pulse_records::ChangeState::Merged,
            additions: 0,
            deletions: 0,
            created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
            merged_at: None,
            cycle_time_hours: None,
            time_to_first_review_hours: None,
        }
    }

    #[test]
    fn change_key_prefers_title_then_id() {
        let titled = make_change("feature/CORE-2", "CORE-1 add endpoint");
        assert_eq!(change_issue_key(&titled).as_deref(), Some("CORE-1"));

        let from_id = make_change("feature/CORE-2-login", "add login page");
        assert_eq!(change_issue_key(&from_id).as_deref(), Some("CORE-2"));

        let neither = make_change("1234", "tidy imports");
        assert!(change_issue_key(&neither).is_none());
    }
}
