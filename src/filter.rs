//! History Filters
//!
//! Pure predicates applied client-side over fetched checklists; nothing
//! here reaches the store. Empty queries match everything.

use crate::models::ChecklistInstance;

/// Substring match on the stored `date` string (`YYYY-MM-DD`).
pub fn matches_date(checklist: &ChecklistInstance, query: &str) -> bool {
    query.is_empty() || checklist.date.contains(query)
}

/// Case-insensitive substring match on the inspector name.
pub fn matches_inspector(checklist: &ChecklistInstance, query: &str) -> bool {
    query.is_empty()
        || checklist
            .inspector
            .to_lowercase()
            .contains(&query.to_lowercase())
}

/// Case-insensitive substring match on the creator email (admin view only).
pub fn matches_creator(checklist: &ChecklistInstance, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    match &checklist.created_by {
        Some(creator) => creator.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::create_new_checklist;

    fn sample(inspector: &str, created_by: Option<&str>) -> ChecklistInstance {
        let mut checklist = create_new_checklist(2025, 6, 1, 1);
        checklist.inspector = inspector.to_string();
        checklist.created_by = created_by.map(str::to_string);
        checklist
    }

    #[test]
    fn empty_queries_match_everything() {
        let checklist = sample("", None);
        assert!(matches_date(&checklist, ""));
        assert!(matches_inspector(&checklist, ""));
        assert!(matches_creator(&checklist, ""));
    }

    #[test]
    fn date_filter_is_a_substring_match() {
        let checklist = sample("田中", None);
        assert!(matches_date(&checklist, "2025-06"));
        assert!(matches_date(&checklist, "06-01"));
        assert!(!matches_date(&checklist, "2025-07"));
    }

    #[test]
    fn inspector_filter_ignores_case() {
        let checklist = sample("Tanaka", None);
        assert!(matches_inspector(&checklist, "tanaka"));
        assert!(matches_inspector(&checklist, "TANA"));
        assert!(!matches_inspector(&checklist, "suzuki"));
    }

    #[test]
    fn creator_filter_ignores_case_and_skips_unowned_documents() {
        let checklist = sample("田中", Some("A@X.com"));
        assert!(matches_creator(&checklist, "a@x"));
        assert!(!matches_creator(&checklist, "b@x"));
        assert!(!matches_creator(&sample("田中", None), "a@x"));
    }
}
