//! Data Model
//!
//! Checklist documents, admin roster records and the signed-in identity,
//! matching the document shapes stored in the `checklists` / `admins`
//! collections.

use serde::{Deserialize, Serialize};

/// Signed-in user delivered by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// One checkable leaf: a simple item or a single equipment sub-check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEntry {
    pub id: String,
    pub text: String,
    pub checked: bool,
    pub note: String,
}

/// A section item is either a plain check or an equipment group.
///
/// The stored document keeps the historical shape: equipment groups are
/// distinguished by the presence of a `checks` array, so serialization is
/// untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionItem {
    Equipment { name: String, checks: Vec<CheckEntry> },
    Simple(CheckEntry),
}

/// One titled section of the checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub title: String,
    pub items: Vec<SectionItem>,
}

/// One day's inspection sheet, persisted as a single document keyed by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistInstance {
    pub id: String,
    pub date: String,
    pub title: String,
    #[serde(rename = "header_info")]
    pub header_info: String,
    pub sections: Vec<ChecklistSection>,
    pub special_notes: String,
    #[serde(default)]
    pub inspector: String,
    #[serde(default)]
    pub weather: String,
    pub completed_at: Option<String>,
    pub created_by: Option<String>,
}

impl ChecklistInstance {
    fn simple_entry_mut(&mut self, section: usize, item: usize) -> Option<&mut CheckEntry> {
        match self
            .sections
            .get_mut(section)
            .and_then(|s| s.items.get_mut(item))
        {
            Some(SectionItem::Simple(entry)) => Some(entry),
            _ => None,
        }
    }

    fn equipment_entry_mut(
        &mut self,
        section: usize,
        item: usize,
        check: usize,
    ) -> Option<&mut CheckEntry> {
        match self
            .sections
            .get_mut(section)
            .and_then(|s| s.items.get_mut(item))
        {
            Some(SectionItem::Equipment { checks, .. }) => checks.get_mut(check),
            _ => None,
        }
    }

    /// Set checked/note on a simple item. Equipment groups are addressed
    /// through `set_equipment_check`; calling this on one is a no-op.
    pub fn set_item_check(&mut self, section: usize, item: usize, checked: bool, note: &str) {
        if let Some(entry) = self.simple_entry_mut(section, item) {
            entry.checked = checked;
            entry.note = note.to_string();
        }
    }

    /// Set only the checked flag of a simple item, leaving its note alone.
    pub fn set_item_checked(&mut self, section: usize, item: usize, checked: bool) {
        if let Some(entry) = self.simple_entry_mut(section, item) {
            entry.checked = checked;
        }
    }

    /// Set only the note of a simple item, leaving its checked flag alone.
    pub fn set_item_note(&mut self, section: usize, item: usize, note: &str) {
        if let Some(entry) = self.simple_entry_mut(section, item) {
            entry.note = note.to_string();
        }
    }

    /// Set checked/note on one equipment sub-check.
    pub fn set_equipment_check(
        &mut self,
        section: usize,
        item: usize,
        check: usize,
        checked: bool,
        note: &str,
    ) {
        if let Some(entry) = self.equipment_entry_mut(section, item, check) {
            entry.checked = checked;
            entry.note = note.to_string();
        }
    }

    /// Set only the checked flag of one equipment sub-check.
    pub fn set_equipment_checked(
        &mut self,
        section: usize,
        item: usize,
        check: usize,
        checked: bool,
    ) {
        if let Some(entry) = self.equipment_entry_mut(section, item, check) {
            entry.checked = checked;
        }
    }

    /// Set only the note of one equipment sub-check.
    pub fn set_equipment_note(&mut self, section: usize, item: usize, check: usize, note: &str) {
        if let Some(entry) = self.equipment_entry_mut(section, item, check) {
            entry.note = note.to_string();
        }
    }

    /// Replace the free-text notes section verbatim.
    pub fn set_special_notes(&mut self, text: &str) {
        self.special_notes = text.to_string();
    }

    /// Count (completed, total) over every leaf check.
    pub fn completion_status(&self) -> (u32, u32) {
        let mut completed = 0;
        let mut total = 0;
        for section in &self.sections {
            for item in &section.items {
                match item {
                    SectionItem::Simple(entry) => {
                        total += 1;
                        if entry.checked {
                            completed += 1;
                        }
                    }
                    SectionItem::Equipment { checks, .. } => {
                        for check in checks {
                            total += 1;
                            if check.checked {
                                completed += 1;
                            }
                        }
                    }
                }
            }
        }
        (completed, total)
    }
}

/// Completion percentage, defined as 0 for an empty checklist.
pub fn completion_rate(completed: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Roster entry in the `admins` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub added_by: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::create_new_checklist;

    #[test]
    fn item_check_mutates_only_the_addressed_simple_item() {
        let mut checklist = create_new_checklist(2025, 6, 1, 1000);
        checklist.set_item_check(0, 0, true, "ok");

        let SectionItem::Simple(entry) = &checklist.sections[0].items[0] else {
            panic!("expected a simple item at (0, 0)");
        };
        assert!(entry.checked);
        assert_eq!(entry.note, "ok");

        let SectionItem::Simple(other) = &checklist.sections[0].items[1] else {
            panic!("expected a simple item at (0, 1)");
        };
        assert!(!other.checked);
        assert_eq!(other.note, "");
    }

    #[test]
    fn item_check_is_a_noop_on_equipment_groups() {
        let mut checklist = create_new_checklist(2025, 6, 1, 1000);
        let before = checklist.clone();
        // Section 2 holds the per-equipment groups.
        checklist.set_item_check(2, 0, true, "should not land");
        assert_eq!(checklist, before);
    }

    #[test]
    fn equipment_check_mutates_exactly_the_addressed_sub_check() {
        let mut checklist = create_new_checklist(2025, 6, 1, 1000);
        checklist.set_equipment_check(2, 0, 1, true, "表示灯OK");

        let SectionItem::Equipment { checks, .. } = &checklist.sections[2].items[0] else {
            panic!("expected an equipment group at (2, 0)");
        };
        assert!(checks[1].checked);
        assert_eq!(checks[1].note, "表示灯OK");
        assert!(!checks[0].checked);
    }

    #[test]
    fn single_field_setters_leave_the_other_field_alone() {
        let mut checklist = create_new_checklist(2025, 6, 1, 1000);

        checklist.set_item_checked(0, 0, true);
        checklist.set_item_note(0, 0, "メモ");
        let SectionItem::Simple(entry) = &checklist.sections[0].items[0] else {
            panic!("expected a simple item at (0, 0)");
        };
        assert!(entry.checked);
        assert_eq!(entry.note, "メモ");

        checklist.set_equipment_note(2, 0, 0, "異音なし");
        checklist.set_equipment_checked(2, 0, 0, true);
        let SectionItem::Equipment { checks, .. } = &checklist.sections[2].items[0] else {
            panic!("expected an equipment group at (2, 0)");
        };
        assert!(checks[0].checked);
        assert_eq!(checks[0].note, "異音なし");
    }

    #[test]
    fn completion_status_counts_every_leaf() {
        let mut checklist = create_new_checklist(2025, 6, 1, 1000);
        let (completed, total) = checklist.completion_status();
        assert_eq!(completed, 0);
        // 4 + 2 simple items, 4+1+3+1+2+3+3 equipment sub-checks
        assert_eq!(total, 23);

        checklist.set_item_check(0, 0, true, "");
        checklist.set_equipment_check(2, 0, 0, true, "");
        assert_eq!(checklist.completion_status(), (2, 23));
    }

    #[test]
    fn completion_rate_rounds_and_handles_empty() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(0, 23), 0);
        assert_eq!(completion_rate(23, 23), 100);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
    }

    #[test]
    fn section_items_round_trip_through_the_stored_shape() {
        let checklist = create_new_checklist(2025, 6, 1, 1000);
        let json = serde_json::to_string(&checklist).expect("serialize");

        // Equipment groups keep the `checks` discriminator on the wire.
        assert!(json.contains("\"checks\""));
        assert!(json.contains("\"specialNotes\""));

        let back: ChecklistInstance = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, checklist);
    }
}
