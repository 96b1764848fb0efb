//! Checklist Template
//!
//! The fixed daily pre-work inspection template for the coke-screening
//! plant, plus the factory that stamps out a fresh instance for today.

use crate::models::{CheckEntry, ChecklistInstance, ChecklistSection, SectionItem};

pub const CHECKLIST_TITLE: &str = "石油コークス篩い分け設備 毎日の作業前点検チェックシート";

/// Exact title of the free-text section; it renders as a notes field, not a
/// list of checks.
pub const SPECIAL_NOTES_SECTION: &str = "4. 特記事項・申し送り事項";

enum TemplateItem {
    Simple(&'static str),
    Equipment {
        name: &'static str,
        checks: &'static [&'static str],
    },
}

struct TemplateSection {
    title: &'static str,
    items: &'static [TemplateItem],
}

const TEMPLATE_SECTIONS: &[TemplateSection] = &[
    TemplateSection {
        title: "1. 作業開始前の安全確認",
        items: &[
            TemplateItem::Simple("稼働エリアは明確にされ、安全が確保されているか？"),
            TemplateItem::Simple("作業員間で十分な打ち合わせを行い、安全な運転手順を確認したか？"),
            TemplateItem::Simple("連絡方法（復唱確認など）は全員で周知・確認済みか？"),
            TemplateItem::Simple("重機と作業員の作業エリアは分離され、連絡・合図の方法は確認済みか？"),
        ],
    },
    TemplateSection {
        title: "2. 設備全体の共通点検",
        items: &[
            TemplateItem::Simple("各設備の本体・構造体に、亀裂、損傷、変形がないか？"),
            TemplateItem::Simple("各設備の接合部のピン、ボルト類に脱落やゆるみがないか？"),
        ],
    },
    TemplateSection {
        title: "3. 各設備の個別点検",
        items: &[
            TemplateItem::Equipment {
                name: "動力制御盤",
                checks: &[
                    "盤本体に亀裂、損傷、変形、ボルトのゆるみはないか？",
                    "扉面の表示灯は正常に点灯・表示されているか？",
                    "盤内から異臭、異音、または異常な発熱はないか？",
                    "動力電源、スイッチ類は正常な状態か？",
                ],
            },
            TemplateItem::Equipment {
                name: "ベルトフィーダ",
                checks: &["モーター、軸受けから異臭、異音、異常な振動、発熱はないか？"],
            },
            TemplateItem::Equipment {
                name: "ベルトコンベア",
                checks: &[
                    "モーター、軸受けから異臭、異音、異常な振動、発熱はないか？",
                    "各シュートに原料が付着していないか？（必要に応じ清掃）",
                    "（清掃時）シュート内部に異常はないか？",
                ],
            },
            TemplateItem::Equipment {
                name: "ジャンピング",
                checks: &["本体から異臭、異音、異常な振動、発熱はないか？"],
            },
            TemplateItem::Equipment {
                name: "スクリーン",
                checks: &[
                    "スクリーンマットに原料が付着していないか？（必要に応じ清掃）",
                    "スクリーンマットに摩耗や破損などの異常はないか？",
                ],
            },
            TemplateItem::Equipment {
                name: "解砕機",
                checks: &[
                    "本体から異臭、異音、異常な発熱はないか？",
                    "内部に原料が付着していないか？（必要に応じ清掃）",
                    "破砕歯に摩耗や破損などの異常はないか？（目視点検）",
                ],
            },
            TemplateItem::Equipment {
                name: "ロールブレーカー",
                checks: &[
                    "本体から異臭、異音、異常な発熱はないか？",
                    "内部に原料が付着していないか？（必要に応じ清掃）",
                    "破砕歯に摩耗や破損などの異常はないか？（目視点検）",
                ],
            },
        ],
    },
    TemplateSection {
        title: SPECIAL_NOTES_SECTION,
        items: &[],
    },
];

/// Build a fresh checklist instance for the given calendar day.
///
/// `stamp_ms` seeds the instance and leaf ids; every leaf id is unique
/// within the instance. All leaves start unchecked with empty notes,
/// `completed_at` is unset and `created_by` is left for the caller.
pub fn create_new_checklist(year: i32, month: u32, day: u32, stamp_ms: u64) -> ChecklistInstance {
    let mut seq = 0u32;
    let mut next_id = |prefix: &str| {
        seq += 1;
        format!("{prefix}_{stamp_ms}_{seq}")
    };

    let sections: Vec<ChecklistSection> = TEMPLATE_SECTIONS
        .iter()
        .map(|section| ChecklistSection {
            title: section.title.to_string(),
            items: section
                .items
                .iter()
                .map(|item| match item {
                    TemplateItem::Simple(text) => SectionItem::Simple(CheckEntry {
                        id: next_id("item"),
                        text: text.to_string(),
                        checked: false,
                        note: String::new(),
                    }),
                    TemplateItem::Equipment { name, checks } => SectionItem::Equipment {
                        name: name.to_string(),
                        checks: checks
                            .iter()
                            .map(|text| CheckEntry {
                                id: next_id("check"),
                                text: text.to_string(),
                                checked: false,
                                note: String::new(),
                            })
                            .collect(),
                    },
                })
                .collect(),
        })
        .collect();

    ChecklistInstance {
        id: format!("checklist_{stamp_ms}"),
        date: format!("{year:04}-{month:02}-{day:02}"),
        title: CHECKLIST_TITLE.to_string(),
        header_info: format!("点検日: {year}年{month:02}月{day:02}日 天候: _____ 点検者: ______________"),
        sections,
        special_notes: String::new(),
        inspector: String::new(),
        weather: String::new(),
        completed_at: None,
        created_by: None,
    }
}

/// Instance for the current browser date, stamped with the current time.
pub fn new_for_today(created_by: &str) -> ChecklistInstance {
    let (year, month, day) = crate::time::today_parts();
    let mut checklist = create_new_checklist(year, month, day, crate::time::now_ms() as u64);
    checklist.created_by = Some(created_by.to_string());
    checklist
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn factory_fixes_date_and_leaves_completion_unset() {
        let checklist = create_new_checklist(2025, 6, 1, 1234);
        assert_eq!(checklist.date, "2025-06-01");
        assert_eq!(checklist.title, CHECKLIST_TITLE);
        assert_eq!(checklist.completed_at, None);
        assert_eq!(checklist.created_by, None);
        assert_eq!(checklist.special_notes, "");
    }

    #[test]
    fn every_leaf_starts_unchecked_with_a_unique_id() {
        let checklist = create_new_checklist(2025, 6, 1, 1234);
        let mut ids = HashSet::new();
        for section in &checklist.sections {
            for item in &section.items {
                match item {
                    SectionItem::Simple(entry) => {
                        assert!(!entry.checked);
                        assert!(entry.note.is_empty());
                        assert!(ids.insert(entry.id.clone()), "duplicate id {}", entry.id);
                    }
                    SectionItem::Equipment { checks, .. } => {
                        for check in checks {
                            assert!(!check.checked);
                            assert!(ids.insert(check.id.clone()), "duplicate id {}", check.id);
                        }
                    }
                }
            }
        }
        assert_eq!(ids.len(), 23);
    }

    #[test]
    fn sections_mirror_the_template_shape() {
        let checklist = create_new_checklist(2025, 6, 1, 1);
        assert_eq!(checklist.sections.len(), TEMPLATE_SECTIONS.len());
        for (section, template) in checklist.sections.iter().zip(TEMPLATE_SECTIONS) {
            assert_eq!(section.title, template.title);
            assert_eq!(section.items.len(), template.items.len());
        }
        // The special-notes section carries no check items.
        assert!(checklist.sections[3].items.is_empty());
        assert_eq!(checklist.sections[3].title, SPECIAL_NOTES_SECTION);
    }

    #[test]
    fn two_instances_get_distinct_ids() {
        let a = create_new_checklist(2025, 6, 1, 1000);
        let b = create_new_checklist(2025, 6, 1, 1001);
        assert_ne!(a.id, b.id);
    }
}
