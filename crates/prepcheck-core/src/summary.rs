//! Human readable review of the entered data, shown next to the result.

use crate::models::{join_labels, AssessmentDraft, Choice};
use crate::utils::yes_no;

/// Shown for an empty list.
const NONE: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: &'static str,
    /// `(label, value)` pairs in display order.
    pub entries: Vec<(&'static str, String)>,
}

fn list_or_none<T: Choice>(items: &[T]) -> String {
    if items.is_empty() {
        NONE.to_string()
    } else {
        join_labels(items)
    }
}

/// Summarize the sections that were filled in. Missing sections are omitted.
pub fn review(draft: &AssessmentDraft) -> Vec<ReviewSection> {
    let mut sections = Vec::new();

    if let Some(d) = &draft.disaster {
        sections.push(ReviewSection {
            title: "Disaster Information",
            entries: vec![
                ("Type", d.kind.label().to_string()),
                ("Intensity", d.intensity.to_string()),
                ("In Disaster Zone", yes_no(d.currently_in).to_string()),
            ],
        });
    }

    if let Some(s) = &draft.shelter {
        sections.push(ReviewSection {
            title: "Shelter Information",
            entries: vec![
                ("Floors", s.floors.to_string()),
                ("Rooms", s.rooms.to_string()),
                ("Material", s.material.label().to_string()),
                ("Vulnerabilities", list_or_none(&s.vulnerabilities)),
            ],
        });
    }

    if let Some(p) = &draft.people {
        let mut entries = vec![
            ("Total Count", p.count.to_string()),
            ("Special Circumstances", list_or_none(&p.special_circumstances)),
        ];
        if p.has_pets {
            entries.push(("Pets", p.pets_info.clone()));
        }
        sections.push(ReviewSection {
            title: "People Information",
            entries,
        });
    }

    if let Some(s) = &draft.supplies {
        sections.push(ReviewSection {
            title: "Supplies Information",
            entries: vec![
                ("Food Supply", format!("{} days", s.food_days)),
                ("Water Supply", format!("{} liters", s.water_liters)),
                ("Available Gear", list_or_none(&s.gear)),
            ],
        });
    }

    sections
}

/// Plain-text rendering of [`review`], one `- Label: value` line per entry.
pub fn review_text(draft: &AssessmentDraft) -> String {
    review(draft)
        .iter()
        .map(|section| {
            let mut block = format!("{}:\n", section.title);
            for (label, value) in &section.entries {
                block.push_str(&format!("- {}: {}\n", label, value));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisasterInfo, DisasterType, PeopleInfo, SpecialCircumstance, SuppliesInfo};

    #[test]
    fn test_empty_draft_has_no_sections() {
        assert!(review(&AssessmentDraft::default()).is_empty());
        assert_eq!(review_text(&AssessmentDraft::default()), "");
    }

    #[test]
    fn test_disaster_zone_reads_yes_no() {
        let draft = AssessmentDraft {
            disaster: Some(DisasterInfo {
                kind: DisasterType::Tornado,
                intensity: 9,
                currently_in: false,
            }),
            ..Default::default()
        };
        let sections = review(&draft);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Disaster Information");
        assert!(sections[0]
            .entries
            .contains(&("In Disaster Zone", "No".to_string())));
    }

    #[test]
    fn test_pets_line_only_with_pets() {
        let mut people = PeopleInfo {
            count: 3,
            special_circumstances: vec![],
            has_pets: false,
            pets_info: String::new(),
        };
        let draft = AssessmentDraft {
            people: Some(people.clone()),
            ..Default::default()
        };
        let text = review_text(&draft);
        assert!(text.contains("- Special Circumstances: None"));
        assert!(!text.contains("Pets"));

        people.has_pets = true;
        people.pets_info = "1 cat".to_string();
        people.special_circumstances = vec![SpecialCircumstance::Disabled];
        let draft = AssessmentDraft {
            people: Some(people),
            ..Default::default()
        };
        let text = review_text(&draft);
        assert!(text.contains("- Pets: 1 cat"));
        assert!(text.contains("- Special Circumstances: Disabled"));
    }

    #[test]
    fn test_supplies_units() {
        let draft = AssessmentDraft {
            supplies: Some(SuppliesInfo {
                food_days: 3,
                water_liters: 15,
                gear: vec![],
            }),
            ..Default::default()
        };
        let text = review_text(&draft);
        assert!(text.starts_with("Supplies Information:\n"));
        assert!(text.contains("- Food Supply: 3 days"));
        assert!(text.contains("- Water Supply: 15 liters"));
        assert!(text.contains("- Available Gear: None"));
    }
}
