//! Renders a draft into the natural-language prompt sent to the model.

use std::fmt::Display;

use crate::models::{join_labels, AssessmentDraft};

/// Placeholder for a value whose section was never filled in.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for pets when the household reported none.
const NO_PETS: &str = "None";

/// The four things the model is asked to produce.
const INSTRUCTIONS: &str = "\
Based on this information, please provide:
1. Safety scores for shelter, people, and supplies (out of 100)
2. A detailed summary of the risk level and situation
3. Specific recommended precautions or actions, prioritized by importance
4. Any additional considerations based on the special circumstances or pets";

fn or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Build the assessment prompt.
///
/// Never fails: scalar fields of a missing section render as `N/A` and
/// list fields of a missing section render as an empty string.
pub fn format_prompt(draft: &AssessmentDraft) -> String {
    let disaster = draft.disaster.as_ref();
    let shelter = draft.shelter.as_ref();
    let people = draft.people.as_ref();
    let supplies = draft.supplies.as_ref();

    let pets = people.map(|p| {
        if p.has_pets {
            p.pets_info.clone()
        } else {
            NO_PETS.to_string()
        }
    });

    format!(
        "Disaster Assessment:
Type: {kind}
Intensity: {intensity}
Currently In Disaster: {currently_in}

Shelter Details:
Floors: {floors}
Rooms: {rooms}
Material: {material}
Vulnerabilities: {vulnerabilities}

People:
Total Count: {count}
Special Circumstances: {special}
Pets: {pets}

Supplies:
Food Supply: {food_days} days
Water Supply: {water_liters} liters
Available Gear: {gear}

{instructions}
",
        kind = or_na(disaster.map(|d| d.kind)),
        intensity = or_na(disaster.map(|d| d.intensity)),
        currently_in = or_na(disaster.map(|d| d.currently_in)),
        floors = or_na(shelter.map(|s| s.floors)),
        rooms = or_na(shelter.map(|s| s.rooms)),
        material = or_na(shelter.map(|s| s.material)),
        vulnerabilities = shelter.map(|s| join_labels(&s.vulnerabilities)).unwrap_or_default(),
        count = or_na(people.map(|p| p.count)),
        special = people
            .map(|p| join_labels(&p.special_circumstances))
            .unwrap_or_default(),
        pets = or_na(pets),
        food_days = or_na(supplies.map(|s| s.food_days)),
        water_liters = or_na(supplies.map(|s| s.water_liters)),
        gear = supplies.map(|s| join_labels(&s.gear)).unwrap_or_default(),
        instructions = INSTRUCTIONS,
    )
}
