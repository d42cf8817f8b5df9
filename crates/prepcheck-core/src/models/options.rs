//! Fixed option sets offered by the wizard widgets.
//!
//! Every enum serializes as its display label, so the values held in the
//! session store read the same as what the user picked on screen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of labelled options, listed in presentation order.
pub trait Choice: Copy + PartialEq + 'static {
    /// All options, in the order the widgets present them.
    const ALL: &'static [Self];

    /// Human readable label, also used in prompts.
    fn label(&self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }

    /// Position of this option in [`Choice::ALL`].
    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Join option labels with `", "`. An empty slice yields an empty string.
pub fn join_labels<T: Choice>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.label())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Disaster
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisasterType {
    Hurricane,
    Earthquake,
    Flood,
    Wildfire,
    Tornado,
}

impl Choice for DisasterType {
    const ALL: &'static [Self] = &[
        DisasterType::Hurricane,
        DisasterType::Earthquake,
        DisasterType::Flood,
        DisasterType::Wildfire,
        DisasterType::Tornado,
    ];

    fn label(&self) -> &'static str {
        match self {
            DisasterType::Hurricane => "Hurricane",
            DisasterType::Earthquake => "Earthquake",
            DisasterType::Flood => "Flood",
            DisasterType::Wildfire => "Wildfire",
            DisasterType::Tornado => "Tornado",
        }
    }
}

// ============================================================================
// Shelter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingMaterial {
    Wood,
    Concrete,
    Brick,
    Steel,
}

impl Choice for BuildingMaterial {
    const ALL: &'static [Self] = &[
        BuildingMaterial::Wood,
        BuildingMaterial::Concrete,
        BuildingMaterial::Brick,
        BuildingMaterial::Steel,
    ];

    fn label(&self) -> &'static str {
        match self {
            BuildingMaterial::Wood => "Wood",
            BuildingMaterial::Concrete => "Concrete",
            BuildingMaterial::Brick => "Brick",
            BuildingMaterial::Steel => "Steel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vulnerability {
    #[serde(rename = "Structural damage")]
    StructuralDamage,
    #[serde(rename = "Poor insulation")]
    PoorInsulation,
    #[serde(rename = "Weak foundation")]
    WeakFoundation,
    #[serde(rename = "Old wiring")]
    OldWiring,
    #[serde(rename = "Leaky roof")]
    LeakyRoof,
    #[serde(rename = "Large windows")]
    LargeWindows,
}

impl Choice for Vulnerability {
    const ALL: &'static [Self] = &[
        Vulnerability::StructuralDamage,
        Vulnerability::PoorInsulation,
        Vulnerability::WeakFoundation,
        Vulnerability::OldWiring,
        Vulnerability::LeakyRoof,
        Vulnerability::LargeWindows,
    ];

    fn label(&self) -> &'static str {
        match self {
            Vulnerability::StructuralDamage => "Structural damage",
            Vulnerability::PoorInsulation => "Poor insulation",
            Vulnerability::WeakFoundation => "Weak foundation",
            Vulnerability::OldWiring => "Old wiring",
            Vulnerability::LeakyRoof => "Leaky roof",
            Vulnerability::LargeWindows => "Large windows",
        }
    }
}

// ============================================================================
// People
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialCircumstance {
    Pregnant,
    Elderly,
    Underage,
    Disabled,
    #[serde(rename = "Medical Conditions")]
    MedicalConditions,
}

impl Choice for SpecialCircumstance {
    const ALL: &'static [Self] = &[
        SpecialCircumstance::Pregnant,
        SpecialCircumstance::Elderly,
        SpecialCircumstance::Underage,
        SpecialCircumstance::Disabled,
        SpecialCircumstance::MedicalConditions,
    ];

    fn label(&self) -> &'static str {
        match self {
            SpecialCircumstance::Pregnant => "Pregnant",
            SpecialCircumstance::Elderly => "Elderly",
            SpecialCircumstance::Underage => "Underage",
            SpecialCircumstance::Disabled => "Disabled",
            SpecialCircumstance::MedicalConditions => "Medical Conditions",
        }
    }
}

// ============================================================================
// Supplies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gear {
    #[serde(rename = "First Aid Kit")]
    FirstAidKit,
    Flashlight,
    Batteries,
    Radio,
    Tools,
    Blankets,
    Medications,
    #[serde(rename = "Important Documents")]
    ImportantDocuments,
    Cash,
    Clothing,
    #[serde(rename = "Cell Phone Charger")]
    CellPhoneCharger,
    #[serde(rename = "Multi-tool")]
    MultiTool,
    #[serde(rename = "Emergency Contact List")]
    EmergencyContactList,
    #[serde(rename = "Smoke Alarm")]
    SmokeAlarm,
    #[serde(rename = "Fire Extinguisher")]
    FireExtinguisher,
    Generator,
}

impl Choice for Gear {
    const ALL: &'static [Self] = &[
        Gear::FirstAidKit,
        Gear::Flashlight,
        Gear::Batteries,
        Gear::Radio,
        Gear::Tools,
        Gear::Blankets,
        Gear::Medications,
        Gear::ImportantDocuments,
        Gear::Cash,
        Gear::Clothing,
        Gear::CellPhoneCharger,
        Gear::MultiTool,
        Gear::EmergencyContactList,
        Gear::SmokeAlarm,
        Gear::FireExtinguisher,
        Gear::Generator,
    ];

    fn label(&self) -> &'static str {
        match self {
            Gear::FirstAidKit => "First Aid Kit",
            Gear::Flashlight => "Flashlight",
            Gear::Batteries => "Batteries",
            Gear::Radio => "Radio",
            Gear::Tools => "Tools",
            Gear::Blankets => "Blankets",
            Gear::Medications => "Medications",
            Gear::ImportantDocuments => "Important Documents",
            Gear::Cash => "Cash",
            Gear::Clothing => "Clothing",
            Gear::CellPhoneCharger => "Cell Phone Charger",
            Gear::MultiTool => "Multi-tool",
            Gear::EmergencyContactList => "Emergency Contact List",
            Gear::SmokeAlarm => "Smoke Alarm",
            Gear::FireExtinguisher => "Fire Extinguisher",
            Gear::Generator => "Generator",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_via_label!(DisasterType, BuildingMaterial, Vulnerability, SpecialCircumstance, Gear);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_counts() {
        assert_eq!(DisasterType::ALL.len(), 5);
        assert_eq!(BuildingMaterial::ALL.len(), 4);
        assert_eq!(Vulnerability::ALL.len(), 6);
        assert_eq!(SpecialCircumstance::ALL.len(), 5);
        assert_eq!(Gear::ALL.len(), 16);
    }

    #[test]
    fn test_index_round_trips_through_all() {
        for (i, gear) in Gear::ALL.iter().enumerate() {
            assert_eq!(gear.index(), i);
            assert_eq!(Gear::from_index(i), Some(*gear));
        }
        assert_eq!(Gear::from_index(Gear::ALL.len()), None);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Vulnerability::LeakyRoof).unwrap();
        assert_eq!(json, "\"Leaky roof\"");

        let gear: Gear = serde_json::from_str("\"Cell Phone Charger\"").unwrap();
        assert_eq!(gear, Gear::CellPhoneCharger);
    }

    #[test]
    fn test_join_labels() {
        assert_eq!(join_labels::<Gear>(&[]), "");
        assert_eq!(
            join_labels(&[SpecialCircumstance::Elderly, SpecialCircumstance::MedicalConditions]),
            "Elderly, Medical Conditions"
        );
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(Gear::MultiTool.to_string(), "Multi-tool");
        assert_eq!(DisasterType::Wildfire.to_string(), "Wildfire");
    }
}
