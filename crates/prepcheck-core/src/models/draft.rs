use serde::{Deserialize, Serialize};

use super::options::{BuildingMaterial, DisasterType, Gear, SpecialCircumstance, Vulnerability};

/// Session-store key of each section inside `form_data`.
pub const DISASTER_KEY: &str = "disaster";
pub const SHELTER_KEY: &str = "shelter";
pub const PEOPLE_KEY: &str = "people";
pub const SUPPLIES_KEY: &str = "supplies";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterInfo {
    #[serde(rename = "type")]
    pub kind: DisasterType,
    /// 1-10
    pub intensity: u8,
    pub currently_in: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterInfo {
    pub floors: u32,
    pub rooms: u32,
    pub material: BuildingMaterial,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleInfo {
    pub count: u32,
    #[serde(default)]
    pub special_circumstances: Vec<SpecialCircumstance>,
    #[serde(default)]
    pub has_pets: bool,
    /// Only meaningful when `has_pets` is set.
    #[serde(default)]
    pub pets_info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppliesInfo {
    pub food_days: u32,
    pub water_liters: u32,
    #[serde(default)]
    pub gear: Vec<Gear>,
}

/// The in-progress assessment input for one session.
///
/// Sections are filled in wizard order, but any subset may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disaster: Option<DisasterInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelter: Option<ShelterInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplies: Option<SuppliesInfo>,
}

impl AssessmentDraft {
    pub fn is_empty(&self) -> bool {
        self.disaster.is_none()
            && self.shelter.is_none()
            && self.people.is_none()
            && self.supplies.is_none()
    }

    /// Number of sections recorded so far.
    pub fn completed_sections(&self) -> usize {
        [
            self.disaster.is_some(),
            self.shelter.is_some(),
            self.people.is_some(),
            self.supplies.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// One complete section, as written by a single wizard step.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Disaster(DisasterInfo),
    Shelter(ShelterInfo),
    People(PeopleInfo),
    Supplies(SuppliesInfo),
}

impl Section {
    /// Key of this section inside `form_data`.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Disaster(_) => DISASTER_KEY,
            Section::Shelter(_) => SHELTER_KEY,
            Section::People(_) => PEOPLE_KEY,
            Section::Supplies(_) => SUPPLIES_KEY,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Section::Disaster(info) => serde_json::to_value(info),
            Section::Shelter(info) => serde_json::to_value(info),
            Section::People(info) => serde_json::to_value(info),
            Section::Supplies(info) => serde_json::to_value(info),
        }
    }
}
