//! Data models for a preparedness assessment.
//!
//! - `AssessmentDraft` and its four sections: what the wizard collects
//! - `Section`: one section as written by a single wizard step
//! - Option sets (`DisasterType`, `Gear`, ...) behind the `Choice` trait

pub mod draft;
pub mod options;

pub use draft::{
    AssessmentDraft, DisasterInfo, PeopleInfo, Section, ShelterInfo, SuppliesInfo, DISASTER_KEY,
    PEOPLE_KEY, SHELTER_KEY, SUPPLIES_KEY,
};
pub use options::{
    join_labels, BuildingMaterial, Choice, DisasterType, Gear, SpecialCircumstance, Vulnerability,
};
