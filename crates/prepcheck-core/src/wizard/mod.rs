//! Four-step wizard over a [`SessionStore`].
//!
//! The controller owns no state of its own. Every operation reads and
//! writes the session store it is handed, so the flow can be driven and
//! tested without a terminal.

pub mod form;

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{
    AssessmentDraft, Section, DISASTER_KEY, PEOPLE_KEY, SHELTER_KEY, SUPPLIES_KEY,
};
use crate::session::{SessionStore, FORM_DATA_KEY, STEP_KEY};

pub use form::{Field, FieldId, StepForm, Widget, MAX_TEXT_LENGTH};

/// Percentage of the progress bar each completed step is worth.
const PROGRESS_PER_STEP: u16 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Disaster = 1,
    Shelter = 2,
    People = 3,
    Supplies = 4,
}

impl Step {
    pub const FIRST: Step = Step::Disaster;
    pub const LAST: Step = Step::Supplies;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Map a stored step number onto a step, clamping out-of-range values.
    pub fn from_number(n: i64) -> Self {
        match n {
            i64::MIN..=1 => Step::Disaster,
            2 => Step::Shelter,
            3 => Step::People,
            _ => Step::Supplies,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Disaster => "Step 1: Disaster Information",
            Step::Shelter => "Step 2: Shelter Information",
            Step::People => "Step 3: People Information",
            Step::Supplies => "Step 4: Supplies Information",
        }
    }

    /// Next step; stays on the last step.
    pub fn next(&self) -> Self {
        match self {
            Step::Disaster => Step::Shelter,
            Step::Shelter => Step::People,
            Step::People => Step::Supplies,
            Step::Supplies => Step::Supplies,
        }
    }

    /// Previous step; stays on the first step.
    pub fn prev(&self) -> Self {
        match self {
            Step::Disaster => Step::Disaster,
            Step::Shelter => Step::Disaster,
            Step::People => Step::Shelter,
            Step::Supplies => Step::People,
        }
    }

    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// Progress shown while this step is on screen: `(step - 1) * 25`.
    pub fn progress_percent(&self) -> u16 {
        (self.number() as u16 - 1) * PROGRESS_PER_STEP
    }
}

/// Navigation actions offered on the wizard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
}

/// Wizard operations. All state lives in the [`SessionStore`].
pub struct Wizard;

impl Wizard {
    pub fn current_step(session: &SessionStore) -> Step {
        Step::from_number(session.get::<i64>(STEP_KEY).unwrap_or(1))
    }

    /// Move one step forward or back and return the step now in effect.
    pub fn navigate(session: &mut SessionStore, navigation: Navigation) -> Result<Step> {
        let current = Self::current_step(session);
        let target = match navigation {
            Navigation::Next => current.next(),
            Navigation::Previous => current.prev(),
        };
        session.set(STEP_KEY, &target.number())?;
        debug!(from = current.number(), to = target.number(), ?navigation, "Wizard step changed");
        Ok(target)
    }

    /// Replace one section of `form_data` in full with `section`.
    pub fn record(session: &mut SessionStore, section: &Section) -> Result<()> {
        let value = section.to_value()?;
        if !matches!(session.get_value(FORM_DATA_KEY), Some(Value::Object(_))) {
            session.set(FORM_DATA_KEY, &Map::new())?;
        }
        if let Some(Value::Object(form_data)) = session.get_value_mut(FORM_DATA_KEY) {
            form_data.insert(section.key().to_string(), value);
        }
        Ok(())
    }

    /// Read the draft back out of `form_data`.
    ///
    /// A section that is missing or malformed is treated as absent without
    /// affecting the others.
    pub fn draft(session: &SessionStore) -> AssessmentDraft {
        let Some(Value::Object(form_data)) = session.get_value(FORM_DATA_KEY) else {
            return AssessmentDraft::default();
        };

        AssessmentDraft {
            disaster: decode_section(form_data, DISASTER_KEY),
            shelter: decode_section(form_data, SHELTER_KEY),
            people: decode_section(form_data, PEOPLE_KEY),
            supplies: decode_section(form_data, SUPPLIES_KEY),
        }
    }

    /// Build the widgets for the current step, seeded from the draft.
    pub fn form(session: &SessionStore) -> StepForm {
        StepForm::for_step(Self::current_step(session), &Self::draft(session))
    }
}

fn decode_section<T: serde::de::DeserializeOwned>(
    form_data: &Map<String, Value>,
    key: &str,
) -> Option<T> {
    let value = form_data.get(key)?;
    match T::deserialize(value) {
        Ok(section) => Some(section),
        Err(e) => {
            debug!(section = key, error = %e, "Skipping malformed section");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BuildingMaterial, DisasterInfo, DisasterType, ShelterInfo, SuppliesInfo, Vulnerability,
    };
    use serde_json::json;

    fn disaster() -> Section {
        Section::Disaster(DisasterInfo {
            kind: DisasterType::Earthquake,
            intensity: 6,
            currently_in: false,
        })
    }

    #[test]
    fn test_step_next_and_prev() {
        assert_eq!(Step::Disaster.next(), Step::Shelter);
        assert_eq!(Step::Shelter.next(), Step::People);
        assert_eq!(Step::People.next(), Step::Supplies);
        assert_eq!(Step::Supplies.next(), Step::Supplies); // Clamped

        assert_eq!(Step::Supplies.prev(), Step::People);
        assert_eq!(Step::People.prev(), Step::Shelter);
        assert_eq!(Step::Shelter.prev(), Step::Disaster);
        assert_eq!(Step::Disaster.prev(), Step::Disaster); // Clamped
    }

    #[test]
    fn test_step_from_number_clamps() {
        assert_eq!(Step::from_number(-3), Step::Disaster);
        assert_eq!(Step::from_number(0), Step::Disaster);
        assert_eq!(Step::from_number(2), Step::Shelter);
        assert_eq!(Step::from_number(3), Step::People);
        assert_eq!(Step::from_number(9), Step::Supplies);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Step::Disaster.progress_percent(), 0);
        assert_eq!(Step::Shelter.progress_percent(), 25);
        assert_eq!(Step::People.progress_percent(), 50);
        assert_eq!(Step::Supplies.progress_percent(), 75);
    }

    #[test]
    fn test_navigate_walks_all_steps() {
        let mut session = SessionStore::new();
        assert_eq!(Wizard::current_step(&session), Step::Disaster);

        for expected in [Step::Shelter, Step::People, Step::Supplies] {
            let step = Wizard::navigate(&mut session, Navigation::Next).unwrap();
            assert_eq!(step, expected);
            assert_eq!(Wizard::current_step(&session), expected);
        }

        for expected in [Step::People, Step::Shelter, Step::Disaster] {
            assert_eq!(Wizard::navigate(&mut session, Navigation::Previous).unwrap(), expected);
        }
    }

    #[test]
    fn test_navigate_never_leaves_range() {
        let mut session = SessionStore::new();
        Wizard::navigate(&mut session, Navigation::Previous).unwrap();
        assert_eq!(session.get::<u8>(STEP_KEY), Some(1));

        session.set(STEP_KEY, &4).unwrap();
        Wizard::navigate(&mut session, Navigation::Next).unwrap();
        assert_eq!(session.get::<u8>(STEP_KEY), Some(4));
    }

    #[test]
    fn test_record_and_read_back() {
        let mut session = SessionStore::new();
        Wizard::record(&mut session, &disaster()).unwrap();

        let draft = Wizard::draft(&session);
        assert_eq!(draft.disaster.as_ref().map(|d| d.intensity), Some(6));
        assert!(draft.shelter.is_none());
        assert_eq!(session.get_value(FORM_DATA_KEY).unwrap()["disaster"]["type"], "Earthquake");
    }

    #[test]
    fn test_record_overwrites_section_in_full() {
        let mut session = SessionStore::new();
        Wizard::record(
            &mut session,
            &Section::Shelter(ShelterInfo {
                floors: 3,
                rooms: 8,
                material: BuildingMaterial::Brick,
                vulnerabilities: vec![Vulnerability::LeakyRoof, Vulnerability::OldWiring],
            }),
        )
        .unwrap();
        Wizard::record(
            &mut session,
            &Section::Shelter(ShelterInfo {
                floors: 1,
                rooms: 2,
                material: BuildingMaterial::Wood,
                vulnerabilities: vec![],
            }),
        )
        .unwrap();

        let shelter = Wizard::draft(&session).shelter.unwrap();
        assert_eq!(shelter.floors, 1);
        assert_eq!(shelter.material, BuildingMaterial::Wood);
        assert!(shelter.vulnerabilities.is_empty());
    }

    #[test]
    fn test_record_keeps_other_sections() {
        let mut session = SessionStore::new();
        Wizard::record(&mut session, &disaster()).unwrap();
        Wizard::record(
            &mut session,
            &Section::Supplies(SuppliesInfo {
                food_days: 2,
                water_liters: 10,
                gear: vec![],
            }),
        )
        .unwrap();

        let draft = Wizard::draft(&session);
        assert!(draft.disaster.is_some());
        assert!(draft.supplies.is_some());
        assert_eq!(draft.completed_sections(), 2);
    }

    #[test]
    fn test_record_repairs_missing_form_data() {
        let mut session = SessionStore::new();
        session.set(FORM_DATA_KEY, &json!("corrupt")).unwrap();
        Wizard::record(&mut session, &disaster()).unwrap();
        assert!(Wizard::draft(&session).disaster.is_some());
    }

    #[test]
    fn test_malformed_section_is_skipped() {
        let mut session = SessionStore::new();
        session
            .set(
                FORM_DATA_KEY,
                &json!({
                    "disaster": {"type": "Meteor", "intensity": 3, "currently_in": true},
                    "supplies": {"food_days": 4, "water_liters": 20, "gear": ["Radio"]},
                }),
            )
            .unwrap();

        let draft = Wizard::draft(&session);
        assert!(draft.disaster.is_none());
        assert_eq!(draft.supplies.map(|s| s.water_liters), Some(20));
    }

    #[test]
    fn test_form_follows_current_step() {
        let mut session = SessionStore::new();
        Wizard::navigate(&mut session, Navigation::Next).unwrap();
        assert_eq!(Wizard::form(&session).step, Step::Shelter);
    }
}
