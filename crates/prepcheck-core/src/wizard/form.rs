//! Input widgets for each wizard step.
//!
//! A [`StepForm`] is the UI-agnostic widget state of one screen. The TUI
//! renders it and routes keys to it; after every change the form's
//! [`StepForm::section`] is recorded into the session.

use crate::models::{
    AssessmentDraft, BuildingMaterial, Choice, DisasterInfo, DisasterType, Gear, PeopleInfo,
    Section, ShelterInfo, SpecialCircumstance, SuppliesInfo, Vulnerability,
};

use super::Step;

/// Maximum length of free-text input.
pub const MAX_TEXT_LENGTH: usize = 120;

/// Largest value a number input accepts when typed digit by digit.
const MAX_NUMBER_VALUE: u32 = 99_999;

const INTENSITY_MIN: u32 = 1;
const INTENSITY_MAX: u32 = 10;

const YES_NO: [&str; 2] = ["Yes", "No"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    DisasterType,
    Intensity,
    CurrentlyIn,
    Floors,
    Rooms,
    Material,
    Vulnerabilities,
    PeopleCount,
    SpecialCircumstances,
    HasPets,
    PetsInfo,
    FoodDays,
    WaterLiters,
    Gear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Single choice from a dropdown-style list.
    Select {
        options: Vec<&'static str>,
        selected: usize,
    },
    /// Bounded integer.
    Slider { min: u32, max: u32, value: u32 },
    /// Single choice shown as inline buttons.
    Radio {
        options: Vec<&'static str>,
        selected: usize,
    },
    /// Integer with a lower bound only.
    ///
    /// While `typing` is set, digits extend `value` and Backspace may empty
    /// it to 0; otherwise the next digit replaces `value`. A value below
    /// `min` is only an edit in progress and reads back as `min`.
    Number { min: u32, value: u32, typing: bool },
    /// Any subset of the options; `cursor` is the highlighted option.
    MultiSelect {
        options: Vec<&'static str>,
        chosen: Vec<bool>,
        cursor: usize,
    },
    Checkbox(bool),
    Text(String),
}

impl Widget {
    fn select<T: Choice>(selected: Option<T>) -> Self {
        Widget::Select {
            options: T::labels(),
            selected: selected.map(|c| c.index()).unwrap_or(0),
        }
    }

    fn multi_select<T: Choice>(chosen: &[T]) -> Self {
        Widget::MultiSelect {
            options: T::labels(),
            chosen: T::ALL.iter().map(|option| chosen.contains(option)).collect(),
            cursor: 0,
        }
    }

    fn number(min: u32, value: Option<u32>) -> Self {
        Widget::Number {
            min,
            value: value.unwrap_or(min).max(min),
            typing: false,
        }
    }

    /// Step the value up: next option, +1, or move the list cursor down.
    pub fn increment(&mut self) {
        match self {
            Widget::Select { options, selected } | Widget::Radio { options, selected } => {
                if !options.is_empty() {
                    *selected = (*selected + 1) % options.len();
                }
            }
            Widget::Slider { max, value, .. } => *value = (*value + 1).min(*max),
            Widget::Number { min, value, typing } => {
                *value = (*value + 1).clamp(*min, MAX_NUMBER_VALUE);
                *typing = false;
            }
            Widget::MultiSelect { options, cursor, .. } => {
                if *cursor + 1 < options.len() {
                    *cursor += 1;
                }
            }
            Widget::Checkbox(_) | Widget::Text(_) => {}
        }
    }

    /// Step the value down: previous option, -1, or move the list cursor up.
    pub fn decrement(&mut self) {
        match self {
            Widget::Select { options, selected } | Widget::Radio { options, selected } => {
                if !options.is_empty() {
                    *selected = (*selected + options.len() - 1) % options.len();
                }
            }
            Widget::Slider { min, value, .. } => *value = value.saturating_sub(1).max(*min),
            Widget::Number { min, value, typing } => {
                *value = value.saturating_sub(1).max(*min);
                *typing = false;
            }
            Widget::MultiSelect { cursor, .. } => *cursor = cursor.saturating_sub(1),
            Widget::Checkbox(_) | Widget::Text(_) => {}
        }
    }

    /// Flip a checkbox, a radio pair, or the highlighted multiselect option.
    pub fn toggle(&mut self) {
        match self {
            Widget::Checkbox(checked) => *checked = !*checked,
            Widget::Radio { .. } => self.increment(),
            Widget::MultiSelect { chosen, cursor, .. } => {
                if let Some(flag) = chosen.get_mut(*cursor) {
                    *flag = !*flag;
                }
            }
            Widget::Select { .. } | Widget::Slider { .. } | Widget::Number { .. } | Widget::Text(_) => {}
        }
    }

    /// Type a character. Returns true if the widget accepted it.
    pub fn push_char(&mut self, c: char) -> bool {
        match self {
            Widget::Text(text) => {
                if can_add_text_char(text.chars().count(), c) {
                    text.push(c);
                    true
                } else {
                    false
                }
            }
            Widget::Number { value, typing, .. } => match c.to_digit(10) {
                Some(digit) => {
                    let base = if *typing { *value } else { 0 };
                    *value = base.saturating_mul(10).saturating_add(digit).min(MAX_NUMBER_VALUE);
                    *typing = true;
                    true
                }
                None => false,
            },
            Widget::Slider { min, max, value } => match c.to_digit(10) {
                // '0' selects 10 so every intensity is one key away.
                Some(0) => {
                    *value = (*max).max(*min);
                    true
                }
                Some(digit) => {
                    *value = digit.clamp(*min, *max);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Delete the last character or digit.
    pub fn pop_char(&mut self) {
        match self {
            Widget::Text(text) => {
                text.pop();
            }
            Widget::Number { value, typing, .. } => {
                *value /= 10;
                *typing = true;
            }
            _ => {}
        }
    }

    /// Finish a typed number: the next digit starts over, and an empty or
    /// too small value snaps to the minimum.
    pub fn commit(&mut self) {
        if let Widget::Number { min, value, typing } = self {
            *value = (*value).max(*min);
            *typing = false;
        }
    }

    /// Whether typed characters go into this widget rather than act as shortcuts.
    pub fn captures_text(&self) -> bool {
        matches!(self, Widget::Text(_))
    }

    fn selected_index(&self) -> usize {
        match self {
            Widget::Select { selected, .. } | Widget::Radio { selected, .. } => *selected,
            _ => 0,
        }
    }

    fn int_value(&self) -> u32 {
        match self {
            Widget::Slider { value, .. } => *value,
            Widget::Number { min, value, .. } => (*value).max(*min),
            _ => 0,
        }
    }

    fn chosen_indices(&self) -> Vec<usize> {
        match self {
            Widget::MultiSelect { chosen, .. } => chosen
                .iter()
                .enumerate()
                .filter_map(|(i, flag)| flag.then_some(i))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Check if a character should be accepted into a text field
pub fn can_add_text_char(current_len: usize, c: char) -> bool {
    current_len < MAX_TEXT_LENGTH && !c.is_control()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: FieldId,
    pub label: &'static str,
    pub widget: Widget,
}

impl Field {
    fn new(id: FieldId, label: &'static str, widget: Widget) -> Self {
        Self { id, label, widget }
    }
}

/// Widget state of one wizard screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StepForm {
    pub step: Step,
    pub fields: Vec<Field>,
    /// Index into `fields` of the focused field; always a visible field.
    focus: usize,
}

impl StepForm {
    /// Build the widgets for `step`.
    ///
    /// When the draft already holds this step's section the widgets start
    /// from those values, so revisiting a step keeps what was entered.
    /// Otherwise they start from their defaults.
    pub fn for_step(step: Step, draft: &AssessmentDraft) -> Self {
        let fields = match step {
            Step::Disaster => {
                let d = draft.disaster.as_ref();
                vec![
                    Field::new(
                        FieldId::DisasterType,
                        "Type of Disaster",
                        Widget::select::<DisasterType>(d.map(|d| d.kind)),
                    ),
                    Field::new(
                        FieldId::Intensity,
                        "Intensity of Disaster (1-10)",
                        Widget::Slider {
                            min: INTENSITY_MIN,
                            max: INTENSITY_MAX,
                            value: d
                                .map(|d| d.intensity as u32)
                                .unwrap_or(INTENSITY_MIN)
                                .clamp(INTENSITY_MIN, INTENSITY_MAX),
                        },
                    ),
                    Field::new(
                        FieldId::CurrentlyIn,
                        "Are you currently in the disaster zone?",
                        Widget::Radio {
                            options: YES_NO.to_vec(),
                            selected: match d.map(|d| d.currently_in) {
                                Some(false) => 1,
                                _ => 0,
                            },
                        },
                    ),
                ]
            }
            Step::Shelter => {
                let s = draft.shelter.as_ref();
                vec![
                    Field::new(FieldId::Floors, "Number of Floors", Widget::number(1, s.map(|s| s.floors))),
                    Field::new(FieldId::Rooms, "Number of Rooms", Widget::number(1, s.map(|s| s.rooms))),
                    Field::new(
                        FieldId::Material,
                        "Building Material",
                        Widget::select::<BuildingMaterial>(s.map(|s| s.material)),
                    ),
                    Field::new(
                        FieldId::Vulnerabilities,
                        "Vulnerabilities",
                        Widget::multi_select::<Vulnerability>(
                            s.map(|s| s.vulnerabilities.as_slice()).unwrap_or_default(),
                        ),
                    ),
                ]
            }
            Step::People => {
                let p = draft.people.as_ref();
                vec![
                    Field::new(
                        FieldId::PeopleCount,
                        "Total Number of People",
                        Widget::number(1, p.map(|p| p.count)),
                    ),
                    Field::new(
                        FieldId::SpecialCircumstances,
                        "Special Circumstances",
                        Widget::multi_select::<SpecialCircumstance>(
                            p.map(|p| p.special_circumstances.as_slice()).unwrap_or_default(),
                        ),
                    ),
                    Field::new(
                        FieldId::HasPets,
                        "Are there pets?",
                        Widget::Checkbox(p.map(|p| p.has_pets).unwrap_or(false)),
                    ),
                    Field::new(
                        FieldId::PetsInfo,
                        "Describe the pets (type and count)",
                        Widget::Text(
                            p.filter(|p| p.has_pets)
                                .map(|p| p.pets_info.clone())
                                .unwrap_or_default(),
                        ),
                    ),
                ]
            }
            Step::Supplies => {
                let s = draft.supplies.as_ref();
                vec![
                    Field::new(
                        FieldId::FoodDays,
                        "Food Supply in Days",
                        Widget::number(1, s.map(|s| s.food_days)),
                    ),
                    Field::new(
                        FieldId::WaterLiters,
                        "Water Supply in Liters",
                        Widget::number(1, s.map(|s| s.water_liters)),
                    ),
                    Field::new(
                        FieldId::Gear,
                        "Available Gear",
                        Widget::multi_select::<Gear>(s.map(|s| s.gear.as_slice()).unwrap_or_default()),
                    ),
                ]
            }
        };

        Self {
            step,
            fields,
            focus: 0,
        }
    }

    /// Whether a field is currently shown. The pets description only
    /// appears once the pets checkbox is set.
    pub fn is_visible(&self, id: FieldId) -> bool {
        match id {
            FieldId::PetsInfo => matches!(self.widget(FieldId::HasPets), Some(Widget::Checkbox(true))),
            _ => true,
        }
    }

    /// Fields currently shown, in display order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| self.is_visible(f.id))
    }

    pub fn focused(&self) -> &Field {
        &self.fields[self.focus]
    }

    pub fn focused_mut(&mut self) -> &mut Field {
        &mut self.fields[self.focus]
    }

    pub fn is_focused(&self, id: FieldId) -> bool {
        self.focused().id == id
    }

    /// Move focus to the next visible field (wrapping around).
    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    /// Move focus to the previous visible field (wrapping around).
    pub fn focus_prev(&mut self) {
        self.move_focus(self.fields.len() - 1);
    }

    fn move_focus(&mut self, stride: usize) {
        self.fields[self.focus].widget.commit();
        let len = self.fields.len();
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + stride) % len;
            if self.is_visible(self.fields[next].id) {
                self.focus = next;
                return;
            }
        }
    }

    pub fn widget(&self, id: FieldId) -> Option<&Widget> {
        self.fields.iter().find(|f| f.id == id).map(|f| &f.widget)
    }

    fn widget_or_default(&self, id: FieldId) -> Widget {
        self.widget(id).cloned().unwrap_or(Widget::Checkbox(false))
    }

    fn choice<T: Choice>(&self, id: FieldId) -> T {
        T::from_index(self.widget_or_default(id).selected_index()).unwrap_or(T::ALL[0])
    }

    fn chosen<T: Choice>(&self, id: FieldId) -> Vec<T> {
        self.widget_or_default(id)
            .chosen_indices()
            .into_iter()
            .filter_map(T::from_index)
            .collect()
    }

    fn int(&self, id: FieldId) -> u32 {
        self.widget_or_default(id).int_value()
    }

    fn flag(&self, id: FieldId) -> bool {
        match self.widget(id) {
            Some(Widget::Checkbox(checked)) => *checked,
            Some(Widget::Radio { selected, .. }) => *selected == 0,
            _ => false,
        }
    }

    fn text(&self, id: FieldId) -> String {
        match self.widget(id) {
            Some(Widget::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    /// The section described by the current widget values.
    pub fn section(&self) -> Section {
        match self.step {
            Step::Disaster => Section::Disaster(DisasterInfo {
                kind: self.choice(FieldId::DisasterType),
                intensity: self.int(FieldId::Intensity).clamp(INTENSITY_MIN, INTENSITY_MAX) as u8,
                currently_in: self.flag(FieldId::CurrentlyIn),
            }),
            Step::Shelter => Section::Shelter(ShelterInfo {
                floors: self.int(FieldId::Floors),
                rooms: self.int(FieldId::Rooms),
                material: self.choice(FieldId::Material),
                vulnerabilities: self.chosen(FieldId::Vulnerabilities),
            }),
            Step::People => {
                let has_pets = self.flag(FieldId::HasPets);
                Section::People(PeopleInfo {
                    count: self.int(FieldId::PeopleCount),
                    special_circumstances: self.chosen(FieldId::SpecialCircumstances),
                    has_pets,
                    pets_info: if has_pets {
                        self.text(FieldId::PetsInfo)
                    } else {
                        String::new()
                    },
                })
            }
            Step::Supplies => Section::Supplies(SuppliesInfo {
                food_days: self.int(FieldId::FoodDays),
                water_liters: self.int(FieldId::WaterLiters),
                gear: self.chosen(FieldId::Gear),
            }),
        }
    }
}
