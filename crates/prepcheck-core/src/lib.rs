//! Core library for prepcheck, a disaster-preparedness assessment wizard.
//!
//! - `session`: per-session key/value store that carries wizard state
//! - `wizard`: step navigation and the input widgets of each step
//! - `prompt`: renders the collected draft into the model prompt
//! - `api`: watsonx.ai text-generation client
//! - `assessment`: submission boundary with the demo fallback
//! - `summary`: review of the entered data

pub mod api;
pub mod assessment;
pub mod config;
pub mod models;
pub mod prompt;
pub mod session;
pub mod summary;
pub mod utils;
pub mod wizard;

pub use assessment::{AssessmentOutcome, Assessor, Integration};
pub use config::Config;
pub use models::AssessmentDraft;
pub use session::SessionStore;
pub use wizard::{Navigation, Step, StepForm, Wizard};
