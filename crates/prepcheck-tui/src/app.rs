//! Application state management for prepcheck.
//!
//! This module contains the `App` struct that owns the session store, the
//! widgets of the step on screen, and the in-flight assessment task.

use std::cell::Cell;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use prepcheck_core::assessment::UNAVAILABLE_WARNING;
use prepcheck_core::summary::review_text;
use prepcheck_core::wizard::Widget;
use prepcheck_core::{
    AssessmentDraft, AssessmentOutcome, Assessor, Navigation, SessionStore, Step, StepForm, Wizard,
};

use crate::ui::results;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the assessment result channel.
/// Only one assessment is ever in flight.
const CHANNEL_BUFFER_SIZE: usize = 1;

/// Number of lines to scroll on page up/down in the result panel.
pub const PAGE_SCROLL_SIZE: u16 = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Filling in the wizard
    Editing,
    /// Waiting for the model
    Assessing,
    ShowingResult,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub session: SessionStore,
    /// Widgets of the step on screen
    pub form: StepForm,

    pub state: AppState,
    /// State to return to when an overlay closes
    overlay_return: AppState,

    assessor: Arc<Assessor>,
    pub outcome: Option<AssessmentOutcome>,
    pub result_scroll: u16,
    /// Rows of the result as last laid out on screen
    result_rows: Cell<u16>,

    pub status_message: Option<String>,

    // Assessment task channel
    result_tx: mpsc::Sender<AssessmentOutcome>,
    result_rx: mpsc::Receiver<AssessmentOutcome>,
}

impl App {
    pub fn new(assessor: Assessor) -> Self {
        let session = SessionStore::new();
        let form = Wizard::form(&session);
        let (result_tx, result_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // One-time notice; every submission will use demo results
        let status_message = if assessor.integration().is_available() {
            None
        } else {
            Some(UNAVAILABLE_WARNING.to_string())
        };

        let mut app = Self {
            session,
            form,
            state: AppState::Editing,
            overlay_return: AppState::Editing,
            assessor: Arc::new(assessor),
            outcome: None,
            result_scroll: 0,
            result_rows: Cell::new(0),
            status_message,
            result_tx,
            result_rx,
        };
        app.record_form();
        app
    }

    pub fn step(&self) -> Step {
        Wizard::current_step(&self.session)
    }

    pub fn progress_percent(&self) -> u16 {
        self.step().progress_percent()
    }

    pub fn draft(&self) -> AssessmentDraft {
        Wizard::draft(&self.session)
    }

    pub fn is_live(&self) -> bool {
        self.assessor.integration().is_available()
    }

    /// Write the on-screen step into the session, replacing that section.
    fn record_form(&mut self) {
        if let Err(e) = Wizard::record(&mut self.session, &self.form.section()) {
            warn!(error = %e, step = self.form.step.number(), "Failed to record step");
            self.status_message = Some(format!("Could not save answers: {}", e));
        }
    }

    /// Rebuild the widgets for the current step and record them.
    fn load_form(&mut self) {
        self.form = Wizard::form(&self.session);
        self.record_form();
    }

    /// Apply an edit to the focused widget and record the step.
    pub fn edit(&mut self, change: impl FnOnce(&mut Widget) -> bool) {
        if change(&mut self.form.focused_mut().widget) {
            self.record_form();
        }
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        self.record_form();
        match Wizard::navigate(&mut self.session, navigation) {
            Ok(step) => {
                debug!(step = step.number(), "Entered step");
                self.load_form();
            }
            Err(e) => {
                warn!(error = %e, "Navigation failed");
                self.status_message = Some(format!("Navigation failed: {}", e));
            }
        }
    }

    /// Send the draft for assessment on a background task.
    pub fn submit(&mut self) {
        if self.state == AppState::Assessing {
            return;
        }
        self.record_form();

        let draft = self.draft();
        info!(sections = draft.completed_sections(), "Submitting assessment");
        debug!(review = %review_text(&draft), "Draft under assessment");

        self.state = AppState::Assessing;
        self.status_message = Some(if self.is_live() {
            "Assessing your preparedness...".to_string()
        } else {
            "Preparing demo results...".to_string()
        });

        let assessor = Arc::clone(&self.assessor);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let outcome = assessor.assess(&draft).await;
            if tx.send(outcome).await.is_err() {
                debug!("App dropped before assessment finished");
            }
        });
    }

    /// Pick up a finished assessment, if any.
    pub fn check_background_tasks(&mut self) {
        while let Ok(outcome) = self.result_rx.try_recv() {
            self.show_outcome(outcome);
        }
    }

    fn show_outcome(&mut self, outcome: AssessmentOutcome) {
        self.status_message = Some(if outcome.is_demo() {
            "Showing demo results".to_string()
        } else {
            "Assessment complete".to_string()
        });
        // Unwrapped height until the first draw measures the panel
        self.result_rows.set(results::row_count(&outcome, u16::MAX));
        self.outcome = Some(outcome);
        self.result_scroll = 0;
        if self.state == AppState::Assessing {
            self.state = AppState::ShowingResult;
        } else {
            // An overlay is open; show the result once it closes
            self.overlay_return = AppState::ShowingResult;
        }
    }

    /// Leave the result and return to the last step with answers intact.
    pub fn back_to_wizard(&mut self) {
        self.state = AppState::Editing;
        self.status_message = None;
        self.load_form();
    }

    /// Discard the draft and begin a new assessment.
    pub fn start_over(&mut self) {
        info!("Starting a new assessment");
        self.session.reset();
        self.outcome = None;
        self.result_scroll = 0;
        self.result_rows.set(0);
        self.state = AppState::Editing;
        self.status_message = None;
        self.load_form();
    }

    /// Record how many rows the result takes at the current panel width.
    pub fn set_result_rows(&self, rows: u16) {
        self.result_rows.set(rows);
    }

    /// Scrolling stops with the last row of the result at the top.
    pub fn max_result_scroll(&self) -> u16 {
        self.result_rows.get().saturating_sub(1)
    }

    pub fn scroll_result(&mut self, delta: i32) {
        let scroll = if delta < 0 {
            self.result_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.result_scroll.saturating_add(delta as u16)
        };
        self.result_scroll = scroll.min(self.max_result_scroll());
    }

    pub fn open_overlay(&mut self, overlay: AppState) {
        if !matches!(self.state, AppState::ShowingHelp | AppState::ConfirmingQuit) {
            self.overlay_return = self.state;
        }
        self.state = overlay;
    }

    pub fn close_overlay(&mut self) {
        self.state = self.overlay_return;
    }

    /// The screen underneath any open overlay.
    pub fn base_state(&self) -> AppState {
        match self.state {
            AppState::ShowingHelp | AppState::ConfirmingQuit => self.overlay_return,
            state => state,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use prepcheck_core::api::{ApiError, TextGenerator};
    use prepcheck_core::assessment::{DemoReason, DEMO_NOTICE};
    use prepcheck_core::wizard::FieldId;
    use prepcheck_core::Integration;

    fn demo_app() -> App {
        let assessor = Assessor::new(
            Integration::Unavailable("demo mode requested".to_string()),
            Box::new(|| -> Result<Arc<dyn TextGenerator>, ApiError> {
                Err(ApiError::MissingCredential("WATSONX_URL"))
            }),
        );
        App::new(assessor)
    }

    #[test]
    fn test_new_app_starts_on_step_one() {
        let app = demo_app();
        assert_eq!(app.step(), Step::Disaster);
        assert_eq!(app.progress_percent(), 0);
        assert_eq!(app.state, AppState::Editing);
        assert_eq!(app.status_message.as_deref(), Some(UNAVAILABLE_WARNING));
        // Entering a step records its defaults
        assert!(app.draft().disaster.is_some());
    }

    #[test]
    fn test_navigation_and_progress() {
        let mut app = demo_app();
        app.navigate(Navigation::Next);
        assert_eq!(app.step(), Step::Shelter);
        assert_eq!(app.form.step, Step::Shelter);
        assert_eq!(app.progress_percent(), 25);

        app.navigate(Navigation::Next);
        app.navigate(Navigation::Next);
        assert_eq!(app.progress_percent(), 75);

        app.navigate(Navigation::Previous);
        assert_eq!(app.step(), Step::People);
        assert_eq!(app.progress_percent(), 50);
    }

    #[test]
    fn test_edits_survive_revisit() {
        let mut app = demo_app();
        app.form.focus_next();
        assert!(app.form.is_focused(FieldId::Intensity));
        app.edit(|w| w.push_char('7'));

        app.navigate(Navigation::Next);
        app.navigate(Navigation::Previous);

        assert_eq!(app.draft().disaster.map(|d| d.intensity), Some(7));
        assert_eq!(
            app.form.widget(FieldId::Intensity),
            Some(&Widget::Slider { min: 1, max: 10, value: 7 })
        );
    }

    #[test]
    fn test_rejected_edit_does_not_change_draft() {
        let mut app = demo_app();
        let before = app.draft();
        app.edit(|w| w.push_char('z'));
        assert_eq!(app.draft(), before);
    }

    #[tokio::test]
    async fn test_submit_in_demo_mode_shows_demo_result() {
        let mut app = demo_app();
        app.submit();
        assert_eq!(app.state, AppState::Assessing);

        // A second press while in flight is ignored
        app.submit();

        let outcome = app.result_rx.recv().await.unwrap();
        app.show_outcome(outcome);

        assert_eq!(app.state, AppState::ShowingResult);
        let outcome = app.outcome.as_ref().unwrap();
        assert!(matches!(
            outcome,
            AssessmentOutcome::Demo { reason: DemoReason::Unavailable(_) }
        ));
        assert!(outcome.to_text().contains(DEMO_NOTICE));
    }

    #[test]
    fn test_result_arriving_under_overlay() {
        let mut app = demo_app();
        app.state = AppState::Assessing;
        app.open_overlay(AppState::ShowingHelp);
        app.show_outcome(AssessmentOutcome::Demo {
            reason: DemoReason::Failed("boom".to_string()),
        });
        assert_eq!(app.state, AppState::ShowingHelp);
        assert_eq!(app.base_state(), AppState::ShowingResult);

        app.close_overlay();
        assert_eq!(app.state, AppState::ShowingResult);
    }

    #[test]
    fn test_start_over_resets_draft() {
        let mut app = demo_app();
        app.navigate(Navigation::Next);
        app.navigate(Navigation::Next);
        app.state = AppState::ShowingResult;

        app.start_over();
        assert_eq!(app.step(), Step::Disaster);
        assert_eq!(app.state, AppState::Editing);
        assert!(app.outcome.is_none());
        assert_eq!(app.draft().completed_sections(), 1);
    }

    #[test]
    fn test_back_to_wizard_keeps_answers() {
        let mut app = demo_app();
        for _ in 0..3 {
            app.navigate(Navigation::Next);
        }
        app.state = AppState::ShowingResult;
        app.back_to_wizard();
        assert_eq!(app.step(), Step::Supplies);
        assert_eq!(app.draft().completed_sections(), 4);
    }

    fn demo_outcome() -> AssessmentOutcome {
        AssessmentOutcome::Demo {
            reason: DemoReason::Unavailable("demo mode requested".to_string()),
        }
    }

    #[test]
    fn test_scroll_result_saturates() {
        let mut app = demo_app();
        app.state = AppState::Assessing;
        app.show_outcome(demo_outcome());
        app.scroll_result(-5);
        assert_eq!(app.result_scroll, 0);
        app.scroll_result(PAGE_SCROLL_SIZE as i32);
        app.scroll_result(-3);
        assert_eq!(app.result_scroll, 7);
    }

    #[test]
    fn test_scroll_result_stops_at_last_row() {
        let mut app = demo_app();
        app.scroll_result(PAGE_SCROLL_SIZE as i32);
        assert_eq!(app.result_scroll, 0);

        app.state = AppState::Assessing;
        app.show_outcome(demo_outcome());
        let last = results::row_count(&demo_outcome(), u16::MAX) - 1;
        for _ in 0..20 {
            app.scroll_result(PAGE_SCROLL_SIZE as i32);
        }
        assert_eq!(app.result_scroll, last);

        // A narrow panel wraps into more rows to scroll through
        app.set_result_rows(last + 30);
        app.scroll_result(PAGE_SCROLL_SIZE as i32);
        assert_eq!(app.result_scroll, last + PAGE_SCROLL_SIZE);
        app.scroll_result(100);
        assert_eq!(app.result_scroll, last + 29);
    }
}
