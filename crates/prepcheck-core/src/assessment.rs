//! The submission boundary: turn a draft into an assessment result.
//!
//! [`Assessor::assess`] never fails. When the watsonx integration is
//! unavailable, when the model cannot be initialized, or when the call
//! itself fails, the outcome is the fixed demo result, labelled as such.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::api::{ApiError, ModelSettings, TextGenerator, WatsonxCredentials, WatsonxModel};
use crate::models::AssessmentDraft;
use crate::prompt::format_prompt;

// ============================================================================
// Fixed text
// ============================================================================

/// Heading above a live result
pub const RESULT_HEADING: &str = "📊 Assessment Results";

/// Heading above the demo result
pub const DEMO_HEADING: &str = "Sample Assessment Results";

pub const DEMO_NOTICE: &str = "Demo Mode: Would normally send to WatsonX for processing";

pub const FALLBACK_NOTICE: &str = "Falling back to demo mode...";

/// Shown once at startup when the integration is unavailable
pub const UNAVAILABLE_WARNING: &str = "WatsonX integration not available. Running in demo mode.";

pub const DEMO_SCORES: [(&str, u8); 3] = [("Shelter", 75), ("People", 85), ("Supplies", 60)];

pub const DEMO_SUMMARY: &str = "Based on the provided information, this is a moderate-risk \
situation. Your shelter provides basic protection but has some vulnerabilities that should be \
addressed. The number of people and their specific needs are well-documented, which helps in \
planning. However, supply levels could be improved for better preparedness.";

pub const DEMO_PRECAUTIONS: [&str; 5] = [
    "Strengthen shelter vulnerabilities",
    "Increase water supplies (recommend 1 gallon per person per day)",
    "Add emergency communication devices",
    "Create an evacuation plan",
    "Stock additional non-perishable food items",
];

/// The demo result as one block of text.
pub fn demo_text() -> String {
    let mut text = String::from("Safety Scores:\n");
    for (area, score) in DEMO_SCORES {
        text.push_str(&format!("- {}: {}/100\n", area, score));
    }
    text.push_str("\nSummary:\n");
    text.push_str(DEMO_SUMMARY);
    text.push_str("\n\nRecommended Precautions:\n");
    for (i, precaution) in DEMO_PRECAUTIONS.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, precaution));
    }
    text
}

// ============================================================================
// Integration capability
// ============================================================================

/// Whether live assessments can be attempted at all. Decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Integration {
    Available,
    Unavailable(String),
}

impl Integration {
    /// Live assessments need the `watsonx` feature and no `force_demo`.
    pub fn detect(force_demo: bool) -> Self {
        if !cfg!(feature = "watsonx") {
            Integration::Unavailable("built without watsonx support".to_string())
        } else if force_demo {
            Integration::Unavailable("demo mode requested".to_string())
        } else {
            Integration::Available
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Integration::Available)
    }
}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoReason {
    /// The integration was never available
    Unavailable(String),
    /// Initialization or the generation call failed
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentOutcome {
    Live {
        text: String,
        model_id: String,
        generated_at: DateTime<Utc>,
    },
    Demo { reason: DemoReason },
}

impl AssessmentOutcome {
    pub fn is_demo(&self) -> bool {
        matches!(self, AssessmentOutcome::Demo { .. })
    }

    /// Messages shown above the result. Demo results always carry the demo notice.
    pub fn notices(&self) -> Vec<Notice> {
        match self {
            AssessmentOutcome::Live { .. } => Vec::new(),
            AssessmentOutcome::Demo {
                reason: DemoReason::Unavailable(_),
            } => vec![Notice::info(DEMO_NOTICE)],
            AssessmentOutcome::Demo {
                reason: DemoReason::Failed(message),
            } => vec![
                Notice::error(format!("Error processing assessment: {}", message)),
                Notice::info(FALLBACK_NOTICE),
                Notice::info(DEMO_NOTICE),
            ],
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            AssessmentOutcome::Live { .. } => RESULT_HEADING,
            AssessmentOutcome::Demo { .. } => DEMO_HEADING,
        }
    }

    pub fn body(&self) -> String {
        match self {
            AssessmentOutcome::Live { text, .. } => text.clone(),
            AssessmentOutcome::Demo { .. } => demo_text(),
        }
    }

    /// Notices, heading and body as plain text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for notice in self.notices() {
            out.push_str(&notice.message);
            out.push('\n');
        }
        out.push_str(self.heading());
        out.push_str("\n\n");
        out.push_str(&self.body());
        out
    }
}

// ============================================================================
// Assessor
// ============================================================================

/// Builds a model at submission time. Missing or invalid credentials surface here.
pub type ModelInit = Box<dyn Fn() -> Result<Arc<dyn TextGenerator>, ApiError> + Send + Sync>;

pub struct Assessor {
    integration: Integration,
    init_model: ModelInit,
}

impl Assessor {
    pub fn new(integration: Integration, init_model: ModelInit) -> Self {
        if let Integration::Unavailable(ref reason) = integration {
            warn!(%reason, "{}", UNAVAILABLE_WARNING);
        }
        Self {
            integration,
            init_model,
        }
    }

    /// An assessor that calls watsonx.ai with credentials from the environment.
    pub fn watsonx(integration: Integration, settings: ModelSettings) -> Self {
        Self::new(
            integration,
            Box::new(move || -> Result<Arc<dyn TextGenerator>, ApiError> {
                let model = WatsonxModel::init(WatsonxCredentials::from_env(), settings.clone())?;
                Ok(Arc::new(model) as Arc<dyn TextGenerator>)
            }),
        )
    }

    pub fn integration(&self) -> &Integration {
        &self.integration
    }

    /// Assess the draft, falling back to the demo result on any failure.
    pub async fn assess(&self, draft: &AssessmentDraft) -> AssessmentOutcome {
        if let Integration::Unavailable(ref reason) = self.integration {
            info!(%reason, "Integration unavailable, showing demo results");
            return AssessmentOutcome::Demo {
                reason: DemoReason::Unavailable(reason.clone()),
            };
        }

        let prompt = format_prompt(draft);
        match self.generate(&prompt).await {
            Ok((model_id, text)) => {
                info!(%model_id, chars = text.len(), "Assessment generated");
                AssessmentOutcome::Live {
                    text,
                    model_id,
                    generated_at: Utc::now(),
                }
            }
            Err(e) => {
                error!(error = %e, "Assessment failed, falling back to demo results");
                AssessmentOutcome::Demo {
                    reason: DemoReason::Failed(e.to_string()),
                }
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<(String, String), ApiError> {
        let model = (self.init_model)()?;
        let text = model.generate(prompt).await?;
        Ok((model.model_id().to_string(), text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::api::extract_generated_text;
    use crate::models::{DisasterInfo, DisasterType};

    /// Replies with a canned JSON response, run through the real extraction.
    struct CannedModel {
        response: serde_json::Value,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextGenerator for CannedModel {
        fn model_id(&self) -> &str {
            "canned"
        }

        async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
            assert!(prompt.contains("Disaster Assessment:"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            extract_generated_text(self.response.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl TextGenerator for FailingModel {
        fn model_id(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, ApiError> {
            Err(ApiError::ServerError("model overloaded".to_string()))
        }
    }

    fn canned(response: serde_json::Value) -> (Assessor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let assessor = Assessor::new(
            Integration::Available,
            Box::new(move || {
                Ok(Arc::new(CannedModel {
                    response: response.clone(),
                    calls: counter.clone(),
                }) as Arc<dyn TextGenerator>)
            }),
        );
        (assessor, calls)
    }

    fn draft() -> AssessmentDraft {
        AssessmentDraft {
            disaster: Some(DisasterInfo {
                kind: DisasterType::Hurricane,
                intensity: 4,
                currently_in: true,
            }),
            ..Default::default()
        }
    }

    fn assert_demo_content(text: &str) {
        assert!(text.contains(DEMO_NOTICE));
        assert!(text.contains(DEMO_HEADING));
        assert!(text.contains("- Shelter: 75/100"));
        assert!(text.contains("- People: 85/100"));
        assert!(text.contains("- Supplies: 60/100"));
        for (i, precaution) in DEMO_PRECAUTIONS.iter().enumerate() {
            assert!(text.contains(&format!("{}. {}", i + 1, precaution)));
        }
    }

    #[tokio::test]
    async fn test_live_result_from_envelope() {
        let (assessor, calls) = canned(serde_json::json!({"results": [{"generated_text": "X"}]}));
        let outcome = assessor.assess(&draft()).await;

        match &outcome {
            AssessmentOutcome::Live { text, model_id, .. } => {
                assert_eq!(text, "X");
                assert_eq!(model_id, "canned");
            }
            other => panic!("expected live outcome, got {:?}", other),
        }
        assert!(outcome.notices().is_empty());
        assert_eq!(outcome.heading(), RESULT_HEADING);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_live_result_from_raw_string() {
        let (assessor, _) = canned(serde_json::json!("Y"));
        assert_eq!(assessor.assess(&draft()).await.body(), "Y");
    }

    #[tokio::test]
    async fn test_call_failure_falls_back_to_demo() {
        let assessor = Assessor::new(
            Integration::Available,
            Box::new(|| Ok(Arc::new(FailingModel) as Arc<dyn TextGenerator>)),
        );
        let outcome = assessor.assess(&draft()).await;

        assert!(outcome.is_demo());
        let notices = outcome.notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.contains("model overloaded"));
        assert_eq!(notices[1].message, FALLBACK_NOTICE);
        assert_demo_content(&outcome.to_text());
    }

    #[tokio::test]
    async fn test_init_failure_falls_back_to_demo() {
        let assessor = Assessor::new(
            Integration::Available,
            Box::new(|| -> Result<Arc<dyn TextGenerator>, ApiError> {
                Err(ApiError::MissingCredential("WATSONX_APIKEY"))
            }),
        );
        let outcome = assessor.assess(&draft()).await;

        assert_eq!(
            outcome,
            AssessmentOutcome::Demo {
                reason: DemoReason::Failed(
                    "Missing credential: WATSONX_APIKEY is not set".to_string()
                ),
            }
        );
        assert_demo_content(&outcome.to_text());
    }

    #[tokio::test]
    async fn test_unavailable_never_calls_model() {
        let (live, calls) = canned(serde_json::json!("unused"));
        let assessor = Assessor::new(
            Integration::Unavailable("demo mode requested".to_string()),
            live.init_model,
        );
        let outcome = assessor.assess(&AssessmentDraft::default()).await;

        assert!(outcome.is_demo());
        assert_eq!(outcome.notices(), vec![Notice::info(DEMO_NOTICE)]);
        assert_demo_content(&outcome.to_text());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_watsonx_without_credentials_falls_back() {
        // Settings point at an unroutable IAM URL so nothing leaves the machine
        // even if credentials happen to be set in the environment.
        let settings = ModelSettings {
            iam_url: "http://127.0.0.1:9/identity/token".to_string(),
            ..ModelSettings::default()
        };
        let assessor = Assessor::watsonx(Integration::Available, settings);
        assert!(assessor.assess(&draft()).await.is_demo());
    }

    #[test]
    fn test_detect_force_demo() {
        assert!(!Integration::detect(true).is_available());
        assert_eq!(Integration::detect(false).is_available(), cfg!(feature = "watsonx"));
    }

    #[test]
    fn test_demo_text_layout() {
        let text = demo_text();
        assert!(text.starts_with("Safety Scores:\n- Shelter: 75/100\n"));
        assert!(text.contains("\nSummary:\nBased on the provided information"));
        assert!(text.ends_with("5. Stock additional non-perishable food items\n"));
    }
}
