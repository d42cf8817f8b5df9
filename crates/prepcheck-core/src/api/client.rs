//! Client for the watsonx.ai text-generation REST API.
//!
//! Each call exchanges the API key for a short-lived IAM bearer token and
//! then posts one generation request. There is no retry and no timeout:
//! a submission makes a single best-effort call.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{ApiError, TextGenerator, WatsonxCredentials};

// ============================================================================
// Constants
// ============================================================================

/// IBM Cloud IAM endpoint that trades an API key for a bearer token
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Foundation model used for assessments
pub const DEFAULT_MODEL_ID: &str = "ibm/granite-13b-chat-v2";

/// Grant type for API key exchange
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Path of the text generation endpoint, relative to `WATSONX_URL`
const GENERATION_PATH: &str = "/ml/v1/text/generation";

/// API version date sent with every generation request
const API_VERSION: &str = "2023-05-29";

/// Decoding parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub decoding_method: String,
    pub max_new_tokens: u32,
    pub min_new_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            decoding_method: "greedy".to_string(),
            max_new_tokens: 500,
            min_new_tokens: 50,
            temperature: 0.7,
        }
    }
}

/// Which model to call and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model_id: String,
    pub iam_url: String,
    pub parameters: GenerationParameters,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            iam_url: DEFAULT_IAM_URL.to_string(),
            parameters: GenerationParameters::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model_id: &'a str,
    input: &'a str,
    parameters: &'a GenerationParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    space_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
}

/// A watsonx.ai foundation model bound to one project or deployment space.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct WatsonxModel {
    client: Client,
    base_url: String,
    api_key: String,
    project_id: Option<String>,
    space_id: Option<String>,
    settings: ModelSettings,
}

impl std::fmt::Debug for WatsonxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatsonxModel")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("space_id", &self.space_id)
            .field("model_id", &self.settings.model_id)
            .finish_non_exhaustive()
    }
}

impl WatsonxModel {
    /// Initialize the model from credentials.
    ///
    /// Fails when the URL or API key is missing, or when neither a project
    /// nor a space ID is given.
    pub fn init(credentials: WatsonxCredentials, settings: ModelSettings) -> Result<Self, ApiError> {
        let base_url = credentials
            .url
            .ok_or(ApiError::MissingCredential(super::credentials::URL_VAR))?;
        let api_key = credentials
            .api_key
            .ok_or(ApiError::MissingCredential(super::credentials::API_KEY_VAR))?;
        if credentials.project_id.is_none() && credentials.space_id.is_none() {
            return Err(ApiError::MissingCredential("projectID or spaceID"));
        }

        let client = Client::builder().build()?;

        info!(
            model_id = %settings.model_id,
            %base_url,
            project = ?credentials.project_id,
            space = ?credentials.space_id,
            "watsonx model initialized"
        );

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            project_id: credentials.project_id,
            space_id: credentials.space_id,
            settings,
        })
    }

    fn generation_url(&self) -> String {
        format!("{}{}?version={}", self.base_url, GENERATION_PATH, API_VERSION)
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerationRequest<'a> {
        GenerationRequest {
            model_id: &self.settings.model_id,
            input: prompt,
            parameters: &self.settings.parameters,
            project_id: self.project_id.as_deref(),
            space_id: self.space_id.as_deref(),
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Exchange the API key for an IAM bearer token
    async fn fetch_token(&self) -> Result<String, ApiError> {
        let response = self
            .client
            .post(&self.settings.iam_url)
            .header(header::ACCEPT, "application/json")
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let token: IamTokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("IAM token response: {}", e)))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl TextGenerator for WatsonxModel {
    fn model_id(&self) -> &str {
        &self.settings.model_id
    }

    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let token = self.fetch_token().await?;

        let url = self.generation_url();
        debug!(%url, prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("generation response: {}", e)))?;

        let text = extract_generated_text(body)?;
        debug!(chars = text.len(), "Generation complete");
        Ok(text)
    }
}

/// Pull the generated text out of a generation response.
///
/// An envelope with a `results` list yields the first entry's
/// `generated_text`; a bare JSON string is returned as-is; any other value
/// is returned as its raw JSON text.
pub fn extract_generated_text(response: Value) -> Result<String, ApiError> {
    match response {
        Value::Object(mut envelope) if envelope.contains_key("results") => {
            let first = match envelope.remove("results") {
                Some(Value::Array(results)) => results.into_iter().next(),
                _ => None,
            }
            .ok_or_else(|| ApiError::InvalidResponse("empty results list".to_string()))?;

            match first.get("generated_text") {
                Some(Value::String(text)) => Ok(text.clone()),
                _ => Err(ApiError::InvalidResponse(
                    "first result has no generated_text".to_string(),
                )),
            }
        }
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}
