//! Remote text-generation for assessments.
//!
//! This module provides the `TextGenerator` seam and its watsonx.ai
//! implementation, `WatsonxModel`. Credentials come from the environment
//! (`WATSONX_URL`, `WATSONX_APIKEY`, `projectID`, `spaceID`) and are read
//! when a model is initialized, not at startup.

pub mod client;
pub mod credentials;
pub mod error;
pub mod generator;

pub use client::{
    extract_generated_text, GenerationParameters, ModelSettings, WatsonxModel, DEFAULT_IAM_URL,
    DEFAULT_MODEL_ID,
};
pub use credentials::WatsonxCredentials;
pub use error::ApiError;
pub use generator::TextGenerator;
