/// Environment variable holding the watsonx.ai service URL
pub const URL_VAR: &str = "WATSONX_URL";

/// Environment variable holding the IBM Cloud API key
pub const API_KEY_VAR: &str = "WATSONX_APIKEY";

pub const PROJECT_ID_VAR: &str = "projectID";
pub const SPACE_ID_VAR: &str = "spaceID";

/// Connection details for watsonx.ai.
///
/// Nothing is validated here; missing values only surface when a model is
/// initialized from these credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatsonxCredentials {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub space_id: Option<String>,
}

impl WatsonxCredentials {
    /// Read the credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the credentials through `lookup`, treating blank values as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            url: read(URL_VAR),
            api_key: read(API_KEY_VAR),
            project_id: read(PROJECT_ID_VAR),
            space_id: read(SPACE_ID_VAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("WATSONX_URL", "https://us-south.ml.cloud.ibm.com"),
            ("WATSONX_APIKEY", "secret"),
            ("projectID", "proj-1"),
        ]);
        let creds = WatsonxCredentials::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(creds.url.as_deref(), Some("https://us-south.ml.cloud.ibm.com"));
        assert_eq!(creds.api_key.as_deref(), Some("secret"));
        assert_eq!(creds.project_id.as_deref(), Some("proj-1"));
        assert_eq!(creds.space_id, None);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let creds = WatsonxCredentials::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(creds, WatsonxCredentials::default());
    }
}
