//! Process configuration, all from environment variables.
//!
//! Server-level settings are read once at startup. The Azure OpenAI values
//! are re-read per request, so a credential rotation takes effect without a
//! restart; a missing value fails that request only, never the process.

use std::env;

/// Settings resolved once when the server starts.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Path of the dataset JSON file.
    pub data_path: String,
    /// Board passcode for the unlock gate. Unset disables unlocking.
    pub passcode: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        ServerConfig {
            bind_addr: env::var("BASKETBRIDGE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_path: env::var("BASKETBRIDGE_DATA")
                .unwrap_or_else(|_| "data/grocery_summary.json".into()),
            passcode: env::var("BASKETBRIDGE_PASSCODE").ok(),
        }
    }
}

/// The four values required to reach the Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureConfig {
    /// Resolve from the environment. `None` when any required value is
    /// absent; the caller maps that to a configuration-missing failure.
    pub fn from_env() -> Option<Self> {
        Some(AzureConfig {
            endpoint: env::var("AZURE_OPENAI_ENDPOINT").ok()?,
            api_key: env::var("AZURE_OPENAI_API_KEY").ok()?,
            deployment: env::var("AZURE_OPENAI_DEPLOYMENT").ok()?,
            api_version: env::var("AZURE_OPENAI_API_VERSION").ok()?,
        })
    }

    /// The chat-completions URL for this deployment.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}
