//! The outbound chat-completions call, behind a trait seam.
//!
//! The proxy issues exactly one request per question: no retry, no backoff.
//! Interactive Q&A favors a fast visible failure over hidden latency. Tests
//! substitute a stub for [`ChatBackend`], so nothing in the test suite
//! touches the network.

use crate::config::AzureConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Cap on generated tokens per answer.
const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Answer text returned when the upstream reply carries no message content.
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "No response generated";

/// A backend that turns a (system prompt, user query) pair into answer text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce an answer. Implementations resolve their own configuration
    /// and must return [`ApiError::ConfigMissing`] when it is absent, and
    /// [`ApiError::Upstream`] for a non-success upstream status.
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, ApiError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_completion_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// The real Azure OpenAI backend.
pub struct AzureChat {
    http: reqwest::Client,
}

impl AzureChat {
    pub fn new() -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(ApiError::from)?;
        Ok(AzureChat { http })
    }
}

#[async_trait]
impl ChatBackend for AzureChat {
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String, ApiError> {
        // Read per request: rotation takes effect immediately, absence fails
        // this request only.
        let config = AzureConfig::from_env().ok_or(ApiError::ConfigMissing)?;

        let body = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_query,
                },
            ],
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .http
            .post(config.completions_url())
            .header("api-key", &config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Surface the status; the response text goes to the log only.
            let detail = response.text().await.unwrap_or_default();
            log::error!("Azure OpenAI API error: {} {detail}", status.as_u16());
            return Err(ApiError::Upstream(status.as_u16()));
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(extract_answer(parsed))
    }
}

/// Pick the answer text out of a parsed completions response: the first
/// choice's message content, or the placeholder when the reply is
/// structurally empty.
fn extract_answer(parsed: ChatResponse) -> String {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_ANSWER_PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ChatResponse {
        serde_json::from_str(json).expect("wire shape should parse")
    }

    /// The happy path takes the first choice's content verbatim.
    #[test]
    fn first_choice_content_is_the_answer() {
        let parsed = parse(
            r#"{"choices":[
                {"message":{"role":"assistant","content":"Focus on Home & Garden."}},
                {"message":{"role":"assistant","content":"ignored second choice"}}
            ]}"#,
        );
        assert_eq!(extract_answer(parsed), "Focus on Home & Garden.");
    }

    /// A reply with no choices at all falls back to the placeholder.
    #[test]
    fn empty_choices_yield_placeholder() {
        let parsed = parse(r#"{"choices":[]}"#);
        assert_eq!(extract_answer(parsed), EMPTY_ANSWER_PLACEHOLDER);
    }

    /// `choices` itself may be absent; serde defaults carry the placeholder.
    #[test]
    fn missing_choices_field_yields_placeholder() {
        let parsed = parse("{}");
        assert_eq!(extract_answer(parsed), EMPTY_ANSWER_PLACEHOLDER);
    }

    /// A choice without a message, or a message without content, is treated
    /// the same as no answer.
    #[test]
    fn absent_message_or_content_yields_placeholder() {
        let no_message = parse(r#"{"choices":[{}]}"#);
        assert_eq!(extract_answer(no_message), EMPTY_ANSWER_PLACEHOLDER);

        let no_content = parse(r#"{"choices":[{"message":{"role":"assistant"}}]}"#);
        assert_eq!(extract_answer(no_content), EMPTY_ANSWER_PLACEHOLDER);
    }

    /// An empty content string counts as no answer, not an empty answer.
    #[test]
    fn empty_content_string_yields_placeholder() {
        let parsed = parse(r#"{"choices":[{"message":{"content":""}}]}"#);
        assert_eq!(extract_answer(parsed), EMPTY_ANSWER_PLACEHOLDER);
    }
}
