use std::time::Duration;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Claude API key is not configured")]
    MissingCredential,

    #[error("Claude API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Claude API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed Claude API response: {0}")]
    MalformedResponse(String),
}

/// Thin client for the Anthropic Messages API. One attempt per call, bounded
/// by the configured timeout; callers decide what to do on failure.
#[derive(Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.claude_api_key.clone(),
            model: config.claude_model.clone(),
            url: config.claude_api_url.clone(),
            max_tokens: config.generation_max_tokens,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        if !self.is_configured() {
            return Err(GenerationError::MissingCredential);
        }

        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": 0.8,
                "system": system,
                "messages": [{
                    "role": "user",
                    "content": user
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        extract_text(&body)
    }
}

fn extract_text(body: &serde_json::Value) -> Result<String, GenerationError> {
    body["content"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GenerationError::MalformedResponse("missing content[0].text".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_complete_without_key_fails_fast() {
        let client = ClaudeClient::from_config(&Config::default()).unwrap();
        assert!(!client.is_configured());
        let err = client.complete("system", "user").await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[test]
    fn test_extract_text() {
        let body = json!({"content": [{"type": "text", "text": "INT. KITCHEN - NIGHT"}]});
        assert_eq!(extract_text(&body).unwrap(), "INT. KITCHEN - NIGHT");
    }

    #[test]
    fn test_extract_text_malformed() {
        let body = json!({"content": []});
        assert!(matches!(
            extract_text(&body),
            Err(GenerationError::MalformedResponse(_))
        ));
    }
}
