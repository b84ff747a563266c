use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};

use super::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::provider::TextGenerator;
use crate::{ClientConfig, Error};

/// Gemini `generateContent` client authenticated with an API key.
pub struct GeminiClient {
    client: Client,
    config: ClientConfig,
}

impl GeminiClient {
    /// Create a client for the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Create a client from explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        // No idle pool: each call opens its own connection and drops it when
        // the exchange finishes, on success and failure alike.
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the API endpoint for the configured model, without the key.
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one prompt and return the first candidate's text.
    pub async fn text_prompt(&self, prompt: &str) -> Result<String, Error> {
        let endpoint = self.endpoint();
        let body = GenerateContentRequest::from_prompt(prompt);

        tracing::debug!(
            endpoint = %endpoint,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let error = Error::connection(e);
                tracing::error!("{error}");
                error
            })?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: Response) -> Result<String, Error> {
        let status = response.status();

        if status != StatusCode::OK {
            let reason = Self::reason_phrase(&response);
            // The status is already known, so a broken error body only costs
            // the detail.
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| ErrorResponse::message_from(&body));
            tracing::warn!(
                status = status.as_u16(),
                reason = %reason,
                detail = ?detail,
                "request failed"
            );
            return Err(Error::status(status.as_u16(), reason, detail));
        }

        let body = response.text().await.map_err(|e| {
            let error = Error::connection(e);
            tracing::error!("{error}");
            error
        })?;

        Self::parse_text(&body)
    }

    /// Status message as sent by the server. hyper only records the phrase
    /// when it differs from the canonical one.
    fn reason_phrase(response: &Response) -> String {
        if let Some(phrase) = response.extensions().get::<ReasonPhrase>() {
            return String::from_utf8_lossy(phrase.as_bytes()).into_owned();
        }
        response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string()
    }

    /// Extract the generated text from a successful response body.
    pub fn parse_text(body: &str) -> Result<String, Error> {
        let parsed = GenerateContentResponse::from_json(body)
            .and_then(|response| {
                if let Some(usage) = &response.usage_metadata {
                    tracing::debug!(
                        prompt_tokens = ?usage.prompt_token_count,
                        candidate_tokens = ?usage.candidates_token_count,
                        total_tokens = ?usage.total_token_count,
                        "received generateContent response"
                    );
                }
                response.first_text().map(str::to_owned)
            });

        if let Err(error) = &parsed {
            tracing::error!("{error}");
        }
        parsed
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, Error> {
        self.text_prompt(prompt).await
    }
}
