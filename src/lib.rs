//! A minimal client for the Gemini `generateContent` API.
//!
//! Sends one text prompt and returns the text of the first candidate. Failures
//! come back as a tagged [`Error`]: connection problems, non-success HTTP
//! statuses and malformed responses are distinct variants.
//!
//! ```rust,no_run
//! use gemini_prompt::GeminiClient;
//!
//! # async fn demo() -> Result<(), gemini_prompt::Error> {
//! let client = GeminiClient::new(std::env::var("GOOGLE_API_KEY").unwrap_or_default())?;
//! let text = client.text_prompt("Hello Gemini.").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

// Re-export core types for easy usage
pub use config::ClientConfig;
pub use error::Error;
pub use provider::TextGenerator;
pub use providers::*;

/// Format an outcome as the plain text printed to the user.
///
/// Connection and status failures render as their error message. A malformed
/// response renders as an empty string; it has already been logged.
pub fn render_outcome(outcome: Result<String, Error>) -> String {
    match outcome {
        Ok(text) => text,
        Err(Error::Parse(_)) => String::new(),
        Err(error) => error.to_string(),
    }
}

/// Run one prompt through `generator` and render the result as text.
pub async fn respond(generator: &dyn TextGenerator, prompt: &str) -> String {
    render_outcome(generator.generate_text(prompt).await)
}

/// Send `prompt` with `api_key` to the default model and return plain text.
///
/// Never fails: every error is folded into the returned string, see
/// [`render_outcome`]. Use [`GeminiClient`] to branch on failure kinds.
pub async fn text_prompt(api_key: &str, prompt: &str) -> String {
    match GeminiClient::new(api_key) {
        Ok(client) => respond(&client, prompt).await,
        Err(error) => error.to_string(),
    }
}
