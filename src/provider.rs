use crate::Error;

/// A trait for anything that can turn a text prompt into generated text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Send one prompt and return the first candidate's text.
    async fn generate_text(&self, prompt: &str) -> Result<String, Error>;
}
