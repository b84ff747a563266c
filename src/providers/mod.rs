//! Provider implementations.

pub mod gemini;

// Re-export commonly used provider types
pub use gemini::GeminiClient;
