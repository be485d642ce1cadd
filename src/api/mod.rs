pub mod gemini;

pub use gemini::{ApiError, GeminiClient};
