use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

// Every level of the response is optional: a missing field degrades to an
// empty string downstream instead of failing the whole chain.
#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, or an empty string when any
    /// link in that chain is absent.
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
            .unwrap_or_default()
    }
}

/// Blocking client for the Gemini generateContent endpoint. Cheap to clone;
/// the underlying connection pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_key,
            model,
        }
    }

    /// Sends one prompt and returns the generated text, empty when the
    /// response carries none. The key travels in a header, never in the URL.
    pub fn generate_content(&self, prompt: String) -> Result<String, ApiError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let parsed: GenerateContentResponse = response.json()?;
        Ok(parsed.first_text())
    }
}

pub fn story_prompt(prompt_text: &str) -> String {
    format!(
        "Write a detailed and coherent paragraph of at least 200 words based on the \
         following prompt. Use informal, everyday English. Do not use a list format \
         or break it into separate lines:\n\"{}\"",
        prompt_text
    )
}

pub fn instruction_prompt(instruction_text: &str) -> String {
    format!(
        "Follow the instruction below exactly. Respond in a direct, concise way. \
         Use a list format if the instruction implies it. Do not add extra \
         commentary or explanations.\n\n\"{}\"",
        instruction_text
    )
}

pub fn translation_prompt(english_text: &str) -> String {
    format!(
        "Translate the following English dialogue into Spanish.\n\
         Return a list where each line includes the English sentence and its \
         Spanish translation, separated by a slash (/).\n\
         Please preserve speaker names and dialogue formatting.\n\n{}",
        english_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_the_user_text() {
        let text = "a cat who learns to surf";
        assert!(story_prompt(text).contains(text));
        assert!(instruction_prompt(text).contains(text));
        assert!(translation_prompt(text).contains(text));
    }

    #[test]
    fn translation_prompt_asks_for_slash_separated_lines() {
        let prompt = translation_prompt("Hello.");
        assert!(prompt.contains("separated by a slash (/)"));
        assert!(prompt.contains("Spanish"));
    }

    #[test]
    fn first_text_reads_the_expected_field_path() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hola mundo"}, {"text": "extra"}]}},
                {"content": {"parts": [{"text": "segundo"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text(), "Hola mundo");
    }

    #[test]
    fn missing_fields_degrade_to_empty_string() {
        for raw in [
            "{}",
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {}}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(response.first_text(), "", "input: {}", raw);
        }
    }

    #[test]
    fn request_body_serializes_to_the_wire_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
