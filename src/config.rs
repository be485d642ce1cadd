use serde::Deserialize;
use std::fs;

/// Environment variable consulted before the config file, so the API key
/// never has to be written to disk at all.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

pub fn load_config_from_file(file_path: &str) -> Result<Config, String> {
    match fs::read_to_string(file_path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(loaded_config) => Ok(loaded_config),
            Err(e) => Err(format!("Failed to parse {}: {}", file_path, e)),
        },
        Err(e) => Err(format!(
            "Failed to read {}: {}. Please ensure it exists.",
            file_path, e
        )),
    }
}

impl Config {
    /// The key to use for requests: the environment wins over the file.
    /// Blank values count as absent either way.
    pub fn resolved_api_key(&self) -> Option<String> {
        non_blank(std::env::var(API_KEY_ENV).ok()).or_else(|| non_blank(self.api_key.clone()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
