use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::Degraded;

// Model calls are by far the slowest outbound requests.
const GEMINI_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Thin client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder().timeout(GEMINI_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
        })
    }

    /// Send a prompt and reassemble the response text.
    ///
    /// The API splits its answer across multiple text parts; all parts of
    /// the first candidate are concatenated before the caller parses them as
    /// JSON. `tools` carries optional function declarations the prompt asks
    /// the model to reference.
    pub async fn generate(&self, prompt: &str, tools: Option<Value>) -> Result<String, Degraded> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        if let Some(tools) = tools {
            body["tools"] = json!([tools]);
        }

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Degraded::Upstream(format!(
                "Gemini API returned status {}",
                status
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| Degraded::Malformed(format!("Gemini response body: {}", err)))?;

        let text = match parsed.candidates.into_iter().next() {
            Some(candidate) => candidate
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .filter_map(|part| part.text)
                        .collect::<String>()
                })
                .unwrap_or_default(),
            None => {
                return Err(Degraded::Upstream(
                    "Gemini returned no candidates".to_string(),
                ))
            }
        };

        if text.trim().is_empty() {
            return Err(Degraded::Upstream(
                "Gemini returned an empty response".to_string(),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parts_concatenate_in_order() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"title\":" }, { "text": " \"A\"}]" }] }
            }]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let candidate = parsed.candidates.into_iter().next().unwrap();
        let text: String = candidate
            .content
            .unwrap()
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        assert_eq!(text, r#"[{"title": "A"}]"#);
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "hello" }, { "inlineData": { "data": "x" } }] }
            }]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let candidate = parsed.candidates.into_iter().next().unwrap();
        let text: String = candidate
            .content
            .unwrap()
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        assert_eq!(text, "hello");
    }

    #[test]
    fn missing_candidates_deserialize_to_empty() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
