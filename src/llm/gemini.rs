//! Google Gemini `generateContent` client.
//!
//! One POST per query: instruction text part plus the capture as an
//! `inline_data` part (base64 PNG). The response is free-form text.

use super::{ModelClient, QueryError};
use crate::capture::ImagePayload;
use base64::{engine::general_purpose::STANDARD, Engine};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

impl ModelClient for GeminiClient {
    async fn query(
        &self,
        image: &ImagePayload,
        instruction: &str,
        model: &str,
    ) -> Result<String, QueryError> {
        let url = format!("{API_BASE}/{model}:generateContent");
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": instruction },
                        {
                            "inline_data": {
                                "mime_type": image.mime_type,
                                "data": STANDARD.encode(&image.bytes),
                            }
                        },
                    ],
                }]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Api { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        log::info!("[LLM] {model} answered in {}ms", start.elapsed().as_millis());

        extract_text(&body).ok_or(QueryError::EmptyResponse)
    }
}

/// Pull the answer text out of a `generateContent` response body.
///
/// The first candidate may split its answer across several text parts;
/// they are concatenated in order.
fn extract_text(body: &serde_json::Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_single_part_text() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello" }] }
            }]
        });
        assert_eq!(extract_text(&body).as_deref(), Some("hello"));
    }

    #[test]
    fn concatenates_split_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```cpp\n" }, { "text": "int main();\n```" }] }
            }]
        });
        assert_eq!(
            extract_text(&body).as_deref(),
            Some("```cpp\nint main();\n```")
        );
    }

    #[test]
    fn missing_candidates_is_none() {
        assert!(extract_text(&json!({ "promptFeedback": {} })).is_none());
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "inline_data": { "data": "..." } }] }
            }]
        });
        assert!(extract_text(&body).is_none());
    }
}
