//! Gemini API client for classification, styling, and image synthesis

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

/// One part of a request content block: text or an inline image
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Inline binary payload (base64 + mime type)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Create an inline image part from bare base64 data
    pub fn inline_image(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: base64_data.into(),
            }),
        }
    }
}

/// Generation options: structured output and grounding tools
#[derive(Debug, Clone, Serialize, Default)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GenerationConfig {
    /// Request a JSON reply without a schema
    pub fn json() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: None,
        }
    }

    /// Request a JSON reply constrained by the given schema
    pub fn json_with_schema(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

/// A parsed `generateContent` reply.
///
/// Kept as a raw value and navigated by path: strict struct deserialization
/// breaks on responses that omit or reshape optional fields.
#[derive(Debug, Clone)]
pub struct GeminiReply {
    raw: Value,
}

impl GeminiReply {
    /// Concatenated text of all text parts in the first candidate
    pub fn text(&self) -> String {
        self.first_candidate_parts()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// First inline image in any candidate, as (mime type, base64 data)
    pub fn inline_image(&self) -> Option<(String, String)> {
        let candidates = self.raw.get("candidates")?.as_array()?;
        for candidate in candidates {
            let parts = candidate.get("content")?.get("parts")?.as_array()?;
            for part in parts {
                if let Some(inline) = part.get("inlineData").or_else(|| part.get("inline_data")) {
                    let mime = inline.get("mimeType").or_else(|| inline.get("mime_type"))?.as_str()?;
                    let data = inline.get("data")?.as_str()?;
                    return Some((mime.to_string(), data.to_string()));
                }
            }
        }
        None
    }

    fn first_candidate_parts(&self) -> Option<&Vec<Value>> {
        self.raw
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
    }

    #[cfg(test)]
    fn from_value(raw: Value) -> Self {
        Self { raw }
    }
}

impl GeminiClient {
    /// Create a new client with an explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Create a client using the key stored in the keyring
    pub fn from_keyring() -> Result<Self> {
        let api_key = crate::security::keyring::get_api_key()?;
        Ok(Self::new(api_key))
    }

    /// Send a single-shot `generateContent` request.
    ///
    /// One call in flight at a time, no retry: failures surface to the
    /// wrapper functions, which decide the fallback per operation.
    pub async fn generate(
        &self,
        model: &str,
        parts: Vec<Part>,
        config: Option<GenerationConfig>,
        tools: Option<Vec<Value>>,
    ) -> Result<GeminiReply> {
        let request = GenerateRequest {
            contents: vec![RequestContent { parts }],
            generation_config: config,
            tools,
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to the Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Gemini API error ({}): {}", status, body);
        }

        let body = response.text().await.context("Failed to read response body")?;
        tracing::debug!("Gemini reply from {}: {} bytes", model, body.len());

        let raw: Value = serde_json::from_str(body.trim())
            .context("Failed to parse Gemini JSON response")?;
        Ok(GeminiReply { raw })
    }
}
