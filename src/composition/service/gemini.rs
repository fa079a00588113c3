// Gemini backend - image composition through the Generative Language REST API

use super::{CompositeGenerationService, GenerationError};
use crate::composition::types::{ImageReference, InlineImage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Connection settings for the hosted model
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

/// Sends multimodal generateContent requests and pulls the first inline image out of the reply
pub struct GeminiService {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GenerationError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("No API key configured; generation requests will fail");
        }

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        let model = self.config.model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!(
            "{}/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model_path
        )
    }
}

#[async_trait]
impl CompositeGenerationService for GeminiService {
    async fn generate(
        &self,
        images: &[InlineImage],
        prompt: &str,
    ) -> Result<ImageReference, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::ConfigError("API key is not set".to_string()))?;

        let request = build_request(images, prompt);
        let endpoint = self.endpoint();
        tracing::debug!("POST {} with {} image part(s)", endpoint, images.len());

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => truncate_body(body.trim()),
                Err(e) => format!("<failed to read response body: {}>", e),
            };
            return Err(GenerationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        extract_image(body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "inline_data")]
    inline_data: Option<Blob>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Image parts in input order, followed by the instruction
fn build_request(images: &[InlineImage], prompt: &str) -> GenerateContentRequest {
    let mut parts: Vec<Part> = images
        .iter()
        .map(|image| Part {
            inline_data: Some(Blob {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
            ..Part::default()
        })
        .collect();

    parts.push(Part {
        text: Some(prompt.to_string()),
        ..Part::default()
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE", "TEXT"],
        },
    }
}

/// Keep error bodies short enough for a log line
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}... [truncated, {} total bytes]", &body[..cut], body.len()),
        None => body.to_string(),
    }
}

/// First inline image of the first candidate
fn extract_image(response: GenerateContentResponse) -> Result<ImageReference, GenerationError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.inline_data)
                .find(|blob| !blob.data.is_empty())
        })
        .map(|blob| ImageReference::new(blob.mime_type, blob.data))
        .ok_or_else(|| {
            GenerationError::MalformedResponse("response did not contain an image part".to_string())
        })
}
