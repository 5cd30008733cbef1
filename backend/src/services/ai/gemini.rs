//! REST client for the Gemini image model (`generateContent` endpoint).
//!
//! One synchronous round-trip per edit, no retries: the calling request
//! handler already owns timeout and error surfacing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::services::ai::{AiError, EditOptions, ImageGenerator};

#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Explicit credentials and model; takes precedence over anything
    /// environment-sourced.
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, AiError> {
        if api_key.trim().is_empty() {
            return Err(AiError::MissingCredentials("GOOGLE_API_KEY"));
        }
        if model.trim().is_empty() {
            return Err(AiError::MissingCredentials("GEMINI_IMAGE_MODEL"));
        }
        Ok(Self {
            api_key,
            model: model.trim().to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Resolves credentials and model from configuration. A missing API key
    /// fails here, at the call that needed it, not at process startup.
    pub fn from_config(config: &Config) -> Result<Self, AiError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or(AiError::MissingCredentials("GOOGLE_API_KEY"))?;
        Self::new(
            api_key,
            config.gemini_image_model.clone(),
            config.gemini_base_url.clone(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    candidate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    code: Option<i64>,
    status: Option<String>,
    message: Option<String>,
}

impl From<UpstreamError> for AiError {
    fn from(err: UpstreamError) -> Self {
        AiError::Upstream {
            code: err.code,
            status: err.status,
            message: err.message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }
}

fn build_request_body(
    prompt: &str,
    image: &[u8],
    mime_type: &str,
    options: &EditOptions,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![
                RequestPart {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                },
                RequestPart {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.to_string(),
                        data: STANDARD.encode(image),
                    }),
                },
            ],
        }],
        generation_config: GenerationConfig {
            candidate_count: options.candidate_count.max(1),
            max_output_tokens: options.max_output_tokens,
            temperature: options.temperature,
        },
    }
}

/// Collects inline image parts across all candidates. Text-only parts are
/// ignored; an empty harvest is an error since the caller always expects at
/// least one edited image.
fn extract_images(response: GenerateContentResponse) -> Result<Vec<Vec<u8>>, AiError> {
    if let Some(err) = response.error {
        return Err(err.into());
    }

    let mut images = Vec::new();
    for candidate in response.candidates {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            let Some(inline) = part.inline_data else {
                continue;
            };
            if !inline.mime_type.starts_with("image/") || inline.data.is_empty() {
                continue;
            }
            let bytes = STANDARD
                .decode(&inline.data)
                .map_err(|e| AiError::Decode(e.to_string()))?;
            images.push(bytes);
        }
    }

    if images.is_empty() {
        return Err(AiError::NoImageData);
    }
    Ok(images)
}

#[async_trait::async_trait]
impl ImageGenerator for GeminiClient {
    async fn edit(
        &self,
        image: &[u8],
        prompt: &str,
        options: &EditOptions,
    ) -> Result<Vec<Vec<u8>>, AiError> {
        let mime_type = options
            .mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or("image/png");

        let body = build_request_body(prompt, image, mime_type, options);
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .timeout(options.timeout)
            .send()
            .await?;

        let status = response.status();
        let payload: GenerateContentResponse = response.json().await?;

        if !status.is_success() {
            if let Some(err) = payload.error {
                return Err(err.into());
            }
            return Err(AiError::Upstream {
                code: Some(i64::from(status.as_u16())),
                status: None,
                message: format!("HTTP {}", status),
            });
        }

        extract_images(payload)
    }
}
