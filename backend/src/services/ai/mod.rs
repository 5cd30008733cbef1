//! Generative image-edit providers.
//!
//! `ImageGenerator` is the capability seam; a provider key selects a concrete
//! implementation through [`create_generator`]. Gemini is implemented; the
//! Flux and GPT keys are recognized but fail with a typed not-implemented
//! error rather than degrading silently.

pub mod gemini;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::config::Config;
use self::gemini::GeminiClient;

pub const DEFAULT_EDIT_TIMEOUT: Duration = Duration::from_secs(60);
/// Upper bound on candidates per request.
pub const MAX_CANDIDATES: u32 = 10;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{0} is not configured")]
    MissingCredentials(&'static str),
    #[error("provider {0} is not implemented")]
    NotImplemented(Provider),
    #[error("unknown provider key: {0}")]
    UnknownProvider(String),
    #[error("failed to read source image: {0}")]
    InvalidImage(String),
    #[error("gemini API error: code={code:?} status={status:?} message={message}")]
    Upstream {
        code: Option<i64>,
        status: Option<String>,
        message: String,
    },
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider response contained no image data")]
    NoImageData,
    #[error("failed to decode image data: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Flux,
    Gpt,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Gemini => "GEMINI",
            Provider::Flux => "FLUX",
            Provider::Gpt => "GPT",
        };
        write!(f, "{}", name)
    }
}

impl Provider {
    /// Maps the provider keys used by the admin UI to a provider kind.
    /// An absent/empty key defaults to Gemini; an unrecognized key is an
    /// explicit error, never a silent fallback.
    pub fn parse(key: Option<&str>) -> Result<Provider, AiError> {
        let Some(key) = key.map(str::trim).filter(|k| !k.is_empty()) else {
            return Ok(Provider::Gemini);
        };
        match key.to_ascii_uppercase().as_str() {
            "GOOGLE" | "GEMINI" => Ok(Provider::Gemini),
            "FLUX" => Ok(Provider::Flux),
            "OPENAI" | "GPT" => Ok(Provider::Gpt),
            other => Err(AiError::UnknownProvider(other.to_string())),
        }
    }
}

/// Options for one edit call. Unset optionals are omitted from the provider
/// payload entirely.
#[derive(Debug, Clone)]
pub struct EditOptions {
    pub candidate_count: u32,
    pub mime_type: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            candidate_count: 1,
            mime_type: None,
            max_output_tokens: None,
            temperature: None,
            timeout: DEFAULT_EDIT_TIMEOUT,
        }
    }
}

/// Source image for an edit: raw bytes or a filesystem reference.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl ImageSource {
    /// Normalizes to `(bytes, mime_type)`. A path is read from disk with the
    /// MIME inferred from its extension; bytes pass through with the explicit
    /// or default type.
    pub fn into_parts(self, explicit_mime: Option<&str>) -> Result<(Vec<u8>, String), AiError> {
        match self {
            ImageSource::Bytes(bytes) => {
                let mime = explicit_mime
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .unwrap_or("image/png")
                    .to_string();
                Ok((bytes, mime))
            }
            ImageSource::Path(path) => {
                let bytes = std::fs::read(&path)
                    .map_err(|e| AiError::InvalidImage(format!("{}: {}", path.display(), e)))?;
                let mime = explicit_mime
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_mime_type(&path).to_string());
                Ok((bytes, mime))
            }
        }
    }
}

/// MIME type from a file extension; defaults to `image/png` when unknown.
pub fn guess_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "image/png",
    }
}

#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync + fmt::Debug {
    /// Sends the image and instruction to the provider and returns the edited
    /// images as raw bytes, at least one on success.
    async fn edit(
        &self,
        image: &[u8],
        prompt: &str,
        options: &EditOptions,
    ) -> Result<Vec<Vec<u8>>, AiError>;
}

/// Selection factory mapping a provider kind to a concrete generator.
pub fn create_generator(
    provider: Provider,
    config: &Config,
) -> Result<Box<dyn ImageGenerator>, AiError> {
    match provider {
        Provider::Gemini => Ok(Box::new(GeminiClient::from_config(config)?)),
        Provider::Flux | Provider::Gpt => Err(AiError::NotImplemented(provider)),
    }
}
