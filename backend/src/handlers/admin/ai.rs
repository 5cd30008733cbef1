//! Admin AI endpoints: run a prompt against an uploaded image through the
//! selected provider and store the results in the prompt-test location.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    handlers::admin::common::{
        ensure_image_content_type, read_multipart_form, MultipartForm, UploadedFile,
    },
    models::image::{CreateImageEditRequest, ImageEditResponse, TestPromptResponse},
    services::ai::{create_generator, EditOptions, ImageGenerator, Provider, MAX_CANDIDATES},
    services::storage::{convert_image_to_png_bytes, store_image_bytes, StorageLocations},
};

#[derive(Debug, Deserialize)]
pub struct ProviderQuery {
    pub provider: Option<String>,
}

/// `POST /api/admin/ai/image-edit`
///
/// Multipart parts: `image` (file), `request` (JSON) or plain `prompt`/`n`
/// fields, plus an optional `provider` (query or form).
pub async fn image_edit(
    State((_pool, config)): State<(PgPool, Config)>,
    Query(query): Query<ProviderQuery>,
    multipart: Multipart,
) -> Result<Json<ImageEditResponse>, AppError> {
    let form = read_multipart_form(multipart, "image").await?;
    let file = require_image(&form)?;

    // `request` is parsed best-effort; plain fields fill the gaps.
    let mut request: CreateImageEditRequest = form
        .field("request")
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    if request.prompt.as_deref().map(str::trim).unwrap_or("").is_empty() {
        request.prompt = form.field("prompt").map(str::to_string);
    }
    if request.n.is_none() {
        request.n = form.field("n").and_then(|raw| raw.parse().ok());
    }

    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing prompt".to_string()))?;
    let candidates = request
        .n
        .filter(|n| (1..=MAX_CANDIDATES).contains(n))
        .unwrap_or(1);

    let provider = resolve_provider(&query, &form)?;
    let generator = create_generator(provider, &config)?;

    let options = EditOptions {
        candidate_count: candidates,
        mime_type: file.content_type.clone(),
        ..EditOptions::default()
    };
    let images = generator
        .edit(&file.bytes, prompt, &options)
        .await
        .map_err(AppError::from)?;

    let locations = StorageLocations::from_config(&config)?;
    let dir = locations.prompt_test();
    let mut filenames = Vec::with_capacity(images.len());
    for image in &images {
        // Results go out as PNG; an undecodable payload is stored verbatim.
        let png = convert_image_to_png_bytes(image).unwrap_or_else(|_| image.clone());
        let path = store_image_bytes(&png, &dir, "", "png")
            .map_err(|e| AppError::InternalServerError(e.into()))?;
        filenames.push(
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }

    Ok(Json(ImageEditResponse {
        image_filenames: filenames,
    }))
}

/// `POST /api/admin/ai/test-prompt`
///
/// Single-candidate dry run for the prompt editor; returns the stored image
/// URL plus the parameters that were sent upstream.
pub async fn test_prompt(
    State((_pool, config)): State<(PgPool, Config)>,
    Query(query): Query<ProviderQuery>,
    multipart: Multipart,
) -> Result<Json<TestPromptResponse>, AppError> {
    let form = read_multipart_form(multipart, "image").await?;
    let file = require_image(&form)?;

    let master_prompt = form
        .field("masterPrompt")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            AppError::UnprocessableEntity(
                "Validation failed".to_string(),
                Some(json!({"errors": {"masterPrompt": "Master prompt is required"}})),
            )
        })?;
    let specific_prompt = form.field("specificPrompt").map(str::trim).unwrap_or("");
    let final_prompt = format!("{master_prompt} {specific_prompt}")
        .trim()
        .to_string();

    let provider = resolve_provider(&query, &form)?;
    let generator = create_generator(provider, &config)?;

    let options = EditOptions {
        candidate_count: 1,
        mime_type: file.content_type.clone(),
        ..EditOptions::default()
    };
    let images = generator
        .edit(&file.bytes, &final_prompt, &options)
        .await
        .map_err(AppError::from)?;

    let locations = StorageLocations::from_config(&config)?;
    let png = convert_image_to_png_bytes(&images[0]).unwrap_or_else(|_| images[0].clone());
    let path = store_image_bytes(&png, &locations.prompt_test(), "", "png")
        .map_err(|e| AppError::InternalServerError(e.into()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let request_params = json!({
        "model": config.gemini_image_model.clone(),
        "n": 1,
        "provider": provider.to_string(),
        "masterPrompt": master_prompt,
        "specificPrompt": specific_prompt,
        "combinedPrompt": final_prompt.clone(),
        "background": form.field("background"),
        "quality": form.field("quality"),
        "size": form.field("size"),
    });

    Ok(Json(TestPromptResponse {
        image_url: format!("/api/admin/images/prompt-test/{filename}"),
        filename,
        final_prompt,
        request_params: Some(request_params),
    }))
}

fn require_image(form: &MultipartForm) -> Result<&UploadedFile, AppError> {
    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Missing image".to_string()))?;
    ensure_image_content_type(file)?;
    Ok(file)
}

fn resolve_provider(query: &ProviderQuery, form: &MultipartForm) -> Result<Provider, AppError> {
    let key = query
        .provider
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| form.field("provider"));
    Provider::parse(key).map_err(AppError::from)
}
