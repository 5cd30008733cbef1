//! Admin image upload and the prompt-test image store.

use std::fs;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    handlers::admin::common::{ensure_image_content_type, read_multipart_form},
    models::image::AdminImageUploadResponse,
    services::storage::{
        convert_image_to_png_bytes, load_image_bytes_and_type, store_image_bytes,
        StorageLocations,
    },
    validation::rules::validate_filename,
};

/// Multipart upload of an admin-managed image. Uploads are normalized to PNG
/// before storage; an undecodable file is rejected.
pub async fn upload_image(
    State((_pool, config)): State<(PgPool, Config)>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AdminImageUploadResponse>), AppError> {
    let form = read_multipart_form(multipart, "file").await?;

    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Missing file".to_string()))?;
    ensure_image_content_type(file)?;

    // imageType arrives either as its own field or inside the JSON request part.
    let image_type = form
        .field("imageType")
        .map(str::to_string)
        .or_else(|| {
            form.field("request")
                .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
                .and_then(|req| {
                    req.get("imageType")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
        })
        .ok_or_else(|| AppError::BadRequest("Missing imageType".to_string()))?;

    let png_bytes = convert_image_to_png_bytes(&file.bytes)
        .map_err(|_| AppError::BadRequest("Failed to process image".to_string()))?;

    let locations = StorageLocations::from_config(&config)?;
    let dir = locations.resolve_admin_dir(&image_type).ok_or_else(|| {
        AppError::BadRequest(format!("Unsupported imageType: {image_type}"))
    })?;

    let path = store_image_bytes(&png_bytes, &dir, "", "png")
        .map_err(|e| AppError::InternalServerError(e.into()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(AdminImageUploadResponse {
            filename,
            image_type,
        }),
    ))
}

pub async fn get_prompt_test_image(
    State((_pool, config)): State<(PgPool, Config)>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    validate_filename(&filename)
        .map_err(|_| AppError::BadRequest("Invalid filename".to_string()))?;

    let locations = StorageLocations::from_config(&config)?;
    let path = locations.prompt_test().join(&filename);
    if !path.is_file() {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let (bytes, content_type) = load_image_bytes_and_type(&path)
        .map_err(|_| AppError::NotFound("Not found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Idempotent delete: removing an absent file still returns 204.
pub async fn delete_prompt_test_image(
    State((_pool, config)): State<(PgPool, Config)>,
    Path(filename): Path<String>,
) -> Result<StatusCode, AppError> {
    validate_filename(&filename)
        .map_err(|_| AppError::BadRequest("Invalid filename".to_string()))?;

    let locations = StorageLocations::from_config(&config)?;
    let path = locations.prompt_test().join(&filename);
    if path.is_file() {
        fs::remove_file(&path).map_err(|e| AppError::InternalServerError(e.into()))?;
    }
    Ok(StatusCode::NO_CONTENT)
}
