//! User-facing image library endpoints. Every path is scoped to the caller's
//! own storage directory.

use axum::{
    extract::{Extension, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::image::{UserImagesPage, UserImagesQuery},
    models::user::{AuthenticatedUser, ADMIN_ROLE, USER_ROLE},
    services::storage::{load_image_bytes_and_type, StorageLocations},
    services::user_images::{scan_user_images, sort_filter_paginate},
    validation::rules::validate_filename,
};

pub async fn list_my_images(
    State((_pool, config)): State<(PgPool, Config)>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<UserImagesQuery>,
) -> Result<Json<UserImagesPage>, AppError> {
    require_user_role(&auth)?;

    let locations = StorageLocations::from_config(&config)?;
    let dir = locations.user_images_dir(auth.user.id);
    let items = scan_user_images(&dir, auth.user.id)
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    Ok(Json(sort_filter_paginate(items, &query)))
}

pub async fn serve_my_image(
    State((_pool, config)): State<(PgPool, Config)>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    require_user_role(&auth)?;
    validate_filename(&filename)
        .map_err(|_| AppError::BadRequest("Invalid filename".to_string()))?;

    let locations = StorageLocations::from_config(&config)?;
    let path = locations.user_images_dir(auth.user.id).join(&filename);
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

fn require_user_role(auth: &AuthenticatedUser) -> Result<(), AppError> {
    if auth.has_any_role(&[USER_ROLE, ADMIN_ROLE]) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Forbidden: insufficient role".to_string(),
        ))
    }
}
