use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::admin::common::conflict_on_unique,
    models::vat::{ValueAddedTax, ValueAddedTaxPayload},
    repositories::vat as vat_repo,
};

const DUPLICATE_NAME: &str = "A VAT with this name already exists.";

pub async fn list_vats(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<ValueAddedTax>>, AppError> {
    let rows = vat_repo::list_vats(&pool).await?;
    Ok(Json(rows))
}

pub async fn get_vat(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<Json<ValueAddedTax>, AppError> {
    let row = vat_repo::find_vat_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("VAT not found".to_string()))?;
    Ok(Json(row))
}

pub async fn create_vat(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<ValueAddedTaxPayload>,
) -> Result<(StatusCode, Json<ValueAddedTax>), AppError> {
    payload.validate()?;
    let created = vat_repo::create_vat(&pool, &payload)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_vat(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
    Json(payload): Json<ValueAddedTaxPayload>,
) -> Result<Json<ValueAddedTax>, AppError> {
    payload.validate()?;
    let updated = vat_repo::update_vat(&pool, id, &payload)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?
        .ok_or_else(|| AppError::NotFound("VAT not found".to_string()))?;
    Ok(Json(updated))
}

pub async fn delete_vat(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    vat_repo::delete_vat(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
