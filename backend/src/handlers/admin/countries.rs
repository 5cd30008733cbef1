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
    models::country::{Country, CreateCountryPayload, UpdateCountryPayload},
    repositories::country as country_repo,
};

const DUPLICATE_NAME: &str = "A country with this name already exists.";

pub async fn list_countries(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<Country>>, AppError> {
    let rows = country_repo::list_countries(&pool).await?;
    Ok(Json(rows))
}

pub async fn get_country(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<Json<Country>, AppError> {
    let row = country_repo::find_country_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Country not found".to_string()))?;
    Ok(Json(row))
}

pub async fn create_country(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<CreateCountryPayload>,
) -> Result<(StatusCode, Json<Country>), AppError> {
    payload.validate()?;
    let created = country_repo::create_country(&pool, &payload.name)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Renames the country when a name is provided; an empty update returns the
/// current row.
pub async fn update_country(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCountryPayload>,
) -> Result<Json<Country>, AppError> {
    payload.validate()?;

    let updated = match payload.name {
        Some(name) => country_repo::update_country(&pool, id, &name)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_NAME))?,
        None => country_repo::find_country_by_id(&pool, id).await?,
    }
    .ok_or_else(|| AppError::NotFound("Country not found".to_string()))?;

    Ok(Json(updated))
}

pub async fn delete_country(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !country_repo::delete_country(&pool, id).await? {
        return Err(AppError::NotFound("Country not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
