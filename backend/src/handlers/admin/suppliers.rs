use std::collections::HashMap;

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
    models::country::Country,
    models::supplier::{Supplier, SupplierPayload, SupplierResponse},
    repositories::{country as country_repo, supplier as supplier_repo},
};

pub async fn list_suppliers(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<SupplierResponse>>, AppError> {
    let suppliers = supplier_repo::list_suppliers(&pool).await?;

    let country_ids: Vec<i64> = {
        let mut ids: Vec<i64> = suppliers.iter().filter_map(|s| s.country_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };
    let countries: HashMap<i64, Country> = country_repo::countries_by_ids(&pool, &country_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let responses = suppliers
        .into_iter()
        .map(|supplier| {
            let country = supplier.country_id.and_then(|id| countries.get(&id).cloned());
            SupplierResponse::new(supplier, country)
        })
        .collect();

    Ok(Json(responses))
}

pub async fn get_supplier(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<Json<SupplierResponse>, AppError> {
    let supplier = supplier_repo::find_supplier_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier not found".to_string()))?;
    let response = with_country(&pool, supplier).await?;
    Ok(Json(response))
}

pub async fn create_supplier(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<SupplierPayload>,
) -> Result<(StatusCode, Json<SupplierResponse>), AppError> {
    payload.validate()?;
    ensure_country_exists(&pool, payload.country_id).await?;

    let created = supplier_repo::create_supplier(&pool, &payload).await?;
    let response = with_country(&pool, created).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_supplier(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierPayload>,
) -> Result<Json<SupplierResponse>, AppError> {
    payload.validate()?;
    ensure_country_exists(&pool, payload.country_id).await?;

    let updated = supplier_repo::update_supplier(&pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier not found".to_string()))?;
    let response = with_country(&pool, updated).await?;
    Ok(Json(response))
}

pub async fn delete_supplier(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    supplier_repo::delete_supplier(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn with_country(pool: &PgPool, supplier: Supplier) -> Result<SupplierResponse, AppError> {
    let country = match supplier.country_id {
        Some(country_id) => country_repo::find_country_by_id(pool, country_id).await?,
        None => None,
    };
    Ok(SupplierResponse::new(supplier, country))
}

async fn ensure_country_exists(pool: &PgPool, country_id: Option<i64>) -> Result<(), AppError> {
    if let Some(country_id) = country_id {
        if country_repo::find_country_by_id(pool, country_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Country {country_id} does not exist"
            )));
        }
    }
    Ok(())
}
