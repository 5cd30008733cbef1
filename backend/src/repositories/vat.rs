use sqlx::PgPool;

use crate::models::vat::{ValueAddedTax, ValueAddedTaxPayload};

const VAT_COLUMNS: &str = "id, name, percent, description, is_default, created_at, updated_at";

pub async fn list_vats(pool: &PgPool) -> Result<Vec<ValueAddedTax>, sqlx::Error> {
    sqlx::query_as::<_, ValueAddedTax>(&format!(
        "SELECT {VAT_COLUMNS} FROM value_added_taxes ORDER BY id"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_vat_by_id(pool: &PgPool, id: i64) -> Result<Option<ValueAddedTax>, sqlx::Error> {
    sqlx::query_as::<_, ValueAddedTax>(&format!(
        "SELECT {VAT_COLUMNS} FROM value_added_taxes WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Creates a VAT rate. A payload flagged as default demotes the previous
/// default inside the same transaction.
pub async fn create_vat(
    pool: &PgPool,
    payload: &ValueAddedTaxPayload,
) -> Result<ValueAddedTax, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if payload.is_default {
        sqlx::query("UPDATE value_added_taxes SET is_default = FALSE WHERE is_default = TRUE")
            .execute(&mut *tx)
            .await?;
    }

    let created = sqlx::query_as::<_, ValueAddedTax>(&format!(
        "INSERT INTO value_added_taxes (name, percent, description, is_default) \
         VALUES ($1, $2, $3, $4) RETURNING {VAT_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(payload.percent)
    .bind(&payload.description)
    .bind(payload.is_default)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(created)
}

/// Full overwrite update; returns `None` when the row does not exist.
pub async fn update_vat(
    pool: &PgPool,
    id: i64,
    payload: &ValueAddedTaxPayload,
) -> Result<Option<ValueAddedTax>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if payload.is_default {
        sqlx::query(
            "UPDATE value_added_taxes SET is_default = FALSE WHERE is_default = TRUE AND id <> $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
    }

    let updated = sqlx::query_as::<_, ValueAddedTax>(&format!(
        "UPDATE value_added_taxes \
         SET name = $1, percent = $2, description = $3, is_default = $4, updated_at = NOW() \
         WHERE id = $5 RETURNING {VAT_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(payload.percent)
    .bind(&payload.description)
    .bind(payload.is_default)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

pub async fn delete_vat(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM value_added_taxes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
