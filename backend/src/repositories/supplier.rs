use sqlx::PgPool;

use crate::models::supplier::{Supplier, SupplierPayload};

const SUPPLIER_COLUMNS: &str = "id, name, title, first_name, last_name, street, house_number, \
     city, postal_code, country_id, phone_number1, phone_number2, phone_number3, email, website, \
     created_at, updated_at";

pub async fn list_suppliers(pool: &PgPool) -> Result<Vec<Supplier>, sqlx::Error> {
    sqlx::query_as::<_, Supplier>(&format!(
        "SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY id"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_supplier_by_id(pool: &PgPool, id: i64) -> Result<Option<Supplier>, sqlx::Error> {
    sqlx::query_as::<_, Supplier>(&format!(
        "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_supplier(
    pool: &PgPool,
    payload: &SupplierPayload,
) -> Result<Supplier, sqlx::Error> {
    sqlx::query_as::<_, Supplier>(&format!(
        "INSERT INTO suppliers \
         (name, title, first_name, last_name, street, house_number, city, postal_code, \
          country_id, phone_number1, phone_number2, phone_number3, email, website) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         RETURNING {SUPPLIER_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.title)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.street)
    .bind(&payload.house_number)
    .bind(&payload.city)
    .bind(payload.postal_code)
    .bind(payload.country_id)
    .bind(&payload.phone_number1)
    .bind(&payload.phone_number2)
    .bind(&payload.phone_number3)
    .bind(&payload.email)
    .bind(&payload.website)
    .fetch_one(pool)
    .await
}

/// Full overwrite update (the admin UI sends every field); returns `None`
/// when the row does not exist.
pub async fn update_supplier(
    pool: &PgPool,
    id: i64,
    payload: &SupplierPayload,
) -> Result<Option<Supplier>, sqlx::Error> {
    sqlx::query_as::<_, Supplier>(&format!(
        "UPDATE suppliers SET \
         name = $1, title = $2, first_name = $3, last_name = $4, street = $5, \
         house_number = $6, city = $7, postal_code = $8, country_id = $9, \
         phone_number1 = $10, phone_number2 = $11, phone_number3 = $12, email = $13, \
         website = $14, updated_at = NOW() \
         WHERE id = $15 RETURNING {SUPPLIER_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.title)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.street)
    .bind(&payload.house_number)
    .bind(&payload.city)
    .bind(payload.postal_code)
    .bind(payload.country_id)
    .bind(&payload.phone_number1)
    .bind(&payload.phone_number2)
    .bind(&payload.phone_number3)
    .bind(&payload.email)
    .bind(&payload.website)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_supplier(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
