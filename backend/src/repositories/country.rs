use sqlx::PgPool;

use crate::models::country::Country;

const COUNTRY_COLUMNS: &str = "id, name, created_at, updated_at";

pub async fn list_countries(pool: &PgPool) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(&format!(
        "SELECT {COUNTRY_COLUMNS} FROM countries ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_country_by_id(pool: &PgPool, id: i64) -> Result<Option<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(&format!(
        "SELECT {COUNTRY_COLUMNS} FROM countries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn countries_by_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(&format!(
        "SELECT {COUNTRY_COLUMNS} FROM countries WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn create_country(pool: &PgPool, name: &str) -> Result<Country, sqlx::Error> {
    sqlx::query_as::<_, Country>(&format!(
        "INSERT INTO countries (name) VALUES ($1) RETURNING {COUNTRY_COLUMNS}"
    ))
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn update_country(
    pool: &PgPool,
    id: i64,
    name: &str,
) -> Result<Option<Country>, sqlx::Error> {
    sqlx::query_as::<_, Country>(&format!(
        "UPDATE countries SET name = $1, updated_at = NOW() WHERE id = $2 \
         RETURNING {COUNTRY_COLUMNS}"
    ))
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_country(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM countries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
