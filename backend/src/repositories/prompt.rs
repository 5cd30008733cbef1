use sqlx::{PgPool, Row};

use crate::models::prompt::{
    CreatePromptPayload, Prompt, PromptCategory, PromptCategoryResponse, PromptSubCategory,
    PromptSubCategoryPayload, UpdatePromptPayload,
};

const CATEGORY_COLUMNS: &str = "id, name, created_at, updated_at";
const SUBCATEGORY_COLUMNS: &str =
    "id, prompt_category_id, name, description, created_at, updated_at";
const PROMPT_COLUMNS: &str = "id, title, prompt_text, category_id, subcategory_id, active, \
     example_image_filename, created_at, updated_at";

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub async fn list_categories(pool: &PgPool) -> Result<Vec<PromptCategoryResponse>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.name, c.created_at, c.updated_at,
               (SELECT COUNT(*) FROM prompts p WHERE p.category_id = c.id) AS prompts_count,
               (SELECT COUNT(*) FROM prompt_subcategories s
                 WHERE s.prompt_category_id = c.id) AS subcategories_count
        FROM prompt_categories c
        ORDER BY c.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(PromptCategoryResponse {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                prompts_count: row.try_get("prompts_count")?,
                subcategories_count: row.try_get("subcategories_count")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect()
}

pub async fn find_category_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<PromptCategory>, sqlx::Error> {
    sqlx::query_as::<_, PromptCategory>(&format!(
        "SELECT {CATEGORY_COLUMNS} FROM prompt_categories WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &PgPool, name: &str) -> Result<PromptCategory, sqlx::Error> {
    sqlx::query_as::<_, PromptCategory>(&format!(
        "INSERT INTO prompt_categories (name) VALUES ($1) RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn update_category(
    pool: &PgPool,
    id: i64,
    name: &str,
) -> Result<Option<PromptCategory>, sqlx::Error> {
    sqlx::query_as::<_, PromptCategory>(&format!(
        "UPDATE prompt_categories SET name = $1, updated_at = NOW() WHERE id = $2 \
         RETURNING {CATEGORY_COLUMNS}"
    ))
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_category(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM prompt_categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Subcategories
// ---------------------------------------------------------------------------

pub async fn list_subcategories(pool: &PgPool) -> Result<Vec<PromptSubCategory>, sqlx::Error> {
    sqlx::query_as::<_, PromptSubCategory>(&format!(
        "SELECT {SUBCATEGORY_COLUMNS} FROM prompt_subcategories ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_subcategory_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<PromptSubCategory>, sqlx::Error> {
    sqlx::query_as::<_, PromptSubCategory>(&format!(
        "SELECT {SUBCATEGORY_COLUMNS} FROM prompt_subcategories WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_subcategory(
    pool: &PgPool,
    payload: &PromptSubCategoryPayload,
) -> Result<PromptSubCategory, sqlx::Error> {
    sqlx::query_as::<_, PromptSubCategory>(&format!(
        "INSERT INTO prompt_subcategories (prompt_category_id, name, description) \
         VALUES ($1, $2, $3) RETURNING {SUBCATEGORY_COLUMNS}"
    ))
    .bind(payload.prompt_category_id)
    .bind(&payload.name)
    .bind(&payload.description)
    .fetch_one(pool)
    .await
}

pub async fn update_subcategory(
    pool: &PgPool,
    id: i64,
    payload: &PromptSubCategoryPayload,
) -> Result<Option<PromptSubCategory>, sqlx::Error> {
    sqlx::query_as::<_, PromptSubCategory>(&format!(
        "UPDATE prompt_subcategories \
         SET prompt_category_id = $1, name = $2, description = $3, updated_at = NOW() \
         WHERE id = $4 RETURNING {SUBCATEGORY_COLUMNS}"
    ))
    .bind(payload.prompt_category_id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_subcategory(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM prompt_subcategories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

pub async fn list_prompts(pool: &PgPool) -> Result<Vec<Prompt>, sqlx::Error> {
    sqlx::query_as::<_, Prompt>(&format!("SELECT {PROMPT_COLUMNS} FROM prompts ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn find_prompt_by_id(pool: &PgPool, id: i64) -> Result<Option<Prompt>, sqlx::Error> {
    sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_prompt(
    pool: &PgPool,
    payload: &CreatePromptPayload,
) -> Result<Prompt, sqlx::Error> {
    sqlx::query_as::<_, Prompt>(&format!(
        "INSERT INTO prompts \
         (title, prompt_text, category_id, subcategory_id, active, example_image_filename) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PROMPT_COLUMNS}"
    ))
    .bind(&payload.title)
    .bind(&payload.prompt_text)
    .bind(payload.category_id)
    .bind(payload.subcategory_id)
    .bind(payload.active)
    .bind(&payload.example_image_filename)
    .fetch_one(pool)
    .await
}

/// Partial update; COALESCE keeps current values for absent fields.
pub async fn update_prompt(
    pool: &PgPool,
    id: i64,
    payload: &UpdatePromptPayload,
) -> Result<Option<Prompt>, sqlx::Error> {
    sqlx::query_as::<_, Prompt>(&format!(
        "UPDATE prompts SET \
         title = COALESCE($1, title), \
         prompt_text = COALESCE($2, prompt_text), \
         category_id = COALESCE($3, category_id), \
         subcategory_id = COALESCE($4, subcategory_id), \
         active = COALESCE($5, active), \
         example_image_filename = COALESCE($6, example_image_filename), \
         updated_at = NOW() \
         WHERE id = $7 RETURNING {PROMPT_COLUMNS}"
    ))
    .bind(&payload.title)
    .bind(&payload.prompt_text)
    .bind(payload.category_id)
    .bind(payload.subcategory_id)
    .bind(payload.active)
    .bind(&payload.example_image_filename)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_prompt(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
