//! Admin CRUD for the prompt catalog: categories, subcategories, prompts.

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
    models::prompt::{
        CreatePromptPayload, Prompt, PromptCategory, PromptCategoryPayload,
        PromptCategoryResponse, PromptResponse, PromptSubCategory, PromptSubCategoryPayload,
        UpdatePromptPayload,
    },
    repositories::prompt as prompt_repo,
};

const DUPLICATE_CATEGORY: &str = "A prompt category with this name already exists.";

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub async fn list_categories(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<PromptCategoryResponse>>, AppError> {
    Ok(Json(prompt_repo::list_categories(&pool).await?))
}

pub async fn create_category(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<PromptCategoryPayload>,
) -> Result<(StatusCode, Json<PromptCategory>), AppError> {
    payload.validate()?;
    let created = prompt_repo::create_category(&pool, &payload.name)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_CATEGORY))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_category(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
    Json(payload): Json<PromptCategoryPayload>,
) -> Result<Json<PromptCategory>, AppError> {
    payload.validate()?;
    let updated = prompt_repo::update_category(&pool, id, &payload.name)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_CATEGORY))?
        .ok_or_else(|| AppError::NotFound("Prompt category not found".to_string()))?;
    Ok(Json(updated))
}

pub async fn delete_category(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !prompt_repo::delete_category(&pool, id).await? {
        return Err(AppError::NotFound(
            "Prompt category not found".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Subcategories
// ---------------------------------------------------------------------------

pub async fn list_subcategories(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<PromptSubCategory>>, AppError> {
    Ok(Json(prompt_repo::list_subcategories(&pool).await?))
}

pub async fn create_subcategory(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<PromptSubCategoryPayload>,
) -> Result<(StatusCode, Json<PromptSubCategory>), AppError> {
    payload.validate()?;
    ensure_category_exists(&pool, payload.prompt_category_id).await?;
    let created = prompt_repo::create_subcategory(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_subcategory(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
    Json(payload): Json<PromptSubCategoryPayload>,
) -> Result<Json<PromptSubCategory>, AppError> {
    payload.validate()?;
    ensure_category_exists(&pool, payload.prompt_category_id).await?;
    let updated = prompt_repo::update_subcategory(&pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt subcategory not found".to_string()))?;
    Ok(Json(updated))
}

pub async fn delete_subcategory(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !prompt_repo::delete_subcategory(&pool, id).await? {
        return Err(AppError::NotFound(
            "Prompt subcategory not found".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

pub async fn list_prompts(
    State((pool, _config)): State<(PgPool, Config)>,
) -> Result<Json<Vec<PromptResponse>>, AppError> {
    let prompts = prompt_repo::list_prompts(&pool).await?;
    let mut responses = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        responses.push(with_relations(&pool, prompt).await?);
    }
    Ok(Json(responses))
}

pub async fn get_prompt(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<Json<PromptResponse>, AppError> {
    let prompt = prompt_repo::find_prompt_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;
    Ok(Json(with_relations(&pool, prompt).await?))
}

pub async fn create_prompt(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<CreatePromptPayload>,
) -> Result<(StatusCode, Json<PromptResponse>), AppError> {
    payload.validate()?;
    if let Some(category_id) = payload.category_id {
        ensure_category_exists(&pool, category_id).await?;
    }
    let created = prompt_repo::create_prompt(&pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(with_relations(&pool, created).await?)))
}

pub async fn update_prompt(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePromptPayload>,
) -> Result<Json<PromptResponse>, AppError> {
    payload.validate()?;
    if let Some(category_id) = payload.category_id {
        ensure_category_exists(&pool, category_id).await?;
    }
    let updated = prompt_repo::update_prompt(&pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;
    Ok(Json(with_relations(&pool, updated).await?))
}

pub async fn delete_prompt(
    State((pool, _config)): State<(PgPool, Config)>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    prompt_repo::delete_prompt(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn with_relations(pool: &PgPool, prompt: Prompt) -> Result<PromptResponse, AppError> {
    let category = match prompt.category_id {
        Some(category_id) => prompt_repo::find_category_by_id(pool, category_id).await?,
        None => None,
    };
    let subcategory = match prompt.subcategory_id {
        Some(subcategory_id) => prompt_repo::find_subcategory_by_id(pool, subcategory_id).await?,
        None => None,
    };
    Ok(PromptResponse {
        prompt,
        category,
        subcategory,
    })
}

async fn ensure_category_exists(pool: &PgPool, category_id: i64) -> Result<(), AppError> {
    if prompt_repo::find_category_by_id(pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "Prompt category {category_id} does not exist"
        )));
    }
    Ok(())
}
