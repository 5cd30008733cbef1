//! Prompt template catalog: categories, subcategories and the prompts
//! themselves, used to drive the AI image-edit flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptCategory {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Category plus usage counts shown in the admin list.
pub struct PromptCategoryResponse {
    pub id: i64,
    pub name: String,
    pub prompts_count: i64,
    pub subcategories_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptSubCategory {
    pub id: i64,
    pub prompt_category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: i64,
    pub title: String,
    pub prompt_text: Option<String>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub active: bool,
    pub example_image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Prompt with its joined category/subcategory for the admin UI.
pub struct PromptResponse {
    #[serde(flatten)]
    pub prompt: Prompt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PromptCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<PromptSubCategory>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PromptCategoryPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptSubCategoryPayload {
    pub prompt_category_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptPayload {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub prompt_text: Option<String>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[validate(length(max = 500))]
    pub example_image_filename: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Partial update; absent fields keep their current values.
pub struct UpdatePromptPayload {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub prompt_text: Option<String>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub active: Option<bool>,
    #[validate(length(max = 500))]
    pub example_image_filename: Option<String>,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_defaults_to_active() {
        let payload: CreatePromptPayload =
            serde_json::from_str(r#"{"title": "Sunset sky"}"#).unwrap();
        assert!(payload.active);
        assert!(payload.prompt_text.is_none());
    }

    #[test]
    fn prompt_response_flattens_and_embeds() {
        let now = Utc::now();
        let prompt = Prompt {
            id: 1,
            title: "Replace sky".into(),
            prompt_text: Some("Replace the sky with a vibrant sunset.".into()),
            category_id: Some(2),
            subcategory_id: None,
            active: true,
            example_image_filename: None,
            created_at: now,
            updated_at: now,
        };
        let category = PromptCategory {
            id: 2,
            name: "Backgrounds".into(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(PromptResponse {
            prompt,
            category: Some(category),
            subcategory: None,
        })
        .unwrap();
        assert_eq!(json["title"], "Replace sky");
        assert_eq!(json["category"]["name"], "Backgrounds");
        assert!(json.get("subcategory").is_none());
    }
}
