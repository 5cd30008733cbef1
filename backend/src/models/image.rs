//! Wire models for image upload, listing and the AI edit endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// One entry of a user's image library, derived from the files on disk.
pub struct UserImageItem {
    pub id: i64,
    pub uuid: String,
    pub filename: String,
    pub original_filename: Option<String>,
    /// `uploaded` or `generated`.
    #[serde(rename = "type")]
    pub image_type: String,
    pub content_type: Option<String>,
    pub file_size: Option<i64>,
    pub prompt_id: Option<i64>,
    pub uploaded_image_id: Option<i64>,
    pub user_id: i64,
    pub created_at: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserImagesPage {
    pub content: Vec<UserImageItem>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    pub size: usize,
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserImagesQuery {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
    /// `uploaded`, `generated` or `all`.
    #[serde(rename = "type", default = "default_type_filter")]
    pub image_type: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

fn default_page_size() -> usize {
    20
}

fn default_type_filter() -> String {
    "all".to_string()
}

fn default_sort_by() -> String {
    "createdAt".to_string()
}

fn default_sort_direction() -> String {
    "DESC".to_string()
}

impl Default for UserImagesQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            image_type: default_type_filter(),
            sort_by: default_sort_by(),
            sort_direction: default_sort_direction(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Response of the admin image upload.
pub struct AdminImageUploadResponse {
    pub filename: String,
    pub image_type: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// JSON `request` part of the admin image-edit call. Unknown fields from the
/// admin UI are ignored; `prompt`/`n` may instead arrive as plain form fields.
pub struct CreateImageEditRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub n: Option<u32>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageEditResponse {
    pub image_filenames: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestPromptResponse {
    pub image_url: String,
    pub filename: String,
    pub final_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_params: Option<serde_json::Value>,
}
