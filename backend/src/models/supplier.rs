//! Supplier contact records, optionally linked to a country.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::country::Country;
use crate::validation::rules::validate_phone_number;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<i32>,
    pub country_id: Option<i64>,
    pub phone_number1: Option<String>,
    pub phone_number2: Option<String>,
    pub phone_number3: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// API representation; embeds the joined country when `country_id` is set.
pub struct SupplierResponse {
    #[serde(flatten)]
    pub supplier: Supplier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

impl SupplierResponse {
    pub fn new(supplier: Supplier, country: Option<Country>) -> Self {
        Self { supplier, country }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
/// Create/update payload; the admin UI sends every field on update.
pub struct SupplierPayload {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    #[validate(length(max = 255))]
    pub street: Option<String>,
    #[validate(length(max = 50))]
    pub house_number: Option<String>,
    #[validate(length(max = 255))]
    pub city: Option<String>,
    pub postal_code: Option<i32>,
    pub country_id: Option<i64>,
    #[validate(custom(function = validate_phone_number))]
    pub phone_number1: Option<String>,
    #[validate(custom(function = validate_phone_number))]
    pub phone_number2: Option<String>,
    #[validate(custom(function = validate_phone_number))]
    pub phone_number3: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500), url)]
    pub website: Option<String>,
}
