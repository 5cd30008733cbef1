//! VAT rate reference data managed by the admin backoffice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueAddedTax {
    pub id: i64,
    pub name: String,
    pub percent: i32,
    pub description: Option<String>,
    /// At most one rate is flagged as the default at any time.
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Create/update payload; updates overwrite every field.
pub struct ValueAddedTaxPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0, max = 100))]
    pub percent: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn payload_validates_bounds() {
        let ok = ValueAddedTaxPayload {
            name: "Standard".into(),
            percent: 19,
            description: None,
            is_default: true,
        };
        assert!(ok.validate().is_ok());

        let bad = ValueAddedTaxPayload {
            name: "".into(),
            percent: 120,
            description: None,
            is_default: false,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_value(ValueAddedTax {
            id: 1,
            name: "Reduced".into(),
            percent: 7,
            description: None,
            is_default: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .unwrap();
        assert!(json.get("isDefault").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
