//! Helpers shared by the admin handlers.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::AppError;

/// Maps a unique-constraint violation to 409, everything else to the usual
/// sqlx translation.
pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
    let is_unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if is_unique {
        AppError::Conflict(message.to_string())
    } else {
        AppError::from(err)
    }
}

/// One uploaded file part: bytes, declared content type, client filename.
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// Collected multipart form: at most one file field plus text fields.
pub struct MultipartForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Drains a multipart body. `file_field` names the binary part; every other
/// part is read as text (the admin UI sends JSON blobs as text parts too).
pub async fn read_multipart_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<MultipartForm, AppError> {
    let mut form = MultipartForm {
        file: None,
        fields: HashMap::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let content_type = field.content_type().map(str::to_string);
            let file_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Failed to read upload".to_string()))?
                .to_vec();
            form.file = Some(UploadedFile {
                bytes,
                content_type,
                file_name,
            });
        } else if !name.is_empty() {
            let value = field
                .text()
                .await
                .map_err(|_| AppError::BadRequest("Failed to read upload".to_string()))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Rejects a file part whose declared content type is present but not an
/// image. A missing declaration passes (best-effort check).
pub fn ensure_image_content_type(file: &UploadedFile) -> Result<(), AppError> {
    match file.content_type.as_deref() {
        Some(ct) if !ct.starts_with("image/") => Err(AppError::BadRequest(
            "Uploaded file must be an image".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_check_is_best_effort() {
        let image = UploadedFile {
            bytes: vec![],
            content_type: Some("image/png".into()),
            file_name: None,
        };
        assert!(ensure_image_content_type(&image).is_ok());

        let undeclared = UploadedFile {
            bytes: vec![],
            content_type: None,
            file_name: None,
        };
        assert!(ensure_image_content_type(&undeclared).is_ok());

        let text = UploadedFile {
            bytes: vec![],
            content_type: Some("text/plain".into()),
            file_name: None,
        };
        assert!(matches!(
            ensure_image_content_type(&text),
            Err(AppError::BadRequest(_))
        ));
    }
}
