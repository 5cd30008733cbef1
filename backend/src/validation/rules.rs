//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates a filename received from a client before it touches the
/// filesystem.
///
/// Requirements:
/// - non-empty, at most 500 characters
/// - no path separators, no parent-directory components, no NUL bytes
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.is_empty() || filename.len() > 500 {
        return Err(ValidationError::new("filename_invalid_length"));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains('\0') {
        return Err(ValidationError::new("filename_invalid_characters"));
    }
    if filename == "." || filename == ".." || filename.contains("..") {
        return Err(ValidationError::new("filename_traversal"));
    }
    Ok(())
}

/// Validates a phone number field (loose: bounded length only, matching the
/// upstream admin UI contract).
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if value.len() > 50 {
        return Err(ValidationError::new("phone_number_too_long"));
    }
    Ok(())
}
