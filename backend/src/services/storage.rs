//! Filesystem image storage rooted at `STORAGE_ROOT`.
//!
//! All path logic lives here so new locations have one place to go. The root
//! is resolved per operation; a missing `STORAGE_ROOT` fails the operation
//! that needed it, not process startup.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::Config;

/// Centralized storage location resolver.
#[derive(Debug, Clone)]
pub struct StorageLocations {
    root: PathBuf,
}

impl StorageLocations {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let root = config
            .storage_root
            .clone()
            .ok_or_else(|| anyhow::anyhow!("STORAGE_ROOT is not configured"))?;
        Ok(Self::new(root))
    }

    /// `{root}/private/images`
    pub fn private_images(&self) -> PathBuf {
        self.root.join("private").join("images")
    }

    /// `{root}/public/images`
    pub fn public_images(&self) -> PathBuf {
        self.root.join("public").join("images")
    }

    /// `{root}/private/images/0_prompt-test`
    pub fn prompt_test(&self) -> PathBuf {
        self.private_images().join("0_prompt-test")
    }

    /// `{root}/public/images/prompt-example-images`
    pub fn prompt_example(&self) -> PathBuf {
        self.public_images().join("prompt-example-images")
    }

    /// `{root}/private/images/{user_id}`
    pub fn user_images_dir(&self, user_id: i64) -> PathBuf {
        self.private_images().join(user_id.to_string())
    }

    /// Maps an admin-managed image type key to its directory.
    pub fn resolve_admin_dir(&self, image_type: &str) -> Option<PathBuf> {
        match image_type.to_ascii_uppercase().as_str() {
            "PROMPT_EXAMPLE" => Some(self.prompt_example()),
            "PROMPT_TEST" => Some(self.prompt_test()),
            "PUBLIC" => Some(self.public_images()),
            "PRIVATE" => Some(self.private_images()),
            _ => None,
        }
    }
}

/// Writes image bytes under `dir`, creating it as needed. An empty
/// `name_base` gets a random UUID name; existing files are never overwritten
/// (a numeric suffix is appended instead).
pub fn store_image_bytes(
    bytes: &[u8],
    dir: &Path,
    name_base: &str,
    extension: &str,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let base = if name_base.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        name_base.to_string()
    };

    let mut path = dir.join(format!("{base}.{extension}"));
    let mut counter = 1u32;
    while path.exists() {
        path = dir.join(format!("{base}-{counter}.{extension}"));
        counter += 1;
    }

    fs::write(&path, bytes)?;
    Ok(path)
}

/// Reads a stored image and sniffs its content type from the extension.
pub fn load_image_bytes_and_type(path: &Path) -> io::Result<(Vec<u8>, &'static str)> {
    let bytes = fs::read(path)?;
    Ok((bytes, content_type_for_path(path)))
}

pub fn content_type_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Decodes the input and re-encodes it as PNG. Fails when the bytes are not a
/// recognizable image; callers decide whether to fall back to the original.
pub fn convert_image_to_png_bytes(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let mut out = Cursor::new(Vec::new());
    decoded.write_to(&mut out, image::ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}
