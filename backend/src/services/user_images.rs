//! A user's image library, derived from the files in their private storage
//! directory rather than a table. Filenames encode provenance:
//! `{uuid}_original.*` for uploads, `{uuid}_generated_{n}.*` for AI output.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::image::{UserImageItem, UserImagesPage, UserImagesQuery};
use crate::services::storage::content_type_for_path;

/// Scans the user's directory into library items. A missing directory is an
/// empty library, not an error.
pub fn scan_user_images(dir: &Path, user_id: i64) -> io::Result<Vec<UserImageItem>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut index = 1i64;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let (image_type, uuid_part) = classify_filename(&name);

        let uuid = match Uuid::parse_str(uuid_part) {
            Ok(parsed) => parsed.to_string(),
            // Not UUID-named; key the row with a fresh one for the UI.
            Err(_) => Uuid::new_v4().to_string(),
        };

        let metadata = entry.metadata()?;
        let created_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now())
            .to_rfc3339();

        let content_type = match content_type_for_path(Path::new(&name)) {
            "application/octet-stream" => None,
            known => Some(known.to_string()),
        };

        items.push(UserImageItem {
            id: index,
            uuid,
            filename: name.clone(),
            original_filename: None,
            image_type: image_type.to_string(),
            content_type,
            file_size: Some(metadata.len() as i64),
            prompt_id: None,
            uploaded_image_id: None,
            user_id,
            created_at,
            image_url: format!("/api/user/images/{name}"),
            thumbnail_url: None,
        });
        index += 1;
    }

    Ok(items)
}

fn classify_filename(name: &str) -> (&'static str, &str) {
    if let Some((uuid_part, _)) = name.split_once("_generated_") {
        return ("generated", uuid_part);
    }
    if let Some((uuid_part, _)) = name.split_once("_original") {
        return ("uploaded", uuid_part);
    }
    let stem = name.split('.').next().unwrap_or(name);
    ("uploaded", stem)
}

/// Applies the type filter, sort and pagination of the listing endpoint.
pub fn sort_filter_paginate(
    mut items: Vec<UserImageItem>,
    query: &UserImagesQuery,
) -> UserImagesPage {
    let type_filter = query.image_type.to_lowercase();
    if type_filter == "uploaded" || type_filter == "generated" {
        items.retain(|item| item.image_type == type_filter);
    }

    if query.sort_by == "type" {
        items.sort_by(|a, b| a.image_type.cmp(&b.image_type));
    } else {
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }
    if query.sort_direction.eq_ignore_ascii_case("desc") {
        items.reverse();
    }

    let total_elements = items.len();
    let size = query.size;
    let total_pages = if size > 0 {
        total_elements.div_ceil(size)
    } else {
        1
    };

    let start = query.page.saturating_mul(size);
    let content: Vec<UserImageItem> = if start < total_elements {
        items.into_iter().skip(start).take(size).collect()
    } else {
        Vec::new()
    };

    UserImagesPage {
        content,
        current_page: query.page,
        total_pages,
        total_elements,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(name: &str, image_type: &str, created_at: &str) -> UserImageItem {
        UserImageItem {
            id: 0,
            uuid: "u".into(),
            filename: name.into(),
            original_filename: None,
            image_type: image_type.into(),
            content_type: None,
            file_size: None,
            prompt_id: None,
            uploaded_image_id: None,
            user_id: 1,
            created_at: created_at.into(),
            image_url: format!("/api/user/images/{name}"),
            thumbnail_url: None,
        }
    }

    #[test]
    fn classify_recognizes_generated_and_original_markers() {
        assert_eq!(
            classify_filename("1c06f9f2-aaaa-bbbb-cccc-000000000001_generated_2.png"),
            ("generated", "1c06f9f2-aaaa-bbbb-cccc-000000000001")
        );
        assert_eq!(
            classify_filename("1c06f9f2-aaaa-bbbb-cccc-000000000001_original.png"),
            ("uploaded", "1c06f9f2-aaaa-bbbb-cccc-000000000001")
        );
        assert_eq!(classify_filename("photo.png"), ("uploaded", "photo"));
    }

    #[test]
    fn scan_missing_directory_is_an_empty_library() {
        let dir = TempDir::new().unwrap();
        let items = scan_user_images(&dir.path().join("does-not-exist"), 5).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn scan_reads_types_sizes_and_urls() {
        let dir = TempDir::new().unwrap();
        let uuid = Uuid::new_v4();
        fs::write(dir.path().join(format!("{uuid}_original.png")), b"aaaa").unwrap();
        fs::write(dir.path().join(format!("{uuid}_generated_1.png")), b"bb").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut items = scan_user_images(dir.path(), 5).unwrap();
        items.sort_by(|a, b| a.filename.cmp(&b.filename));
        assert_eq!(items.len(), 2);

        let generated = items
            .iter()
            .find(|i| i.image_type == "generated")
            .expect("generated item");
        assert_eq!(generated.uuid, uuid.to_string());
        assert_eq!(generated.file_size, Some(2));
        assert_eq!(generated.content_type.as_deref(), Some("image/png"));
        assert!(generated.image_url.starts_with("/api/user/images/"));
        assert_eq!(generated.user_id, 5);
    }

    #[test]
    fn pagination_slices_and_counts() {
        let items = vec![
            item("a.png", "uploaded", "2024-01-01T00:00:00Z"),
            item("b.png", "generated", "2024-01-02T00:00:00Z"),
            item("c.png", "uploaded", "2024-01-03T00:00:00Z"),
        ];

        let query = UserImagesQuery {
            page: 0,
            size: 2,
            image_type: "all".into(),
            sort_by: "createdAt".into(),
            sort_direction: "DESC".into(),
        };
        let page = sort_filter_paginate(items.clone(), &query);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[0].filename, "c.png");

        let query = UserImagesQuery {
            page: 1,
            ..query.clone()
        };
        let page = sort_filter_paginate(items.clone(), &query);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].filename, "a.png");

        let query = UserImagesQuery {
            page: 5,
            ..query
        };
        let page = sort_filter_paginate(items, &query);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn type_filter_and_type_sort_apply() {
        let items = vec![
            item("a.png", "uploaded", "2024-01-01T00:00:00Z"),
            item("b.png", "generated", "2024-01-02T00:00:00Z"),
        ];

        let query = UserImagesQuery {
            page: 0,
            size: 20,
            image_type: "generated".into(),
            sort_by: "createdAt".into(),
            sort_direction: "ASC".into(),
        };
        let page = sort_filter_paginate(items.clone(), &query);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].image_type, "generated");

        let query = UserImagesQuery {
            image_type: "all".into(),
            sort_by: "type".into(),
            ..query.clone()
        };
        let page = sort_filter_paginate(items, &query);
        assert_eq!(page.content[0].image_type, "generated");
        assert_eq!(page.content[1].image_type, "uploaded");
    }
}
