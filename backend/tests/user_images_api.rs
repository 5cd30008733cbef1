//! End-to-end over the storage service: store files the way the AI/upload
//! flows do, then scan and page them the way the listing endpoint does.

use tempfile::TempDir;
use uuid::Uuid;

use printshop_backend::{
    models::image::UserImagesQuery,
    services::storage::{store_image_bytes, StorageLocations},
    services::user_images::{scan_user_images, sort_filter_paginate},
};

#[test]
fn stored_files_come_back_classified_and_paged() {
    let root = TempDir::new().unwrap();
    let locations = StorageLocations::new(root.path().to_path_buf());
    let user_dir = locations.user_images_dir(7);

    let upload_uuid = Uuid::new_v4();
    store_image_bytes(b"orig", &user_dir, &format!("{upload_uuid}_original"), "png").unwrap();
    for i in 1..=3 {
        store_image_bytes(
            b"gen",
            &user_dir,
            &format!("{upload_uuid}_generated_{i}"),
            "png",
        )
        .unwrap();
    }

    let items = scan_user_images(&user_dir, 7).unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(
        items.iter().filter(|i| i.image_type == "generated").count(),
        3
    );
    assert!(items.iter().all(|i| i.uuid == upload_uuid.to_string()));
    assert!(items.iter().all(|i| i.user_id == 7));

    let page = sort_filter_paginate(
        items.clone(),
        &UserImagesQuery {
            page: 0,
            size: 2,
            image_type: "generated".into(),
            sort_by: "createdAt".into(),
            sort_direction: "ASC".into(),
        },
    );
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content.len(), 2);

    let page = sort_filter_paginate(
        items,
        &UserImagesQuery {
            page: 0,
            size: 20,
            image_type: "uploaded".into(),
            sort_by: "createdAt".into(),
            sort_direction: "DESC".into(),
        },
    );
    assert_eq!(page.total_elements, 1);
    assert!(page.content[0].filename.contains("_original"));
}

#[test]
fn admin_locations_resolve_and_reject_unknown_types() {
    let root = TempDir::new().unwrap();
    let locations = StorageLocations::new(root.path().to_path_buf());

    let dir = locations.resolve_admin_dir("PROMPT_TEST").unwrap();
    let path = store_image_bytes(b"png-bytes", &dir, "", "png").unwrap();
    assert!(path.starts_with(root.path()));
    assert!(path
        .to_string_lossy()
        .contains("private/images/0_prompt-test"));

    assert!(locations.resolve_admin_dir("ARTICLE_VARIANT").is_none());
}
