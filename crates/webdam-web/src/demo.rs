//! Built-in Webdam tree served when `demo = true`.

use webdam_core::model::asset::FolderRef;
use webdam_core::model::ThumbnailUrl;
use webdam_core::{Asset, FolderId, InMemoryWebdam, MediaBundle};

pub fn client() -> InMemoryWebdam {
    InMemoryWebdam::new()
        .with_folder(5, "Photos", FolderId::ROOT)
        .with_folder(7, "Documents", FolderId::ROOT)
        .with_folder(12, "2024", FolderId::new(5))
        .with_folder(13, "Events", FolderId::new(12))
        .with_asset(asset(100, "beach.jpg", 12, "active", 3))
        .with_asset(asset(101, "harbour.jpg", 12, "active", 2))
        .with_asset(asset(102, "draft.jpg", 12, "inactive", 0))
        .with_asset(asset(200, "brochure.pdf", 7, "active", 1))
}

/// Bundle used when the configuration defines none.
pub fn bundle() -> MediaBundle {
    MediaBundle::new("webdam", "Webdam asset")
        .with_source_field("field_webdam_id")
        .with_mapping("filename", "field_filename")
        .with_mapping("description", "field_description")
}

fn asset(id: u64, name: &str, folder: u64, status: &str, thumbnails: u64) -> Asset {
    let mut asset = Asset::new(id, name);
    asset.filename = Some(name.to_string());
    asset.status = Some(status.to_string());
    asset.folder = Some(FolderRef {
        id: Some(FolderId::new(folder)),
    });
    asset.thumbnails = (0..thumbnails)
        .map(|i| ThumbnailUrl {
            size: Some(100 << i),
            url: format!("https://demo.webdam.invalid/thumbs/{id}/{}.jpg", 100 << i),
        })
        .collect();
    asset
}
