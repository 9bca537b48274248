//! In-memory [`WebdamClient`] serving a fixed folder tree.
//!
//! Used by tests across the workspace and by the web host's demo mode.
//! Failures can be injected per folder to exercise transient errors.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{RemoteError, WebdamClient};
use crate::model::{Asset, AssetId, FolderId, FolderListing, FolderMetadata};

/// A Webdam tree held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryWebdam {
    folders: BTreeMap<FolderId, FolderMetadata>,
    assets: BTreeMap<AssetId, Asset>,
    failing: Mutex<HashSet<FolderId>>,
}

impl InMemoryWebdam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a folder under `parent` (use [`FolderId::ROOT`] for top level).
    #[must_use]
    pub fn with_folder(mut self, id: u64, name: &str, parent: FolderId) -> Self {
        let id = FolderId::new(id);
        self.folders
            .insert(id, FolderMetadata::new(id, name, Some(parent)));
        self
    }

    /// Adds an asset. Its owning folder is taken from [`Asset::folder_id`].
    #[must_use]
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.insert(asset.id, asset);
        self
    }

    /// Makes every subsequent fetch of `id` fail with an HTTP 503.
    pub fn fail_folder(&self, id: FolderId) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(id);
        }
    }

    /// Clears an injected failure.
    pub fn heal_folder(&self, id: FolderId) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(&id);
        }
    }

    fn check_available(&self, id: FolderId) -> Result<(), RemoteError> {
        let failing = self
            .failing
            .lock()
            .map(|set| set.contains(&id))
            .unwrap_or(false);
        if failing {
            return Err(RemoteError::Http {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn children_of(&self, parent: FolderId) -> Vec<FolderMetadata> {
        self.folders
            .values()
            .filter(|f| f.parent == Some(parent))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl WebdamClient for InMemoryWebdam {
    async fn get_folder(&self, id: FolderId) -> Result<FolderMetadata, RemoteError> {
        self.check_available(id)?;
        self.folders
            .get(&id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("folder {id}")))
    }

    async fn get_folder_assets(&self, id: FolderId) -> Result<FolderListing, RemoteError> {
        self.check_available(id)?;
        if !self.folders.contains_key(&id) {
            return Err(RemoteError::NotFound(format!("folder {id}")));
        }
        let items = self
            .assets
            .values()
            .filter(|asset| asset.folder_id() == Some(id))
            .map(Asset::summary)
            .collect();
        Ok(FolderListing {
            folders: self.children_of(id),
            items,
        })
    }

    async fn get_top_level_folders(&self) -> Result<Vec<FolderMetadata>, RemoteError> {
        self.check_available(FolderId::ROOT)?;
        Ok(self.children_of(FolderId::ROOT))
    }

    async fn get_asset(&self, id: AssetId) -> Result<Asset, RemoteError> {
        self.assets
            .get(&id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("asset {id}")))
    }

    async fn get_asset_multiple(&self, ids: &[AssetId]) -> Result<Vec<Asset>, RemoteError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.assets.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::asset::FolderRef;

    fn asset_in(id: u64, name: &str, folder: u64) -> Asset {
        let mut asset = Asset::new(id, name);
        asset.folder = Some(FolderRef {
            id: Some(FolderId::new(folder)),
        });
        asset
    }

    fn sample() -> InMemoryWebdam {
        InMemoryWebdam::new()
            .with_folder(5, "Photos", FolderId::ROOT)
            .with_folder(7, "Docs", FolderId::ROOT)
            .with_folder(12, "2024", FolderId::new(5))
            .with_asset(asset_in(100, "beach.jpg", 12))
            .with_asset(asset_in(101, "logo.png", 5))
    }

    #[tokio::test]
    async fn top_level_lists_root_children() {
        let webdam = sample();
        let folders = webdam.get_top_level_folders().await.unwrap();
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Photos", "Docs"]);
    }

    #[tokio::test]
    async fn folder_assets_lists_children_and_items() {
        let webdam = sample();
        let listing = webdam.get_folder_assets(FolderId::new(5)).await.unwrap();
        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].id, FolderId::new(12));
        assert_eq!(listing.items.len(), 1);
        assert_eq!(listing.items[0].id, AssetId::new(101));
    }

    #[tokio::test]
    async fn unknown_folder_is_not_found() {
        let webdam = sample();
        assert!(matches!(
            webdam.get_folder(FolderId::new(99)).await,
            Err(RemoteError::NotFound(_))
        ));
        assert!(matches!(
            webdam.get_folder_assets(FolderId::new(99)).await,
            Err(RemoteError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn injected_failure_can_be_healed() {
        let webdam = sample();
        webdam.fail_folder(FolderId::new(5));
        assert!(matches!(
            webdam.get_folder(FolderId::new(5)).await,
            Err(RemoteError::Http { status: 503, .. })
        ));

        webdam.heal_folder(FolderId::new(5));
        assert!(webdam.get_folder(FolderId::new(5)).await.is_ok());
    }

    #[tokio::test]
    async fn asset_multiple_keeps_request_order() {
        let webdam = sample();
        let assets = webdam
            .get_asset_multiple(&[AssetId::new(101), AssetId::new(555), AssetId::new(100)])
            .await
            .unwrap();
        let ids: Vec<u64> = assets.iter().map(|a| a.id.get()).collect();
        assert_eq!(ids, vec![101, 100]);
    }
}
