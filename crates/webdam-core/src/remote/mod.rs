//! Access to the remote Webdam service.
//!
//! [`WebdamClient`] is the contract the navigator and widget depend on.
//! [`http::HttpWebdamClient`] talks to the real REST API and
//! [`memory::InMemoryWebdam`] serves a fixed tree for tests and demos.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::model::{Asset, AssetId, FolderId, FolderListing, FolderMetadata};

pub use http::{HttpWebdamClient, WebdamConfig};
pub use memory::InMemoryWebdam;

/// Errors that can occur while talking to the Webdam service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Operations the core needs from the Webdam service.
///
/// Implementations own their retry and timeout policy; callers never retry.
#[async_trait]
pub trait WebdamClient: Send + Sync {
    /// Fetches the metadata of a single folder.
    async fn get_folder(&self, id: FolderId) -> Result<FolderMetadata, RemoteError>;

    /// Lists the child folders and assets of a non-root folder.
    async fn get_folder_assets(&self, id: FolderId) -> Result<FolderListing, RemoteError>;

    /// Lists the folders directly under the root.
    async fn get_top_level_folders(&self) -> Result<Vec<FolderMetadata>, RemoteError>;

    /// Fetches a single asset.
    async fn get_asset(&self, id: AssetId) -> Result<Asset, RemoteError>;

    /// Fetches several assets, in the order of `ids`.
    async fn get_asset_multiple(&self, ids: &[AssetId]) -> Result<Vec<Asset>, RemoteError>;
}
