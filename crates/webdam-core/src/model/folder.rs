//! Folder metadata and listings.

use serde::{Deserialize, Serialize};

use super::{deserialize_optional_folder_id, AssetSummary, FolderId};

/// A remote folder's own metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMetadata {
    pub id: FolderId,
    pub name: String,
    /// Parent folder. `None` only for the root, which never has metadata
    /// fetched, so in practice top-level folders report `Some(FolderId::ROOT)`.
    #[serde(default, deserialize_with = "deserialize_optional_folder_id")]
    pub parent: Option<FolderId>,
}

impl FolderMetadata {
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>, parent: Option<FolderId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent,
        }
    }
}

/// The contents of one folder.
///
/// `items` is always empty for the root listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderListing {
    #[serde(default)]
    pub folders: Vec<FolderMetadata>,
    #[serde(default)]
    pub items: Vec<AssetSummary>,
}

impl FolderListing {
    /// A listing containing only folders, as returned for the root.
    pub fn folders_only(folders: Vec<FolderMetadata>) -> Self {
        Self {
            folders,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.items.is_empty()
    }
}
