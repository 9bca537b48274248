//! Remote asset representations.
//!
//! [`AssetSummary`] carries just what a listing needs. [`Asset`] is the full
//! record used when mapping a selection onto media entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{deserialize_optional_folder_id, lenient_u64, AssetId, FolderId};

/// One rendition of an asset preview image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailUrl {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: Option<u64>,
    pub url: String,
}

/// Minimal asset data for listing views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub id: AssetId,
    pub name: String,
    #[serde(default, rename = "thumbnailurls")]
    pub thumbnails: Vec<ThumbnailUrl>,
}

impl AssetSummary {
    pub fn new(id: impl Into<AssetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnails: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_thumbnails(self, thumbnails: Vec<ThumbnailUrl>) -> Self {
        Self { thumbnails, ..self }
    }
}

/// Reference from an asset to the folder that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    #[serde(default, deserialize_with = "deserialize_optional_folder_id")]
    pub id: Option<FolderId>,
}

/// A full Webdam asset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(default)]
    pub filename: Option<String>,
    /// Size as reported by the API (a decimal megabyte string).
    #[serde(default)]
    pub filesize: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub width: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub height: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filetype: Option<String>,
    #[serde(default)]
    pub colorspace: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub date_created_unix: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub date_modified_unix: Option<u64>,
    #[serde(default, rename = "datecapturedUnix", deserialize_with = "lenient_u64")]
    pub date_captured_unix: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub folder: Option<FolderRef>,
    #[serde(default, rename = "thumbnailurls")]
    pub thumbnails: Vec<ThumbnailUrl>,
    /// Remaining API properties, kept so field maps can reference them by name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Asset {
    /// Creates an asset with only the identifying fields set.
    pub fn new(id: impl Into<AssetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            filename: None,
            filesize: None,
            width: None,
            height: None,
            description: None,
            filetype: None,
            colorspace: None,
            version: None,
            type_id: None,
            date_created_unix: None,
            date_modified_unix: None,
            date_captured_unix: None,
            status: None,
            folder: None,
            thumbnails: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Returns `true` when the remote status is `active`.
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }

    pub fn folder_id(&self) -> Option<FolderId> {
        self.folder.as_ref().and_then(|f| f.id)
    }

    pub fn summary(&self) -> AssetSummary {
        AssetSummary {
            id: self.id,
            name: self.name.clone(),
            thumbnails: self.thumbnails.clone(),
        }
    }
}
