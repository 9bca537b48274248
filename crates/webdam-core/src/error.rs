//! Error types for `webdam-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Failures of the remote
//! Webdam service are described by [`RemoteError`](crate::remote::RemoteError)
//! and wrapped here.

use std::path::PathBuf;

use crate::model::FolderId;
use crate::remote::RemoteError;

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The remote service could not resolve metadata or contents for a folder.
    ///
    /// Raised by the navigator; the caller keeps its previous trail.
    #[error("failed to fetch folder {folder_id}: {source}")]
    FolderFetch {
        folder_id: FolderId,
        #[source]
        source: RemoteError,
    },

    /// Any other remote failure (asset lookups, bundle listings).
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A breadcrumb trail handed back by the caller violates its invariants.
    #[error("invalid breadcrumb trail: {0}")]
    InvalidTrail(String),

    /// More assets were selected than the field cardinality allows.
    #[error("{}", too_many_assets_message(.limit))]
    TooManyAssets { selected: usize, limit: usize },

    /// The configured media bundle does not exist.
    #[error("unknown media bundle: {0}")]
    UnknownBundle(String),

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Returns `true` when the failure means the requested remote object
    /// does not exist, as opposed to a transient or configuration problem.
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::FolderFetch { source, .. } | CoreError::Remote(source) => {
                matches!(source, RemoteError::NotFound(_))
            }
            CoreError::NotFound(_) => true,
            _ => false,
        }
    }
}

fn too_many_assets_message(limit: &usize) -> String {
    if *limit == 1 {
        "You can not select more than 1 entity.".to_string()
    } else {
        format!("You can not select more than {limit} entities.")
    }
}

/// Convenience alias used throughout `webdam-core`.
pub type CoreResult<T> = Result<T, CoreError>;
