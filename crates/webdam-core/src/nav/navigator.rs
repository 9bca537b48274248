//! Folder navigation across form round-trips.
//!
//! Each interaction only tells the [`Navigator`] which folder button was
//! clicked. Combined with the trail from the previous round-trip and the
//! clicked folder's parent id, that is enough to keep the breadcrumb trail
//! consistent: clicking an entry already on the trail ascends, clicking a
//! direct child of the current folder descends, and anything else (stale or
//! duplicate submissions) leaves the trail alone.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::model::{FolderId, FolderListing, FolderMetadata};
use crate::nav::breadcrumb::BreadcrumbTrail;
use crate::remote::WebdamClient;

/// Result of one navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The trail the caller must store for the next round-trip.
    pub trail: BreadcrumbTrail,
    /// Metadata of the displayed folder; `None` at the root.
    pub current: Option<FolderMetadata>,
    /// Contents of the displayed folder.
    pub listing: FolderListing,
}

impl Rendered {
    /// Id of the folder being displayed.
    pub fn current_id(&self) -> FolderId {
        self.current
            .as_ref()
            .map(|f| f.id)
            .unwrap_or(FolderId::ROOT)
    }
}

/// Reconciles the breadcrumb trail and fetches the folder to display.
#[derive(Clone)]
pub struct Navigator {
    client: Arc<dyn WebdamClient>,
}

impl Navigator {
    pub fn new(client: Arc<dyn WebdamClient>) -> Self {
        Self { client }
    }

    /// Renders the folder `activated`, or the root when `None`.
    ///
    /// `prior` is never modified. The trail is only reconciled when a
    /// folder was activated; `None` means first load or an unrelated form
    /// interaction, which shows the root with the prior trail unchanged.
    ///
    /// # Errors
    ///
    /// [`CoreError::FolderFetch`] if the service cannot return the folder's
    /// metadata or contents. No trail is returned in that case, so the
    /// caller's previous trail stays in effect.
    pub async fn render(
        &self,
        prior: &BreadcrumbTrail,
        activated: Option<FolderId>,
    ) -> CoreResult<Rendered> {
        let folder_id = activated.unwrap_or(FolderId::ROOT);
        let (current, listing) = self.fetch(folder_id).await?;

        let trail = match activated {
            Some(id) => reconcile(prior, id, current.as_ref()),
            None => prior.clone(),
        };

        debug!(
            folder = %folder_id,
            depth = trail.len(),
            folders = listing.folders.len(),
            items = listing.items.len(),
            "folder rendered"
        );

        Ok(Rendered {
            trail,
            current,
            listing,
        })
    }

    async fn fetch(&self, id: FolderId) -> CoreResult<(Option<FolderMetadata>, FolderListing)> {
        let fetch_error = |source| CoreError::FolderFetch {
            folder_id: id,
            source,
        };

        if id.is_root() {
            let folders = self
                .client
                .get_top_level_folders()
                .await
                .map_err(fetch_error)?;
            return Ok((None, FolderListing::folders_only(folders)));
        }

        let folder = self.client.get_folder(id).await.map_err(fetch_error)?;
        let listing = self
            .client
            .get_folder_assets(id)
            .await
            .map_err(fetch_error)?;
        Ok((Some(folder), listing))
    }
}

/// Applies one folder activation to `prior`.
fn reconcile(
    prior: &BreadcrumbTrail,
    id: FolderId,
    folder: Option<&FolderMetadata>,
) -> BreadcrumbTrail {
    if prior.contains(id) {
        // Ascend: a breadcrumb or an ancestor was clicked.
        return prior.ascend_to(id).unwrap_or_else(|| prior.clone());
    }

    if let Some(next) = folder.and_then(|f| prior.descend(f)) {
        return next;
    }

    warn!(
        folder = %id,
        parent = ?folder.and_then(|f| f.parent).map(|p| p.get()),
        tail = %prior.current().id,
        "inconsistent breadcrumb trail: activated folder is not a child of the current folder, trail left unchanged"
    );
    prior.clone()
}
