//! Entity browser widget for Webdam assets.
//!
//! The host form is rebuilt on every interaction. [`BrowserWidget::build`]
//! turns the stored trail and the element that triggered the rebuild into a
//! [`WidgetView`]; [`BrowserWidget::validate`] and [`BrowserWidget::submit`]
//! handle the final selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::settings::WidgetConfig;
use crate::error::{CoreError, CoreResult};
use crate::media::{eligible_bundles, find_bundle, prepare_entity, EntityOwner, MediaBundle, MediaEntityValues};
use crate::model::{AssetId, AssetSummary, FolderId};
use crate::nav::breadcrumb::BreadcrumbTrail;
use crate::nav::navigator::{Navigator, Rendered};
use crate::remote::WebdamClient;

/// Thumbnail variant shown in asset options.
const PREFERRED_THUMBNAIL: usize = 2;

/// The form element that caused the widget to be rebuilt or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// A folder or breadcrumb button.
    Folder { folder_id: FolderId },
    /// The widget's main select button.
    MainSubmit,
    /// First load or any unrelated form element.
    Other,
}

impl Trigger {
    /// Folder activated by this trigger, if it is a folder button.
    pub fn folder(&self) -> Option<FolderId> {
        match self {
            Trigger::Folder { folder_id } => Some(*folder_id),
            _ => None,
        }
    }

    pub fn is_main_submit(&self) -> bool {
        matches!(self, Trigger::MainSubmit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbButton {
    pub folder_id: FolderId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderButton {
    pub folder_id: FolderId,
    pub label: String,
    /// Parent of the folder being displayed (`0` at the root).
    pub parent_folder_id: FolderId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetOption {
    pub asset_id: AssetId,
    /// Markup shown next to the checkbox.
    pub label: String,
}

/// Everything the host needs to render one state of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    /// Trail to store and hand back on the next interaction.
    pub trail: BreadcrumbTrail,
    pub current_folder: FolderId,
    pub breadcrumbs: Vec<BreadcrumbButton>,
    pub folders: Vec<FolderButton>,
    pub assets: Vec<AssetOption>,
    pub submit_text: String,
}

/// Asset browser widget.
#[derive(Clone)]
pub struct BrowserWidget {
    navigator: Navigator,
    client: Arc<dyn WebdamClient>,
    config: WidgetConfig,
    bundles: Vec<MediaBundle>,
}

impl BrowserWidget {
    pub fn new(client: Arc<dyn WebdamClient>, config: WidgetConfig, bundles: Vec<MediaBundle>) -> Self {
        Self {
            navigator: Navigator::new(Arc::clone(&client)),
            client,
            config,
            bundles,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Bundles the widget can be configured to create entities in.
    pub fn eligible_bundles(&self) -> Vec<&MediaBundle> {
        eligible_bundles(&self.bundles)
    }

    /// Builds the widget for `trigger`, starting from the stored `prior` trail.
    ///
    /// # Errors
    ///
    /// [`CoreError::FolderFetch`] if the activated folder cannot be fetched.
    pub async fn build(&self, prior: &BreadcrumbTrail, trigger: &Trigger) -> CoreResult<WidgetView> {
        let rendered = self.navigator.render(prior, trigger.folder()).await?;
        Ok(self.view(rendered))
    }

    fn view(&self, rendered: Rendered) -> WidgetView {
        let current_folder = rendered.current_id();
        let parent = rendered
            .current
            .as_ref()
            .and_then(|f| f.parent)
            .unwrap_or(FolderId::ROOT);

        let breadcrumbs = rendered
            .trail
            .iter()
            .map(|crumb| BreadcrumbButton {
                folder_id: crumb.id,
                label: crumb.name.clone(),
            })
            .collect();

        let folders = rendered
            .listing
            .folders
            .iter()
            .map(|folder| FolderButton {
                folder_id: folder.id,
                label: folder.name.clone(),
                parent_folder_id: parent,
            })
            .collect();

        let assets = rendered
            .listing
            .items
            .iter()
            .map(|item| AssetOption {
                asset_id: item.id,
                label: layout_asset(item),
            })
            .collect();

        WidgetView {
            trail: rendered.trail,
            current_folder,
            breadcrumbs,
            folders,
            assets,
            submit_text: self.config.submit_text.clone(),
        }
    }

    /// Checks a selection against the field cardinality.
    ///
    /// Only the main submit is validated. `cardinality` of zero or less means
    /// unlimited; unchecked boxes (value `0`) are not counted.
    ///
    /// # Errors
    ///
    /// [`CoreError::TooManyAssets`] when the selection is too large.
    pub fn validate(&self, trigger: &Trigger, selected: &[u64], cardinality: i64) -> CoreResult<()> {
        if !trigger.is_main_submit() {
            return Ok(());
        }
        let count = selected_assets(selected).len();
        match usize::try_from(cardinality) {
            Ok(limit) if limit > 0 && count > limit => Err(CoreError::TooManyAssets {
                selected: count,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Prepares media entity values for the selected assets.
    ///
    /// Any trigger other than the main submit selects nothing.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnknownBundle`] if the configured bundle does not exist
    ///   or no Webdam bundle is available.
    /// - [`CoreError::Remote`] if the assets cannot be fetched.
    pub async fn submit(
        &self,
        trigger: &Trigger,
        selected: &[u64],
        owner: &EntityOwner,
    ) -> CoreResult<Vec<MediaEntityValues>> {
        if !trigger.is_main_submit() {
            return Ok(Vec::new());
        }

        let bundle = self.target_bundle()?;
        let ids = selected_assets(selected);
        let assets = self.client.get_asset_multiple(&ids).await?;
        debug!(requested = ids.len(), fetched = assets.len(), "selection fetched");

        let entities: Vec<MediaEntityValues> = assets
            .iter()
            .map(|asset| prepare_entity(asset, bundle, owner))
            .collect();
        info!(bundle = %bundle.id, count = entities.len(), "media entities prepared");
        Ok(entities)
    }

    fn target_bundle(&self) -> CoreResult<&MediaBundle> {
        match self.config.bundle.as_deref() {
            Some(id) => find_bundle(&self.bundles, id),
            None => self
                .eligible_bundles()
                .into_iter()
                .next()
                .ok_or_else(|| CoreError::UnknownBundle("no webdam bundle configured".to_string())),
        }
    }
}

/// Asset ids from checkbox values, skipping unchecked (`0`) entries.
pub fn selected_assets(values: &[u64]) -> Vec<AssetId> {
    values
        .iter()
        .filter(|v| **v != 0)
        .map(|v| AssetId::new(*v))
        .collect()
}

/// Markup for one asset option: a preview image (or a placeholder) and the
/// asset name.
pub fn layout_asset(asset: &AssetSummary) -> String {
    let name = escape_html(&asset.name);
    let thumbnail = asset
        .thumbnails
        .get(PREFERRED_THUMBNAIL)
        .or_else(|| asset.thumbnails.last())
        .map(|thumb| {
            format!(
                r#"<img src="{}" alt="{name}" />"#,
                escape_html(&thumb.url)
            )
        })
        .unwrap_or_else(|| {
            r#"<span class="webdam-browser-empty">No preview available.</span>"#.to_string()
        });

    format!(r#"<div class="webdam-asset-checkbox">{thumbnail}<p>{name}</p></div>"#)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
