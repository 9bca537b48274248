//! Webdam core library: folder navigation and asset selection.
//!
//! `webdam-core` holds everything needed to browse a Webdam account and
//! turn selected assets into media entities, independent of the host that
//! renders the widget.
//!
//! # Modules
//!
//! - [`model`]: folder and asset types as the Webdam API returns them.
//! - [`remote`]: the [`WebdamClient`] trait with HTTP and in-memory clients.
//! - [`nav`]: the breadcrumb trail and the [`Navigator`] that reconciles it.
//! - [`widget`]: the entity browser widget built on top of the navigator.
//! - [`media`]: the `webdam_asset` media type (fields, bundles, thumbnails).
//! - [`config`]: TOML-based settings.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod media;
pub mod model;
pub mod nav;
pub mod remote;
pub mod widget;

pub use config::settings::{Config, MediaConfig, WidgetConfig};
pub use error::{CoreError, CoreResult};
pub use media::{EntityOwner, FieldValue, MediaBundle, MediaEntityValues, WebdamAssetType};
pub use model::{Asset, AssetId, AssetSummary, FolderId, FolderListing, FolderMetadata};
pub use nav::breadcrumb::{Breadcrumb, BreadcrumbTrail};
pub use nav::navigator::{Navigator, Rendered};
pub use remote::{HttpWebdamClient, InMemoryWebdam, RemoteError, WebdamClient, WebdamConfig};
pub use widget::{BrowserWidget, Trigger, WidgetView};
