//! The `webdam_asset` media type.
//!
//! Maps Webdam assets onto media entities: which fields an asset provides
//! ([`fields`]), which bundles accept them ([`bundle`]), and how entity
//! thumbnails are chosen ([`thumbnail`]).

pub mod bundle;
pub mod fields;
pub mod thumbnail;

use std::path::PathBuf;
use std::sync::Arc;

pub use bundle::{eligible_bundles, find_bundle, MediaBundle, WEBDAM_MEDIA_TYPE};
pub use fields::{
    get_field, prepare_entity, EntityOwner, FieldValue, MediaEntityValues, PROVIDED_FIELDS,
};
pub use thumbnail::{resolve_thumbnail, LocalFile};

use crate::config::settings::MediaConfig;
use crate::error::CoreResult;
use crate::remote::WebdamClient;

/// Media type backed by Webdam assets.
#[derive(Clone)]
pub struct WebdamAssetType {
    client: Arc<dyn WebdamClient>,
    config: MediaConfig,
}

impl WebdamAssetType {
    pub fn new(client: Arc<dyn WebdamClient>, config: MediaConfig) -> Self {
        Self { client, config }
    }

    /// Fields this media type can fill, as `(name, label)` pairs.
    pub fn provided_fields(&self) -> &'static [(&'static str, &'static str)] {
        PROVIDED_FIELDS
    }

    /// Looks up provided field `name` for an existing media entity.
    ///
    /// The asset id is read from the bundle's source field and the asset is
    /// fetched fresh. `file` resolves to the id of `local_file`. Returns
    /// `Ok(None)` when the entity has no asset id or the field has no value.
    ///
    /// # Errors
    ///
    /// Propagates remote failures when fetching the asset.
    pub async fn field(
        &self,
        media: &MediaEntityValues,
        bundle: &MediaBundle,
        local_file: Option<&LocalFile>,
        name: &str,
    ) -> CoreResult<Option<FieldValue>> {
        if name == "file" {
            if bundle.file_field().is_none() {
                return Ok(None);
            }
            return Ok(local_file.map(|f| FieldValue::Integer(f.id)));
        }

        let Some(asset_id) = media.asset_id(bundle) else {
            return Ok(None);
        };
        let asset = self.client.get_asset(asset_id).await?;
        Ok(get_field(&asset, name))
    }

    /// Thumbnail path for a media entity in `bundle`.
    ///
    /// Falls back to the default Webdam icon when the bundle maps no file
    /// field or the entity has no local file.
    pub fn thumbnail(&self, bundle: &MediaBundle, local_file: Option<&LocalFile>) -> PathBuf {
        let file = bundle.file_field().and(local_file);
        resolve_thumbnail(file, &self.config.icon_base, &self.config.default_icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, AssetId};
    use crate::remote::InMemoryWebdam;
    use std::path::Path;

    fn asset_type() -> WebdamAssetType {
        let mut asset = Asset::new(3455u64, "Sunset.jpg");
        asset.width = Some(640);
        asset.status = Some("active".to_string());
        let client = Arc::new(InMemoryWebdam::new().with_asset(asset));
        WebdamAssetType::new(client, MediaConfig::default())
    }

    fn bundle() -> MediaBundle {
        MediaBundle::new("webdam", "Webdam asset")
            .with_source_field("field_webdam_id")
            .with_mapping("file", "field_file")
    }

    fn media(bundle: &MediaBundle) -> MediaEntityValues {
        let asset = Asset::new(3455u64, "Sunset.jpg");
        prepare_entity(&asset, bundle, &EntityOwner::new(1, "en"))
    }

    fn local_file(mime: &str) -> LocalFile {
        LocalFile {
            id: 88,
            uri: "public://sunset.jpg".to_string(),
            mime_type: mime.to_string(),
        }
    }

    #[tokio::test]
    async fn field_fetches_asset_by_source_id() {
        let asset_type = asset_type();
        let bundle = bundle();
        let value = asset_type
            .field(&media(&bundle), &bundle, None, "width")
            .await
            .unwrap();
        assert_eq!(value, Some(FieldValue::Integer(640)));
    }

    #[tokio::test]
    async fn field_without_asset_id_is_none() {
        let asset_type = asset_type();
        let bundle = bundle();
        let mut media = media(&bundle);
        media.fields.clear();
        let value = asset_type.field(&media, &bundle, None, "width").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn field_for_missing_asset_errors() {
        let asset_type = asset_type();
        let bundle = bundle();
        let mut media = media(&bundle);
        media.fields.insert(
            "field_webdam_id".to_string(),
            FieldValue::Integer(AssetId::new(1).get()),
        );
        let err = asset_type
            .field(&media, &bundle, None, "width")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn file_field_uses_local_file() {
        let asset_type = asset_type();
        let bundle = bundle();
        let file = local_file("image/jpeg");
        let value = asset_type
            .field(&media(&bundle), &bundle, Some(&file), "file")
            .await
            .unwrap();
        assert_eq!(value, Some(FieldValue::Integer(88)));

        let unmapped = MediaBundle::new("webdam", "Webdam asset");
        let value = asset_type
            .field(&media(&unmapped), &unmapped, Some(&file), "file")
            .await
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn thumbnail_without_file_mapping_is_default_icon() {
        let asset_type = asset_type();
        let unmapped = MediaBundle::new("webdam", "Webdam asset");
        let file = local_file("image/jpeg");
        assert_eq!(
            asset_type.thumbnail(&unmapped, Some(&file)),
            MediaConfig::default().default_icon
        );
    }

    #[test]
    fn thumbnail_for_image_is_file_uri() {
        let asset_type = asset_type();
        let file = local_file("image/png");
        assert_eq!(
            asset_type.thumbnail(&bundle(), Some(&file)),
            Path::new("public://sunset.jpg")
        );
    }

    #[test]
    fn provided_fields_exposed() {
        assert_eq!(asset_type().provided_fields().len(), PROVIDED_FIELDS.len());
    }
}
