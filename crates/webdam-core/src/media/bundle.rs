//! Media bundle definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Media type id of bundles whose source is a Webdam asset.
pub const WEBDAM_MEDIA_TYPE: &str = "webdam_asset";

/// A media bundle (`[[bundles]]` in the config file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBundle {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Entity field storing the Webdam asset id. May be left unset while a
    /// bundle is still being configured.
    #[serde(default)]
    pub source_field: Option<String>,
    /// Provided field name (see [`super::PROVIDED_FIELDS`]) to entity field name.
    #[serde(default)]
    pub field_map: BTreeMap<String, String>,
}

impl MediaBundle {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            media_type: default_media_type(),
            source_field: None,
            field_map: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_source_field(self, field: impl Into<String>) -> Self {
        Self {
            source_field: Some(field.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_mapping(self, provided: impl Into<String>, entity_field: impl Into<String>) -> Self {
        let mut field_map = self.field_map;
        field_map.insert(provided.into(), entity_field.into());
        Self { field_map, ..self }
    }

    pub fn is_webdam(&self) -> bool {
        self.media_type == WEBDAM_MEDIA_TYPE
    }

    /// Entity field the local file is mapped to, if any.
    pub fn file_field(&self) -> Option<&str> {
        self.field_map
            .get("file")
            .map(String::as_str)
            .filter(|f| !f.is_empty())
    }
}

fn default_media_type() -> String {
    WEBDAM_MEDIA_TYPE.to_string()
}

/// Bundles a widget may create entities in: those backed by Webdam assets.
pub fn eligible_bundles(bundles: &[MediaBundle]) -> Vec<&MediaBundle> {
    bundles.iter().filter(|b| b.is_webdam()).collect()
}

/// Finds the bundle with the given id.
///
/// # Errors
///
/// [`CoreError::UnknownBundle`] if no bundle matches.
pub fn find_bundle<'a>(bundles: &'a [MediaBundle], id: &str) -> CoreResult<&'a MediaBundle> {
    bundles
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| CoreError::UnknownBundle(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundles() -> Vec<MediaBundle> {
        let mut image = MediaBundle::new("image", "Image");
        image.media_type = "image".to_string();
        vec![
            MediaBundle::new("webdam", "Webdam asset").with_source_field("field_webdam_id"),
            image,
            MediaBundle::new("webdam_video", "Webdam video"),
        ]
    }

    #[test]
    fn eligible_bundles_are_webdam_only() {
        let all = bundles();
        let ids: Vec<&str> = eligible_bundles(&all).iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["webdam", "webdam_video"]);
    }

    #[test]
    fn find_bundle_by_id() {
        let all = bundles();
        assert_eq!(find_bundle(&all, "image").unwrap().label, "Image");
        assert!(matches!(
            find_bundle(&all, "missing"),
            Err(CoreError::UnknownBundle(_))
        ));
    }

    #[test]
    fn file_field_ignores_empty_mapping() {
        let bundle = MediaBundle::new("webdam", "Webdam").with_mapping("file", "");
        assert_eq!(bundle.file_field(), None);

        let bundle = bundle.with_mapping("file", "field_file");
        assert_eq!(bundle.file_field(), Some("field_file"));
    }

    #[test]
    fn media_type_defaults_to_webdam() {
        let bundle: MediaBundle = toml::from_str("id = \"assets\"").unwrap();
        assert!(bundle.is_webdam());
        assert!(bundle.field_map.is_empty());
        assert!(bundle.source_field.is_none());
    }
}
