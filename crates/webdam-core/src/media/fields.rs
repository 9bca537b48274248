//! Mapping of Webdam asset properties onto media entity fields.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::bundle::MediaBundle;
use crate::model::{Asset, AssetId};

/// Fields a Webdam asset can provide, with human-readable labels, in
/// display order.
pub const PROVIDED_FIELDS: &[(&str, &str)] = &[
    ("file", "File"),
    ("type_id", "Type ID"),
    ("filename", "Filename"),
    ("filesize", "Filesize"),
    ("width", "Width"),
    ("height", "Height"),
    ("description", "Description"),
    ("filetype", "Filetype"),
    ("colorspace", "Color space"),
    ("version", "Version"),
    ("datecreated", "Date created"),
    ("datemodified", "Date modified"),
    ("datecaptured", "Date captured"),
    ("folderID", "Folder ID"),
];

/// A value stored in a media entity field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u64),
    Text(String),
    /// An API property outside the catalogue, copied verbatim.
    Raw(serde_json::Value),
}

/// Who creates an entity and in which language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityOwner {
    pub uid: u64,
    pub langcode: String,
}

impl EntityOwner {
    pub fn new(uid: u64, langcode: impl Into<String>) -> Self {
        Self {
            uid,
            langcode: langcode.into(),
        }
    }
}

/// Values for a new media entity created from a Webdam asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaEntityValues {
    pub bundle: String,
    pub uid: u64,
    pub langcode: String,
    pub published: bool,
    pub name: String,
    /// Bundle-specific fields, keyed by entity field name.
    pub fields: BTreeMap<String, FieldValue>,
}

impl MediaEntityValues {
    /// Reads the Webdam asset id back from the bundle's source field.
    pub fn asset_id(&self, bundle: &MediaBundle) -> Option<AssetId> {
        let field = bundle.source_field.as_deref()?;
        match self.fields.get(field)? {
            FieldValue::Integer(id) => Some(AssetId::new(*id)),
            FieldValue::Text(text) => text.parse().ok(),
            FieldValue::Raw(value) => value.as_u64().map(AssetId::new),
        }
    }
}

/// Returns `true` if `name` is a provided field.
pub fn is_provided_field(name: &str) -> bool {
    PROVIDED_FIELDS.iter().any(|(field, _)| *field == name)
}

/// Value of provided field `name` for `asset`.
///
/// `file` refers to the locally stored file rather than the remote asset
/// and therefore yields `None`, as do unknown names and absent properties.
pub fn get_field(asset: &Asset, name: &str) -> Option<FieldValue> {
    let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
    let int = |v: Option<u64>| v.map(FieldValue::Integer);

    match name {
        "type_id" => text(&asset.type_id),
        "filename" => text(&asset.filename),
        "filesize" => text(&asset.filesize),
        "width" => int(asset.width),
        "height" => int(asset.height),
        "description" => text(&asset.description),
        "filetype" => text(&asset.filetype),
        "colorspace" => text(&asset.colorspace),
        "version" => text(&asset.version),
        "datecreated" => int(asset.date_created_unix),
        "datemodified" => int(asset.date_modified_unix),
        "datecaptured" => int(asset.date_captured_unix),
        "folderID" => int(asset.folder_id().map(|id| id.get())),
        _ => None,
    }
}

/// Builds entity values for `asset` in `bundle`.
///
/// Field map entries outside the catalogue are looked up among the raw API
/// properties of the asset; entries with no value are left out.
pub fn prepare_entity(
    asset: &Asset,
    bundle: &MediaBundle,
    owner: &EntityOwner,
) -> MediaEntityValues {
    let mut fields = BTreeMap::new();

    match bundle.source_field.as_deref() {
        Some(source) if !source.is_empty() => {
            fields.insert(source.to_string(), FieldValue::Integer(asset.id.get()));
        }
        _ => warn!(bundle = %bundle.id, "bundle has no source field, asset id not stored"),
    }

    for (provided, entity_field) in &bundle.field_map {
        let value = if is_provided_field(provided) {
            get_field(asset, provided)
        } else {
            asset.extra.get(provided).cloned().map(FieldValue::Raw)
        };
        if let Some(value) = value {
            fields.insert(entity_field.clone(), value);
        }
    }

    MediaEntityValues {
        bundle: bundle.id.clone(),
        uid: owner.uid,
        langcode: owner.langcode.clone(),
        published: asset.is_active(),
        name: asset.name.clone(),
        fields,
    }
}
