use serde::{Deserialize, Serialize};
use webdam_core::{Breadcrumb, MediaBundle, MediaEntityValues, Trigger};

#[derive(Debug, Deserialize)]
pub struct BrowseRequest {
    /// Trail stored from the previous response; absent on first load.
    #[serde(default)]
    pub trail: Option<Vec<Breadcrumb>>,
    #[serde(default = "default_trigger")]
    pub trigger: Trigger,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub trigger: Trigger,
    /// Checkbox values; `0` marks an unchecked box.
    #[serde(default)]
    pub assets: Vec<u64>,
    /// Overrides the configured cardinality.
    #[serde(default)]
    pub cardinality: Option<i64>,
    #[serde(default)]
    pub uid: u64,
    #[serde(default = "default_langcode")]
    pub langcode: String,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub entities: Vec<MediaEntityValues>,
}

#[derive(Debug, Serialize)]
pub struct BundleDto {
    pub id: String,
    pub label: String,
    pub source_field: Option<String>,
}

impl From<&MediaBundle> for BundleDto {
    fn from(bundle: &MediaBundle) -> Self {
        Self {
            id: bundle.id.clone(),
            label: bundle.label.clone(),
            source_field: bundle.source_field.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BundlesResponse {
    pub bundles: Vec<BundleDto>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub demo: bool,
}

fn default_trigger() -> Trigger {
    Trigger::Other
}

fn default_langcode() -> String {
    "und".to_string()
}
