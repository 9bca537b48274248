//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::media::MediaBundle;
use crate::remote::WebdamConfig;

/// Top-level configuration.
///
/// Every section has defaults, so an empty file is valid. Call
/// [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub webdam: WebdamConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub bundles: Vec<MediaBundle>,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Entity browser widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_submit_text")]
    pub submit_text: String,
    /// Media bundle new entities are created in.
    #[serde(default)]
    pub bundle: Option<String>,
    /// Maximum number of assets per selection; zero or negative means
    /// unlimited.
    #[serde(default = "default_cardinality")]
    pub cardinality: i64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            submit_text: default_submit_text(),
            bundle: None,
            cardinality: default_cardinality(),
        }
    }
}

/// Media type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory holding mime type icons.
    #[serde(default = "default_icon_base")]
    pub icon_base: PathBuf,
    /// Thumbnail used when an entity has no local file.
    #[serde(default = "default_icon")]
    pub default_icon: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            icon_base: default_icon_base(),
            default_icon: default_icon(),
        }
    }
}

fn default_submit_text() -> String {
    "Select assets".to_string()
}

fn default_cardinality() -> i64 {
    -1
}

fn default_icon_base() -> PathBuf {
    PathBuf::from("icons")
}

fn default_icon() -> PathBuf {
    PathBuf::from("img/webdam.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_widget() {
        let config = Config::default();

        assert_eq!(config.widget.submit_text, "Select assets");
        assert!(config.widget.bundle.is_none());
        assert_eq!(config.widget.cardinality, -1);
    }

    #[test]
    fn default_config_media() {
        let config = Config::default();

        assert_eq!(config.media.icon_base, PathBuf::from("icons"));
        assert_eq!(config.media.default_icon, PathBuf::from("img/webdam.png"));
        assert!(config.bundles.is_empty());
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[webdam]
base_url = "https://dam.example.test"
access_token = "abc123"
page_size = 25
timeout_secs = 10
max_retries = 0

[widget]
submit_text = "Use these"
bundle = "webdam"
cardinality = 3

[media]
icon_base = "/srv/icons"
default_icon = "/srv/icons/webdam.png"

[[bundles]]
id = "webdam"
label = "Webdam asset"
source_field = "field_webdam_id"

[bundles.field_map]
datecreated = "field_created"
file = "field_file"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.webdam.base_url, "https://dam.example.test");
        assert_eq!(config.webdam.access_token.as_deref(), Some("abc123"));
        assert_eq!(config.webdam.page_size, 25);
        assert_eq!(config.webdam.timeout_secs, 10);
        assert_eq!(config.webdam.max_retries, 0);

        assert_eq!(config.widget.submit_text, "Use these");
        assert_eq!(config.widget.bundle.as_deref(), Some("webdam"));
        assert_eq!(config.widget.cardinality, 3);

        assert_eq!(config.media.icon_base, PathBuf::from("/srv/icons"));

        assert_eq!(config.bundles.len(), 1);
        let bundle = &config.bundles[0];
        assert!(bundle.is_webdam());
        assert_eq!(bundle.source_field.as_deref(), Some("field_webdam_id"));
        assert_eq!(bundle.file_field(), Some("field_file"));
        assert_eq!(
            bundle.field_map.get("datecreated").map(String::as_str),
            Some("field_created")
        );
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[widget]
cardinality = 1
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.widget.cardinality, 1);
        assert_eq!(config.widget.submit_text, "Select assets");
        assert_eq!(config.webdam.base_url, "https://apiv2.webdamdb.com");
        assert_eq!(config.webdam.page_size, 50);
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let config = Config::from_toml("").unwrap();
        let default = Config::default();

        assert_eq!(config.widget.submit_text, default.widget.submit_text);
        assert_eq!(config.webdam.base_url, default.webdam.base_url);
        assert_eq!(config.media.icon_base, default.media.icon_base);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.widget.bundle = Some("webdam".to_string());
        config.bundles.push(MediaBundle::new("webdam", "Webdam asset"));

        let text = toml::to_string(&config).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.widget.bundle.as_deref(), Some("webdam"));
        assert_eq!(back.bundles, config.bundles);
    }
}
