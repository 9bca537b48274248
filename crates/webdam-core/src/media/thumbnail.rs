//! Thumbnail resolution for Webdam media entities.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The file stored locally for a media entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    pub id: u64,
    pub uri: String,
    pub mime_type: String,
}

/// Picks the thumbnail for a media entity.
///
/// Images use their own file. Other files use an icon from `icon_base`,
/// trying `{primary}-{secondary}.png`, then `{secondary}.png`, then
/// `document.png`. Without a local file, `default_icon` is used.
pub fn resolve_thumbnail(
    file: Option<&LocalFile>,
    icon_base: &Path,
    default_icon: &Path,
) -> PathBuf {
    let Some(file) = file else {
        return default_icon.to_path_buf();
    };

    let (primary, secondary) = match file.mime_type.split_once('/') {
        Some((primary, secondary)) => (primary, secondary),
        None => (file.mime_type.as_str(), ""),
    };

    if primary == "image" {
        return PathBuf::from(&file.uri);
    }

    if !secondary.is_empty() {
        let candidates = [
            icon_base.join(format!("{primary}-{secondary}.png")),
            icon_base.join(format!("{secondary}.png")),
        ];
        if let Some(found) = candidates.into_iter().find(|path| path.is_file()) {
            return found;
        }
    }

    icon_base.join("document.png")
}
