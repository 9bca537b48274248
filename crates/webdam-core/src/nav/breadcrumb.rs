//! Breadcrumb trail from the home folder to the folder being displayed.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model::{FolderId, FolderMetadata};

/// Label of the root entry.
pub const HOME_LABEL: &str = "Home";

/// One `(folder id, display name)` step of a trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: FolderId,
    pub name: String,
}

impl Breadcrumb {
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    fn home() -> Self {
        Self::new(FolderId::ROOT, HOME_LABEL)
    }
}

/// Immutable, ordered trail of folders from home to the current folder.
///
/// The first entry is always `(0, "Home")`, ids are unique, and the last
/// entry is the folder currently displayed. Every transition returns a
/// **new** trail, so a caller holding the previous value keeps it intact
/// when a navigation fails.
///
/// Serialises as a plain list of `{id, name}` objects; deserialising a list
/// that breaks the invariants fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Breadcrumb>", into = "Vec<Breadcrumb>")]
pub struct BreadcrumbTrail {
    entries: Vec<Breadcrumb>,
}

impl Default for BreadcrumbTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl BreadcrumbTrail {
    /// Creates the single-entry trail used on first render.
    pub fn new() -> Self {
        Self {
            entries: vec![Breadcrumb::home()],
        }
    }

    /// Rebuilds a trail from entries stored by the caller.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidTrail`] if the list is empty, does not start with
    /// the home entry, or repeats a folder id.
    pub fn from_entries(entries: Vec<Breadcrumb>) -> CoreResult<Self> {
        match entries.first() {
            None => return Err(CoreError::InvalidTrail("trail is empty".to_string())),
            Some(first) if *first != Breadcrumb::home() => {
                return Err(CoreError::InvalidTrail(format!(
                    "trail must start with ({}, {HOME_LABEL:?}), found ({}, {:?})",
                    FolderId::ROOT,
                    first.id,
                    first.name
                )));
            }
            Some(_) => {}
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(CoreError::InvalidTrail(format!(
                    "folder {} appears more than once",
                    entry.id
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Breadcrumb] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breadcrumb> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a trail holds at least the home entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The folder currently displayed.
    pub fn current(&self) -> &Breadcrumb {
        // `entries` is never empty; every constructor keeps the home entry.
        &self.entries[self.entries.len() - 1]
    }

    pub fn contains(&self, id: FolderId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<FolderId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Navigates up to `id`, dropping every entry after it.
    ///
    /// Returns `None` when `id` is not on the trail. The home entry is never
    /// removed. Ascending to the current folder returns an equal trail.
    pub fn ascend_to(&self, id: FolderId) -> Option<Self> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let mut entries = self.entries.clone();
        entries.truncate(pos + 1);
        Some(Self { entries })
    }

    /// Descends into `folder`, appending it to the trail.
    ///
    /// Returns `None` unless `folder` is a direct child of the current
    /// folder and not already on the trail.
    pub fn descend(&self, folder: &FolderMetadata) -> Option<Self> {
        if self.contains(folder.id) || folder.parent != Some(self.current().id) {
            return None;
        }
        let mut entries = self.entries.clone();
        entries.push(Breadcrumb::new(folder.id, folder.name.clone()));
        Some(Self { entries })
    }
}

impl TryFrom<Vec<Breadcrumb>> for BreadcrumbTrail {
    type Error = CoreError;

    fn try_from(entries: Vec<Breadcrumb>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<BreadcrumbTrail> for Vec<Breadcrumb> {
    fn from(trail: BreadcrumbTrail) -> Self {
        trail.entries
    }
}
