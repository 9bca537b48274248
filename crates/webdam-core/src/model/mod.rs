//! Domain types for the Webdam service.
//!
//! The Webdam REST API encodes identifiers inconsistently: sometimes as JSON
//! numbers, sometimes as numeric strings. [`FolderId`] and [`AssetId`]
//! accept both on input and always serialise as numbers.

pub mod asset;
pub mod folder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub use asset::{Asset, AssetSummary, ThumbnailUrl};
pub use folder::{FolderListing, FolderMetadata};

/// Identifier of a remote folder.
///
/// [`FolderId::ROOT`] (`0`) is the home folder. It has no metadata object of
/// its own and only ever contains subfolders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct FolderId(u64);

impl FolderId {
    pub const ROOT: FolderId = FolderId(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of a remote asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

macro_rules! impl_id {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $ty {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $ty {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_numeric_id(deserializer).map(Self)
            }
        }
    };
}

impl_id!(FolderId);
impl_id!(AssetId);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn deserialize_numeric_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric id: {s:?}"))),
    }
}

/// Deserialises an optional id where the API may send `null`, `""` or omit
/// the field entirely.
pub(crate) fn deserialize_optional_folder_id<'de, D>(
    deserializer: D,
) -> Result<Option<FolderId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(n)) => Ok(Some(FolderId(n))),
        Some(RawId::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawId::Text(s)) => s
            .trim()
            .parse()
            .map(|n| Some(FolderId(n)))
            .map_err(|_| serde::de::Error::custom(format!("invalid folder id: {s:?}"))),
    }
}

/// Deserialises an optional count or timestamp sent as a number, a numeric
/// string, or an empty string.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Float(f)) if f >= 0.0 => Ok(Some(f as u64)),
        Some(Raw::Float(_)) => Ok(None),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {s:?}"))),
    }
}
