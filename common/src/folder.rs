//! Folder shapes.

use serde::{Deserialize, Serialize};

/// A folder as returned by the folder endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    pub id: i64,
    pub uid: String,
    pub title: String,
}

/// Title/id projection of a folder listing.
///
/// Both fields are optional so that a listing with malformed entries can be
/// told apart from a listing that simply has no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FolderEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl FolderEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, id: i64) -> Self {
        Self {
            title: Some(title.into()),
            id: Some(id),
        }
    }
}

/// Body of `POST /folders`.
#[derive(Debug, Clone, Serialize)]
pub struct NewFolder<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<&'a str>,
}

/// Body of `PUT /folders/{uid}`.
///
/// Grafana rejects an update that neither names the current `version` nor
/// sets `overwrite`.
#[derive(Debug, Clone, Serialize)]
pub struct FolderUpdate<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    pub overwrite: bool,
}
