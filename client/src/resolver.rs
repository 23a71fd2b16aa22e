//! Folder path to folder id resolution.

use grafana_common::{FolderEntry, GENERAL_FOLDER_ID, GENERAL_FOLDER_TITLE};
use tracing::{debug, error};

use crate::{GrafanaError, validation};

/// Anything that can list every folder as title/id pairs.
pub trait FolderSource {
    fn list_folders(&self) -> Result<Vec<FolderEntry>, GrafanaError>;
}

/// Maps a human-readable folder path to the numeric id Grafana stores
/// dashboards under. Nothing is cached; every call re-lists.
#[derive(Debug, Clone, Copy)]
pub struct FolderResolver<S> {
    source: S,
}

impl<S: FolderSource> FolderResolver<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub fn resolve(&self, path: &str) -> Result<i64, GrafanaError> {
        validation::non_empty("folder path", path)?;

        if path == GENERAL_FOLDER_TITLE {
            return Ok(GENERAL_FOLDER_ID);
        }

        let folders = self.source.list_folders()?;
        debug!(path, folders = folders.len(), "resolving folder path");
        resolve_in(path, &folders).inspect_err(|e| error!("{e}"))
    }
}

fn resolve_in(path: &str, folders: &[FolderEntry]) -> Result<i64, GrafanaError> {
    for folder in folders {
        let Some(title) = folder.title.as_deref() else {
            return Err(GrafanaError::Resolution(
                "folder listing contains an entry without a title".to_string(),
            ));
        };
        if title == path {
            return folder
                .id
                .ok_or_else(|| GrafanaError::Resolution(format!("folder '{path}' has no id")));
        }
    }
    Err(GrafanaError::Resolution(format!("no folder titled '{path}'")))
}
