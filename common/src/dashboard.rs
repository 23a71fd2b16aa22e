use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a dashboard found by title inside a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardIdentity {
    pub uid: String,
    pub id: i64,
}

/// Body of `POST /dashboards/db`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpsert<'a> {
    pub dashboard: &'a Value,
    pub folder_id: i64,
    pub message: &'a str,
    pub overwrite: bool,
}

/// Body of `POST /dashboards/{id|uid}/restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRestore {
    pub version: i64,
}
