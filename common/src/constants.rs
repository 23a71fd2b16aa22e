/// Title of the implicit root folder.
pub const GENERAL_FOLDER_TITLE: &str = "General";
/// Folder id Grafana reserves for the root folder. Never fetched from the server.
pub const GENERAL_FOLDER_ID: i64 = 0;

pub const STATUS_SUCCESS: &str = "success";
pub const DASHBOARD_PERMISSIONS_UPDATED: &str = "Dashboard permissions updated";
pub const FOLDER_PERMISSIONS_UPDATED: &str = "Folder permissions updated";
pub const SNAPSHOT_DELETED_PREFIX: &str = "Snapshot deleted";
