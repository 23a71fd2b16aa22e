mod dashboard;
mod folder;
mod snapshot;

pub use dashboard::DashboardApi;
pub use folder::FolderApi;
pub use snapshot::SnapshotApi;
