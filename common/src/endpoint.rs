use std::fmt;

/// Resource families of the Grafana HTTP API.
///
/// Rendered relative to the API root (`{host}/api`). Ids, uids and keys are
/// appended by the caller; the set of templates itself is closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Dashboards,
    Folders,
    Search,
    Snapshots,
    DashboardSnapshots,
    SnapshotsDelete,
}

impl Endpoint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboards => "/dashboards",
            Self::Folders => "/folders",
            Self::Search => "/search",
            Self::Snapshots => "/snapshots",
            Self::DashboardSnapshots => "/dashboard/snapshots",
            Self::SnapshotsDelete => "/snapshots-delete",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
