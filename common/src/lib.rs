//! Wire-level types shared by Grafana API callers.
//!
//! Nothing in this crate performs I/O. Request bodies serialize to the exact
//! JSON shapes the Grafana HTTP API expects, and response projections are
//! deliberately lenient where the client needs to detect malformed entries.

mod constants;
mod dashboard;
mod diff;
mod endpoint;
mod error;
mod folder;
mod snapshot;

pub use constants::*;
pub use dashboard::{DashboardIdentity, DashboardUpsert, VersionRestore};
pub use diff::{DiffRequest, DiffType, VersionRef};
pub use endpoint::Endpoint;
pub use error::InvalidArgument;
pub use folder::{FolderEntry, FolderRef, FolderUpdate, NewFolder};
pub use snapshot::NewSnapshot;
