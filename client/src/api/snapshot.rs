use grafana_common::{Endpoint, NewSnapshot, SNAPSHOT_DELETED_PREFIX};
use serde_json::Value;
use tracing::info;

use crate::{ApiRequest, Expect, GrafanaClient, GrafanaError, validation};

#[derive(Debug, Clone, Copy)]
pub struct SnapshotApi<'a> {
    client: &'a GrafanaClient,
}

impl<'a> SnapshotApi<'a> {
    pub(crate) const fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    /// Returns the created snapshot's `key`, `deleteKey` and URLs.
    pub fn create(&self, snapshot: &NewSnapshot) -> Result<Value, GrafanaError> {
        validation::non_empty_object("snapshot dashboard", &snapshot.dashboard)?;
        for (name, value) in [
            ("snapshot name", &snapshot.name),
            ("snapshot key", &snapshot.key),
            ("snapshot delete key", &snapshot.delete_key),
        ] {
            if let Some(value) = value {
                validation::non_empty(name, value)?;
            }
        }

        let request = ApiRequest::post(Endpoint::Snapshots.as_str(), snapshot)?;
        let created = self
            .client
            .call(&request, &Expect::FieldPresent("key"))?
            .into_json();
        info!("snapshot created");
        Ok(created)
    }

    pub fn list(&self) -> Result<Value, GrafanaError> {
        Ok(self
            .client
            .call(
                &ApiRequest::get(Endpoint::DashboardSnapshots.as_str()),
                &Expect::IsArray,
            )?
            .into_json())
    }

    pub fn get(&self, key: &str) -> Result<Value, GrafanaError> {
        let segment = validation::path_segment("snapshot key", key)?;
        Ok(self
            .client
            .call(
                &ApiRequest::get(format!("{}/{segment}", Endpoint::Snapshots)),
                &Expect::FieldPresent("dashboard"),
            )?
            .into_json())
    }

    pub fn delete(&self, key: &str) -> Result<(), GrafanaError> {
        let segment = validation::path_segment("snapshot key", key)?;
        self.client.call(
            &ApiRequest::delete(format!("{}/{segment}", Endpoint::Snapshots)),
            &Expect::field_starts_with("message", SNAPSHOT_DELETED_PREFIX),
        )?;
        info!(key, "snapshot deleted");
        Ok(())
    }

    /// Delete through the secret key returned at creation time. Grafana
    /// exposes this as a `GET`.
    pub fn delete_by_delete_key(&self, delete_key: &str) -> Result<(), GrafanaError> {
        let segment = validation::path_segment("snapshot delete key", delete_key)?;
        self.client.call(
            &ApiRequest::get(format!("{}/{segment}", Endpoint::SnapshotsDelete)),
            &Expect::field_starts_with("message", SNAPSHOT_DELETED_PREFIX),
        )?;
        info!("snapshot deleted by delete key");
        Ok(())
    }
}
