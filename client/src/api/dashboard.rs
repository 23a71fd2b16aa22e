use grafana_common::{
    DASHBOARD_PERMISSIONS_UPDATED, DashboardIdentity, DashboardUpsert, DiffRequest, DiffType,
    Endpoint, STATUS_SUCCESS, VersionRef, VersionRestore,
};
use serde_json::Value;
use tracing::{error, info};
use url::form_urlencoded;

use crate::{ApiRequest, Expect, GrafanaClient, GrafanaError, validation};

/// Dashboard CRUD, permissions and version history.
///
/// Operations that take a `dashboard_path` resolve it to a folder id through
/// the folder listing first (see [`crate::FolderResolver`]).
#[derive(Debug, Clone, Copy)]
pub struct DashboardApi<'a> {
    client: &'a GrafanaClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) const fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn create_or_update(
        &self,
        dashboard_path: &str,
        dashboard: &Value,
        message: &str,
        overwrite: bool,
    ) -> Result<(), GrafanaError> {
        validation::non_empty("dashboard path", dashboard_path)?;
        validation::non_empty_object("dashboard", dashboard)?;
        validation::non_empty("message", message)?;

        let folder_id = self.client.folder().resolve_folder_id(dashboard_path)?;
        let body = DashboardUpsert {
            dashboard,
            folder_id,
            message,
            overwrite,
        };
        let request = ApiRequest::post(format!("{}/db", Endpoint::Dashboards), &body)?;
        self.client
            .call(&request, &Expect::field_equals("status", STATUS_SUCCESS))?;
        info!(dashboard_path, folder_id, "dashboard deployed");
        Ok(())
    }

    pub fn delete_by_name(&self, name: &str, dashboard_path: &str) -> Result<(), GrafanaError> {
        validation::non_empty("dashboard name", name)?;
        validation::non_empty("dashboard path", dashboard_path)?;

        let identity = self.find(name, dashboard_path)?;
        let segment = validation::path_segment("dashboard uid", &identity.uid)?;
        self.client.call(
            &ApiRequest::delete(format!("{}/uid/{segment}", Endpoint::Dashboards)),
            &Expect::field_equals("message", format!("Dashboard {name} deleted")),
        )?;
        info!(name, uid = %identity.uid, "dashboard deleted");
        Ok(())
    }

    pub fn get_by_uid(&self, uid: &str) -> Result<Value, GrafanaError> {
        let segment = validation::path_segment("dashboard uid", uid)?;
        self.get(
            format!("{}/uid/{segment}", Endpoint::Dashboards),
            &Expect::FieldPresent("dashboard"),
        )
    }

    pub fn home(&self) -> Result<Value, GrafanaError> {
        self.get(
            format!("{}/home", Endpoint::Dashboards),
            &Expect::FieldPresent("dashboard"),
        )
    }

    pub fn tags(&self) -> Result<Value, GrafanaError> {
        self.get(
            format!("{}/tags", Endpoint::Dashboards),
            &Expect::FirstElementHas("term"),
        )
    }

    /// Search `dashboard_path` for a dashboard titled exactly `name`.
    ///
    /// The search endpoint matches loosely; the first hit whose title is an
    /// exact match wins.
    pub fn find(&self, name: &str, dashboard_path: &str) -> Result<DashboardIdentity, GrafanaError> {
        validation::non_empty("dashboard name", name)?;
        validation::non_empty("dashboard path", dashboard_path)?;

        let folder_id = self.client.folder().resolve_folder_id(dashboard_path)?;
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("folderIds", &folder_id.to_string())
            .append_pair("query", name)
            .finish();
        let hits = self.get(format!("{}?{query}", Endpoint::Search), &Expect::IsArray)?;

        identity_in(&hits, name)
            .unwrap_or_else(|| {
                Err(GrafanaError::Resolution(format!(
                    "no dashboard named '{name}' in folder '{dashboard_path}'"
                )))
            })
            .inspect_err(|e| error!("{e}"))
    }

    pub fn permissions(&self, id: i64) -> Result<Value, GrafanaError> {
        validation::non_zero("dashboard id", id)?;
        self.get(
            format!("{}/id/{id}/permissions", Endpoint::Dashboards),
            &Expect::FirstElementHas("role"),
        )
    }

    pub fn permissions_by_uid(&self, uid: &str) -> Result<Value, GrafanaError> {
        let segment = validation::path_segment("dashboard uid", uid)?;
        self.get(
            format!("{}/uid/{segment}/permissions", Endpoint::Dashboards),
            &Expect::FirstElementHas("role"),
        )
    }

    pub fn update_permissions(&self, id: i64, permissions: &Value) -> Result<(), GrafanaError> {
        validation::non_zero("dashboard id", id)?;
        self.post_permissions(
            &format!("{}/id/{id}/permissions", Endpoint::Dashboards),
            permissions,
        )
    }

    pub fn update_permissions_by_uid(
        &self,
        uid: &str,
        permissions: &Value,
    ) -> Result<(), GrafanaError> {
        let segment = validation::path_segment("dashboard uid", uid)?;
        self.post_permissions(
            &format!("{}/uid/{segment}/permissions", Endpoint::Dashboards),
            permissions,
        )
    }

    pub fn versions(&self, id: i64) -> Result<Value, GrafanaError> {
        validation::non_zero("dashboard id", id)?;
        self.get(
            format!("{}/id/{id}/versions", Endpoint::Dashboards),
            &Expect::FirstElementHas("id"),
        )
    }

    pub fn versions_by_uid(&self, uid: &str) -> Result<Value, GrafanaError> {
        let segment = validation::path_segment("dashboard uid", uid)?;
        self.get(
            format!("{}/uid/{segment}/versions", Endpoint::Dashboards),
            &Expect::FirstElementHas("uid"),
        )
    }

    pub fn version(&self, id: i64, version_id: i64) -> Result<Value, GrafanaError> {
        validation::non_zero("dashboard id", id)?;
        validation::non_zero("version id", version_id)?;
        self.get(
            format!("{}/id/{id}/versions/{version_id}", Endpoint::Dashboards),
            &Expect::FieldPresent("id"),
        )
    }

    pub fn version_by_uid(&self, uid: &str, version_id: i64) -> Result<Value, GrafanaError> {
        let segment = validation::path_segment("dashboard uid", uid)?;
        validation::non_zero("version id", version_id)?;
        self.get(
            format!("{}/uid/{segment}/versions/{version_id}", Endpoint::Dashboards),
            &Expect::FieldPresent("uid"),
        )
    }

    pub fn restore_version(&self, id: i64, version: i64) -> Result<(), GrafanaError> {
        validation::non_zero("dashboard id", id)?;
        self.restore(&format!("{}/id/{id}/restore", Endpoint::Dashboards), version)
    }

    pub fn restore_version_by_uid(&self, uid: &str, version: i64) -> Result<(), GrafanaError> {
        let segment = validation::path_segment("dashboard uid", uid)?;
        self.restore(&format!("{}/uid/{segment}/restore", Endpoint::Dashboards), version)
    }

    /// Diff two dashboard versions.
    ///
    /// Unlike every other operation this one judges the response by its HTTP
    /// status alone and returns the body as raw text: a `basic` diff is HTML,
    /// not JSON.
    pub fn calculate_diff(
        &self,
        base: &VersionRef,
        new: &VersionRef,
        diff_type: DiffType,
    ) -> Result<String, GrafanaError> {
        for side in [base, new] {
            validation::non_zero("diff dashboard id", side.dashboard_id)?;
            validation::non_zero("diff version", side.version)?;
        }
        let body = DiffRequest {
            base,
            new,
            diff_type,
        };
        let request = ApiRequest::post(format!("{}/calculate-diff", Endpoint::Dashboards), &body)?;
        Ok(self.client.call(&request, &Expect::Status(200))?.into_text())
    }

    fn get(&self, path: String, expect: &Expect) -> Result<Value, GrafanaError> {
        Ok(self.client.call(&ApiRequest::get(path), expect)?.into_json())
    }

    fn post_permissions(&self, path: &str, permissions: &Value) -> Result<(), GrafanaError> {
        validation::non_empty_object("permissions", permissions)?;
        self.client.call(
            &ApiRequest::post(path, permissions)?,
            &Expect::field_equals("message", DASHBOARD_PERMISSIONS_UPDATED),
        )?;
        info!(path, "dashboard permissions updated");
        Ok(())
    }

    fn restore(&self, path: &str, version: i64) -> Result<(), GrafanaError> {
        validation::non_zero("version", version)?;
        self.client.call(
            &ApiRequest::post(path, &VersionRestore { version })?,
            &Expect::All(vec![
                Expect::field_equals("status", STATUS_SUCCESS),
                Expect::FieldAbsent("message"),
            ]),
        )?;
        info!(path, version, "dashboard version restored");
        Ok(())
    }
}

/// First search hit titled `name`. `None` when nothing matches; `Some(Err)`
/// when the hits are malformed.
fn identity_in(hits: &Value, name: &str) -> Option<Result<DashboardIdentity, GrafanaError>> {
    for hit in hits.as_array()? {
        let Some(title) = hit.get("title").and_then(Value::as_str) else {
            return Some(Err(GrafanaError::Resolution(
                "search hit without a title".to_string(),
            )));
        };
        if title != name {
            continue;
        }
        let uid = hit.get("uid").and_then(Value::as_str);
        let id = hit.get("id").and_then(Value::as_i64);
        return Some(match (uid, id) {
            (Some(uid), Some(id)) => Ok(DashboardIdentity {
                uid: uid.to_string(),
                id,
            }),
            _ => Err(GrafanaError::Resolution(format!(
                "dashboard '{name}' has no uid or id"
            ))),
        });
    }
    None
}
