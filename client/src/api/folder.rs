use grafana_common::{
    DASHBOARD_PERMISSIONS_UPDATED, Endpoint, FOLDER_PERMISSIONS_UPDATED, FolderEntry, FolderRef,
    FolderUpdate, NewFolder,
};
use serde_json::Value;
use tracing::info;

use crate::{
    ApiRequest, Expect, FolderResolver, FolderSource, GrafanaClient, GrafanaError, validation,
};

#[derive(Debug, Clone, Copy)]
pub struct FolderApi<'a> {
    client: &'a GrafanaClient,
}

impl<'a> FolderApi<'a> {
    pub(crate) const fn new(client: &'a GrafanaClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<FolderRef>, GrafanaError> {
        self.client
            .call(
                &ApiRequest::get(Endpoint::Folders.as_str()),
                &Expect::FirstElementHas("id"),
            )?
            .decode()
    }

    /// Title/id pairs of every folder. An empty listing is not an error here.
    ///
    /// A title or id of the wrong JSON type reads as missing, so the resolver
    /// reports the malformed entry instead of the whole listing failing.
    pub fn entries(&self) -> Result<Vec<FolderEntry>, GrafanaError> {
        let listing: Vec<Value> = self
            .client
            .call(&ApiRequest::get(Endpoint::Folders.as_str()), &Expect::IsArray)?
            .decode()?;
        Ok(listing
            .iter()
            .map(|entry| FolderEntry {
                title: entry.get("title").and_then(Value::as_str).map(str::to_string),
                id: entry.get("id").and_then(Value::as_i64),
            })
            .collect())
    }

    pub fn get_by_uid(&self, uid: &str) -> Result<FolderRef, GrafanaError> {
        let segment = validation::path_segment("folder uid", uid)?;
        self.client
            .call(
                &ApiRequest::get(format!("{}/{segment}", Endpoint::Folders)),
                &Expect::FieldPresent("id"),
            )?
            .decode()
    }

    pub fn get_by_id(&self, id: i64) -> Result<FolderRef, GrafanaError> {
        validation::non_zero("folder id", id)?;
        self.client
            .call(
                &ApiRequest::get(format!("{}/id/{id}", Endpoint::Folders)),
                &Expect::FieldPresent("id"),
            )?
            .decode()
    }

    pub fn create(&self, title: &str, uid: Option<&str>) -> Result<FolderRef, GrafanaError> {
        validation::non_empty("folder title", title)?;
        if let Some(uid) = uid {
            validation::non_empty("folder uid", uid)?;
        }
        let request = ApiRequest::post(Endpoint::Folders.as_str(), &NewFolder { title, uid })?;
        let folder = self
            .client
            .call(&request, &Expect::FieldPresent("id"))?
            .decode()?;
        info!(title, "folder created");
        Ok(folder)
    }

    /// Grafana needs either the folder's current `version` or `overwrite`.
    pub fn update(
        &self,
        uid: &str,
        title: &str,
        version: Option<i64>,
        overwrite: bool,
    ) -> Result<FolderRef, GrafanaError> {
        let segment = validation::path_segment("folder uid", uid)?;
        validation::non_empty("folder title", title)?;
        if version.is_none() && !overwrite {
            return Err(GrafanaError::invalid(
                "folder update needs a version or overwrite",
            ));
        }
        let body = FolderUpdate {
            title,
            version,
            overwrite,
        };
        let request = ApiRequest::put(format!("{}/{segment}", Endpoint::Folders), &body)?;
        let folder = self
            .client
            .call(&request, &Expect::FieldPresent("id"))?
            .decode()?;
        info!(uid, title, "folder updated");
        Ok(folder)
    }

    pub fn delete(&self, uid: &str) -> Result<(), GrafanaError> {
        let segment = validation::path_segment("folder uid", uid)?;
        self.client.call(
            &ApiRequest::delete(format!("{}/{segment}", Endpoint::Folders)),
            &Expect::Status(200),
        )?;
        info!(uid, "folder deleted");
        Ok(())
    }

    pub fn permissions(&self, uid: &str) -> Result<Value, GrafanaError> {
        let segment = validation::path_segment("folder uid", uid)?;
        Ok(self
            .client
            .call(
                &ApiRequest::get(format!("{}/{segment}/permissions", Endpoint::Folders)),
                &Expect::FirstElementHas("folderId"),
            )?
            .into_json())
    }

    pub fn update_permissions(&self, uid: &str, permissions: &Value) -> Result<(), GrafanaError> {
        let segment = validation::path_segment("folder uid", uid)?;
        validation::non_empty_object("permissions", permissions)?;
        let request = ApiRequest::post(
            format!("{}/{segment}/permissions", Endpoint::Folders),
            permissions,
        )?;
        self.client.call(
            &request,
            &Expect::Any(vec![
                Expect::field_equals("message", FOLDER_PERMISSIONS_UPDATED),
                Expect::field_equals("message", DASHBOARD_PERMISSIONS_UPDATED),
            ]),
        )?;
        info!(uid, "folder permissions updated");
        Ok(())
    }

    /// See [`FolderResolver::resolve`].
    pub fn resolve_folder_id(&self, path: &str) -> Result<i64, GrafanaError> {
        FolderResolver::new(*self).resolve(path)
    }
}

impl FolderSource for FolderApi<'_> {
    fn list_folders(&self) -> Result<Vec<FolderEntry>, GrafanaError> {
        self.entries()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use crate::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<RecordingTransport>, GrafanaClient) {
        let spy = Arc::new(RecordingTransport::new());
        let client = GrafanaClient::with_transport(Arc::clone(&spy));
        (spy, client)
    }

    #[test]
    fn test_list() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"id":12,"uid":"a","title":"Team A"}]"#);

        let folders = client.folder().list().unwrap();
        assert_eq!(
            folders,
            vec![FolderRef {
                id: 12,
                uid: "a".to_string(),
                title: "Team A".to_string()
            }]
        );
        assert_eq!(spy.requests()[0].path, "/folders");
    }

    #[test]
    fn test_list_empty_is_error() {
        let (spy, client) = setup();
        spy.respond(200, "[]");
        assert!(matches!(
            client.folder().list(),
            Err(GrafanaError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn test_entries_empty_is_ok() {
        let (spy, client) = setup();
        spy.respond(200, "[]");
        assert!(client.folder().entries().unwrap().is_empty());
    }

    #[test]
    fn test_entries_projection() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"title":"test","id":12,"test":"test"}]"#);
        assert_eq!(
            client.folder().entries().unwrap(),
            vec![FolderEntry::new("test", 12)]
        );
    }

    #[test]
    fn test_entries_wrong_types_read_as_missing() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"title":42,"id":7},{"title":"Team A","id":"8"}]"#);
        assert_eq!(
            client.folder().entries().unwrap(),
            vec![
                FolderEntry {
                    title: None,
                    id: Some(7)
                },
                FolderEntry {
                    title: Some("Team A".to_string()),
                    id: None
                },
            ]
        );
    }

    #[test]
    fn test_get_by_uid() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"id":12,"uid":"xty13y","title":"Team A"}"#);
        let folder = client.folder().get_by_uid("xty13y").unwrap();
        assert_eq!(folder.id, 12);
        assert_eq!(spy.requests()[0].path, "/folders/xty13y");
    }

    #[test]
    fn test_get_by_uid_empty_uid() {
        let (spy, client) = setup();
        assert!(matches!(
            client.folder().get_by_uid(""),
            Err(GrafanaError::InvalidArgument(_))
        ));
        assert!(spy.requests().is_empty());
    }

    #[test]
    fn test_get_by_uid_error_response() {
        let (spy, client) = setup();
        spy.respond(404, r#"{"message":"folder not found"}"#);
        let err = client.folder().get_by_uid("xty13y").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_by_id() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"id":12,"uid":"a","title":"Team A"}"#);
        assert_eq!(client.folder().get_by_id(12).unwrap().uid, "a");
        assert_eq!(spy.requests()[0].path, "/folders/id/12");
    }

    #[test]
    fn test_get_by_id_zero() {
        let (spy, client) = setup();
        assert!(matches!(
            client.folder().get_by_id(0),
            Err(GrafanaError::InvalidArgument(_))
        ));
        assert!(spy.requests().is_empty());
    }

    #[test]
    fn test_create() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"id":12,"uid":"test","title":"test"}"#);
        let folder = client.folder().create("test", Some("test")).unwrap();
        assert_eq!(folder.uid, "test");

        let request = &spy.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/folders");
        assert_eq!(request.body, Some(json!({"title": "test", "uid": "test"})));
    }

    #[test]
    fn test_create_no_title() {
        let (spy, client) = setup();
        assert!(matches!(
            client.folder().create("", None),
            Err(GrafanaError::InvalidArgument(_))
        ));
        assert!(spy.requests().is_empty());
    }

    #[test]
    fn test_create_error_response() {
        let (spy, client) = setup();
        spy.respond(409, r#"{"message":"a folder with the same name already exists"}"#);
        assert!(matches!(
            client.folder().create("test", None),
            Err(GrafanaError::UnexpectedResponse { status: 409, .. })
        ));
    }

    #[test]
    fn test_update_with_version() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"id":12,"uid":"test","title":"test1"}"#);
        let folder = client.folder().update("test", "test1", Some(10), false).unwrap();
        assert_eq!(folder.title, "test1");

        let request = &spy.requests()[0];
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/folders/test");
        assert_eq!(
            request.body,
            Some(json!({"title": "test1", "version": 10, "overwrite": false}))
        );
    }

    #[test]
    fn test_update_with_overwrite() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"id":12,"uid":"test","title":"test"}"#);
        assert!(client.folder().update("test", "test", None, true).is_ok());
        assert_eq!(
            spy.requests()[0].body,
            Some(json!({"title": "test", "overwrite": true}))
        );
    }

    #[test]
    fn test_update_needs_version_or_overwrite() {
        let (spy, client) = setup();
        assert!(matches!(
            client.folder().update("test", "test", None, false),
            Err(GrafanaError::InvalidArgument(_))
        ));
        assert!(spy.requests().is_empty());
    }

    #[test]
    fn test_delete() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"message":"Folder deleted","id":2}"#);
        client.folder().delete("test").unwrap();
        assert_eq!(spy.count(&Method::DELETE), 1);
    }

    #[test]
    fn test_delete_error_response() {
        let (spy, client) = setup();
        spy.respond(404, r#"{"message":"folder not found"}"#);
        assert!(client.folder().delete("test").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_uid_stays_one_segment() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"message":"Folder deleted","id":2}"#);
        client.folder().delete("../dashboards/uid/victim").unwrap();
        assert_eq!(
            spy.requests()[0].path,
            "/folders/..%2Fdashboards%2Fuid%2Fvictim"
        );

        for dots in [".", ".."] {
            assert!(matches!(
                client.folder().delete(dots),
                Err(GrafanaError::InvalidArgument(_))
            ));
        }
        assert_eq!(spy.requests().len(), 1);
    }

    #[test]
    fn test_delete_no_uid() {
        let (spy, client) = setup();
        assert!(matches!(
            client.folder().delete(""),
            Err(GrafanaError::InvalidArgument(_))
        ));
        assert!(spy.requests().is_empty());
    }

    #[test]
    fn test_permissions() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"folderId":"test"}]"#);
        assert_eq!(
            client.folder().permissions("test").unwrap(),
            json!([{"folderId": "test"}])
        );
        assert_eq!(spy.requests()[0].path, "/folders/test/permissions");
    }

    #[test]
    fn test_permissions_error_response() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"test":"test"}]"#);
        assert!(client.folder().permissions("test").is_err());
    }

    #[test]
    fn test_update_permissions() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"message":"Folder permissions updated"}"#);
        let items = json!({"items": [{"role": "Viewer", "permission": 1}]});
        client.folder().update_permissions("test", &items).unwrap();

        let request = &spy.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.as_ref(), Some(&items));
    }

    #[test]
    fn test_update_permissions_error_response() {
        let (spy, client) = setup();
        spy.respond(200, r#"{"message":"test"}"#);
        assert!(client
            .folder()
            .update_permissions("test", &json!({"test": "test"}))
            .is_err());
    }

    #[test]
    fn test_update_permissions_empty_document() {
        let (spy, client) = setup();
        assert!(matches!(
            client.folder().update_permissions("test", &json!({})),
            Err(GrafanaError::InvalidArgument(_))
        ));
        assert!(spy.requests().is_empty());
    }

    #[test]
    fn test_resolve_folder_id_through_listing() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"title":"Team A","id":7}]"#);
        spy.respond(200, r#"[{"title":"Team A","id":7}]"#);

        assert_eq!(client.folder().resolve_folder_id("Team A").unwrap(), 7);
        assert!(matches!(
            client.folder().resolve_folder_id("Team B"),
            Err(GrafanaError::Resolution(_))
        ));
        assert_eq!(spy.count(&Method::GET), 2);
    }

    #[test]
    fn test_resolve_reports_wrongly_typed_entries() {
        let (spy, client) = setup();
        spy.respond(200, r#"[{"title":"Team A","id":"7"},{"title":"Team B","id":8}]"#);
        spy.respond(200, r#"[{"title":42,"id":7},{"title":"Team A","id":8}]"#);

        assert!(matches!(
            client.folder().resolve_folder_id("Team A"),
            Err(GrafanaError::Resolution(ref m)) if m == "folder 'Team A' has no id"
        ));
        assert!(matches!(
            client.folder().resolve_folder_id("Team A"),
            Err(GrafanaError::Resolution(ref m)) if m.contains("without a title")
        ));
    }

    #[test]
    fn test_resolve_general_without_request() {
        let (spy, client) = setup();
        assert_eq!(client.folder().resolve_folder_id("General").unwrap(), 0);
        assert!(spy.requests().is_empty());
    }
}
