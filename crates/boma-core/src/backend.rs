//! Connection handle for the hosted platform.
//!
//! A [`Backend`] is constructed once from [`BackendConfig`] and passed by
//! reference to whatever needs it; [`Backend::shared`] additionally keeps a
//! process-wide instance behind an explicit check-then-create guard so
//! repeated initialization reuses the existing handle. Three capability
//! handles hang off it: [`Auth`], [`Documents`], and [`Storage`].

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::config::BackendConfig;
use crate::error::StoreError;

static SHARED: OnceLock<Backend> = OnceLock::new();

/// Client handle for the hosted platform.
pub struct Backend {
    config: BackendConfig,
    http: ureq::Agent,
}

impl Backend {
    /// Construct a handle from an explicit configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        let http = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, http }
    }

    /// The process-wide handle. The first call builds it from the
    /// environment; later calls return the existing instance unchanged.
    pub fn shared() -> Result<&'static Self, StoreError> {
        if let Some(backend) = SHARED.get() {
            return Ok(backend);
        }
        let backend = Self::new(BackendConfig::from_env()?);
        Ok(SHARED.get_or_init(|| backend))
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Credentials handle.
    #[must_use]
    pub fn auth(&self) -> Auth<'_> {
        Auth { config: &self.config }
    }

    /// Document store handle.
    #[must_use]
    pub fn documents(&self) -> Documents<'_> {
        Documents { backend: self }
    }

    /// File storage handle.
    #[must_use]
    pub fn storage(&self) -> Storage<'_> {
        Storage { config: &self.config }
    }
}

/// Authentication capability: request credentials and the sign-in host.
pub struct Auth<'a> {
    config: &'a BackendConfig,
}

impl Auth<'_> {
    /// `Authorization` header value for hosted-platform requests.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }

    /// Host handling sign-in flows for this project.
    #[must_use]
    pub fn auth_host(&self) -> &str {
        &self.config.auth_host
    }
}

/// File storage capability: object addressing in the project bucket.
pub struct Storage<'a> {
    config: &'a BackendConfig,
}

impl Storage<'_> {
    /// The bucket backing this project.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.storage_bucket
    }

    /// Public URL of an object in the project bucket.
    #[must_use]
    pub fn object_url(&self, path: &str) -> String {
        format!(
            "https://{}/v1/buckets/{}/objects/{}",
            self.config.api_host,
            self.config.storage_bucket,
            path.trim_start_matches('/')
        )
    }
}

/// One stored document: the opaque identifier plus the field payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    id: String,
}

/// Document store capability: collection listing and single-document insert.
///
/// The wire protocol belongs to the hosted store and is treated as opaque
/// beyond these two calls; there is no update, delete, or query surface.
pub struct Documents<'a> {
    backend: &'a Backend,
}

impl Documents<'_> {
    fn collection_url(&self, collection: &str) -> String {
        let config = self.backend.config();
        format!(
            "https://{}/v1/projects/{}/collections/{}/documents",
            config.api_host, config.project_id, collection
        )
    }

    /// Fetch every document in `collection`, in whatever order the store
    /// returns them.
    pub fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(collection);
        tracing::debug!(collection, "listing documents");

        let response = self
            .backend
            .http
            .get(&url)
            .set("Authorization", &self.backend.auth().bearer())
            .set("X-App-Id", &self.backend.config().app_id)
            .call()
            .map_err(|err| StoreError::BackendUnavailable {
                reason: err.to_string(),
            })?;

        let listing: ListResponse =
            response
                .into_json()
                .map_err(|err| StoreError::BackendUnavailable {
                    reason: format!("undecodable listing payload: {err}"),
                })?;
        Ok(listing.documents)
    }

    /// Insert one document into `collection`; the store assigns and returns
    /// its identifier.
    pub fn insert(
        &self,
        collection: &str,
        fields: serde_json::Value,
    ) -> Result<String, StoreError> {
        let url = self.collection_url(collection);
        tracing::debug!(collection, "inserting document");

        let response = self
            .backend
            .http
            .post(&url)
            .set("Authorization", &self.backend.auth().bearer())
            .set("X-App-Id", &self.backend.config().app_id)
            .send_json(serde_json::json!({ "fields": fields }))
            .map_err(|err| match err {
                ureq::Error::Status(status, response) => StoreError::WriteRejected {
                    status,
                    reason: response.status_text().to_string(),
                },
                other => StoreError::BackendUnavailable {
                    reason: other.to_string(),
                },
            })?;

        let inserted: InsertResponse =
            response
                .into_json()
                .map_err(|err| StoreError::BackendUnavailable {
                    reason: format!("undecodable insert response: {err}"),
                })?;
        Ok(inserted.id)
    }
}

#[cfg(test)]
mod tests {
    use super::Backend;
    use crate::config::BackendConfig;
    use std::time::Duration;

    fn test_config() -> BackendConfig {
        BackendConfig {
            api_key: "key-123".into(),
            project_id: "cdp-demo".into(),
            api_host: "store.example.net".into(),
            auth_host: "auth.example.net".into(),
            storage_bucket: "cdp-demo-files".into(),
            app_id: "app-7".into(),
            timeout: Duration::from_millis(500),
        }
    }

    #[test]
    fn auth_handle_builds_bearer_credentials() {
        let backend = Backend::new(test_config());
        assert_eq!(backend.auth().bearer(), "Bearer key-123");
        assert_eq!(backend.auth().auth_host(), "auth.example.net");
    }

    #[test]
    fn storage_handle_addresses_the_bucket() {
        let backend = Backend::new(test_config());
        assert_eq!(backend.storage().bucket(), "cdp-demo-files");
        assert_eq!(
            backend.storage().object_url("/reports/q1.pdf"),
            "https://store.example.net/v1/buckets/cdp-demo-files/objects/reports/q1.pdf"
        );
    }

    #[test]
    fn documents_handle_addresses_the_collection() {
        let backend = Backend::new(test_config());
        let url = backend.documents().collection_url("projects");
        assert_eq!(
            url,
            "https://store.example.net/v1/projects/cdp-demo/collections/projects/documents"
        );
    }

    #[test]
    fn unreachable_host_reports_backend_unavailable() {
        let mut config = test_config();
        // Reserved TLD, never resolvable.
        config.api_host = "store.invalid".into();
        let backend = Backend::new(config);
        let err = backend.documents().list("projects").unwrap_err();
        assert_eq!(err.error_code(), "E3001");
    }
}
