use reqwest::blocking::{Client, Response};
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{DocumentsPage, EventPayload, EventRecord};

use super::{CollectionStore, ListQuery, StoreError};

const PROJECT_HEADER: &str = "X-Appwrite-Project";

/// Connection settings for the hosted collection API.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
}

/// Blocking HTTP client for an Appwrite-style collection API. One
/// instance is shared across the submission pipeline and the list
/// fetch; reqwest pools the underlying connections.
pub struct HttpStore {
    client: Client,
    endpoint: Url,
    project_id: String,
    database_id: String,
}

impl HttpStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        // a trailing slash keeps Url::join from clobbering the last
        // path segment of the endpoint
        let mut raw_endpoint = config.endpoint;
        if !raw_endpoint.ends_with('/') {
            raw_endpoint.push('/');
        }
        let endpoint = Url::parse(&raw_endpoint)
            .map_err(|err| StoreError::Http(format!("invalid endpoint: {err}")))?;
        let client = Client::builder()
            .user_agent(concat!("muster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| StoreError::Http(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            project_id: config.project_id,
            database_id: config.database_id,
        })
    }

    fn documents_url(&self, collection: &str) -> Result<Url, StoreError> {
        self.endpoint
            .join(&format!(
                "databases/{}/collections/{collection}/documents",
                self.database_id
            ))
            .map_err(|err| StoreError::Http(err.to_string()))
    }

    fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        warn!(status = status.as_u16(), "store request rejected");
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl CollectionStore for HttpStore {
    fn create(&self, collection: &str, payload: &EventPayload) -> Result<EventRecord, StoreError> {
        let url = self.documents_url(collection)?;
        debug!(%url, collection, "creating document");
        let body = json!({
            "documentId": "unique()",
            "data": payload,
        });
        let response = self
            .client
            .post(url)
            .header(PROJECT_HEADER, &self.project_id)
            .json(&body)
            .send()
            .map_err(|err| StoreError::Http(err.to_string()))?;
        let response = Self::check_status(response)?;
        response
            .json::<EventRecord>()
            .map_err(|err| StoreError::Malformed(err.to_string()))
    }

    fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<EventRecord>, StoreError> {
        let mut url = self.documents_url(collection)?;
        for filter in &query.queries {
            url.query_pairs_mut().append_pair("queries[]", filter);
        }
        debug!(%url, collection, "listing documents");
        let response = self
            .client
            .get(url)
            .header(PROJECT_HEADER, &self.project_id)
            .send()
            .map_err(|err| StoreError::Http(err.to_string()))?;
        let response = Self::check_status(response)?;
        let page = response
            .json::<DocumentsPage>()
            .map_err(|err| StoreError::Malformed(err.to_string()))?;
        debug!(total = page.total, returned = page.documents.len(), "listing complete");
        Ok(page.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_url_addresses_the_collection() {
        let store = HttpStore::new(StoreConfig {
            endpoint: "https://cloud.example.com/v1/".to_string(),
            project_id: "proj".to_string(),
            database_id: "main".to_string(),
        })
        .unwrap();
        let url = store.documents_url("events").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.com/v1/databases/main/collections/events/documents"
        );
    }

    #[test]
    fn invalid_endpoint_is_reported_not_panicked() {
        let result = HttpStore::new(StoreConfig {
            endpoint: "not a url".to_string(),
            project_id: "proj".to_string(),
            database_id: "main".to_string(),
        });
        assert!(matches!(result, Err(StoreError::Http(_))));
    }
}
