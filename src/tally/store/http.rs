use super::DocumentStore;
use crate::error::{Result, TallyError};
use crate::model::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Document body as stored in the collection: a flat field map. The store
/// enforces no schema beyond `quantity` being numeric, so unknown fields in
/// a fetched body are ignored.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    quantity: u32,
}

/// Production store: a remote keyed document collection reached over HTTP.
///
/// Endpoints:
/// - `GET    {base}/collections/{coll}` — all documents, as a JSON object
///   mapping key to body
/// - `GET    {base}/collections/{coll}/{key}` — one document (404 = absent)
/// - `PUT    {base}/collections/{coll}/{key}` — create or overwrite
/// - `DELETE {base}/collections/{coll}/{key}` — remove (404 = already gone)
///
/// Keys are item names, written into the path verbatim. The agent is created
/// once and lives for the process; there is no explicit teardown.
pub struct HttpStore {
    agent: ureq::Agent,
    base_url: String,
    collection: String,
    api_key: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: &str, collection: &str) -> Self {
        Self::with_timeout(base_url, collection, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, collection: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn document_url(&self, name: &str) -> String {
        format!("{}/collections/{}/{}", self.base_url, self.collection, name)
    }

    fn auth_header(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Bearer {}", key))
    }

    fn unavailable(context: &str, detail: impl std::fmt::Display) -> TallyError {
        TallyError::StoreUnavailable(format!("{}: {}", context, detail))
    }
}

impl DocumentStore for HttpStore {
    fn fetch_all(&self) -> Result<Vec<Item>> {
        let url = self.collection_url();
        debug!(%url, "fetching collection");

        let mut request = self.agent.get(url.as_str());
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }

        let mut response = request
            .call()
            .map_err(|e| Self::unavailable("fetch failed", e))?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(Self::unavailable("fetch failed", format!("HTTP {}", status)));
        }

        let documents: BTreeMap<String, Document> = response
            .body_mut()
            .read_json()
            .map_err(|e| Self::unavailable("malformed collection body", e))?;

        debug!(count = documents.len(), "fetched collection");
        Ok(documents
            .into_iter()
            .map(|(name, doc)| Item::new(name, doc.quantity))
            .collect())
    }

    fn get(&self, name: &str) -> Result<Option<Item>> {
        let url = self.document_url(name);
        debug!(%url, "fetching document");

        let mut request = self.agent.get(url.as_str());
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }

        let mut response = request
            .call()
            .map_err(|e| Self::unavailable("get failed", e))?;
        match response.status().as_u16() {
            404 => Ok(None),
            status if (200..300).contains(&status) => {
                let doc: Document = response
                    .body_mut()
                    .read_json()
                    .map_err(|e| Self::unavailable("malformed document body", e))?;
                Ok(Some(Item::new(name, doc.quantity)))
            }
            status => Err(Self::unavailable("get failed", format!("HTTP {}", status))),
        }
    }

    fn upsert_quantity(&mut self, name: &str, quantity: u32) -> Result<()> {
        let url = self.document_url(name);
        debug!(%url, quantity, "writing document");

        let mut request = self.agent.put(url.as_str());
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }

        let response = request
            .send_json(&Document { quantity })
            .map_err(|e| Self::unavailable("write failed", e))?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(Self::unavailable("write failed", format!("HTTP {}", status)));
        }
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let url = self.document_url(name);
        debug!(%url, "deleting document");

        let mut request = self.agent.delete(url.as_str());
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }

        let response = request
            .call()
            .map_err(|e| Self::unavailable("delete failed", e))?;
        match response.status().as_u16() {
            // Deleting an absent record is a no-op, not an error.
            404 => Ok(()),
            status if (200..300).contains(&status) => Ok(()),
            status => Err(Self::unavailable(
                "delete failed",
                format!("HTTP {}", status),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let store = HttpStore::new("http://localhost:8765/", "inventory");
        assert_eq!(
            store.document_url("apple"),
            "http://localhost:8765/collections/inventory/apple"
        );
    }

    #[test]
    fn names_go_into_the_path_verbatim() {
        let store = HttpStore::new("http://localhost:8765", "inventory");
        // Case-sensitive keys: "Apple" and "apple" are different documents.
        assert_ne!(store.document_url("Apple"), store.document_url("apple"));
        assert_eq!(
            store.collection_url(),
            "http://localhost:8765/collections/inventory"
        );
    }
}
