//! Firestore REST API client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FirestoreError, FirestoreResult};
use crate::token_cache::TokenCache;
use crate::types::{Document, ListDocumentsResponse, Value};

/// Document store client configuration.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database_id: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl FirestoreConfig {
    pub fn from_env() -> FirestoreResult<Self> {
        Ok(Self {
            project_id: std::env::var("GCP_PROJECT_ID")
                .or_else(|_| std::env::var("FIREBASE_PROJECT_ID"))
                .map_err(|_| FirestoreError::auth_error("GCP_PROJECT_ID not set"))?,
            database_id: std::env::var("FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|_| "(default)".to_string()),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        })
    }
}

/// Firestore REST API client, the document store used for users, video
/// jobs, and notification delivery logs.
pub struct FirestoreClient {
    http: Client,
    tokens: Arc<TokenCache>,
    config: FirestoreConfig,
    base_url: String,
}

impl Clone for FirestoreClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            tokens: Arc::clone(&self.tokens),
            config: self.config.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl FirestoreClient {
    pub async fn new(config: FirestoreConfig) -> FirestoreResult<Self> {
        let auth = gcp_auth::provider()
            .await
            .map_err(|e| FirestoreError::auth_error(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FirestoreError::Network)?;

        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents",
            config.project_id, config.database_id
        );

        Ok(Self {
            http,
            tokens: Arc::new(TokenCache::new(auth)),
            config,
            base_url,
        })
    }

    pub async fn from_env() -> FirestoreResult<Self> {
        let config = FirestoreConfig::from_env()?;
        Self::new(config).await
    }

    fn document_path(&self, collection: &str, doc_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, doc_id)
    }

    pub async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> FirestoreResult<Option<Document>> {
        let url = self.document_path(collection, doc_id);
        let token = self.tokens.get_token().await?;

        let response = self.http.get(&url).bearer_auth(&token).send().await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(FirestoreError::request_failed(format!(
                    "GET {url} failed with {status}: {body}"
                )))
            }
        }
    }

    pub async fn create_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
    ) -> FirestoreResult<Document> {
        let url = format!("{}/{}?documentId={}", self.base_url, collection, doc_id);
        let token = self.tokens.get_token().await?;

        let body = Document::new(fields);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(response.json().await?),
            StatusCode::CONFLICT => {
                Err(FirestoreError::AlreadyExists(format!("{collection}/{doc_id}")))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(FirestoreError::request_failed(format!(
                    "POST {url} failed with {status}: {body}"
                )))
            }
        }
    }

    /// Updates a document, replacing exactly the fields in `update_mask`.
    pub async fn update_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
        update_mask: Vec<String>,
    ) -> FirestoreResult<Document> {
        let mask_params: Vec<String> = update_mask
            .iter()
            .map(|f| format!("updateMask.fieldPaths={f}"))
            .collect();
        let url = format!("{}?{}", self.document_path(collection, doc_id), mask_params.join("&"));

        let token = self.tokens.get_token().await?;
        let body = Document::new(fields);

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => {
                Err(FirestoreError::not_found(format!("{collection}/{doc_id}")))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(FirestoreError::request_failed(format!(
                    "PATCH {url} failed with {status}: {body}"
                )))
            }
        }
    }

    pub async fn delete_document(&self, collection: &str, doc_id: &str) -> FirestoreResult<()> {
        let url = self.document_path(collection, doc_id);
        let token = self.tokens.get_token().await?;

        let response = self.http.delete(&url).bearer_auth(&token).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => {
                debug!("document {}/{} already deleted", collection, doc_id);
                Ok(())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(FirestoreError::request_failed(format!(
                    "DELETE {url} failed with {status}: {body}"
                )))
            }
        }
    }

    pub async fn list_documents(
        &self,
        collection: &str,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> FirestoreResult<ListDocumentsResponse> {
        let mut url = format!("{}/{}", self.base_url, collection);

        let mut params = Vec::new();
        if let Some(size) = page_size {
            params.push(format!("pageSize={size}"));
        }
        if let Some(token) = page_token {
            params.push(format!("pageToken={token}"));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }

        let token = self.tokens.get_token().await?;
        let response = self.http.get(&url).bearer_auth(&token).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(FirestoreError::request_failed(format!(
                    "LIST {url} failed with {status}: {body}"
                )))
            }
        }
    }

    /// Runs a structured query for documents in `collection` where
    /// `field` equals `value`, via Firestore's `:runQuery` endpoint.
    ///
    /// This is the only secondary-index lookup this client supports; it
    /// backs "find user by email" and "list jobs for this user".
    pub async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> FirestoreResult<Vec<Document>> {
        let url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents:runQuery",
            self.config.project_id, self.config.database_id
        );
        let token = self.tokens.get_token().await?;

        let request = RunQueryRequest {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: collection.to_string(),
                }],
                r#where: FieldFilterWrapper {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: field.to_string(),
                        },
                        op: "EQUAL".to_string(),
                        value,
                    },
                },
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FirestoreError::request_failed(format!(
                "runQuery {collection} failed with {status}: {body}"
            )));
        }

        let results: Vec<RunQueryResponseItem> = response.json().await?;
        Ok(results.into_iter().filter_map(|r| r.document).collect())
    }

    pub async fn with_retry<T, F, Fut>(&self, operation_name: &str, operation: F) -> FirestoreResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = FirestoreResult<T>>,
    {
        let retry_config = crate::retry::RetryConfig {
            max_retries: self.config.max_retries,
            ..crate::retry::RetryConfig::from_env()
        };
        crate::retry::with_retry(&retry_config, operation_name, operation).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryRequest {
    structured_query: StructuredQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredQuery {
    from: Vec<CollectionSelector>,
    r#where: FieldFilterWrapper,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldFilterWrapper {
    field_filter: FieldFilter,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldFilter {
    field: FieldReference,
    op: String,
    value: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryResponseItem {
    document: Option<Document>,
}
