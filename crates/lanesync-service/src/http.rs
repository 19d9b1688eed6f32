use async_trait::async_trait;
use lanesync_core::{CreateDocument, Document, DocumentMeta};
use reqwest::{Client, StatusCode};

use crate::{DocumentService, ServiceError};

/// Async HTTP client implementation of DocumentService.
/// Connects to a running lanesync-server.
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Check if the server is reachable.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("connection failed: {e}")))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::Internal(format!(
                "health check failed: {}",
                resp.status()
            )))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

async fn parse_error(resp: reqwest::Response) -> ServiceError {
    let status = resp.status();
    parse_error_with_status(status, resp).await
}

async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> ServiceError {
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        ServiceError::NotFound(msg)
    } else if status == StatusCode::BAD_REQUEST {
        ServiceError::InvalidInput(msg)
    } else {
        ServiceError::Internal(msg)
    }
}

#[async_trait]
impl DocumentService for HttpService {
    async fn list_documents(&self, load_id: &str) -> Result<Vec<DocumentMeta>, ServiceError> {
        if load_id.is_empty() {
            return Ok(Vec::new());
        }
        self.get_json(&format!("/api/loads/{load_id}/documents"))
            .await
    }

    async fn list_documents_by_category(
        &self,
        load_id: &str,
        category: &str,
    ) -> Result<Vec<DocumentMeta>, ServiceError> {
        if load_id.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .client
            .get(format!("{}/api/loads/{load_id}/documents", self.base_url))
            .query(&[("category", category)])
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn save_document(&self, input: &CreateDocument) -> Result<DocumentMeta, ServiceError> {
        if input.load_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput("load_id is required".into()));
        }

        let mut part = reqwest::multipart::Part::bytes(input.content.to_vec())
            .file_name(input.filename.clone());
        if let Some(mime) = &input.mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| ServiceError::InvalidInput(format!("mime type: {e}")))?;
        }
        let form = reqwest::multipart::Form::new()
            .text("category", input.category.clone())
            .part("file", part);

        let resp = self
            .client
            .post(format!(
                "{}/api/loads/{}/documents",
                self.base_url, input.load_id
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        // Metadata first; a 404 here means the id is stale (already deleted),
        // which the panel treats as a silent no-op.
        let meta: DocumentMeta = match self.get_json(&format!("/api/documents/{id}")).await {
            Ok(meta) => meta,
            Err(ServiceError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let resp = self
            .client
            .get(format!("{}/api/documents/{id}/content", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(parse_error(resp).await);
        }
        let content = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::Internal(format!("read body: {e}")))?;

        Ok(Some(Document {
            id: meta.id,
            load_id: meta.load_id,
            category: meta.category,
            filename: meta.filename,
            mime_type: meta.mime_type,
            size_bytes: meta.size_bytes,
            uploaded_at_ms: meta.uploaded_at_ms,
            content,
        }))
    }

    async fn delete_document(&self, id: &str) -> Result<(), ServiceError> {
        let resp = self
            .client
            .delete(format!("{}/api/documents/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }
}
