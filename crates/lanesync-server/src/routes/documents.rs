use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use lanesync_core::{format, CreateDocument, DocumentCategory, DocumentMeta};
use lanesync_service::{DocumentService, ServiceError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/loads/{load_id}/documents",
            get(list_documents).post(upload_document),
        )
        .route(
            "/api/documents/{id}",
            get(get_document).delete(delete_document),
        )
        .route("/api/documents/{id}/content", get(download_document))
}

/// What the attachment panel renders per row: the stored metadata verbatim
/// plus display-layer fields. `category` stays whatever was uploaded;
/// `category_display` degrades unrecognized values to "Other".
#[derive(Debug, Serialize)]
struct DocumentView {
    id: String,
    load_id: String,
    category: String,
    category_display: &'static str,
    filename: String,
    mime_type: String,
    size_bytes: i64,
    size_display: String,
    uploaded_at_ms: i64,
    uploaded_at_display: String,
}

impl From<DocumentMeta> for DocumentView {
    fn from(m: DocumentMeta) -> Self {
        Self {
            category_display: DocumentCategory::from_label(&m.category).label(),
            size_display: format::human_size(m.size_bytes),
            uploaded_at_display: format::format_uploaded_at(m.uploaded_at_ms),
            id: m.id,
            load_id: m.load_id,
            category: m.category,
            filename: m.filename,
            mime_type: m.mime_type,
            size_bytes: m.size_bytes,
            uploaded_at_ms: m.uploaded_at_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    category: Option<String>,
}

async fn list_documents(
    State(state): State<AppState>,
    Path(load_id): Path<String>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let metas = match &q.category {
        Some(category) => {
            state
                .service
                .list_documents_by_category(&load_id, category)
                .await
        }
        None => state.service.list_documents(&load_id).await,
    }
    .map_err(to_error)?;

    let views: Vec<DocumentView> = metas.into_iter().map(Into::into).collect();
    Ok(Json(json!(views)))
}

async fn upload_document(
    State(state): State<AppState>,
    Path(load_id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mut category = String::new();
    let mut file: Option<(String, Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        match field.name() {
            Some("category") => {
                category = field.text().await.map_err(bad_multipart)?;
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime_type = field.content_type().map(|m| m.to_string());
                let content = field.bytes().await.map_err(bad_multipart)?;
                file = Some((filename, mime_type, content));
            }
            _ => {}
        }
    }

    let (filename, mime_type, content) = file.ok_or_else(|| {
        to_error(ServiceError::InvalidInput("file part is required".into()))
    })?;

    let input = CreateDocument {
        load_id,
        category,
        filename,
        mime_type,
        content,
    };
    let meta = state.service.save_document(&input).await.map_err(to_error)?;
    tracing::info!(id = %meta.id, load_id = %meta.load_id, "document uploaded");

    Ok((StatusCode::CREATED, Json(json!(DocumentView::from(meta)))))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.service.get_document(&id).await.map_err(to_error)? {
        Some(doc) => Ok(Json(json!(DocumentView::from(doc.meta())))),
        None => Err(not_found(&id)),
    }
}

async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    match state.service.get_document(&id).await.map_err(to_error)? {
        Some(doc) => Ok(Response::builder()
            .header(header::CONTENT_TYPE, doc.mime_type.as_str())
            .header(
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    doc.filename.replace('"', "'")
                ),
            )
            .body(Body::from(doc.content))
            .unwrap()),
        None => Err(not_found(&id)),
    }
}

async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state
        .service
        .delete_document(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(to_error)
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> (StatusCode, Json<Value>) {
    to_error(ServiceError::InvalidInput(format!("multipart: {e}")))
}

fn not_found(id: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("document {id} not found") })),
    )
}

fn to_error(e: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, msg) = match &e {
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        ServiceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": msg })))
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use crate::test_helpers::test_router;

    const BOUNDARY: &str = "lanesync-test-boundary";

    fn multipart_body(category: &str, filename: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"category\"\r\n\r\n\
             {category}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    fn upload_request(load_id: &str, body: String) -> Request<axum::body::Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/loads/{load_id}/documents"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = test_router();
        let resp = app
            .oneshot(Request::get("/api/health").body(axum::body::Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn upload_then_list_includes_display_fields() {
        let app = test_router();

        let resp = app
            .clone()
            .oneshot(upload_request(
                "LD-1",
                multipart_body("RateCon", "rate-con.pdf", "pdf-bytes"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        assert_eq!(created["category"], "RateCon");
        assert_eq!(created["category_display"], "Rate Con");

        let resp = app
            .oneshot(
                Request::get("/api/loads/LD-1/documents")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = body_json(resp).await;
        let rows = listed.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["filename"], "rate-con.pdf");
        assert_eq!(rows[0]["size_bytes"], 9);
        assert_eq!(rows[0]["size_display"], "9 B");
        assert!(rows[0]["uploaded_at_display"].as_str().unwrap().contains(':'));
    }

    #[tokio::test]
    async fn unrecognized_category_degrades_only_in_display() {
        let app = test_router();

        let resp = app
            .clone()
            .oneshot(upload_request(
                "LD-2",
                multipart_body("Customs Paperwork", "customs.pdf", "x"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(
                Request::get("/api/loads/LD-2/documents")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed = body_json(resp).await;
        // store keeps the truth, the view degrades gracefully
        assert_eq!(listed[0]["category"], "Customs Paperwork");
        assert_eq!(listed[0]["category_display"], "Other");
    }

    #[tokio::test]
    async fn upload_without_file_part_is_bad_request() {
        let app = test_router();
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"category\"\r\n\r\n\
             POD\r\n\
             --{BOUNDARY}--\r\n"
        );
        let resp = app.oneshot(upload_request("LD-3", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn download_sets_attachment_headers() {
        let app = test_router();

        let resp = app
            .clone()
            .oneshot(upload_request(
                "LD-4",
                multipart_body("BOL", "bol.pdf", "bill-of-lading"),
            ))
            .await
            .unwrap();
        let created = body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();

        let resp = app
            .oneshot(
                Request::get(format!("/api/documents/{id}/content"))
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"bol.pdf\""
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), b"bill-of-lading");
    }

    #[tokio::test]
    async fn missing_document_is_404_and_delete_is_idempotent() {
        let app = test_router();

        let resp = app
            .clone()
            .oneshot(
                Request::get("/api/documents/no-such-id")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app
            .clone()
            .oneshot(
                Request::get("/api/documents/no-such-id/content")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // delete of a missing id is a no-op success
        let resp = app
            .oneshot(
                Request::delete("/api/documents/no-such-id")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn category_query_filters_listing() {
        let app = test_router();

        for (cat, name) in [("RateCon", "rc.pdf"), ("POD", "pod.pdf"), ("POD", "pod2.pdf")] {
            let resp = app
                .clone()
                .oneshot(upload_request("LD-5", multipart_body(cat, name, "x")))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = app
            .oneshot(
                Request::get("/api/loads/LD-5/documents?category=POD")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let listed = body_json(resp).await;
        let rows = listed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["category"] == "POD"));
    }
}
