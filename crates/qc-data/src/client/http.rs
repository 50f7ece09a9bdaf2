//! HTTP implementation of [`QueryService`]

use std::path::Path;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use qc_core::{QueryRequest, QueryResponse, ServiceErrorBody, UploadReceipt};

use super::QueryService;
use crate::config::ClientConfig;
use crate::{DataError, UNEXPECTED_ERROR};

/// Accepted upload extensions and their content types
const UPLOAD_FORMATS: &[(&str, &str)] = &[
    ("csv", "text/csv"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
];

#[derive(Debug, Deserialize)]
struct HealthStatus {
    #[serde(default)]
    status: String,
}

/// Talks to the service over its JSON API
#[derive(Debug, Clone)]
pub struct HttpQueryService {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpQueryService {
    pub fn new(config: ClientConfig) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn health(&self) -> Result<(), DataError> {
        let response = self.client.get(self.config.endpoint("health")).send().await?;
        let health: HealthStatus = decode(response).await?;
        tracing::debug!("Service health: {}", health.status);
        Ok(())
    }

    async fn upload(&self, path: &Path) -> Result<UploadReceipt, DataError> {
        let content_type = upload_content_type(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        tracing::info!("Uploading '{}' ({} bytes)", filename, bytes.len());

        let part = Part::bytes(bytes).file_name(filename).mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let receipt: UploadReceipt = decode(response).await?;

        tracing::info!(
            "Created table '{}' with {} rows and columns {:?}",
            receipt.table_name,
            receipt.rows,
            receipt.columns
        );
        Ok(receipt)
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, DataError> {
        tracing::info!("Asking '{}' about table '{}'", request.question, request.table_name);

        let response = self
            .client
            .post(self.config.endpoint("query"))
            .json(request)
            .send()
            .await?;
        let answer: QueryResponse = decode(response).await?;

        tracing::info!("Query returned {} rows", answer.data.len());
        tracing::debug!("Generated query: {}", answer.query_generated);
        Ok(answer)
    }
}

/// Content type for an uploadable file, judged by extension only
pub fn upload_content_type(path: &Path) -> Result<&'static str, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    UPLOAD_FORMATS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
        .ok_or_else(|| DataError::UnsupportedFile(path.display().to_string()))
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DataError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let error = service_error(status.as_u16(), &body);
    tracing::error!("Service request failed: {}", error);
    Err(error)
}

/// Error carrying the service's `detail` message, or a generic one
fn service_error(status: u16, body: &str) -> DataError {
    let detail = serde_json::from_str::<ServiceErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| UNEXPECTED_ERROR.to_string());
    DataError::Service { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};
    use axum::{http::StatusCode, Json, Router};
    use serde_json::{json, Value};

    #[test]
    fn test_upload_content_types() {
        assert_eq!(upload_content_type(Path::new("a.csv")).unwrap(), "text/csv");
        assert_eq!(
            upload_content_type(Path::new("b.XLSX")).unwrap(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(matches!(
            upload_content_type(Path::new("notes.txt")),
            Err(DataError::UnsupportedFile(_))
        ));
        assert!(upload_content_type(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_service_error_detail() {
        match service_error(500, r#"{"detail": "no such table: sales"}"#) {
            DataError::Service { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, "no such table: sales");
            }
            other => panic!("unexpected error {:?}", other),
        }

        match service_error(502, "<html>Bad Gateway</html>") {
            DataError::Service { detail, .. } => assert_eq!(detail, UNEXPECTED_ERROR),
            other => panic!("unexpected error {:?}", other),
        }
    }

    async fn serve(router: Router) -> HttpQueryService {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpQueryService::new(ClientConfig::default().with_api_url(format!("http://{}", addr))).unwrap()
    }

    #[tokio::test]
    async fn test_query_round_trip() {
        let router = Router::new()
            .route("/api/health", get(|| async { Json(json!({"status": "ok"})) }))
            .route(
                "/api/query",
                post(|Json(request): Json<Value>| async move {
                    assert_eq!(request["table_name"], "sales");
                    Json(json!({
                        "query_generated": "SELECT city, total FROM sales",
                        "data": [{"city": "Oslo", "total": 3}, {"city": "Rome", "total": 5}],
                        "ran_successfully": true,
                    }))
                }),
            );
        let service = serve(router).await;

        service.health().await.unwrap();
        let answer = service
            .query(&QueryRequest::new("sales", "total per city"))
            .await
            .unwrap();

        assert_eq!(answer.query_generated, "SELECT city, total FROM sales");
        assert_eq!(answer.data.columns(), vec!["city", "total"]);
        assert_eq!(answer.data.len(), 2);
    }

    #[tokio::test]
    async fn test_query_error_detail() {
        let router = Router::new().route(
            "/api/query",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "model unavailable"})),
                )
            }),
        );
        let service = serve(router).await;

        let error = service
            .query(&QueryRequest::new("sales", "anything"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            DataError::Service { status: 500, ref detail } if detail == "model unavailable"
        ));
    }

    #[tokio::test]
    async fn test_unsupported_upload_rejected_before_io() {
        let service = HttpQueryService::new(ClientConfig::default()).unwrap();
        let error = service.upload(Path::new("/nonexistent/report.pdf")).await.unwrap_err();
        assert!(matches!(error, DataError::UnsupportedFile(_)));
    }
}
