//! Seam to the remote upload and query service

pub mod http;

use std::path::Path;
use async_trait::async_trait;
use qc_core::{QueryRequest, QueryResponse, UploadReceipt};
use crate::DataError;

pub use http::HttpQueryService;

/// The remote service that stores uploads and answers questions
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Check that the service is reachable
    async fn health(&self) -> Result<(), DataError>;

    /// Upload a CSV or Excel file as a new table
    async fn upload(&self, path: &Path) -> Result<UploadReceipt, DataError>;

    /// Ask a natural-language question about an uploaded table
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, DataError>;
}
