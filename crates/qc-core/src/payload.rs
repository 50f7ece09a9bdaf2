//! Payloads exchanged with the upload and query service

use serde::{Deserialize, Serialize};

use crate::RowCollection;

/// Returned by the service after a file became a queryable table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: String,
    pub filename: String,
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: usize,
}

/// Natural-language question against an uploaded table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub table_name: String,
    pub question: String,
}

impl QueryRequest {
    pub fn new(table_name: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            question: question.into(),
        }
    }
}

/// Answer to a question: the generated query text and its result rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query_generated: String,
    pub data: RowCollection,
    #[serde(default = "default_ran_successfully")]
    pub ran_successfully: bool,
}

fn default_ran_successfully() -> bool {
    true
}

/// Error body sent with non-success statuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_response_decoding() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"query_generated": "SELECT city, SUM(sales) FROM t GROUP BY city",
                "data": [{"city": "Oslo", "sales": 12}, {"city": "Rome", "sales": 7.5}]}"#,
        )
        .unwrap();

        assert!(response.ran_successfully);
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data.columns(), vec!["city", "sales"]);
    }

    #[test]
    fn test_upload_receipt_without_message() {
        let receipt: UploadReceipt = serde_json::from_str(
            r#"{"filename": "sales.csv", "table_name": "sales", "columns": ["city", "sales"], "rows": 40}"#,
        )
        .unwrap();

        assert_eq!(receipt.table_name, "sales");
        assert_eq!(receipt.rows, 40);
        assert!(receipt.message.is_empty());
    }
}
