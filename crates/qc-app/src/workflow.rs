//! Upload, ask and chart, wired through the shared application state

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};

use qc_chart::{ChartSession, ChartStatus};
use qc_core::events::events::{ChartSelectionChanged, UploadCompleted};
use qc_core::{handler_from_fn, AppState, QueryRequest, RowCollection};
use qc_data::QueryService;

use crate::cli::ChartArgs;

/// Rows echoed to the log after a query
const PREVIEW_ROWS: usize = 5;

pub struct Workflow {
    state: AppState,
    service: Arc<dyn QueryService>,
}

impl Workflow {
    pub fn new(service: Arc<dyn QueryService>) -> Self {
        let state = AppState::new();

        state.event_bus.subscribe::<UploadCompleted>(handler_from_fn(|event| {
            if let Some(event) = event.as_any().downcast_ref::<UploadCompleted>() {
                debug!(
                    "Upload event: table '{}' ({} rows, {} columns)",
                    event.table_name, event.row_count, event.column_count
                );
            }
        }));
        state.event_bus.subscribe::<ChartSelectionChanged>(handler_from_fn(|event| {
            if let Some(event) = event.as_any().downcast_ref::<ChartSelectionChanged>() {
                debug!(
                    "Chart selection: {} x={:?} y={:?} (user: {})",
                    event.kind, event.x, event.y, event.user_selected
                );
            }
        }));

        Self { state, service }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn health(&self) -> Result<JsonValue> {
        self.service
            .health()
            .await
            .context("Query service is not reachable")?;
        info!("Query service is healthy");
        Ok(json!({ "status": "ok" }))
    }

    pub async fn upload(&self, file: &Path) -> Result<JsonValue> {
        let receipt = self
            .service
            .upload(file)
            .await
            .with_context(|| format!("Failed to upload {}", file.display()))?;

        let output = serde_json::to_value(&receipt)?;
        self.state.set_upload(receipt);
        Ok(output)
    }

    /// Ask about `table`, or about the last uploaded table when `None`
    pub async fn ask(&self, table: Option<&str>, question: &str, chart: &ChartArgs) -> Result<JsonValue> {
        let table_name = match table {
            Some(table) => table.to_string(),
            None => self
                .state
                .table_name()
                .ok_or_else(|| anyhow!("Upload a file before asking questions"))?,
        };

        let request = QueryRequest::new(table_name, question);
        let ticket = self.state.begin_query();
        let response = self
            .service
            .query(&request)
            .await
            .with_context(|| format!("Query against '{}' failed", request.table_name))?;

        let response = self
            .state
            .complete_query(ticket, response)
            .ok_or_else(|| anyhow!("A newer question superseded this one"))?;

        info!("Generated query: {}", response.query_generated);
        log_preview(&response.data);

        let rows = Arc::new(response.data.clone());
        Ok(json!({
            "query": response.query_generated,
            "data": response.data,
            "visualization": self.visualize(rows, chart),
        }))
    }

    /// Chart rows that did not come from the service
    pub fn chart(&self, rows: RowCollection, chart: &ChartArgs) -> JsonValue {
        self.visualize(Arc::new(rows), chart)
    }

    fn visualize(&self, rows: Arc<RowCollection>, chart: &ChartArgs) -> JsonValue {
        let session = self.session(rows, chart);
        let status = session.status();
        match status {
            ChartStatus::Ready => {}
            ChartStatus::InsufficientSelection { user_selected: true } => {
                warn!("{}", status.message())
            }
            _ => info!("{}", status.message()),
        }

        let (message, payload) = match status {
            ChartStatus::Ready => (JsonValue::Null, session.payload()),
            _ => (JsonValue::from(status.message()), None),
        };
        json!({
            "message": message,
            "columns": session.column_names(),
            "chart": payload,
        })
    }

    /// Session with the recommendation, then any command line overrides
    fn session(&self, rows: Arc<RowCollection>, chart: &ChartArgs) -> ChartSession {
        let mut session = ChartSession::with_rows(rows);
        if chart.is_empty() {
            return session;
        }

        if let Some(kind) = chart.kind {
            session.set_chart_kind(kind);
        }
        if let Some(x) = &chart.x {
            session.set_x_axis(Some(x.clone()));
        }
        if let Some(y) = &chart.y {
            session.set_y_axis(Some(y.clone()));
        }
        self.state.event_bus.publish(session.selection_event());
        session
    }
}

fn log_preview(rows: &RowCollection) {
    let columns = rows.columns();
    info!("{} rows: {}", rows.len(), columns.join(" | "));
    for row in rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<String> = row.values().map(|v| v.to_string()).collect();
        info!("  {}", cells.join(" | "));
    }
    if rows.len() > PREVIEW_ROWS {
        info!("  ... {} more", rows.len() - PREVIEW_ROWS);
    }
}
