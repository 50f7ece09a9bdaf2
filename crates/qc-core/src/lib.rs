//! Core functionality for the query charting client
//!
//! This crate provides the row model, selection types, service payloads
//! and the shared application state used by the other crates.

pub mod events;
pub mod payload;
pub mod selection;
pub mod state;
pub mod value;

use thiserror::Error;

// Re-export commonly used types
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use payload::{QueryRequest, QueryResponse, ServiceErrorBody, UploadReceipt};
pub use selection::{AxisSelection, ChartKind};
pub use state::{AppState, QueryTicket};
pub use value::{format_number, Row, RowCollection, Value};

/// Errors raised at the edges of the core model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown chart type '{0}' (expected bar, line, pie, scatter or none)")]
    UnknownChartKind(String),
}
