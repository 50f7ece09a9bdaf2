use std::sync::Arc;
use parking_lot::RwLock;
use crate::events::{events, EventBus};
use crate::{QueryResponse, UploadReceipt};

/// Handle for one in-flight query.
///
/// Issuing a newer query supersedes every older ticket; responses carried
/// back with a superseded ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Query bookkeeping kept under a single lock so that issuing and
/// completing requests cannot interleave
#[derive(Debug, Default)]
struct QueryState {
    generation: u64,
    response: Option<Arc<QueryResponse>>,
}

/// The main application state
pub struct AppState {
    /// The event bus
    pub event_bus: Arc<EventBus>,

    /// The most recent successful upload
    upload: Arc<RwLock<Option<UploadReceipt>>>,

    /// Latest request generation and its accepted response
    query: Arc<RwLock<QueryState>>,
}

impl AppState {
    /// Create a new application state
    pub fn new() -> Self {
        Self {
            event_bus: Arc::new(EventBus::new()),
            upload: Arc::new(RwLock::new(None)),
            query: Arc::new(RwLock::new(QueryState::default())),
        }
    }

    /// Record a successful upload. Results of the previous table are dropped,
    /// including responses still in flight.
    pub fn set_upload(&self, receipt: UploadReceipt) {
        let table_name = receipt.table_name.clone();
        let row_count = receipt.rows;
        let column_count = receipt.columns.len();

        *self.upload.write() = Some(receipt);
        {
            // Requests against the previous table must not land afterwards
            let mut query = self.query.write();
            query.generation += 1;
            query.response = None;
        }

        tracing::info!("Table '{}' ready for queries ({} rows)", table_name, row_count);
        self.event_bus.publish(events::UploadCompleted {
            table_name,
            row_count,
            column_count,
        });
    }

    pub fn upload(&self) -> Option<UploadReceipt> {
        self.upload.read().clone()
    }

    /// Name of the table questions are asked against
    pub fn table_name(&self) -> Option<String> {
        self.upload.read().as_ref().map(|r| r.table_name.clone())
    }

    /// Queries are only possible after an upload
    pub fn can_query(&self) -> bool {
        self.upload.read().is_some()
    }

    /// Start a new query, superseding any request still in flight
    pub fn begin_query(&self) -> QueryTicket {
        let mut query = self.query.write();
        query.generation += 1;
        query.response = None;
        tracing::debug!("Issued query generation {}", query.generation);
        QueryTicket {
            generation: query.generation,
        }
    }

    /// Whether `ticket` still belongs to the newest request
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.query.read().generation == ticket.generation
    }

    /// Offer a response for `ticket`.
    ///
    /// Returns the stored response when it was accepted, `None` when a newer
    /// request has been issued in the meantime.
    pub fn complete_query(
        &self,
        ticket: QueryTicket,
        response: QueryResponse,
    ) -> Option<Arc<QueryResponse>> {
        let mut query = self.query.write();
        if query.generation != ticket.generation {
            let latest_generation = query.generation;
            drop(query);
            tracing::warn!(
                "Discarding stale response for generation {} (latest is {})",
                ticket.generation,
                latest_generation
            );
            self.event_bus.publish(events::QueryDiscarded {
                generation: ticket.generation,
                latest_generation,
            });
            return None;
        }

        let response = Arc::new(response);
        query.response = Some(response.clone());
        drop(query);

        self.event_bus.publish(events::QueryCompleted {
            generation: ticket.generation,
            row_count: response.data.len(),
            column_count: response.data.columns().len(),
        });
        Some(response)
    }

    /// The accepted response of the newest request, if any
    pub fn response(&self) -> Option<Arc<QueryResponse>> {
        self.query.read().response.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
