use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common system events
pub mod events {
    use super::Event;
    use crate::ChartKind;

    /// A file became a queryable table
    #[derive(Debug, Clone)]
    pub struct UploadCompleted {
        pub table_name: String,
        pub row_count: usize,
        pub column_count: usize,
    }

    /// A query response was accepted as the current one
    #[derive(Debug, Clone)]
    pub struct QueryCompleted {
        pub generation: u64,
        pub row_count: usize,
        pub column_count: usize,
    }

    /// A response arrived after a newer request was issued
    #[derive(Debug, Clone)]
    pub struct QueryDiscarded {
        pub generation: u64,
        pub latest_generation: u64,
    }

    /// Chart type or axes changed
    #[derive(Debug, Clone)]
    pub struct ChartSelectionChanged {
        pub kind: ChartKind,
        pub x: Option<String>,
        pub y: Option<String>,
        pub user_selected: bool,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        UploadCompleted,
        QueryCompleted,
        QueryDiscarded,
        ChartSelectionChanged
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event.
    ///
    /// Handlers run synchronously under the bus lock and must not publish.
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::events::{QueryCompleted, QueryDiscarded};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_only_matching_subscribers() {
        let bus = EventBus::new();
        let completed = Arc::new(AtomicUsize::new(0));
        let discarded = Arc::new(AtomicUsize::new(0));

        let counter = completed.clone();
        bus.subscribe::<QueryCompleted>(handler_from_fn(move |event| {
            let event = event.as_any().downcast_ref::<QueryCompleted>().unwrap();
            counter.fetch_add(event.row_count, Ordering::SeqCst);
        }));
        let counter = discarded.clone();
        bus.subscribe::<QueryDiscarded>(handler_from_fn(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        bus.publish(QueryCompleted { generation: 1, row_count: 3, column_count: 2 });

        assert_eq!(completed.load(Ordering::SeqCst), 3);
        assert_eq!(discarded.load(Ordering::SeqCst), 0);
    }
}
