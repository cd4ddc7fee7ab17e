//! Worker-side processing of storage messages.
//!
//! [`MovieListWorker`] owns the store and turns each [`WorkerMessage`] into
//! exactly one [`WorkerResponse`]. The Zellij worker entry point that feeds it
//! lives in the plugin binary; this type does no host calls of its own.

use crate::domain::error::{MovieListError, Result};
use crate::domain::WatchedMovie;
use crate::infrastructure::paths;
use crate::storage::{read_or, write_value, JsonStore, Store};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Worker state for handling storage operations.
///
/// The store is opened lazily on the first message so that a missing data
/// directory surfaces as an error response rather than a worker crash.
#[derive(Serialize, Deserialize, Default)]
pub struct MovieListWorker {
    #[serde(skip)]
    store: Option<Box<dyn Store>>,
}

impl MovieListWorker {
    /// Creates a worker backed by an already opened store.
    #[must_use]
    pub fn with_store(store: Box<dyn Store>) -> Self {
        Self { store: Some(store) }
    }

    fn get_store(&mut self) -> Result<&mut Box<dyn Store>> {
        if self.store.is_none() {
            let store = JsonStore::new(paths::watched_store_path())?;
            self.store = Some(Box::new(store));
        }
        self.store
            .as_mut()
            .ok_or_else(|| MovieListError::Worker("Store not initialized".to_string()))
    }

    /// Maps a storage result to a response with consistent logging.
    fn handle_store_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_watched(&mut self, key: &str) -> WorkerResponse {
        Self::handle_store_result(
            "load watched",
            self.get_store()
                .and_then(|store| read_or::<Vec<WatchedMovie>>(&**store, key, Vec::new())),
            |movies| {
                tracing::debug!(count = movies.len(), "watch list loaded");
                WorkerResponse::WatchedLoaded { movies }
            },
        )
    }

    fn handle_save_watched(&mut self, key: &str, movies: &[WatchedMovie]) -> WorkerResponse {
        let count = movies.len();
        Self::handle_store_result(
            "save watched",
            self.get_store()
                .and_then(|store| write_value(&mut **store, key, movies)),
            |()| {
                tracing::debug!(count = count, "watch list saved");
                WorkerResponse::WatchedSaved { count }
            },
        )
    }

    /// Re-attaches the plugin thread's trace context so that spans created
    /// here are children of the span that sent the message.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadWatched { key, .. } => self.handle_load_watched(&key),
            WorkerMessage::SaveWatched { key, movies, .. } => self.handle_save_watched(&key, &movies),
        }
    }
}
