//! Background worker for storage operations.
//!
//! All store I/O runs on Zellij's worker thread so the plugin's event loop is
//! never blocked on the filesystem.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Message processing against a [`Store`](crate::storage::Store)

pub mod handler;
pub mod messages;

pub use handler::MovieListWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name the worker is registered under and addressed by.
pub const WORKER_NAME: &str = "movielist";
