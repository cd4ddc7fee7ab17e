//! Tracing export to a local OTLP/JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → RotatingFile
//! ```
//!
//! Spans land in `movielist-otlp.json` in the plugin data directory, one
//! `ExportTraceServiceRequest` document per line. The file rotates at 10 MB
//! and keeps three backups (`.1` newest).
//!
//! The plugin and its worker run as separate instances; each calls
//! [`init_tracing`] once, and trace context crosses between them inside
//! worker messages.

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use exporter::{tracer_provider, FileSpanExporter};
pub use init::{init_tracing, SERVICE_NAME};
pub use rotating::RotatingFile;
