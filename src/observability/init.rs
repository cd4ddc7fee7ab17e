//! Subscriber setup.

use super::exporter;
use crate::infrastructure::paths;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on the trace resource.
pub const SERVICE_NAME: &str = "MovieList";

/// Installs the global subscriber, exporting spans at `level` and above to
/// the trace file in the plugin data directory.
///
/// `level` is an [`EnvFilter`] directive such as `"info"` or
/// `"movielist=debug"`. Tracing is optional: if the data directory cannot be
/// created, or a subscriber is already installed, this does nothing.
pub fn init_tracing(level: &str) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = exporter::tracer_provider(paths::trace_file_path(), resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
