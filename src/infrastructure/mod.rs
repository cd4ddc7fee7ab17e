//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Only path handling lives here; the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{get_data_dir, trace_file_path, watched_store_path};
