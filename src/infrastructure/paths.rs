//! Locations of plugin data inside the Zellij sandbox.
//!
//! The host filesystem is mounted under `/host`, which normally resolves to the
//! directory Zellij was started from (typically the user's home).

use std::path::PathBuf;

/// File name of the persisted watch list.
pub const WATCHED_FILE: &str = "watched.json";

/// File name of the exported traces.
pub const TRACE_FILE: &str = "movielist-otlp.json";

/// Returns the data directory for movielist storage.
///
/// Resolves to `~/.local/share/zellij/movielist` on the host when Zellij is
/// started from a home directory terminal.
///
/// # Examples
///
/// ```
/// use movielist::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/movielist")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("movielist")
}

/// Path of the JSON store holding the watch list.
#[must_use]
pub fn watched_store_path() -> PathBuf {
    get_data_dir().join(WATCHED_FILE)
}

/// Path of the OTLP JSON trace file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_in_data_dir() {
        assert_eq!(watched_store_path().parent(), Some(get_data_dir().as_path()));
        assert!(trace_file_path().ends_with("movielist-otlp.json"));
    }
}
