//! MovieList: a Zellij plugin for searching OMDb and keeping a rated watch list.
//!
//! Typing a title searches the movie database as you type; selecting a result
//! fetches its details, which can be rated from 1 to 10 and added to a watch
//! list persisted on disk.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs, plugin.rs)            │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, key subscriptions                │
//! │  - Action emission, view model computation          │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Query Layer   │   │ UI Layer      │   │ Worker Layer  │
//! │ (query/)      │   │ (ui/)         │   │ (worker/)     │
//! │ - Fetch state │   │ - View models │   │ - Store I/O   │
//! │ - Tokens      │   │ - Rendering   │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Domain, Infrastructure, Observability     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Host interaction stays in the binary: the library turns events into
//! [`Action`]s and the binary performs them, so everything here runs natively
//! under `cargo test`.
//!
//! # Modules
//!
//! - [`app`]: Application state, event handling, and actions
//! - [`query`]: Remote fetch lifecycle with cancellation tokens
//! - [`domain`]: Movie records and error types
//! - [`storage`]: Persistent key/value stores
//! - [`worker`]: Background worker protocol and handler
//! - [`ui`]: View models and rendering
//! - [`infrastructure`]: Data directory paths
//! - [`observability`]: OpenTelemetry tracing to a local file

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Pane};
pub use domain::{MovieListError, Result};

use query::omdb::{DEFAULT_BASE_URL, DEFAULT_MIN_SEARCH_LEN};
use query::ApiConfig;
use std::collections::BTreeMap;

/// Environment variable consulted when no `api_key` is configured.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Plugin configuration parsed from the Zellij layout.
///
/// ```kdl
/// plugin location="file:/path/to/movielist.wasm" {
///     api_key "0123abcd"
///     min_query_len "3"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// OMDb API key. Empty when neither configured nor in the environment.
    pub api_key: String,

    /// Base URL of the OMDb endpoint. Default: `https://www.omdbapi.com/`
    pub api_url: String,

    /// Characters required before a search is sent. Default: 3
    pub min_query_len: usize,

    /// [`EnvFilter`](tracing_subscriber::EnvFilter) directive for exported
    /// spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_BASE_URL.to_string(),
            min_query_len: DEFAULT_MIN_SEARCH_LEN,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to the plugin on load.
    ///
    /// # Errors
    ///
    /// Returns [`MovieListError::Config`] if `min_query_len` is present but
    /// not a positive integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use movielist::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "k3y".to_string());
    /// map.insert("min_query_len".to_string(), "2".to_string());
    ///
    /// let config = Config::from_zellij(&map)?;
    /// assert_eq!(config.api_key, "k3y");
    /// assert_eq!(config.min_query_len, 2);
    /// # Ok::<(), movielist::MovieListError>(())
    /// ```
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Result<Self> {
        Self::resolve(config, std::env::var(API_KEY_ENV).ok())
    }

    /// Like [`Self::from_zellij`], but falls back to the defaults on an
    /// invalid map and hands the error back for the caller to log once
    /// tracing is running.
    #[must_use]
    pub fn from_zellij_or_default(
        config: &BTreeMap<String, String>,
    ) -> (Self, Option<MovieListError>) {
        Self::resolve_or_default(config, std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_or_default(
        config: &BTreeMap<String, String>,
        env_key: Option<String>,
    ) -> (Self, Option<MovieListError>) {
        match Self::resolve(config, env_key) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    fn resolve(config: &BTreeMap<String, String>, env_key: Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_key = config
            .get("api_key")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| env_key.filter(|k| !k.is_empty()))
            .unwrap_or_default();

        let api_url = config
            .get("api_url")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.api_url);

        let min_query_len = match config.get("min_query_len") {
            None => defaults.min_query_len,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(MovieListError::Config(format!(
                        "min_query_len must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        Ok(Self {
            api_key,
            api_url,
            min_query_len,
            trace_level: config.get("trace_level").cloned(),
        })
    }

    #[must_use]
    pub fn api(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone(), self.api_key.clone())
    }

    #[must_use]
    pub fn trace_level(&self) -> &str {
        self.trace_level.as_deref().unwrap_or("info")
    }
}

/// Builds the initial application state.
///
/// Nothing is fetched yet; the caller performs
/// [`AppState::startup_actions`] to load the watch list.
///
/// ```
/// use movielist::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.query.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    if config.api_key.is_empty() {
        tracing::warn!(env = API_KEY_ENV, "no OMDb api key configured");
    }
    tracing::debug!(api_url = %config.api_url, min_query_len = config.min_query_len, "initializing movielist plugin");
    AppState::new(config.api(), config.min_query_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::resolve(&BTreeMap::new(), None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.trace_level(), "info");
    }

    #[test]
    fn configured_key_wins_over_environment() {
        let config = Config::resolve(&map(&[("api_key", "abc")]), Some("env".into())).unwrap();
        assert_eq!(config.api_key, "abc");
    }

    #[test]
    fn environment_key_used_when_unconfigured() {
        let config = Config::resolve(&map(&[("api_key", "  ")]), Some("env".into())).unwrap();
        assert_eq!(config.api_key, "env");
    }

    #[test]
    fn bad_min_query_len_is_rejected() {
        for raw in ["zero", "0", "-1"] {
            let result = Config::resolve(&map(&[("min_query_len", raw)]), None);
            assert!(matches!(result, Err(MovieListError::Config(_))), "{raw}");
        }
    }

    #[test]
    fn invalid_map_falls_back_to_defaults_with_the_error() {
        let (config, error) = Config::resolve_or_default(
            &map(&[("min_query_len", "many"), ("trace_level", "debug")]),
            None,
        );
        assert_eq!(config, Config::default());
        assert!(matches!(error, Some(MovieListError::Config(_))));

        let (config, error) = Config::resolve_or_default(&map(&[("trace_level", "debug")]), None);
        assert_eq!(config.trace_level(), "debug");
        assert!(error.is_none());
    }

    #[test]
    fn api_uses_configured_url() {
        let config = Config::resolve(
            &map(&[("api_url", "http://localhost:8080/"), ("api_key", "k")]),
            None,
        )
        .unwrap();
        assert_eq!(config.api().url("i", "tt1"), "http://localhost:8080/?apikey=k&i=tt1");
    }
}
