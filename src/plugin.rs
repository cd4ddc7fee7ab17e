//! Zellij host integration.
//!
//! Thin layer between the movielist library and the Zellij runtime:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← key events, web results, rendering
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   WorkerHost     │   │  ← watch list file I/O
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! Host events become library [`Event`]s; the [`Action`]s the library returns
//! are carried out here and nowhere else.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use movielist::app::{AppState, Key};
use movielist::worker::{MovieListWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use movielist::{handle_event, Action, Config, Event};

/// Plugin instance state.
pub struct State {
    app: AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: movielist::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let (config, config_error) = Config::from_zellij_or_default(&configuration);
        movielist::observability::init_tracing(config.trace_level());

        let _guard = tracing::debug_span!("plugin_load").entered();
        if let Some(e) = config_error {
            tracing::warn!(error = %e, "invalid plugin configuration, using defaults");
        }
        self.app = movielist::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        for action in self.app.startup_actions() {
            self.execute_action(&action);
        }
        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"));
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key(key) {
                Some(key) => Event::Key(key),
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::WebResponse { status, body, context }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                match status {
                    PermissionStatus::Granted => tracing::debug!("web access granted"),
                    PermissionStatus::Denied => tracing::warn!("web access denied, searches will fail"),
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        movielist::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Chorded keys are left to Zellij.
    fn map_key(key: &KeyWithModifier) -> Option<Key> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) || key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }
        Some(match key.bare_key {
            BareKey::Enter => Key::Enter,
            BareKey::Esc => Key::Esc,
            BareKey::Up => Key::Up,
            BareKey::Down => Key::Down,
            BareKey::Tab => Key::Tab,
            BareKey::Backspace => Key::Backspace,
            BareKey::Char(c) => Key::Char(c),
            _ => return None,
        })
    }

    fn map_custom_message(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::Fetch { url, token } => {
                web_request(
                    url.clone(),
                    HttpVerb::Get,
                    BTreeMap::new(),
                    Vec::new(),
                    token.to_context(),
                );
            }
            Action::Cancel { token } => {
                // Requests cannot be aborted; a late response is dropped when its token no longer matches.
                tracing::debug!(token = %token, "request superseded");
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::SetPaneTitle(title) => {
                rename_plugin_pane(get_plugin_ids().plugin_id, title.clone());
            }
            Action::CloseFocus => hide_self(),
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker registered with Zellij; forwards messages to [`MovieListWorker`].
#[derive(Default, Serialize, Deserialize)]
pub struct WorkerHost {
    worker: MovieListWorker,
}

impl ZellijWorker<'_> for WorkerHost {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            movielist::observability::init_tracing(Config::default().trace_level());
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(request) => self.worker.handle_message(request),
            Err(e) => WorkerResponse::Error {
                message: format!("invalid worker message: {e}"),
            },
        };

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}
