//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place that mutates [`AppState`]. The plugin
//! runtime feeds it host events translated into [`Event`]s and executes the
//! returned actions.
//!
//! # Event Types
//!
//! - **Keys**: `Key`, resolved through active bindings first and then by input
//!   mode into one of the semantic events below
//! - **Search**: `Char`, `Backspace`, `FocusSearch`, `FocusResults`
//! - **Navigation**: `MoveUp`, `MoveDown`, `TogglePane`
//! - **Movie**: `SelectMovie`, `CloseMovie`, `Rate`, `AddWatched`, `DeleteWatched`
//! - **System**: `WebResponse`, `WorkerResponse`, `Quit`

use super::keys::Key;
use super::modes::{InputMode, Pane};
use super::{Action, AppState};
use crate::domain::error::Result;
use crate::query::{CancellationToken, Channel, HttpResponse, Resolution};
use crate::worker::WorkerResponse;
use std::collections::BTreeMap;

/// Events triggered by user input, network completions, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A raw key press.
    Key(Key),

    /// Appends a character to the search text.
    Char(char),
    /// Removes the last character of the search text.
    Backspace,
    /// Starts a new search: typing focus with a cleared query.
    FocusSearch,
    /// Leaves typing focus.
    FocusResults,

    MoveUp,
    MoveDown,
    /// Switches the cursor between results and the watch list.
    TogglePane,

    /// Opens the highlighted result, or closes it if already open.
    SelectMovie,
    /// Closes the open movie.
    CloseMovie,
    /// Sets the pending rating of the open movie.
    Rate(u8),
    /// Adds the open movie with its pending rating to the watch list.
    AddWatched,
    /// Removes the highlighted watch list entry.
    DeleteWatched,

    /// Hides the plugin.
    Quit,

    /// A web request finished.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        /// Context map given when the request was issued.
        context: BTreeMap<String, String>,
    },

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for span fields; avoids logging response bodies.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::FocusSearch => "focus_search",
            Self::FocusResults => "focus_results",
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::TogglePane => "toggle_pane",
            Self::SelectMovie => "select_movie",
            Self::CloseMovie => "close_movie",
            Self::Rate(_) => "rate",
            Self::AddWatched => "add_watched",
            Self::DeleteWatched => "delete_watched",
            Self::Quit => "quit",
            Self::WebResponse { .. } => "web_response",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

/// Maps a key press to its meaning in the current input mode.
fn translate_key(state: &AppState, key: Key) -> Option<Event> {
    match (state.input_mode, key) {
        (_, Key::Up) => Some(Event::MoveUp),
        (_, Key::Down) => Some(Event::MoveDown),
        (_, Key::Tab) => Some(Event::TogglePane),

        (InputMode::Typing, Key::Char(c)) => Some(Event::Char(c)),
        (InputMode::Typing, Key::Backspace) => Some(Event::Backspace),
        (InputMode::Typing, Key::Enter | Key::Esc) => Some(Event::FocusResults),

        (InputMode::Navigating, Key::Enter) => match state.pane {
            Pane::Results => Some(Event::SelectMovie),
            Pane::Watched => None,
        },
        (InputMode::Navigating, Key::Char(c)) => match c {
            '/' => Some(Event::FocusSearch),
            'k' => Some(Event::MoveUp),
            'j' => Some(Event::MoveDown),
            'a' => Some(Event::AddWatched),
            'd' | 'x' => Some(Event::DeleteWatched),
            'q' => Some(Event::Quit),
            '0' => Some(Event::Rate(10)),
            c => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map(Event::Rate),
        },
        (InputMode::Navigating, Key::Backspace | Key::Esc) => None,
    }
}

/// Processes an event, mutates state, and returns whether to re-render plus
/// the actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` lets the runtime treat all handler
/// outcomes uniformly.
///
/// # Example
///
/// ```
/// use movielist::app::{handle_event, Action, AppState, Event, Key};
/// use movielist::query::ApiConfig;
///
/// let mut state = AppState::new(ApiConfig::default(), 3);
/// for c in "dune".chars() {
///     handle_event(&mut state, &Event::Key(Key::Char(c)))?;
/// }
/// assert_eq!(state.query, "dune");
/// assert!(state.search.state().is_loading());
///
/// let (_, actions) = handle_event(&mut state, &Event::Quit)?;
/// assert_eq!(actions, vec![Action::CloseFocus]);
/// # Ok::<(), movielist::domain::MovieListError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Key(key) => {
            let bound = state.bindings.dispatch(*key);
            if !bound.is_empty() {
                tracing::debug!(key = ?key, handlers = bound.len(), "dispatching bound key");
                let mut render = false;
                let mut actions = vec![];
                for bound_event in &bound {
                    let (r, a) = handle_event(state, bound_event)?;
                    render |= r;
                    actions.extend(a);
                }
                return Ok((render, actions));
            }

            match translate_key(state, *key) {
                Some(event) => handle_event(state, &event),
                None => {
                    tracing::trace!(key = ?key, mode = ?state.input_mode, "unbound key");
                    Ok((false, vec![]))
                }
            }
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            let mut query = state.query.clone();
            query.push(*c);
            Ok((true, state.set_query(query)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing || state.query.is_empty() {
                return Ok((false, vec![]));
            }
            let mut query = state.query.clone();
            query.pop();
            Ok((true, state.set_query(query)))
        }
        Event::FocusSearch => {
            if state.input_mode == InputMode::Typing {
                return Ok((false, vec![]));
            }
            tracing::debug!("starting new search");
            state.input_mode = InputMode::Typing;
            Ok((true, state.set_query(String::new())))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Navigating;
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::MoveDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::TogglePane => {
            if state.selected_id.is_some() {
                tracing::debug!("watch list hidden while a movie is open");
                return Ok((false, vec![]));
            }
            state.pane = state.pane.toggled();
            Ok((true, vec![]))
        }
        Event::SelectMovie => {
            let Some(movie) = state.highlighted_result() else {
                tracing::debug!("no result highlighted");
                return Ok((false, vec![]));
            };
            let imdb_id = movie.imdb_id.clone();
            Ok((true, state.open_movie(imdb_id)))
        }
        Event::CloseMovie => {
            if state.selected_id.is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, state.close_movie()))
        }
        Event::Rate(rating) => Ok((state.rate(*rating), vec![])),
        Event::AddWatched => {
            let actions = state.add_watched();
            Ok((!actions.is_empty(), actions))
        }
        Event::DeleteWatched => {
            if state.pane != Pane::Watched || state.selected_id.is_some() {
                return Ok((false, vec![]));
            }
            let actions = state.delete_watched();
            Ok((!actions.is_empty(), actions))
        }
        Event::Quit => Ok((false, vec![Action::CloseFocus])),
        Event::WebResponse {
            status,
            body,
            context,
        } => {
            let Some(token) = CancellationToken::from_context(context) else {
                tracing::debug!(status = status, "response without query token, ignoring");
                return Ok((false, vec![]));
            };
            let response = HttpResponse::new(*status, body.clone());

            match token.channel {
                Channel::Search => {
                    let resolution = state.search.resolve(token, &response);
                    if resolution == Resolution::Applied {
                        state.results_cursor = 0;
                    }
                    Ok((resolution == Resolution::Applied, vec![]))
                }
                Channel::Detail => {
                    if state.details.resolve(token, &response) == Resolution::Discarded {
                        return Ok((false, vec![]));
                    }
                    let actions = state
                        .open_detail()
                        .map(|detail| Action::SetPaneTitle(format!("Movie | {}", detail.title)))
                        .into_iter()
                        .collect();
                    Ok((true, actions))
                }
            }
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::WatchedLoaded { movies } => {
                let actions = state.apply_loaded_watched(movies.clone());
                Ok((true, actions))
            }
            WorkerResponse::WatchedSaved { count } => {
                tracing::debug!(count = count, "watch list persisted");
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                state.status = Some(message.clone());
                Ok((true, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ApiConfig;

    fn press(state: &mut AppState, key: Key) -> Vec<Action> {
        handle_event(state, &Event::Key(key)).unwrap().1
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        text.chars().flat_map(|c| press(state, Key::Char(c))).collect()
    }

    #[test]
    fn typing_builds_query_and_fetches_at_threshold() {
        let mut state = AppState::new(ApiConfig::new("http://omdb.test/", "k"), 3);
        let actions = type_text(&mut state, "ab");
        assert!(actions.is_empty());

        let actions = press(&mut state, Key::Char('c'));
        assert!(matches!(actions.as_slice(), [Action::Fetch { url, .. }] if url.ends_with("s=abc")));
    }

    #[test]
    fn keys_are_commands_only_while_navigating() {
        let mut state = AppState::new(ApiConfig::default(), 3);
        type_text(&mut state, "q");
        assert_eq!(state.query, "q");

        press(&mut state, Key::Enter);
        assert_eq!(state.input_mode, InputMode::Navigating);
        assert_eq!(press(&mut state, Key::Char('q')), vec![Action::CloseFocus]);
    }

    #[test]
    fn slash_starts_a_fresh_search() {
        let mut state = AppState::new(ApiConfig::default(), 3);
        type_text(&mut state, "alien");
        press(&mut state, Key::Esc);

        let actions = press(&mut state, Key::Char('/'));
        assert_eq!(state.input_mode, InputMode::Typing);
        assert_eq!(state.query, "");
        assert!(matches!(actions.as_slice(), [Action::Cancel { .. }]));
    }

    #[test]
    fn digit_keys_map_to_ratings() {
        let mut state = AppState::new(ApiConfig::default(), 3);
        state.input_mode = InputMode::Navigating;
        assert_eq!(translate_key(&state, Key::Char('7')), Some(Event::Rate(7)));
        assert_eq!(translate_key(&state, Key::Char('0')), Some(Event::Rate(10)));
    }

    #[test]
    fn foreign_web_response_is_ignored() {
        let mut state = AppState::new(ApiConfig::default(), 3);
        let event = Event::WebResponse {
            status: 200,
            body: b"{}".to_vec(),
            context: BTreeMap::new(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
    }

    #[test]
    fn worker_error_is_shown() {
        let mut state = AppState::new(ApiConfig::default(), 3);
        let event = Event::WorkerResponse(WorkerResponse::Error {
            message: "save watched: disk full".to_string(),
        });
        let (render, _) = handle_event(&mut state, &event).unwrap();
        assert!(render);
        assert_eq!(state.status.as_deref(), Some("save watched: disk full"));
    }
}
