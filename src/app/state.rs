//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: the search
//! text, both remote queries, the open movie and its pending rating, the watch
//! list and the cursor positions. The event handler mutates it; the renderer
//! only ever sees the [`ViewModel`] computed from it.
//!
//! # State Components
//!
//! - **Search**: query text and the [`RemoteQuery`] keyed by it
//! - **Details**: selected IMDb id and the [`RemoteQuery`] keyed by it
//! - **Rating**: pending user rating and how many times it changed
//! - **Watch list**: persisted entries, loaded once through the worker
//! - **Focus**: input mode, focused pane, one cursor per list
//! - **Bindings**: key subscriptions that exist only while a movie is open

use super::actions::{from_commands, Action};
use super::handler::Event;
use super::keys::{Key, KeyBindings, Subscription};
use super::modes::{InputMode, Pane};
use crate::domain::{MovieDetail, MovieSummary, WatchedMovie, WatchedSummary};
use crate::query::{ApiConfig, DetailQuery, FetchState, RemoteQuery, SearchQuery};
use crate::storage::WATCHED_KEY;
use crate::ui::helpers::{truncate, visible_window};
use crate::ui::viewmodel::{
    DetailPane, DetailView, FooterInfo, HeaderInfo, ListWindow, RatingView, ResultRow,
    SearchBarInfo, SearchPane, SidePane, ViewModel, WatchedPane, WatchedRow,
};
use crate::worker::WorkerMessage;

/// Pane title while no movie is open.
pub const DEFAULT_PANE_TITLE: &str = "MovieList";

/// Highest rating a user can give.
pub const MAX_RATING: u8 = 10;

/// Rows taken by everything except the two lists.
const CHROME_ROWS: usize = 10;

/// Columns reserved next to a title for year and markers.
const TITLE_MARGIN: usize = 14;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Current search text. Edited only in [`InputMode::Typing`].
    pub query: String,

    pub input_mode: InputMode,

    /// Pane owning the cursor. Forced back to results while a movie is open.
    pub pane: Pane,

    pub results_cursor: usize,
    pub watched_cursor: usize,

    /// IMDb id of the open movie.
    pub selected_id: Option<String>,

    /// Title search keyed by `query`.
    pub search: RemoteQuery<SearchQuery>,

    /// Detail lookup keyed by `selected_id`.
    pub details: RemoteQuery<DetailQuery>,

    /// Rating picked for the open movie, `0` while none is picked.
    pub user_rating: u8,

    /// Number of times the rating of the open movie changed.
    pub rating_decisions: u32,

    pub watched: Vec<WatchedMovie>,

    /// Set once the persisted list has arrived from the worker.
    pub watched_loaded: bool,

    pub bindings: KeyBindings,

    /// `Esc` → close, held only while a movie is open.
    close_subscription: Option<Subscription>,

    /// Last worker error, shown until the next one replaces it.
    pub status: Option<String>,
}

impl AppState {
    /// Creates the initial state: typing focus, empty query, nothing open.
    ///
    /// # Example
    ///
    /// ```
    /// use movielist::app::{AppState, InputMode};
    /// use movielist::query::{ApiConfig, FetchState};
    ///
    /// let state = AppState::new(ApiConfig::default(), 3);
    /// assert_eq!(state.input_mode, InputMode::Typing);
    /// assert_eq!(state.search.state(), &FetchState::Idle);
    /// ```
    #[must_use]
    pub fn new(api: ApiConfig, min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            input_mode: InputMode::default(),
            pane: Pane::default(),
            results_cursor: 0,
            watched_cursor: 0,
            selected_id: None,
            search: RemoteQuery::new(api.clone()).with_min_key_len(min_query_len),
            details: RemoteQuery::new(api),
            user_rating: 0,
            rating_decisions: 0,
            watched: Vec::new(),
            watched_loaded: false,
            bindings: KeyBindings::default(),
            close_subscription: None,
            status: None,
        }
    }

    /// Actions to run once when the plugin starts.
    #[must_use]
    pub fn startup_actions(&self) -> Vec<Action> {
        vec![Action::PostToWorker(WorkerMessage::load_watched(WATCHED_KEY.to_string()))]
    }

    /// Replaces the search text and re-keys the search query.
    pub fn set_query(&mut self, query: String) -> Vec<Action> {
        self.query = query;
        self.results_cursor = 0;
        tracing::trace!(query = %self.query, "search query updated");
        from_commands(self.search.set_key(&self.query))
    }

    /// Results of the current search; empty unless the search succeeded.
    #[must_use]
    pub fn search_results(&self) -> &[MovieSummary] {
        self.search.state().data().map(Vec::as_slice).unwrap_or_default()
    }

    /// The result under the cursor.
    #[must_use]
    pub fn highlighted_result(&self) -> Option<&MovieSummary> {
        self.search_results().get(self.results_cursor)
    }

    /// Detail record of the open movie, once loaded.
    #[must_use]
    pub fn open_detail(&self) -> Option<&MovieDetail> {
        self.selected_id.as_ref()?;
        self.details.state().data()
    }

    #[must_use]
    pub fn watched_entry(&self, imdb_id: &str) -> Option<&WatchedMovie> {
        self.watched.iter().find(|m| m.imdb_id == imdb_id)
    }

    #[must_use]
    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.watched_entry(imdb_id).is_some()
    }

    #[must_use]
    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::of(&self.watched)
    }

    fn focused_len(&self) -> usize {
        match self.pane {
            Pane::Results => self.search_results().len(),
            Pane::Watched => self.watched.len(),
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.pane {
            Pane::Results => &mut self.results_cursor,
            Pane::Watched => &mut self.watched_cursor,
        }
    }

    /// Moves the cursor of the focused pane down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        let cursor = self.focused_cursor();
        *cursor = (*cursor + 1) % len;
    }

    /// Moves the cursor of the focused pane up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        let cursor = self.focused_cursor();
        *cursor = if *cursor == 0 { len - 1 } else { (*cursor - 1).min(len - 1) };
    }

    /// Opens `imdb_id` in the detail pane, or closes it if it is already open.
    ///
    /// Opening resets the pending rating and registers `Esc` to close the
    /// movie. Switching from one open movie to another keeps that binding and
    /// resets the pane title until the new details arrive.
    pub fn open_movie(&mut self, imdb_id: String) -> Vec<Action> {
        if self.selected_id.as_deref() == Some(imdb_id.as_str()) {
            tracing::debug!(imdb_id = %imdb_id, "selected movie again, closing");
            return self.close_movie();
        }

        let _span = tracing::debug_span!("open_movie", imdb_id = %imdb_id).entered();

        let mut actions = from_commands(self.details.set_key(&imdb_id));
        if self.selected_id.is_some() {
            actions.push(Action::SetPaneTitle(DEFAULT_PANE_TITLE.to_string()));
        }
        self.selected_id = Some(imdb_id);
        self.user_rating = 0;
        self.rating_decisions = 0;
        self.pane = Pane::Results;

        if self.close_subscription.is_none() {
            self.close_subscription = Some(self.bindings.subscribe(Key::Esc, Event::CloseMovie));
        }

        actions
    }

    /// Closes the open movie and tears down its detail query.
    pub fn close_movie(&mut self) -> Vec<Action> {
        if self.selected_id.is_none() {
            return vec![];
        }

        let mut actions = from_commands(self.details.teardown());
        tracing::debug!(imdb_id = ?self.selected_id, "movie closed");

        self.selected_id = None;
        self.user_rating = 0;
        self.rating_decisions = 0;
        if let Some(subscription) = self.close_subscription.take() {
            self.bindings.unsubscribe(subscription);
        }

        actions.push(Action::SetPaneTitle(DEFAULT_PANE_TITLE.to_string()));
        actions
    }

    /// Sets the pending rating of the open movie.
    ///
    /// Returns `false` (and changes nothing) when the rating is out of range,
    /// no movie is loaded, or the movie is already on the watch list. Each
    /// change to a different value counts as one rating decision.
    pub fn rate(&mut self, rating: u8) -> bool {
        if !(1..=MAX_RATING).contains(&rating) {
            return false;
        }
        let Some(imdb_id) = self.selected_id.as_deref() else {
            return false;
        };
        if self.open_detail().is_none() {
            return false;
        }
        if self.is_watched(imdb_id) {
            tracing::debug!(imdb_id = %imdb_id, "already watched, rating locked");
            return false;
        }

        if rating != self.user_rating {
            self.user_rating = rating;
            self.rating_decisions += 1;
            tracing::debug!(rating = rating, decisions = self.rating_decisions, "rating changed");
        }
        true
    }

    /// Adds the open movie with its pending rating, persists the list and
    /// closes the movie.
    ///
    /// Does nothing until details are loaded and a rating has been picked.
    pub fn add_watched(&mut self) -> Vec<Action> {
        if self.user_rating == 0 {
            return vec![];
        }
        let Some(imdb_id) = self.selected_id.clone() else {
            return vec![];
        };
        let Some(detail) = self.open_detail() else {
            return vec![];
        };
        if self.is_watched(&imdb_id) {
            return vec![];
        }

        let mut entry = WatchedMovie::from_detail(detail, self.user_rating, self.rating_decisions);
        entry.imdb_id = imdb_id;

        tracing::debug!(
            imdb_id = %entry.imdb_id,
            user_rating = entry.user_rating,
            rating_decisions = entry.rating_decisions,
            "adding to watch list"
        );

        self.watched.push(entry);
        let mut actions = vec![self.save_action()];
        actions.extend(self.close_movie());
        actions
    }

    /// Removes the watch list entry under the cursor and persists the list.
    pub fn delete_watched(&mut self) -> Vec<Action> {
        let Some(movie) = self.watched.get(self.watched_cursor) else {
            return vec![];
        };
        let imdb_id = movie.imdb_id.clone();

        self.watched.retain(|m| m.imdb_id != imdb_id);
        self.watched_cursor = self.watched_cursor.min(self.watched.len().saturating_sub(1));
        tracing::debug!(imdb_id = %imdb_id, remaining = self.watched.len(), "removed from watch list");

        vec![self.save_action()]
    }

    /// Installs the persisted watch list.
    ///
    /// Entries added before the list arrived are kept and appended, and the
    /// merged list is written back.
    pub fn apply_loaded_watched(&mut self, movies: Vec<WatchedMovie>) -> Vec<Action> {
        let local = std::mem::replace(&mut self.watched, movies);
        self.watched_loaded = true;

        let mut merged = false;
        for entry in local {
            if !self.is_watched(&entry.imdb_id) {
                self.watched.push(entry);
                merged = true;
            }
        }

        self.watched_cursor = self.watched_cursor.min(self.watched.len().saturating_sub(1));
        tracing::debug!(count = self.watched.len(), merged = merged, "watch list installed");

        if merged {
            vec![self.save_action()]
        } else {
            vec![]
        }
    }

    fn save_action(&self) -> Action {
        Action::PostToWorker(WorkerMessage::save_watched(
            WATCHED_KEY.to_string(),
            self.watched.clone(),
        ))
    }

    /// Computes the view model for a pane of `rows` × `cols` cells.
    ///
    /// Each list gets half of the rows left after the fixed lines and is
    /// windowed around its cursor.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> ViewModel {
        let list_rows = (rows.saturating_sub(CHROME_ROWS) / 2).max(1);
        let title_width = cols.saturating_sub(TITLE_MARGIN).max(8);

        ViewModel {
            header: HeaderInfo {
                title: DEFAULT_PANE_TITLE.to_string(),
                result_count: self.search_results().len(),
            },
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                focused: self.input_mode == InputMode::Typing,
            },
            search: self.compute_search_pane(list_rows, title_width),
            side: self.compute_side_pane(list_rows, title_width),
            footer: self.compute_footer(),
            status: self.status.clone(),
        }
    }

    fn compute_search_pane(&self, list_rows: usize, title_width: usize) -> SearchPane {
        match self.search.state() {
            FetchState::Loading => SearchPane::Loading,
            FetchState::Failure(error) => SearchPane::Error(error.to_string()),
            FetchState::Idle | FetchState::Success(_) => {
                let results = self.search_results();
                let (start, end) = visible_window(results.len(), self.results_cursor, list_rows);
                let rows = results[start..end]
                    .iter()
                    .enumerate()
                    .map(|(offset, movie)| ResultRow {
                        title: truncate(&movie.title, title_width),
                        year: movie.year.clone(),
                        is_selected: self.pane == Pane::Results && start + offset == self.results_cursor,
                        is_open: self.selected_id.as_deref() == Some(movie.imdb_id.as_str()),
                        is_watched: self.is_watched(&movie.imdb_id),
                    })
                    .collect();
                SearchPane::Results(ListWindow {
                    rows,
                    skipped: start,
                    total: results.len(),
                })
            }
        }
    }

    fn compute_side_pane(&self, list_rows: usize, title_width: usize) -> SidePane {
        let Some(imdb_id) = self.selected_id.as_deref() else {
            return SidePane::Watched(self.compute_watched_pane(list_rows, title_width));
        };

        let pane = match self.details.state() {
            FetchState::Idle | FetchState::Loading => DetailPane::Loading,
            FetchState::Failure(error) => DetailPane::Error(error.to_string()),
            FetchState::Success(detail) => {
                let rating = self.watched_entry(imdb_id).map_or(
                    RatingView::Pending {
                        user_rating: self.user_rating,
                        can_add: self.user_rating > 0,
                    },
                    |entry| RatingView::Watched {
                        user_rating: entry.user_rating,
                    },
                );
                DetailPane::Loaded(Box::new(DetailView {
                    title: detail.title.clone(),
                    released: detail.released.clone(),
                    runtime: detail.runtime.clone(),
                    genre: detail.genre.clone(),
                    imdb_rating: detail.imdb_rating.clone(),
                    plot: detail.plot.clone(),
                    actors: detail.actors.clone(),
                    director: detail.director.clone(),
                    rating,
                }))
            }
        };
        SidePane::Details(pane)
    }

    fn compute_watched_pane(&self, list_rows: usize, title_width: usize) -> WatchedPane {
        let (start, end) = visible_window(self.watched.len(), self.watched_cursor, list_rows);
        let rows = self.watched[start..end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| WatchedRow {
                title: truncate(&movie.title, title_width),
                imdb_rating: format!("{:.1}", movie.imdb_rating),
                user_rating: movie.user_rating,
                runtime_minutes: movie.runtime_minutes,
                added: movie.added_ago(),
                is_selected: self.pane == Pane::Watched && start + offset == self.watched_cursor,
            })
            .collect();

        WatchedPane {
            summary: self.summary(),
            list: ListWindow {
                rows,
                skipped: start,
                total: self.watched.len(),
            },
            focused: self.pane == Pane::Watched,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.selected_id.is_some(), self.pane) {
            (InputMode::Typing, _, _) => "Type to search  Enter/Esc: done  ↑/↓: move",
            (InputMode::Navigating, true, _) => {
                "1-9,0: rate  a: add  Enter: open/close  Esc: close  /: search  q: quit"
            }
            (InputMode::Navigating, false, Pane::Results) => {
                "j/k: move  Enter: open  Tab: watched  /: search  q: quit"
            }
            (InputMode::Navigating, false, Pane::Watched) => {
                "j/k: move  d: delete  Tab: results  /: search  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
