//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel` and consumed
//! by the renderer. They carry display-ready data only; which branch of a
//! pane renders (loading, error or content) is decided here, not in the
//! renderer.

use crate::domain::WatchedSummary;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Left pane: search results.
    pub search: SearchPane,
    /// Right pane: the open movie, or the watch list when none is open.
    pub side: SidePane,
    pub footer: FooterInfo,
    /// Last error reported by the worker, if any.
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Number of results of the current search, `0` while loading or failed.
    pub result_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether key presses currently edit the query.
    pub focused: bool,
}

/// Search results pane. Exactly one branch renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPane {
    Loading,
    /// Short user-visible reason such as `"not found"`.
    Error(String),
    Results(ListWindow<ResultRow>),
}

/// The visible slice of a longer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWindow<T> {
    pub rows: Vec<T>,
    /// Rows hidden above the window.
    pub skipped: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub year: String,
    /// The cursor is on this row.
    pub is_selected: bool,
    /// This title is open in the detail pane.
    pub is_open: bool,
    pub is_watched: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SidePane {
    Details(DetailPane),
    Watched(WatchedPane),
}

/// Detail pane. Exactly one branch renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPane {
    Loading,
    Error(String),
    Loaded(Box<DetailView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub imdb_rating: String,
    pub plot: String,
    pub actors: String,
    pub director: String,
    pub rating: RatingView,
}

/// Rating controls of the open movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingView {
    /// Not watched yet. `user_rating` is `0` until the user picks one; the
    /// title can be added once it is non-zero.
    Pending { user_rating: u8, can_add: bool },
    /// Already on the watch list with this rating.
    Watched { user_rating: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchedPane {
    pub summary: WatchedSummary,
    pub list: ListWindow<WatchedRow>,
    /// Whether the cursor is in this pane.
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedRow {
    pub title: String,
    pub imdb_rating: String,
    pub user_rating: u8,
    pub runtime_minutes: u32,
    pub added: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
