//! Plain line renderer.
//!
//! Turns a [`ViewModel`] into text lines, one per terminal row, and prints
//! them. No colour or box drawing; each pane renders exactly one of its
//! loading, error or content branches.

use crate::app::AppState;
use crate::ui::helpers::truncate;
use crate::ui::viewmodel::{
    DetailPane, DetailView, ListWindow, RatingView, SearchPane, SidePane, ViewModel, WatchedPane,
};

const LOADING: &str = "Loading...";

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    for line in render_lines(&viewmodel, cols).into_iter().take(rows) {
        println!("{line}");
    }
}

/// Renders a view model into lines no wider than `cols` characters.
///
/// # Example
///
/// ```
/// use movielist::app::AppState;
/// use movielist::query::ApiConfig;
/// use movielist::ui::render_lines;
///
/// let state = AppState::new(ApiConfig::default(), 3);
/// let lines = render_lines(&state.compute_viewmodel(24, 80), 80);
/// assert!(lines[0].contains("Found 0 results"));
/// ```
#[must_use]
pub fn render_lines(vm: &ViewModel, cols: usize) -> Vec<String> {
    let mut lines = vec![
        format!("{}  Found {} results", vm.header.title, vm.header.result_count),
        format!(
            "Search: {}{}",
            vm.search_bar.query,
            if vm.search_bar.focused { "_" } else { "" }
        ),
        String::new(),
    ];

    match &vm.search {
        SearchPane::Loading => lines.push(LOADING.to_string()),
        SearchPane::Error(reason) => lines.push(format!("Error: {reason}")),
        SearchPane::Results(list) => push_results(&mut lines, list),
    }

    lines.push(String::new());

    match &vm.side {
        SidePane::Details(DetailPane::Loading) => lines.push(LOADING.to_string()),
        SidePane::Details(DetailPane::Error(reason)) => lines.push(format!("Error: {reason}")),
        SidePane::Details(DetailPane::Loaded(view)) => push_details(&mut lines, view),
        SidePane::Watched(pane) => push_watched(&mut lines, pane),
    }

    lines.push(String::new());
    if let Some(status) = &vm.status {
        lines.push(format!("! {status}"));
    }
    lines.push(vm.footer.keybindings.clone());

    lines.into_iter().map(|line| truncate(&line, cols)).collect()
}

fn marker(is_selected: bool) -> &'static str {
    if is_selected {
        "> "
    } else {
        "  "
    }
}

fn push_results(lines: &mut Vec<String>, list: &ListWindow<crate::ui::ResultRow>) {
    if list.skipped > 0 {
        lines.push(format!("  ({} more above)", list.skipped));
    }
    for row in &list.rows {
        let mut line = format!("{}{} ({})", marker(row.is_selected), row.title, row.year);
        if row.is_open {
            line.push_str(" [open]");
        }
        if row.is_watched {
            line.push_str(" [watched]");
        }
        lines.push(line);
    }
    let remaining = list.total.saturating_sub(list.skipped + list.rows.len());
    if remaining > 0 {
        lines.push(format!("  ({remaining} more below)"));
    }
}

fn push_details(lines: &mut Vec<String>, view: &DetailView) {
    lines.push(view.title.clone());
    lines.push(format!("{} • {}", view.released, view.runtime));
    lines.push(view.genre.clone());
    lines.push(format!("{} IMDb rating", view.imdb_rating));
    match view.rating {
        RatingView::Pending { user_rating: 0, .. } => lines.push("Your rating: - (1-9, 0 = 10)".to_string()),
        RatingView::Pending { user_rating, can_add } => lines.push(format!(
            "Your rating: {user_rating}/10{}",
            if can_add { "  a: add to list" } else { "" }
        )),
        RatingView::Watched { user_rating } => {
            lines.push(format!("You rated this movie {user_rating}/10"));
        }
    }
    lines.push(view.plot.clone());
    lines.push(format!("Starring {}", view.actors));
    lines.push(format!("Directed by {}", view.director));
}

fn push_watched(lines: &mut Vec<String>, pane: &WatchedPane) {
    let summary = &pane.summary;
    lines.push(format!(
        "Movies you watched: {}  imdb {:.2}  you {:.2}  {:.0} min",
        summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime
    ));
    if pane.list.skipped > 0 {
        lines.push(format!("  ({} more above)", pane.list.skipped));
    }
    for row in &pane.list.rows {
        lines.push(format!(
            "{}{}  imdb {}  you {}  {} min  {}",
            marker(row.is_selected),
            row.title,
            row.imdb_rating,
            row.user_rating,
            row.runtime_minutes,
            row.added
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchedSummary;
    use crate::ui::viewmodel::{FooterInfo, HeaderInfo, ResultRow, SearchBarInfo, WatchedRow};

    fn viewmodel(search: SearchPane, side: SidePane) -> ViewModel {
        ViewModel {
            header: HeaderInfo {
                title: "MovieList".to_string(),
                result_count: 0,
            },
            search_bar: SearchBarInfo {
                query: "heat".to_string(),
                focused: false,
            },
            search,
            side,
            footer: FooterInfo {
                keybindings: "q: quit".to_string(),
            },
            status: None,
        }
    }

    fn empty_watched() -> SidePane {
        SidePane::Watched(WatchedPane {
            summary: WatchedSummary::default(),
            list: ListWindow {
                rows: vec![],
                skipped: 0,
                total: 0,
            },
            focused: false,
        })
    }

    #[test]
    fn loading_renders_only_the_loader() {
        let lines = render_lines(&viewmodel(SearchPane::Loading, empty_watched()), 80);
        assert!(lines.iter().any(|l| l == LOADING));
        assert!(!lines.iter().any(|l| l.starts_with("Error")));
    }

    #[test]
    fn error_renders_reason() {
        let lines = render_lines(
            &viewmodel(SearchPane::Error("not found".to_string()), empty_watched()),
            80,
        );
        assert!(lines.contains(&"Error: not found".to_string()));
    }

    #[test]
    fn selected_result_is_marked() {
        let list = ListWindow {
            rows: vec![ResultRow {
                title: "Heat".to_string(),
                year: "1995".to_string(),
                is_selected: true,
                is_open: false,
                is_watched: true,
            }],
            skipped: 0,
            total: 3,
        };
        let lines = render_lines(&viewmodel(SearchPane::Results(list), empty_watched()), 80);
        assert!(lines.contains(&"> Heat (1995) [watched]".to_string()));
        assert!(lines.contains(&"  (2 more below)".to_string()));
    }

    #[test]
    fn watched_rows_and_summary() {
        let side = SidePane::Watched(WatchedPane {
            summary: WatchedSummary {
                count: 1,
                avg_imdb_rating: 8.25,
                avg_user_rating: 9.0,
                avg_runtime: 110.0,
            },
            list: ListWindow {
                rows: vec![WatchedRow {
                    title: "Heat".to_string(),
                    imdb_rating: "8.3".to_string(),
                    user_rating: 9,
                    runtime_minutes: 110,
                    added: "just now".to_string(),
                    is_selected: false,
                }],
                skipped: 0,
                total: 1,
            },
            focused: true,
        });
        let lines = render_lines(&viewmodel(SearchPane::Loading, side), 120);
        assert!(lines.contains(&"Movies you watched: 1  imdb 8.25  you 9.00  110 min".to_string()));
        assert!(lines.contains(&"  Heat  imdb 8.3  you 9  110 min  just now".to_string()));
    }

    #[test]
    fn lines_fit_width() {
        let lines = render_lines(&viewmodel(SearchPane::Loading, empty_watched()), 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }
}
