//! Selecting, rating and adding movies, with persistence through the worker.

use movielist::app::{handle_event, Action, AppState, Event, Key, Pane};
use movielist::domain::WatchedMovie;
use movielist::query::{ApiConfig, CancellationToken};
use movielist::storage::{JsonStore, WATCHED_KEY};
use movielist::worker::{MovieListWorker, WorkerMessage, WorkerResponse};

const RESULTS: &str = r#"{"Search":[
    {"Title":"Heat","Year":"1995","imdbID":"tt0113277","Poster":"N/A"},
    {"Title":"Ronin","Year":"1998","imdbID":"tt0122690","Poster":"N/A"}
],"totalResults":"2","Response":"True"}"#;

const HEAT: &str = r#"{"Title":"Heat","Year":"1995","imdbID":"tt0113277",
    "Runtime":"170 min","imdbRating":"8.3","Plot":"A heist.","Released":"15 Dec 1995",
    "Actors":"Al Pacino","Director":"Michael Mann","Genre":"Crime",
    "Poster":"N/A","Response":"True"}"#;

fn press(state: &mut AppState, key: Key) -> Vec<Action> {
    handle_event(state, &Event::Key(key)).unwrap().1
}

fn deliver(state: &mut AppState, actions: &[Action], body: &str) -> Vec<Action> {
    let token: CancellationToken = actions
        .iter()
        .find_map(|a| match a {
            Action::Fetch { token, .. } => Some(*token),
            _ => None,
        })
        .unwrap();
    let event = Event::WebResponse {
        status: 200,
        body: body.as_bytes().to_vec(),
        context: token.to_context(),
    };
    handle_event(state, &event).unwrap().1
}

/// Types a query, loads results and leaves the cursor on the first result.
fn searched() -> AppState {
    let mut state = AppState::new(ApiConfig::new("http://omdb.test/", "key"), 3);
    let mut actions = vec![];
    for c in "heat".chars() {
        actions = press(&mut state, Key::Char(c));
    }
    deliver(&mut state, &actions, RESULTS);
    press(&mut state, Key::Enter);
    state
}

fn opened() -> AppState {
    let mut state = searched();
    let actions = press(&mut state, Key::Enter);
    deliver(&mut state, &actions, HEAT);
    state
}

fn saved_movies(actions: &[Action]) -> Option<Vec<WatchedMovie>> {
    actions.iter().find_map(|a| match a {
        Action::PostToWorker(WorkerMessage::SaveWatched { movies, .. }) => Some(movies.clone()),
        _ => None,
    })
}

#[test]
fn rate_then_add_persists_and_closes() {
    let mut state = opened();

    press(&mut state, Key::Char('7'));
    press(&mut state, Key::Char('9'));
    press(&mut state, Key::Char('9'));
    assert_eq!(state.user_rating, 9);
    assert_eq!(state.rating_decisions, 2);

    let actions = press(&mut state, Key::Char('a'));
    let movies = saved_movies(&actions).unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].imdb_id, "tt0113277");
    assert_eq!(movies[0].user_rating, 9);
    assert_eq!(movies[0].runtime_minutes, 170);
    assert_eq!(movies[0].rating_decisions, 2);
    assert!(actions.contains(&Action::SetPaneTitle("MovieList".to_string())));

    assert!(state.selected_id.is_none());
    assert!(state.is_watched("tt0113277"));
}

#[test]
fn zero_key_rates_ten() {
    let mut state = opened();
    press(&mut state, Key::Char('0'));
    assert_eq!(state.user_rating, 10);
}

#[test]
fn add_without_rating_does_nothing() {
    let mut state = opened();
    assert!(press(&mut state, Key::Char('a')).is_empty());
    assert!(state.watched.is_empty());
    assert!(state.selected_id.is_some());
}

#[test]
fn watched_movie_cannot_be_rated_again() {
    let mut state = opened();
    press(&mut state, Key::Char('8'));
    press(&mut state, Key::Char('a'));

    // Reopen the same title.
    let actions = press(&mut state, Key::Enter);
    deliver(&mut state, &actions, HEAT);
    press(&mut state, Key::Char('3'));
    assert_eq!(state.user_rating, 0);
    assert!(press(&mut state, Key::Char('a')).is_empty());
    assert_eq!(state.watched_entry("tt0113277").unwrap().user_rating, 8);
}

#[test]
fn selecting_the_open_movie_again_closes_it() {
    let mut state = opened();
    assert_eq!(state.selected_id.as_deref(), Some("tt0113277"));

    let actions = press(&mut state, Key::Enter);
    assert!(state.selected_id.is_none());
    assert!(actions.contains(&Action::SetPaneTitle("MovieList".to_string())));
}

#[test]
fn escape_closes_only_while_a_movie_is_open() {
    let mut state = opened();
    assert_eq!(state.bindings.len(), 1);

    press(&mut state, Key::Esc);
    assert!(state.selected_id.is_none());
    assert!(state.bindings.is_empty());

    // Nothing bound any more: a second Esc is a no-op.
    let (render, actions) = handle_event(&mut state, &Event::Key(Key::Esc)).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
}

#[test]
fn switching_movies_keeps_a_single_escape_binding() {
    let mut state = opened();
    press(&mut state, Key::Char('j'));
    press(&mut state, Key::Enter);
    assert_eq!(state.selected_id.as_deref(), Some("tt0122690"));
    assert_eq!(state.bindings.len(), 1);
}

#[test]
fn delete_from_the_watch_list_pane() {
    let mut state = opened();
    press(&mut state, Key::Char('8'));
    press(&mut state, Key::Char('a'));

    press(&mut state, Key::Tab);
    assert_eq!(state.pane, Pane::Watched);
    let actions = press(&mut state, Key::Char('d'));
    assert_eq!(saved_movies(&actions), Some(vec![]));
    assert!(state.watched.is_empty());
}

#[test]
fn watch_list_round_trips_through_the_worker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watched.json");

    let mut state = opened();
    press(&mut state, Key::Char('6'));
    let actions = press(&mut state, Key::Char('a'));
    let Some(Action::PostToWorker(save)) =
        actions.into_iter().find(|a| matches!(a, Action::PostToWorker(_)))
    else {
        panic!("no save posted");
    };

    // Messages cross the plugin/worker boundary as JSON.
    let payload = serde_json::to_string(&save).unwrap();
    let mut worker = MovieListWorker::with_store(Box::new(JsonStore::new(path.clone()).unwrap()));
    let response = worker.handle_message(serde_json::from_str(&payload).unwrap());
    assert_eq!(response, WorkerResponse::WatchedSaved { count: 1 });
    drop(worker);

    // A fresh plugin instance loads what was saved.
    let mut worker = MovieListWorker::with_store(Box::new(JsonStore::new(path).unwrap()));
    let response = worker.handle_message(WorkerMessage::load_watched(WATCHED_KEY.to_string()));
    let mut fresh = AppState::new(ApiConfig::default(), 3);
    let (_, actions) = handle_event(&mut fresh, &Event::WorkerResponse(response)).unwrap();
    assert!(actions.is_empty());
    assert!(fresh.watched_loaded);
    assert_eq!(fresh.watched.len(), 1);
    assert_eq!(fresh.watched[0].user_rating, 6);
}

#[test]
fn entries_added_before_the_list_loads_are_merged_and_saved() {
    let mut state = opened();
    press(&mut state, Key::Char('5'));
    press(&mut state, Key::Char('a'));

    let persisted = WatchedMovie {
        imdb_id: "tt0122690".to_string(),
        title: "Ronin".to_string(),
        year: "1998".to_string(),
        poster: "N/A".to_string(),
        imdb_rating: 7.2,
        runtime_minutes: 122,
        user_rating: 7,
        rating_decisions: 1,
        added_at: 0,
    };
    let (_, actions) = handle_event(
        &mut state,
        &Event::WorkerResponse(WorkerResponse::WatchedLoaded {
            movies: vec![persisted],
        }),
    )
    .unwrap();

    let movies = saved_movies(&actions).unwrap();
    let ids: Vec<&str> = movies.iter().map(|m| m.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt0122690", "tt0113277"]);
}
