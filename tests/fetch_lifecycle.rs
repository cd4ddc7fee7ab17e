//! Search and detail fetches driven through `handle_event`, with responses
//! delivered the way the host delivers them: status, body and the context map
//! the request was issued with.

use movielist::app::{handle_event, Action, AppState, Event, InputMode, Key};
use movielist::query::{ApiConfig, CancellationToken, FetchError, FetchState};

const ALIEN_RESULTS: &str = r#"{"Search":[
    {"Title":"Alien","Year":"1979","imdbID":"tt0078748","Poster":"N/A"},
    {"Title":"Aliens","Year":"1986","imdbID":"tt0090605","Poster":"N/A"}
],"totalResults":"2","Response":"True"}"#;

const ALIENS_RESULTS: &str = r#"{"Search":[
    {"Title":"Aliens","Year":"1986","imdbID":"tt0090605","Poster":"N/A"}
],"totalResults":"1","Response":"True"}"#;

const ALIEN_DETAIL: &str = r#"{"Title":"Alien","Year":"1979","imdbID":"tt0078748",
    "Runtime":"117 min","imdbRating":"8.5","Plot":"In space.","Released":"22 Jun 1979",
    "Actors":"Sigourney Weaver","Director":"Ridley Scott","Genre":"Horror, Sci-Fi",
    "Poster":"N/A","Response":"True"}"#;

fn state() -> AppState {
    AppState::new(ApiConfig::new("http://omdb.test/", "key"), 3)
}

fn press(state: &mut AppState, key: Key) -> Vec<Action> {
    handle_event(state, &Event::Key(key)).unwrap().1
}

fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
    text.chars().flat_map(|c| press(state, Key::Char(c))).collect()
}

fn fetches(actions: &[Action]) -> Vec<(String, CancellationToken)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Fetch { url, token } => Some((url.clone(), *token)),
            _ => None,
        })
        .collect()
}

fn cancels(actions: &[Action]) -> Vec<CancellationToken> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Cancel { token } => Some(*token),
            _ => None,
        })
        .collect()
}

fn respond(state: &mut AppState, token: CancellationToken, status: u16, body: &str) -> bool {
    let event = Event::WebResponse {
        status,
        body: body.as_bytes().to_vec(),
        context: token.to_context(),
    };
    handle_event(state, &event).unwrap().0
}

#[test]
fn short_query_settles_on_empty_results_without_a_request() {
    let mut state = state();
    let actions = type_text(&mut state, "al");

    assert!(fetches(&actions).is_empty());
    assert_eq!(state.search.state(), &FetchState::Success(vec![]));
    assert!(state.search_results().is_empty());
}

#[test]
fn third_character_issues_the_first_search() {
    let mut state = state();
    let actions = type_text(&mut state, "ali");

    let issued = fetches(&actions);
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].0, "http://omdb.test/?apikey=key&s=ali");
    assert!(state.search.state().is_loading());
}

#[test]
fn late_response_for_an_older_query_is_discarded() {
    let mut state = state();
    let first = fetches(&type_text(&mut state, "alien"));
    let first_token = first.last().unwrap().1;

    let actions = press(&mut state, Key::Char('s'));
    assert_eq!(cancels(&actions), vec![first_token]);
    let second_token = fetches(&actions)[0].1;

    // The newer request answers first.
    assert!(respond(&mut state, second_token, 200, ALIENS_RESULTS));
    assert_eq!(state.search_results().len(), 1);

    // The superseded one arrives afterwards and changes nothing.
    assert!(!respond(&mut state, first_token, 200, ALIEN_RESULTS));
    assert_eq!(state.search_results().len(), 1);
    assert_eq!(state.search_results()[0].title, "Aliens");
}

#[test]
fn cancelled_then_resolved_leaves_the_new_request_loading() {
    let mut state = state();
    let old = fetches(&type_text(&mut state, "ali"))[0].1;
    let _new = fetches(&press(&mut state, Key::Char('e')))[0].1;

    assert!(!respond(&mut state, old, 200, ALIEN_RESULTS));
    assert!(state.search.state().is_loading());
}

#[test]
fn backspacing_to_a_short_query_cancels_and_clears() {
    let mut state = state();
    let token = fetches(&type_text(&mut state, "ali"))[0].1;

    let actions = press(&mut state, Key::Backspace);
    assert_eq!(cancels(&actions), vec![token]);
    assert!(fetches(&actions).is_empty());
    assert_eq!(state.search.state(), &FetchState::Success(vec![]));

    assert!(!respond(&mut state, token, 200, ALIEN_RESULTS));
    assert!(state.search_results().is_empty());
}

#[test]
fn api_miss_is_reported_as_not_found() {
    let mut state = state();
    let token = fetches(&type_text(&mut state, "zzzzz")).last().unwrap().1;

    respond(&mut state, token, 200, r#"{"Response":"False","Error":"Movie not found!"}"#);
    let error = state.search.state().error().unwrap();
    assert_eq!(error.to_string(), "not found");
}

#[test]
fn http_failure_is_reported_as_fetch_failed() {
    let mut state = state();
    let token = fetches(&type_text(&mut state, "alien")).last().unwrap().1;

    respond(&mut state, token, 503, "Service Unavailable");
    assert!(matches!(
        state.search.state(),
        FetchState::Failure(FetchError::Transport { status: 503, .. })
    ));
    assert_eq!(state.search.state().error().unwrap().to_string(), "fetch failed");
}

#[test]
fn failure_is_terminal_until_the_query_changes() {
    let mut state = state();
    let token = fetches(&type_text(&mut state, "alien")).last().unwrap().1;
    respond(&mut state, token, 500, "");

    // Leaving and re-entering typing mode starts over from an empty query.
    press(&mut state, Key::Enter);
    assert_eq!(state.input_mode, InputMode::Navigating);
    assert!(state.search.state().error().is_some());

    let actions = type_text(&mut state, "/alien");
    let issued = fetches(&actions);
    assert_eq!(issued.last().unwrap().0, "http://omdb.test/?apikey=key&s=alien");
    assert!(state.search.state().is_loading());
}

#[test]
fn response_without_a_token_is_ignored() {
    let mut state = state();
    type_text(&mut state, "alien");

    let event = Event::WebResponse {
        status: 200,
        body: ALIEN_RESULTS.as_bytes().to_vec(),
        context: Default::default(),
    };
    let (render, actions) = handle_event(&mut state, &event).unwrap();
    assert!(!render);
    assert!(actions.is_empty());
    assert!(state.search.state().is_loading());
}

#[test]
fn detail_fetch_renames_the_pane_and_teardown_discards_late_details() {
    let mut state = state();
    let search = fetches(&type_text(&mut state, "alien")).last().unwrap().1;
    respond(&mut state, search, 200, ALIEN_RESULTS);
    press(&mut state, Key::Enter);

    let actions = press(&mut state, Key::Enter);
    let (url, detail) = fetches(&actions)[0].clone();
    assert_eq!(url, "http://omdb.test/?apikey=key&i=tt0078748");

    let (_, actions) = handle_event(
        &mut state,
        &Event::WebResponse {
            status: 200,
            body: ALIEN_DETAIL.as_bytes().to_vec(),
            context: detail.to_context(),
        },
    )
    .unwrap();
    assert_eq!(actions, vec![Action::SetPaneTitle("Movie | Alien".to_string())]);
    assert_eq!(state.open_detail().unwrap().director, "Ridley Scott");

    // Open the second result, then close before it answers.
    press(&mut state, Key::Char('j'));
    let second = fetches(&press(&mut state, Key::Enter))[0].1;
    let actions = press(&mut state, Key::Esc);
    assert_eq!(cancels(&actions), vec![second]);
    assert_eq!(state.details.state(), &FetchState::Idle);

    assert!(!respond(&mut state, second, 200, ALIEN_DETAIL));
    assert_eq!(state.details.state(), &FetchState::Idle);
    assert!(state.selected_id.is_none());
}
