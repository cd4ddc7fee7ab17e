//! The remote query state machine.
//!
//! A [`RemoteQuery`] turns a changing key into exactly one authoritative
//! [`FetchState`]. It never performs I/O itself: key changes produce
//! [`QueryCommand`]s for the runtime to execute, and completions are fed back
//! through [`RemoteQuery::resolve`] together with the token they were issued
//! under.
//!
//! ```text
//! Idle ──key, len < min──▶ Success(empty)
//! Idle | Success | Failure ──key, len ≥ min──▶ Loading ──ok──▶ Success
//!                                               │  ├──"False"──▶ Failure(not found)
//!                                               │  └──non-2xx──▶ Failure(fetch failed)
//!                                               └──superseded──▶ (dropped, no transition)
//! ```

use super::omdb::ApiConfig;
use super::state::{FetchError, FetchState};
use super::token::{CancellationToken, Channel};
use std::fmt::Debug;
use std::marker::PhantomData;

/// What a query fetches and how its responses decode.
pub trait QueryKind {
    /// Decoded payload. `Default` is the "no query" value for short keys.
    type Payload: Clone + Default + PartialEq + Debug;

    /// Channel stamped on every token this kind issues.
    const CHANNEL: Channel;

    /// Keys with fewer characters than this are treated as "no query".
    const MIN_KEY_LEN: usize;

    /// Request URL for `key`.
    fn url(api: &ApiConfig, key: &str) -> String;

    /// Decodes a successful (2xx) response body.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the body's discriminator signals failure and
    /// `Malformed` when the body is not the expected structure.
    fn decode(body: &[u8]) -> Result<Self::Payload, FetchError>;
}

/// A completed HTTP exchange as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Side effects requested by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    /// Issue one GET; its completion must come back with `token`.
    Fetch {
        url: String,
        token: CancellationToken,
    },
    /// Abandon the outstanding request issued under `token`.
    Cancel { token: CancellationToken },
}

/// Outcome of feeding a completion into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The completion belonged to the current request and set the state.
    Applied,
    /// The completion belonged to a superseded or torn-down request and was
    /// ignored.
    Discarded,
}

/// Fetch lifecycle for one consumer.
#[derive(Debug, Clone)]
pub struct RemoteQuery<K: QueryKind> {
    api: ApiConfig,
    min_key_len: usize,
    key: Option<String>,
    state: FetchState<K::Payload>,
    in_flight: Option<CancellationToken>,
    generation: u64,
    kind: PhantomData<K>,
}

impl<K: QueryKind> RemoteQuery<K> {
    #[must_use]
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            min_key_len: K::MIN_KEY_LEN,
            key: None,
            state: FetchState::Idle,
            in_flight: None,
            generation: 0,
            kind: PhantomData,
        }
    }

    /// Overrides the kind's minimum key length.
    #[must_use]
    pub const fn with_min_key_len(mut self, min_key_len: usize) -> Self {
        self.min_key_len = min_key_len;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<K::Payload> {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Token of the request currently considered authoritative.
    #[must_use]
    pub const fn in_flight(&self) -> Option<CancellationToken> {
        self.in_flight
    }

    /// Points the query at a new key.
    ///
    /// Re-runs only when `key` differs from the current key. The previous
    /// outstanding request, if any, is cancelled before the new one is issued.
    ///
    /// # Examples
    ///
    /// ```
    /// use movielist::query::{ApiConfig, FetchState, QueryCommand, RemoteQuery, SearchQuery};
    ///
    /// let mut query = RemoteQuery::<SearchQuery>::new(ApiConfig::default());
    /// assert!(query.set_key("ab").is_empty());
    /// assert_eq!(query.state(), &FetchState::Success(vec![]));
    ///
    /// let commands = query.set_key("abc");
    /// assert!(matches!(commands.as_slice(), [QueryCommand::Fetch { .. }]));
    /// assert!(query.state().is_loading());
    /// ```
    pub fn set_key(&mut self, key: &str) -> Vec<QueryCommand> {
        if self.key.as_deref() == Some(key) {
            tracing::trace!(channel = K::CHANNEL.as_str(), "key unchanged, not re-running");
            return vec![];
        }

        let _span = tracing::debug_span!(
            "remote_query_set_key",
            channel = K::CHANNEL.as_str(),
            key_len = key.chars().count()
        )
        .entered();

        let mut commands = self.cleanup();
        self.key = Some(key.to_string());

        if key.chars().count() < self.min_key_len {
            tracing::debug!(min_key_len = self.min_key_len, "key below minimum length, no request");
            self.state = FetchState::Success(K::Payload::default());
            return commands;
        }

        self.generation += 1;
        let token = CancellationToken::new(K::CHANNEL, self.generation);
        self.in_flight = Some(token);
        self.state = FetchState::Loading;

        tracing::debug!(token = %token, "issuing request");
        commands.push(QueryCommand::Fetch {
            url: K::url(&self.api, key),
            token,
        });
        commands
    }

    /// Applies a completion if `token` is still current.
    ///
    /// Completions for any other token are discarded without touching the
    /// state: they are cancellations, not failures.
    pub fn resolve(&mut self, token: CancellationToken, response: &HttpResponse) -> Resolution {
        if self.in_flight != Some(token) {
            tracing::debug!(
                token = %token,
                current = ?self.in_flight,
                reason = %FetchError::Cancelled,
                "discarding superseded response"
            );
            return Resolution::Discarded;
        }

        self.in_flight = None;
        self.state = match classify::<K>(response) {
            Ok(payload) => FetchState::Success(payload),
            Err(error) => {
                tracing::debug!(token = %token, error = ?error, "request failed");
                FetchState::Failure(error)
            }
        };

        tracing::debug!(token = %token, state = self.state.label(), "response applied");
        Resolution::Applied
    }

    /// Releases the query when its consumer goes away.
    ///
    /// Cancels the outstanding request, clears the key and returns to `Idle`.
    /// Later completions are discarded by [`Self::resolve`].
    pub fn teardown(&mut self) -> Vec<QueryCommand> {
        let commands = self.cleanup();
        self.key = None;
        self.state = FetchState::Idle;
        tracing::debug!(
            channel = K::CHANNEL.as_str(),
            cancelled = commands.len(),
            "query torn down"
        );
        commands
    }

    /// Invalidates the outstanding request, if there is one.
    fn cleanup(&mut self) -> Vec<QueryCommand> {
        self.in_flight
            .take()
            .map(|token| {
                tracing::debug!(token = %token, "cancelling outstanding request");
                QueryCommand::Cancel { token }
            })
            .into_iter()
            .collect()
    }
}

fn classify<K: QueryKind>(response: &HttpResponse) -> Result<K::Payload, FetchError> {
    if !response.is_success() {
        let detail: String = String::from_utf8_lossy(&response.body).chars().take(200).collect();
        return Err(FetchError::Transport {
            status: response.status,
            detail,
        });
    }
    K::decode(&response.body)
}
