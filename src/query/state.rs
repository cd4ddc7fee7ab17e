//! Observable state of a remote query.

use thiserror::Error;

/// Why a fetch did not produce a payload.
///
/// The `Display` text is the short reason shown to the user. `Cancelled` is
/// never stored in a [`FetchState`]; it only exists so that a superseded
/// completion can be named in logs without being mistaken for a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API answered with `"Response": "False"`.
    #[error("not found")]
    NotFound {
        /// The API's own explanation, e.g. `"Movie not found!"`.
        message: Option<String>,
    },

    /// Non-success HTTP status or network-level failure.
    #[error("fetch failed")]
    Transport {
        status: u16,
        detail: String,
    },

    /// The body was not the structured data the API promises.
    #[error("fetch failed")]
    Malformed {
        detail: String,
    },

    /// The request was superseded or torn down before it resolved.
    #[error("cancelled")]
    Cancelled,
}

impl FetchError {
    /// Whether this error may be surfaced to the user.
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Tagged state of one query instance. Exactly one variant is observable at a
/// time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    /// No key has been set, or the query was torn down.
    #[default]
    Idle,
    /// A request for the current key is outstanding.
    Loading,
    /// The current key resolved to a payload.
    Success(T),
    /// The current key failed; terminal until the key changes.
    Failure(FetchError),
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Short variant name for log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}
