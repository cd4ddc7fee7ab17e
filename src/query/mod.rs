//! Remote data fetching.
//!
//! - [`remote`]: The per-consumer fetch lifecycle ([`RemoteQuery`])
//! - [`state`]: Observable query state and fetch errors
//! - [`token`]: Cancellation tokens routed through request context maps
//! - [`omdb`]: Movie database URLs and response decoding

pub mod omdb;
pub mod remote;
pub mod state;
pub mod token;

pub use omdb::{ApiConfig, DetailQuery, SearchQuery};
pub use remote::{HttpResponse, QueryCommand, QueryKind, RemoteQuery, Resolution};
pub use state::{FetchError, FetchState};
pub use token::{CancellationToken, Channel};
