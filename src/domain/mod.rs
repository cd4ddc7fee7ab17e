//! Domain layer for the movielist plugin.
//!
//! Core record types and the crate error type, independent of the Zellij host
//! and of how records are fetched or stored.
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Search summaries and detail records from the movie database
//! - [`watched`]: Watch list entries and summary statistics

pub mod error;
pub mod movie;
pub mod watched;

pub use error::{MovieListError, Result};
pub use movie::{MovieDetail, MovieSummary};
pub use watched::{WatchedMovie, WatchedSummary};
