//! OMDb endpoint: request URLs and response decoding for both query kinds.

use super::remote::QueryKind;
use super::state::FetchError;
use super::token::Channel;
use crate::domain::{MovieDetail, MovieSummary};
use serde::Deserialize;

/// Default OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Minimum search length before a title search is issued.
pub const DEFAULT_MIN_SEARCH_LEN: usize = 3;

/// Where and how to reach the movie database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a GET URL with the API key and one lookup parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use movielist::query::ApiConfig;
    ///
    /// let api = ApiConfig::new("https://www.omdbapi.com/", "k3y");
    /// assert_eq!(
    ///     api.url("s", "star wars"),
    ///     "https://www.omdbapi.com/?apikey=k3y&s=star%20wars"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, param: &str, value: &str) -> String {
        format!(
            "{}?apikey={}&{}={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            param,
            urlencoding::encode(value)
        )
    }
}

/// The discriminator every OMDb response carries.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
}

fn malformed(e: &serde_json::Error) -> FetchError {
    FetchError::Malformed {
        detail: e.to_string(),
    }
}

/// Checks the top-level `Response` field before any payload is extracted.
///
/// An empty search result is reported by the API through the same
/// discriminator, so it surfaces as `NotFound` as well.
fn check_discriminator(body: &[u8]) -> Result<(), FetchError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| malformed(&e))?;
    if envelope.response.eq_ignore_ascii_case("false") {
        tracing::debug!(api_error = ?envelope.error, "api reported failure");
        return Err(FetchError::NotFound {
            message: envelope.error,
        });
    }
    Ok(())
}

/// Title search: key is free text, payload is the ordered result list.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery;

impl QueryKind for SearchQuery {
    type Payload = Vec<MovieSummary>;

    const CHANNEL: Channel = Channel::Search;
    const MIN_KEY_LEN: usize = DEFAULT_MIN_SEARCH_LEN;

    fn url(api: &ApiConfig, key: &str) -> String {
        api.url("s", key)
    }

    fn decode(body: &[u8]) -> Result<Self::Payload, FetchError> {
        check_discriminator(body)?;
        let body: SearchBody = serde_json::from_slice(body).map_err(|e| malformed(&e))?;
        Ok(body.search)
    }
}

/// Detail lookup: key is an IMDb id, payload is one record.
#[derive(Debug, Clone, Copy)]
pub struct DetailQuery;

impl QueryKind for DetailQuery {
    type Payload = MovieDetail;

    const CHANNEL: Channel = Channel::Detail;
    const MIN_KEY_LEN: usize = 1;

    fn url(api: &ApiConfig, key: &str) -> String {
        api.url("i", key)
    }

    fn decode(body: &[u8]) -> Result<Self::Payload, FetchError> {
        check_discriminator(body)?;
        serde_json::from_slice(body).map_err(|e| malformed(&e))
    }
}
