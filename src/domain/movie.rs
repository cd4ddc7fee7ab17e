//! Movie records as consumed from the OMDb API.
//!
//! Only the fields the plugin displays or copies into the watch list are
//! modelled. Every field is defaulted so a sparse record still decodes; the
//! remote schema is validated solely through its `Response` discriminator.

use serde::{Deserialize, Serialize};

/// One row of a title search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// Full record for a single title.
///
/// Numeric-looking fields (`runtime`, `imdb_rating`) are kept verbatim because
/// the API returns them as free text such as `"148 min"` or `"N/A"`. See
/// [`crate::domain::watched::parse_runtime_minutes`] for the conversion used
/// when a title is added to the watch list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_decodes_api_field_names() {
        let json = r#"{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Type":"movie","Poster":"https://img/x.jpg"}"#;
        let summary: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.imdb_id, "tt1375666");
        assert_eq!(summary.title, "Inception");
        assert_eq!(summary.year, "2010");
    }

    #[test]
    fn detail_tolerates_missing_fields() {
        let detail: MovieDetail = serde_json::from_str(r#"{"Title":"Heat"}"#).unwrap();
        assert_eq!(detail.title, "Heat");
        assert!(detail.runtime.is_empty());
        assert!(detail.director.is_empty());
    }
}
