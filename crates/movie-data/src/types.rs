//! Core domain types shared by every crate in the workspace.
//!
//! Upstream payloads are deserialized straight into these structs, so the
//! serde attributes here double as the wire contract with the movie database:
//! - `MovieSummary` is one entry of a discover/search/recommendations listing
//! - `Credits` is the body of the per-movie credits endpoint
//! - `EnrichedMovie` is what the view layer actually renders

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing key.
///
/// `#[serde(default)]` alone only covers the missing key, and upstream sends
/// `null` for unknown titles, dates, and jobs.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Type Aliases
// =============================================================================

/// Upstream-assigned movie identifier
pub type MovieId = u64;

/// Upstream-assigned person identifier (cast and crew share one id space)
pub type PersonId = u64;

// =============================================================================
// Listing Types
// =============================================================================

/// Raw movie summary as returned by a listing endpoint.
///
/// Never mutated after retrieval. Enrichment copies it into an
/// [`EnrichedMovie`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Relative poster path such as `/abc.jpg`; upstream sends `null` for
    /// movies without artwork
    #[serde(default)]
    pub poster_path: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or empty when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: String::new(),
        }
    }

    pub fn with_poster_path(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    /// Release date, or `None` when upstream left it empty
    pub fn release_date(&self) -> Option<&str> {
        Some(self.release_date.as_str()).filter(|d| !d.is_empty())
    }
}

/// Envelope used by every listing endpoint: `{ "results": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<MovieSummary>,
}

// =============================================================================
// Credits
// =============================================================================

/// A credited person, used for both the director and the lead actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One entry of the crew list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: PersonId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job: String,
}

impl CrewMember {
    pub fn new(id: PersonId, name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            job: job.into(),
        }
    }
}

/// One entry of the cast list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: PersonId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl CastMember {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Per-movie credits.
///
/// Both lists keep upstream order. Either may be missing from the payload,
/// which is treated the same as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn new(cast: Vec<CastMember>, crew: Vec<CrewMember>) -> Self {
        Self { cast, crew }
    }
}

// =============================================================================
// EnrichedMovie
// =============================================================================

/// A movie summary annotated with its director and lead actor.
///
/// Both annotations are optional: upstream credits may omit a director or the
/// whole cast, and that is a valid final state rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedMovie {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub director: Option<Person>,
    pub lead_actor: Option<Person>,
}

impl EnrichedMovie {
    pub fn new(summary: MovieSummary, director: Option<Person>, lead_actor: Option<Person>) -> Self {
        Self {
            summary,
            director,
            lead_actor,
        }
    }

    /// Same identifier as the summary this record was built from
    pub fn id(&self) -> MovieId {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    pub fn director_name(&self) -> Option<&str> {
        self.director.as_ref().map(|p| p.name.as_str())
    }

    pub fn lead_actor_name(&self) -> Option<&str> {
        self.lead_actor.as_ref().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tolerates_missing_and_extra_fields() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": null,
            "vote_average": 8.2,
            "adult": false
        }"#;

        let summary: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, 603);
        assert_eq!(summary.title, "The Matrix");
        assert!(summary.poster_path.is_none());
        assert_eq!(summary.release_date, "");
        assert!(summary.release_date().is_none());
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let json = r#"{ "results": [
            { "id": 7, "title": "Obscure", "poster_path": null, "release_date": null },
            { "id": 8, "title": null, "release_date": "2001-01-01" }
        ] }"#;

        let page: MoviePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "Obscure");
        assert!(page.results[0].release_date().is_none());
        assert_eq!(page.results[1].title, "");
        assert_eq!(page.results[1].release_date(), Some("2001-01-01"));
    }

    #[test]
    fn test_null_credit_fields_decode_as_empty() {
        let json = r#"{
            "cast": null,
            "crew": [{ "id": 1, "name": "Someone", "job": null }]
        }"#;

        let credits: Credits = serde_json::from_str(json).unwrap();
        assert!(credits.cast.is_empty());
        assert_eq!(credits.crew[0].job, "");
    }

    #[test]
    fn test_credits_missing_lists_are_empty() {
        let credits: Credits = serde_json::from_str(r#"{ "id": 603 }"#).unwrap();
        assert!(credits.cast.is_empty());
        assert!(credits.crew.is_empty());
    }

    #[test]
    fn test_page_keeps_upstream_order() {
        let json = r#"{ "page": 1, "results": [
            { "id": 3, "title": "C" },
            { "id": 1, "title": "A" },
            { "id": 2, "title": "B" }
        ] }"#;

        let page: MoviePage = serde_json::from_str(json).unwrap();
        let ids: Vec<MovieId> = page.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_enriched_movie_serializes_flat() {
        let movie = EnrichedMovie::new(
            MovieSummary::new(1, "Alien").with_release_date("1979-05-25"),
            Some(Person::new(10, "Ridley Scott")),
            None,
        );

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "Alien");
        assert_eq!(value["director"]["name"], "Ridley Scott");
        assert!(value["lead_actor"].is_null());
    }
}
