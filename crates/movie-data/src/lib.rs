//! # Movie Data Crate
//!
//! Shared domain types for the movie browser.
//!
//! ## Main Components
//!
//! - **types**: Listing summaries, credits, and the enriched record the view renders
//! - **image**: Poster URL construction
//!
//! ## Example Usage
//!
//! ```ignore
//! use movie_data::{EnrichedMovie, MovieSummary, Person};
//!
//! let summary = MovieSummary::new(603, "The Matrix").with_release_date("1999-03-30");
//! let movie = EnrichedMovie::new(summary, Some(Person::new(9340, "Lana Wachowski")), None);
//!
//! println!("{} directed by {:?}", movie.title(), movie.director_name());
//! ```

// Public modules
pub mod types;
pub mod image;

// Re-export commonly used types for convenience
pub use types::{
    // Type aliases
    MovieId,
    PersonId,
    // Core types
    MovieSummary,
    MoviePage,
    Person,
    CastMember,
    CrewMember,
    Credits,
    EnrichedMovie,
};
pub use image::{poster_url, DEFAULT_IMAGE_BASE_URL, POSTER_SIZE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enriched_movie_keeps_summary_identity() {
        let summary = MovieSummary::new(42, "Seven Samurai");
        let movie = EnrichedMovie::new(summary.clone(), None, None);

        assert_eq!(movie.id(), summary.id);
        assert_eq!(movie.title(), "Seven Samurai");
        assert!(movie.director_name().is_none());
        assert!(movie.lead_actor_name().is_none());
    }
}
