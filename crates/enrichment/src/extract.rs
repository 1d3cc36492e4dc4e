//! Director and lead-actor extraction from a credits payload.

use movie_data::{Credits, EnrichedMovie, MovieSummary, Person};

/// Crew job title that marks a director
pub const DIRECTOR_JOB: &str = "Director";

/// First crew entry whose job is exactly `"Director"`.
///
/// Co-directors after the first are ignored.
pub fn find_director(credits: &Credits) -> Option<Person> {
    credits
        .crew
        .iter()
        .find(|member| member.job == DIRECTOR_JOB)
        .map(|member| Person::new(member.id, member.name.clone()))
}

/// First entry of the cast list.
///
/// Upstream order is assumed to be billing order. That is an upstream
/// contract we cannot verify here, so no re-sorting is attempted.
pub fn find_lead_actor(credits: &Credits) -> Option<Person> {
    credits
        .cast
        .first()
        .map(|member| Person::new(member.id, member.name.clone()))
}

/// Copy `summary` into an enriched record carrying its credits
pub fn enrich(summary: MovieSummary, credits: &Credits) -> EnrichedMovie {
    EnrichedMovie::new(summary, find_director(credits), find_lead_actor(credits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_data::{CastMember, CrewMember};

    #[test]
    fn test_first_director_wins() {
        let credits = Credits::new(
            vec![],
            vec![
                CrewMember::new(1, "Joel Silver", "Producer"),
                CrewMember::new(9340, "Lana Wachowski", "Director"),
                CrewMember::new(9339, "Lilly Wachowski", "Director"),
            ],
        );

        assert_eq!(find_director(&credits), Some(Person::new(9340, "Lana Wachowski")));
    }

    #[test]
    fn test_job_match_is_exact() {
        let credits = Credits::new(
            vec![],
            vec![
                CrewMember::new(1, "Assistant", "Assistant Director"),
                CrewMember::new(2, "Photographer", "Director of Photography"),
            ],
        );

        assert!(find_director(&credits).is_none());
    }

    #[test]
    fn test_lead_actor_is_first_cast_entry() {
        let credits = Credits::new(
            vec![CastMember::new(6384, "Keanu Reeves"), CastMember::new(2975, "Laurence Fishburne")],
            vec![],
        );

        assert_eq!(find_lead_actor(&credits), Some(Person::new(6384, "Keanu Reeves")));
    }

    #[test]
    fn test_empty_credits_leave_fields_absent() {
        let movie = enrich(MovieSummary::new(5, "Lost Reel"), &Credits::default());

        assert_eq!(movie.id(), 5);
        assert!(movie.director.is_none());
        assert!(movie.lead_actor.is_none());
    }
}
