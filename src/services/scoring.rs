use crate::models::{CatalogAnime, ListEntry};

/// Weight applied to the catalog's community rating
const CATALOG_SCORE_WEIGHT: f64 = 5.0;

/// Points per favorite genre the candidate carries
const GENRE_MATCH_WEIGHT: f64 = 15.0;

/// Flat bonus for titles the community rates highly
const HIGHLY_RATED_BONUS: f64 = 10.0;

/// Community rating at or above which the flat bonus applies
const HIGHLY_RATED_THRESHOLD: f64 = 8.0;

/// Penalty large enough to push any already-tracked title below zero
const ALREADY_LISTED_PENALTY: f64 = 1000.0;

/// Community rating treated as acclaimed when wording the reason
const ACCLAIMED_THRESHOLD: f64 = 8.5;

/// Computes the affinity of a candidate title for one user.
///
/// Pure arithmetic over already-fetched data: the catalog rating scaled up,
/// a bonus per matching favorite genre, a flat bonus for highly rated
/// titles, and a penalty that disqualifies anything already on the user's
/// list. Negative results are legal; callers drop non-positive scores.
///
/// The score ranks candidates within a single run and is never persisted.
pub fn affinity_score(
    candidate: &CatalogAnime,
    owned: &[ListEntry],
    favorite_genres: &[String],
) -> f64 {
    let mut score = 0.0;

    if let Some(rating) = candidate.score {
        score += rating * CATALOG_SCORE_WEIGHT;
    }

    let matches = matching_genres(candidate, favorite_genres).count();
    if matches > 0 {
        score += matches as f64 * GENRE_MATCH_WEIGHT;
    }

    if candidate.score.is_some_and(|rating| rating >= HIGHLY_RATED_THRESHOLD) {
        score += HIGHLY_RATED_BONUS;
    }

    if owned.iter().any(|entry| entry.mal_id == candidate.mal_id) {
        score -= ALREADY_LISTED_PENALTY;
    }

    score
}

/// Words the one-line justification shown next to a recommendation.
///
/// Genre overlap wins over everything: up to two matching genres are named
/// in their catalog casing. Without overlap, an acclaimed rating gets the
/// community wording, and anything else falls back to a generic line. Every
/// recommendation therefore carries a non-empty reason.
pub fn recommendation_reason(candidate: &CatalogAnime, favorite_genres: &[String]) -> String {
    let matching: Vec<&str> = matching_genres(candidate, favorite_genres)
        .map(String::as_str)
        .take(2)
        .collect();

    if !matching.is_empty() {
        return format!("Based on your love for {}", matching.join(" and "));
    }

    if candidate.score.is_some_and(|rating| rating >= ACCLAIMED_THRESHOLD) {
        return "Highly rated by the community".to_string();
    }

    "Popular among anime fans".to_string()
}

/// Candidate genres present in the favorites list, compared case-folded,
/// yielded in catalog order and casing
fn matching_genres<'a>(
    candidate: &'a CatalogAnime,
    favorite_genres: &'a [String],
) -> impl Iterator<Item = &'a String> {
    candidate.genres.iter().filter(move |genre| {
        let folded = genre.to_lowercase();
        favorite_genres.iter().any(|fav| fav.to_lowercase() == folded)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn candidate(mal_id: i64, score: Option<f64>, genres: &[&str]) -> CatalogAnime {
        CatalogAnime {
            mal_id,
            title: format!("Anime {}", mal_id),
            title_english: None,
            image_url: None,
            score,
            episodes: Some(24),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            synopsis: None,
            status: None,
        }
    }

    fn owned_entry(mal_id: i64) -> ListEntry {
        ListEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            mal_id,
            title: format!("Owned {}", mal_id),
            status: WatchStatus::Watching,
            rating: None,
            episodes_watched: 0,
            total_episodes: None,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn favorites(genres: &[&str]) -> Vec<String> {
        genres.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_score_scales_catalog_rating() {
        let score = affinity_score(&candidate(1, Some(7.0), &[]), &[], &[]);
        assert_eq!(score, 35.0);
    }

    #[test]
    fn test_unrated_title_scores_zero_base() {
        let score = affinity_score(&candidate(1, None, &[]), &[], &[]);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_each_matching_genre_adds_fifteen() {
        let favs = favorites(&["action", "romance"]);

        let one = affinity_score(&candidate(1, None, &["Action"]), &[], &favs);
        let two = affinity_score(&candidate(1, None, &["Action", "Romance"]), &[], &favs);

        assert_eq!(one, 15.0);
        assert_eq!(two, 30.0);
    }

    #[test]
    fn test_genre_match_is_case_insensitive() {
        let favs = favorites(&["action"]);
        let score = affinity_score(&candidate(1, None, &["ACTION"]), &[], &favs);
        assert_eq!(score, 15.0);
    }

    #[test]
    fn test_highly_rated_bonus_applies_at_threshold() {
        let below = affinity_score(&candidate(1, Some(7.9), &[]), &[], &[]);
        let at = affinity_score(&candidate(1, Some(8.0), &[]), &[], &[]);

        assert_eq!(below, 39.5);
        assert_eq!(at, 50.0);
    }

    #[test]
    fn test_owned_title_is_pushed_below_zero() {
        let owned = vec![owned_entry(5)];
        let favs = favorites(&["action"]);

        // Even a perfect score cannot survive the penalty
        let score = affinity_score(&candidate(5, Some(10.0), &["Action"]), &owned, &favs);
        assert!(score < 0.0);
        assert_eq!(score, 50.0 + 15.0 + 10.0 - 1000.0);
    }

    #[test]
    fn test_unowned_title_is_not_penalized() {
        let owned = vec![owned_entry(5)];
        let score = affinity_score(&candidate(7, Some(7.0), &[]), &owned, &[]);
        assert_eq!(score, 35.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let owned = vec![owned_entry(5)];
        let favs = favorites(&["action", "drama"]);
        let anime = candidate(9, Some(8.6), &["Action", "Drama", "Fantasy"]);

        let first = affinity_score(&anime, &owned, &favs);
        let second = affinity_score(&anime, &owned, &favs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_moderately_rated_genre_match() {
        // 7.0 * 5 + one genre match, no bonus
        let favs = favorites(&["action"]);
        let score = affinity_score(&candidate(7, Some(7.0), &["Action"]), &[], &favs);
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_highly_rated_without_genre_match() {
        // 8.6 * 5 + bonus, no genre overlap
        let score = affinity_score(&candidate(9, Some(8.6), &["Romance"]), &[], &favorites(&["action"]));
        assert!((score - 53.0).abs() < 1e-9);
    }

    #[test]
    fn test_reason_names_matching_genres() {
        let favs = favorites(&["action", "drama"]);
        let reason = recommendation_reason(&candidate(1, Some(6.0), &["Action", "Drama"]), &favs);
        assert_eq!(reason, "Based on your love for Action and Drama");
    }

    #[test]
    fn test_reason_caps_at_two_genres() {
        let favs = favorites(&["action", "drama", "fantasy"]);
        let reason =
            recommendation_reason(&candidate(1, None, &["Action", "Drama", "Fantasy"]), &favs);
        assert_eq!(reason, "Based on your love for Action and Drama");
    }

    #[test]
    fn test_reason_keeps_catalog_casing() {
        let favs = favorites(&["sci-fi"]);
        let reason = recommendation_reason(&candidate(1, None, &["Sci-Fi"]), &favs);
        assert_eq!(reason, "Based on your love for Sci-Fi");
    }

    #[test]
    fn test_reason_single_match_has_no_joiner() {
        let favs = favorites(&["action"]);
        let reason = recommendation_reason(&candidate(1, None, &["Action", "Romance"]), &favs);
        assert_eq!(reason, "Based on your love for Action");
    }

    #[test]
    fn test_reason_falls_back_to_community_acclaim() {
        let reason = recommendation_reason(&candidate(9, Some(8.6), &["Romance"]), &favorites(&["action"]));
        assert_eq!(reason, "Highly rated by the community");
    }

    #[test]
    fn test_acclaim_wording_needs_8_5() {
        let reason = recommendation_reason(&candidate(1, Some(8.4), &[]), &[]);
        assert_eq!(reason, "Popular among anime fans");

        let reason = recommendation_reason(&candidate(1, Some(8.5), &[]), &[]);
        assert_eq!(reason, "Highly rated by the community");
    }

    #[test]
    fn test_reason_generic_fallback() {
        let reason = recommendation_reason(&candidate(1, Some(8.0), &["Romance"]), &favorites(&["action"]));
        assert_eq!(reason, "Popular among anime fans");
    }

    #[test]
    fn test_reason_for_unrated_title() {
        let reason = recommendation_reason(&candidate(1, None, &[]), &[]);
        assert_eq!(reason, "Popular among anime fans");
    }

    #[test]
    fn test_genre_match_beats_acclaim_wording() {
        let favs = favorites(&["romance"]);
        let reason = recommendation_reason(&candidate(1, Some(9.9), &["Romance"]), &favs);
        assert_eq!(reason, "Based on your love for Romance");
    }
}
