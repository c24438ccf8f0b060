use std::collections::HashMap;

use crate::models::GenreTag;

/// Maximum number of genres kept in a taste profile
const PROFILE_SIZE: usize = 5;

/// Derives a user's favorite genres from their accumulated genre tags.
///
/// Tags are counted case-insensitively and returned lower-cased, most
/// frequent first, capped at five. Ties keep the order in which a genre was
/// first seen, so the result is stable for a given tag list. An empty tag
/// list produces an empty profile, which downstream treats as "no genre
/// signal" rather than an error.
pub fn favorite_genres(tags: &[GenreTag]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for tag in tags {
        let genre = tag.genre.to_lowercase();
        match counts.get_mut(&genre) {
            Some(count) => *count += 1,
            None => {
                counts.insert(genre.clone(), 1);
                order.push(genre);
            }
        }
    }

    // Stable sort keeps first-seen order among equally frequent genres
    order.sort_by_key(|genre| std::cmp::Reverse(counts[genre]));
    order.truncate(PROFILE_SIZE);
    order
}
