use serde::{Deserialize, Serialize};

/// Catalog genre ids usable as browse filters (MyAnimeList numbering)
pub const CATALOG_GENRES: &[(i64, &str)] = &[
    (1, "Action"),
    (2, "Adventure"),
    (4, "Comedy"),
    (8, "Drama"),
    (10, "Fantasy"),
    (14, "Horror"),
    (22, "Romance"),
    (24, "Sci-Fi"),
    (36, "Slice of Life"),
    (37, "Supernatural"),
    (41, "Thriller"),
];

/// A title as seen through the external anime catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogAnime {
    /// Catalog-wide stable identifier
    pub mal_id: i64,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: Option<String>,
    /// Community rating on a 0-10 scale; absent for unrated titles
    pub score: Option<f64>,
    pub episodes: Option<i32>,
    pub genres: Vec<String>,
    pub synopsis: Option<String>,
    pub status: Option<String>,
}

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<CatalogAnime>,
    pub page: i32,
    pub has_next_page: bool,
}

// ============================================================================
// Jikan v4 API Types
// ============================================================================

/// Raw anime entry from the Jikan API
#[derive(Debug, Clone, Deserialize)]
pub struct JikanAnime {
    pub mal_id: i64,
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub images: JikanImages,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub episodes: Option<i32>,
    #[serde(default)]
    pub genres: Vec<JikanEntity>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanImages {
    #[serde(default)]
    pub jpg: JikanImageSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JikanImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

/// Named catalog entity (genre, studio, ...) referenced by id
#[derive(Debug, Clone, Deserialize)]
pub struct JikanEntity {
    pub mal_id: i64,
    pub name: String,
}

/// Response envelope for list endpoints (search, top, by-genre)
#[derive(Debug, Deserialize)]
pub struct JikanListResponse {
    pub data: Vec<JikanAnime>,
    #[serde(default)]
    pub pagination: Option<JikanPagination>,
}

/// Response envelope for single-title endpoints
#[derive(Debug, Deserialize)]
pub struct JikanDetailResponse {
    pub data: JikanAnime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JikanPagination {
    pub current_page: i32,
    pub has_next_page: bool,
}

impl From<JikanAnime> for CatalogAnime {
    fn from(raw: JikanAnime) -> Self {
        // Prefer the large rendition; fall back to the standard one
        let image_url = raw.images.jpg.large_image_url.or(raw.images.jpg.image_url);

        CatalogAnime {
            mal_id: raw.mal_id,
            title: raw.title,
            title_english: raw.title_english,
            image_url,
            score: raw.score,
            episodes: raw.episodes,
            genres: raw.genres.into_iter().map(|genre| genre.name).collect(),
            synopsis: raw.synopsis,
            status: raw.status,
        }
    }
}

impl From<JikanListResponse> for CatalogPage {
    fn from(raw: JikanListResponse) -> Self {
        let (page, has_next_page) = raw
            .pagination
            .map(|p| (p.current_page, p.has_next_page))
            .unwrap_or((1, false));

        CatalogPage {
            items: raw.data.into_iter().map(CatalogAnime::from).collect(),
            page,
            has_next_page,
        }
    }
}
