pub mod anime;
pub mod list;
pub mod recommendation;
pub mod user;

pub use anime::{
    CatalogAnime, CatalogPage, JikanAnime, JikanDetailResponse, JikanEntity, JikanImageSet,
    JikanImages, JikanListResponse, JikanPagination, CATALOG_GENRES,
};
pub use list::{GenreTag, ListEntry, WatchStatus};
pub use recommendation::Recommendation;
pub use user::AuthedUser;
