use crate::tmdb::Movie;
use super::nav::Route;

pub const POSTER_SIZE: &str = "w500";
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";

/// One movie in a grid. Holds no state of its own.
pub struct MovieCard<'a> {
    pub movie: &'a Movie,
    pub image_base_url: &'a str,
}

impl<'a> MovieCard<'a> {
    pub fn new(movie: &'a Movie, image_base_url: &'a str) -> Self {
        Self {
            movie,
            image_base_url,
        }
    }

    pub fn poster_url(&self) -> String {
        poster_url(self.image_base_url, self.movie.poster_path.as_deref())
    }

    /// Where selecting the card leads. The whole card is a link to it.
    pub fn route(&self) -> Route {
        Route::Movie(self.movie.id)
    }
}

pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    match poster_path {
        Some(path) if !path.is_empty() => {
            format!("{}/{}{}", image_base_url.trim_end_matches('/'), POSTER_SIZE, path)
        }
        _ => PLACEHOLDER_POSTER.to_string(),
    }
}

pub fn backdrop_url(image_base_url: &str, backdrop_path: Option<&str>) -> Option<String> {
    backdrop_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}/original{}", image_base_url.trim_end_matches('/'), p))
}
