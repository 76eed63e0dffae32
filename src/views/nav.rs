use crate::tmdb::MovieId;

pub const BRAND: &str = "JJ-Movie-Hub";

/// The client-facing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Finder,
    Recommendations,
    Movie(MovieId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Finder => "/".to_string(),
            Route::Recommendations => "/ai-recommendations".to_string(),
            Route::Movie(id) => format!("/movie/{}", id),
        }
    }
}

pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        label: "Movie Finder",
        route: Route::Finder,
    },
    NavLink {
        label: "AI Recommendations",
        route: Route::Recommendations,
    },
];
