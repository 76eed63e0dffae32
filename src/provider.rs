//! Seams between the views and the two external HTTP providers.
//!
//! The views only ever talk to these traits. The reqwest-backed clients in
//! [`crate::tmdb`] and [`crate::openai`] implement them for production, tests
//! plug in in-process fakes.

use async_trait::async_trait;

use crate::tmdb::{Movie, MovieId, Video};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

// The URL carries the api key and the user's search text, keep it out of
// anything that gets logged.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Request(e.without_url())
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// The movie metadata provider.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// `/trending/movie/week`
    async fn trending(&self) -> FetchResult<Vec<Movie>>;

    /// `/discover/movie?with_genres={genre_id}`
    async fn discover(&self, genre_id: u32) -> FetchResult<Vec<Movie>>;

    /// `/search/movie?query={query}`
    async fn search(&self, query: &str) -> FetchResult<Vec<Movie>>;

    /// `/movie/{id}`. `None` when the provider answered with an empty body.
    async fn movie(&self, id: MovieId) -> FetchResult<Option<Movie>>;

    /// `/movie/{id}/similar`
    async fn similar(&self, id: MovieId) -> FetchResult<Vec<Movie>>;

    /// `/movie/{id}/videos`
    async fn videos(&self, id: MovieId) -> FetchResult<Vec<Video>>;
}

/// The chat-completion provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send `prompt` as a single user message and return the first choice's content.
    async fn complete(&self, prompt: &str, temperature: f32) -> FetchResult<String>;
}
