use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::TmdbConfig;
use crate::provider::{FetchError, FetchResult, MovieProvider};
use super::types::{Movie, MovieId, ResultsPage, Video};

/// reqwest-backed client for the movie metadata provider.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> FetchResult<T> {
        let mut query = vec![("api_key", self.api_key.as_str())];
        query.extend_from_slice(params);

        let url = format!("{}{}", self.base_url, path);
        debug!(path = %path, "TMDB request");

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }

    async fn get_results<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> FetchResult<Vec<T>> {
        let page: ResultsPage<T> = self.get_json(path, params).await?;
        Ok(page.results)
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn trending(&self) -> FetchResult<Vec<Movie>> {
        self.get_results("/trending/movie/week", &[]).await
    }

    async fn discover(&self, genre_id: u32) -> FetchResult<Vec<Movie>> {
        let genre = genre_id.to_string();
        self.get_results("/discover/movie", &[("with_genres", genre.as_str())])
            .await
    }

    async fn search(&self, query: &str) -> FetchResult<Vec<Movie>> {
        self.get_results("/search/movie", &[("query", query)]).await
    }

    async fn movie(&self, id: MovieId) -> FetchResult<Option<Movie>> {
        self.get_json(&format!("/movie/{}", id), &[]).await
    }

    async fn similar(&self, id: MovieId) -> FetchResult<Vec<Movie>> {
        self.get_results(&format!("/movie/{}/similar", id), &[]).await
    }

    async fn videos(&self, id: MovieId) -> FetchResult<Vec<Video>> {
        self.get_results(&format!("/movie/{}/videos", id), &[]).await
    }
}
