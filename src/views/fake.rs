//! In-process providers for view tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::provider::{ChatProvider, FetchError, FetchResult, MovieProvider};
use crate::tmdb::{Genre, Movie, MovieId, Video};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Trending,
    Discover(u32),
    Search(String),
    Movie(MovieId),
    Similar(MovieId),
    Videos(MovieId),
}

/// Answers every request with `list_len` generated movies. Individual calls
/// can be made to fail, or held back until their gate is notified.
pub struct FakeMovies {
    list_len: usize,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Call>>,
    gates: Mutex<HashMap<Call, Arc<Notify>>>,
    videos: Mutex<HashMap<MovieId, Vec<Video>>>,
    missing: Mutex<HashSet<MovieId>>,
}

impl FakeMovies {
    pub fn new(list_len: usize) -> Self {
        Self {
            list_len,
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            gates: Mutex::new(HashMap::new()),
            videos: Mutex::new(HashMap::new()),
            missing: Mutex::new(HashSet::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail(&self, call: Call) {
        self.failing.lock().unwrap().insert(call);
    }

    pub fn gate(&self, call: Call) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(call, notify.clone());
        notify
    }

    pub fn set_videos(&self, id: MovieId, videos: Vec<Video>) {
        self.videos.lock().unwrap().insert(id, videos);
    }

    pub fn set_missing(&self, id: MovieId) {
        self.missing.lock().unwrap().insert(id);
    }

    pub async fn wait_for(&self, call: &Call) {
        while !self.calls.lock().unwrap().contains(call) {
            tokio::task::yield_now().await;
        }
    }

    async fn enter(&self, call: Call) -> FetchResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        let gate = self.gates.lock().unwrap().get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.lock().unwrap().contains(&call) {
            return Err(FetchError::Status(500));
        }
        Ok(())
    }

    fn listing(&self, label: &str, first_id: MovieId) -> Vec<Movie> {
        (0..self.list_len)
            .map(|i| {
                let mut movie = Movie::new(first_id + i as MovieId, &format!("{} #{}", label, i));
                movie.release_date = Some(format!("20{:02}-01-01", i));
                movie
            })
            .collect()
    }
}

#[async_trait]
impl MovieProvider for FakeMovies {
    async fn trending(&self) -> FetchResult<Vec<Movie>> {
        self.enter(Call::Trending).await?;
        Ok(self.listing("trending", 9000))
    }

    async fn discover(&self, genre_id: u32) -> FetchResult<Vec<Movie>> {
        self.enter(Call::Discover(genre_id)).await?;
        Ok(self.listing(&format!("genre {}", genre_id), genre_id as MovieId * 100))
    }

    async fn search(&self, query: &str) -> FetchResult<Vec<Movie>> {
        self.enter(Call::Search(query.to_string())).await?;
        Ok(self.listing(query, 500))
    }

    async fn movie(&self, id: MovieId) -> FetchResult<Option<Movie>> {
        self.enter(Call::Movie(id)).await?;
        if self.missing.lock().unwrap().contains(&id) {
            return Ok(None);
        }
        let mut movie = Movie::new(id, &format!("Movie {}", id));
        movie.overview = format!("Overview of movie {}", id);
        movie.release_date = Some("2014-11-05".to_string());
        movie.vote_average = 8.43;
        movie.runtime = Some(169);
        movie.backdrop_path = Some(format!("/backdrop{}.jpg", id));
        movie.genres = vec![
            Genre { id: 12, name: "Adventure".to_string() },
            Genre { id: 18, name: "Drama".to_string() },
        ];
        Ok(Some(movie))
    }

    async fn similar(&self, id: MovieId) -> FetchResult<Vec<Movie>> {
        self.enter(Call::Similar(id)).await?;
        Ok(self.listing(&format!("similar to {}", id), id * 10))
    }

    async fn videos(&self, id: MovieId) -> FetchResult<Vec<Video>> {
        self.enter(Call::Videos(id)).await?;
        Ok(self.videos.lock().unwrap().get(&id).cloned().unwrap_or_default())
    }
}

/// Replies with a fixed text, or fails when `reply` is `None`.
pub struct FakeChat {
    reply: Option<String>,
    prompts: Mutex<Vec<(String, f32)>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, f32)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn complete(&self, prompt: &str, temperature: f32) -> FetchResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        self.reply
            .clone()
            .ok_or_else(|| FetchError::Status(503))
    }
}
