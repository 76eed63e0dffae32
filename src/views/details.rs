use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::provider::{FetchResult, MovieProvider};
use crate::tmdb::{find_trailer, Movie, MovieId, Video};

/// Entries kept for the related list and the trending sidebar.
pub const SIDEBAR_LEN: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct DetailsState {
    pub id: Option<MovieId>,
    pub movie: Option<Movie>,
    pub trailer: Option<Video>,
    pub related: Vec<Movie>,
    pub trending: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The cycle was cancelled while its requests were in flight.
    Cancelled,
    /// The requests finished, but a newer cycle had already started.
    Stale,
}

struct Inner {
    state: DetailsState,
    current: Option<CancellationToken>,
}

/// Detail page view-model.
///
/// Each identifier gets its own fetch cycle: four provider requests joined
/// behind one loading flag, guarded by a cancellation token. Starting a new
/// cycle, calling [`MovieDetails::unmount`] or dropping the view cancels the
/// previous token, and results are only written while holding the state lock
/// with a live token, so a late response for an old identifier is never
/// applied.
pub struct MovieDetails {
    provider: Arc<dyn MovieProvider>,
    inner: RwLock<Inner>,
}

struct Bundle {
    movie: FetchResult<Option<Movie>>,
    similar: FetchResult<Vec<Movie>>,
    trending: FetchResult<Vec<Movie>>,
    videos: FetchResult<Vec<Video>>,
}

impl MovieDetails {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            inner: RwLock::new(Inner {
                state: DetailsState::default(),
                current: None,
            }),
        }
    }

    pub async fn snapshot(&self) -> DetailsState {
        self.inner.read().await.state.clone()
    }

    /// Fetch everything for `id`. Also used when the identifier changes.
    pub async fn load(&self, id: MovieId) -> LoadOutcome {
        let token = self.begin(id).await;

        let bundle = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(movie_id = id, "detail fetch cancelled");
                return LoadOutcome::Cancelled;
            }
            bundle = fetch_bundle(self.provider.as_ref(), id) => bundle,
        };

        self.apply(id, &token, bundle).await
    }

    /// Cancel whatever is in flight.
    pub async fn unmount(&self) {
        if let Some(token) = self.inner.write().await.current.take() {
            token.cancel();
        }
    }

    async fn begin(&self, id: MovieId) -> CancellationToken {
        let mut inner = self.inner.write().await;
        if let Some(previous) = inner.current.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        inner.current = Some(token.clone());
        inner.state = DetailsState {
            id: Some(id),
            loading: true,
            ..DetailsState::default()
        };
        token
    }

    async fn apply(&self, id: MovieId, token: &CancellationToken, bundle: Bundle) -> LoadOutcome {
        let mut inner = self.inner.write().await;
        if token.is_cancelled() || inner.state.id != Some(id) {
            debug!(movie_id = id, "discarding stale detail results");
            return LoadOutcome::Stale;
        }
        inner.current = None;

        let state = &mut inner.state;
        match bundle.movie {
            Ok(movie) => state.movie = movie,
            Err(e) => {
                error!(movie_id = id, error = %e, "failed to fetch movie details");
                state.error = Some("Failed to fetch movie details".to_string());
            }
        }
        state.related = first_entries(id, "similar movies", bundle.similar);
        state.trending = first_entries(id, "trending movies", bundle.trending);
        state.trailer = match bundle.videos {
            Ok(videos) => find_trailer(&videos).cloned(),
            Err(e) => {
                warn!(movie_id = id, error = %e, "failed to fetch videos");
                None
            }
        };
        state.loading = false;
        LoadOutcome::Applied
    }
}

impl Drop for MovieDetails {
    fn drop(&mut self) {
        if let Some(token) = self.inner.get_mut().current.take() {
            token.cancel();
        }
    }
}

async fn fetch_bundle(provider: &dyn MovieProvider, id: MovieId) -> Bundle {
    let (movie, similar, trending, videos) = tokio::join!(
        provider.movie(id),
        provider.similar(id),
        provider.trending(),
        provider.videos(id),
    );
    Bundle {
        movie,
        similar,
        trending,
        videos,
    }
}

fn first_entries(id: MovieId, what: &str, result: FetchResult<Vec<Movie>>) -> Vec<Movie> {
    match result {
        Ok(mut movies) => {
            movies.truncate(SIDEBAR_LEN);
            movies
        }
        Err(e) => {
            warn!(movie_id = id, error = %e, "failed to fetch {}", what);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fake::{Call, FakeMovies};

    fn video(video_type: &str, official: bool, key: &str) -> Video {
        Video {
            key: key.to_string(),
            site: "YouTube".to_string(),
            name: format!("{} {}", video_type, key),
            video_type: video_type.to_string(),
            official,
        }
    }

    #[tokio::test]
    async fn test_load_fetches_all_four() {
        let fake = Arc::new(FakeMovies::new(8));
        fake.set_videos(
            157336,
            vec![
                video("Featurette", true, "f1"),
                video("Trailer", false, "t0"),
                video("Trailer", true, "t1"),
                video("Trailer", true, "t2"),
            ],
        );
        let details = MovieDetails::new(fake.clone());

        assert_eq!(details.load(157336).await, LoadOutcome::Applied);

        let mut calls = fake.calls();
        calls.sort_by_key(|c| format!("{:?}", c));
        assert_eq!(
            calls,
            vec![
                Call::Movie(157336),
                Call::Similar(157336),
                Call::Trending,
                Call::Videos(157336),
            ]
        );

        let state = details.snapshot().await;
        assert!(!state.loading);
        assert!(state.error.is_none());
        let movie = state.movie.unwrap();
        assert_eq!(movie.year(), "2014");
        assert_eq!(state.trailer.unwrap().key, "t1");
    }

    #[tokio::test]
    async fn test_sidebars_keep_first_five_in_order() {
        let fake = Arc::new(FakeMovies::new(8));
        let details = MovieDetails::new(fake.clone());
        details.load(42).await;

        let state = details.snapshot().await;
        let related: Vec<MovieId> = state.related.iter().map(|m| m.id).collect();
        let trending: Vec<MovieId> = state.trending.iter().map(|m| m.id).collect();
        assert_eq!(related, vec![420, 421, 422, 423, 424]);
        assert_eq!(trending, vec![9000, 9001, 9002, 9003, 9004]);
    }

    #[tokio::test]
    async fn test_short_lists_are_kept_whole() {
        let fake = Arc::new(FakeMovies::new(3));
        let details = MovieDetails::new(fake.clone());
        details.load(1).await;
        assert_eq!(details.snapshot().await.related.len(), 3);
    }

    #[tokio::test]
    async fn test_no_official_trailer() {
        let fake = Arc::new(FakeMovies::new(1));
        fake.set_videos(1, vec![video("Trailer", false, "x"), video("Teaser", true, "y")]);
        let details = MovieDetails::new(fake.clone());
        details.load(1).await;

        let state = details.snapshot().await;
        assert!(state.trailer.is_none());
        assert!(state.error.is_none());
        assert!(state.movie.is_some());
    }

    #[tokio::test]
    async fn test_primary_failure() {
        let fake = Arc::new(FakeMovies::new(2));
        fake.fail(Call::Movie(7));
        let details = MovieDetails::new(fake.clone());
        details.load(7).await;

        let state = details.snapshot().await;
        assert!(!state.loading);
        assert!(state.movie.is_none());
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_missing_movie_is_not_an_error() {
        let fake = Arc::new(FakeMovies::new(2));
        fake.set_missing(7);
        let details = MovieDetails::new(fake.clone());
        details.load(7).await;

        let state = details.snapshot().await;
        assert!(state.movie.is_none());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_secondary_failures_degrade() {
        let fake = Arc::new(FakeMovies::new(6));
        fake.fail(Call::Similar(3));
        fake.fail(Call::Videos(3));
        fake.fail(Call::Trending);
        let details = MovieDetails::new(fake.clone());
        assert_eq!(details.load(3).await, LoadOutcome::Applied);

        let state = details.snapshot().await;
        assert!(state.movie.is_some());
        assert!(state.error.is_none());
        assert!(state.related.is_empty());
        assert!(state.trending.is_empty());
        assert!(state.trailer.is_none());
    }

    #[tokio::test]
    async fn test_identifier_change_cancels_previous() {
        let fake = Arc::new(FakeMovies::new(5));
        let gate = fake.gate(Call::Movie(1));
        let details = Arc::new(MovieDetails::new(fake.clone()));

        let first = {
            let details = details.clone();
            tokio::spawn(async move { details.load(1).await })
        };
        fake.wait_for(&Call::Movie(1)).await;
        let state = details.snapshot().await;
        assert!(state.loading);
        assert_eq!(state.id, Some(1));

        assert_eq!(details.load(2).await, LoadOutcome::Applied);
        gate.notify_one();
        assert_eq!(first.await.unwrap(), LoadOutcome::Cancelled);

        let state = details.snapshot().await;
        assert_eq!(state.id, Some(2));
        assert_eq!(state.movie.unwrap().id, 2);
        assert_eq!(state.related[0].id, 20);
    }

    #[tokio::test]
    async fn test_late_results_for_old_cycle_are_discarded() {
        let fake = Arc::new(FakeMovies::new(5));
        let details = MovieDetails::new(fake.clone());

        let old_token = details.begin(1).await;
        let old_bundle = fetch_bundle(fake.as_ref(), 1).await;
        details.begin(2).await;

        assert!(old_token.is_cancelled());
        assert_eq!(details.apply(1, &old_token, old_bundle).await, LoadOutcome::Stale);

        let state = details.snapshot().await;
        assert_eq!(state.id, Some(2));
        assert!(state.loading);
        assert!(state.movie.is_none());
    }

    #[tokio::test]
    async fn test_unmount_cancels_in_flight() {
        let fake = Arc::new(FakeMovies::new(5));
        let _gate = fake.gate(Call::Movie(9));
        let details = Arc::new(MovieDetails::new(fake.clone()));

        let pending = {
            let details = details.clone();
            tokio::spawn(async move { details.load(9).await })
        };
        fake.wait_for(&Call::Movie(9)).await;
        details.unmount().await;

        assert_eq!(pending.await.unwrap(), LoadOutcome::Cancelled);
        assert!(details.snapshot().await.movie.is_none());
    }
}
