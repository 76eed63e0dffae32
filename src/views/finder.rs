use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::provider::{FetchResult, MovieProvider};
use crate::tmdb::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Romance,
    Action,
    Thriller,
    Horror,
    Adventure,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Romance,
        Category::Action,
        Category::Thriller,
        Category::Horror,
        Category::Adventure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "ALL",
            Category::Romance => "ROMANCE",
            Category::Action => "ACTION",
            Category::Thriller => "THRILLER",
            Category::Horror => "HORROR",
            Category::Adventure => "ADVENTURE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Provider genre id. `None` for ALL, which shows trending instead.
    pub fn genre_id(&self) -> Option<u32> {
        match self {
            Category::All => None,
            Category::Romance => Some(10749),
            Category::Action => Some(28),
            Category::Thriller => Some(53),
            Category::Horror => Some(27),
            Category::Adventure => Some(12),
        }
    }
}

/// What the user did on the browse page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderAction {
    InitialLoad,
    SelectCategory(Category),
    Search,
    Trending,
}

/// The provider request an action resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderRequest {
    Trending,
    Discover { category: Category, genre_id: u32 },
    Search(String),
}

impl FinderRequest {
    pub fn for_category(category: Category) -> Self {
        match category.genre_id() {
            Some(genre_id) => FinderRequest::Discover { category, genre_id },
            None => FinderRequest::Trending,
        }
    }

    /// Blank queries fall back to trending. Anything else is sent as typed.
    pub fn for_search(query: &str) -> Self {
        if query.trim().is_empty() {
            FinderRequest::Trending
        } else {
            FinderRequest::Search(query.to_string())
        }
    }

    /// Request kind for log lines. Never includes the search text.
    pub fn kind(&self) -> &'static str {
        match self {
            FinderRequest::Trending => "trending",
            FinderRequest::Discover { .. } => "discover",
            FinderRequest::Search(_) => "search",
        }
    }

    fn error_message(&self) -> String {
        match self {
            FinderRequest::Trending => "Failed to fetch trending movies".to_string(),
            FinderRequest::Discover { category, .. } => {
                format!("Failed to fetch {} movies", category.as_str())
            }
            FinderRequest::Search(_) => "Failed to search movies".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FinderState {
    pub query: String,
    pub category: Category,
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    /// Sequence number of the most recently issued request.
    seq: u64,
}

/// Browse/search view-model.
///
/// Every action gets a sequence number when it starts; its result is only
/// applied if no newer action has started since.
pub struct MovieFinder {
    provider: Arc<dyn MovieProvider>,
    state: RwLock<FinderState>,
}

impl MovieFinder {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(FinderState::default()),
        }
    }

    pub async fn snapshot(&self) -> FinderState {
        self.state.read().await.clone()
    }

    pub async fn set_query(&self, query: &str) {
        self.state.write().await.query = query.to_string();
    }

    /// Highlight a category without fetching anything.
    pub async fn set_category(&self, category: Category) {
        self.state.write().await.category = category;
    }

    /// Run one user action. Returns false when a newer action superseded it.
    pub async fn dispatch(&self, action: FinderAction) -> bool {
        let request = match action {
            FinderAction::InitialLoad | FinderAction::Trending => FinderRequest::Trending,
            FinderAction::SelectCategory(category) => {
                self.state.write().await.category = category;
                FinderRequest::for_category(category)
            }
            FinderAction::Search => {
                let query = self.state.read().await.query.clone();
                FinderRequest::for_search(&query)
            }
        };
        self.run(request).await
    }

    pub async fn initial_load(&self) -> bool {
        self.dispatch(FinderAction::InitialLoad).await
    }

    pub async fn select_category(&self, category: Category) -> bool {
        self.dispatch(FinderAction::SelectCategory(category)).await
    }

    pub async fn submit_search(&self) -> bool {
        self.dispatch(FinderAction::Search).await
    }

    pub async fn show_trending(&self) -> bool {
        self.dispatch(FinderAction::Trending).await
    }

    async fn run(&self, request: FinderRequest) -> bool {
        let ticket = self.begin().await;
        let result = self.fetch(&request).await;
        self.finish(ticket, &request, result).await
    }

    async fn begin(&self) -> u64 {
        let mut state = self.state.write().await;
        state.seq += 1;
        state.loading = true;
        state.error = None;
        state.seq
    }

    async fn fetch(&self, request: &FinderRequest) -> FetchResult<Vec<Movie>> {
        match request {
            FinderRequest::Trending => self.provider.trending().await,
            FinderRequest::Discover { genre_id, .. } => self.provider.discover(*genre_id).await,
            FinderRequest::Search(query) => self.provider.search(query).await,
        }
    }

    async fn finish(
        &self,
        ticket: u64,
        request: &FinderRequest,
        result: FetchResult<Vec<Movie>>,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.seq != ticket {
            debug!(ticket, latest = state.seq, "discarding superseded finder result");
            return false;
        }

        match result {
            Ok(movies) => state.movies = movies,
            Err(e) => {
                error!(request = request.kind(), error = %e, "finder request failed");
                state.error = Some(request.error_message());
            }
        }
        state.loading = false;
        true
    }
}
