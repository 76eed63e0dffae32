use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::openai::OpenAiClient;
use crate::provider::{ChatProvider, MovieProvider};
use crate::tmdb::TmdbClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: Arc<dyn MovieProvider>,
    pub chat: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Build the provider clients from the configuration.
    pub fn new(config: Config) -> Self {
        let movies = Arc::new(TmdbClient::new(&config.tmdb));
        let chat = Arc::new(OpenAiClient::new(&config.openai));
        Self::with_providers(config, movies, chat)
    }

    pub fn with_providers(
        config: Config,
        movies: Arc<dyn MovieProvider>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            movies,
            chat,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(crate::web::finder_page))
        .route(
            "/ai-recommendations",
            get(crate::web::recommendations_page).post(crate::web::recommendations_submit),
        )
        .route("/movie/:id", get(crate::web::details_page))
        .fallback(crate::web::page_not_found);

    if let Some(ref appdir) = state.config.appdir {
        router = router.nest_service("/static", ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
