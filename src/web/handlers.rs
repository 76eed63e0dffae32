use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::debug;

use crate::server::AppState;
use crate::tmdb::MovieId;
use crate::views::{AiRecommendations, Category, FinderAction, MovieDetails, MovieFinder};
use super::render;

#[derive(Debug, Default, Deserialize)]
pub struct FinderParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

impl FinderParams {
    fn category(&self) -> Category {
        self.category
            .as_deref()
            .and_then(Category::parse)
            .unwrap_or_default()
    }

    /// Map the submitted form or link back onto the user action.
    pub fn action(&self) -> FinderAction {
        match self.action.as_deref() {
            Some("search") => FinderAction::Search,
            Some("trending") => FinderAction::Trending,
            Some("category") => FinderAction::SelectCategory(self.category()),
            _ => match self.category() {
                Category::All => FinderAction::InitialLoad,
                category => FinderAction::SelectCategory(category),
            },
        }
    }
}

pub async fn finder_page(
    State(state): State<AppState>,
    Query(params): Query<FinderParams>,
) -> Html<String> {
    let finder = MovieFinder::new(state.movies.clone());
    if let Some(ref query) = params.query {
        finder.set_query(query).await;
    }

    // the highlighted chip survives a search or the Trending button
    finder.set_category(params.category()).await;

    let action = params.action();
    debug!(action = ?action, "movie finder");
    finder.dispatch(action).await;

    let view = finder.snapshot().await;
    Html(render::render_finder(&view, &state.config.tmdb.image_base_url))
}

pub async fn details_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id: MovieId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return (StatusCode::NOT_FOUND, Html(render::render_movie_not_found(None)))
                .into_response();
        }
    };

    // Dropping the view (e.g. when the client goes away) cancels the fetch cycle.
    let details = MovieDetails::new(state.movies.clone());
    details.load(id).await;
    let view = details.snapshot().await;

    let status = if view.movie.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let html = render::render_details(&view, &state.config.tmdb.image_base_url);
    (status, Html(html)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct ExampleParams {
    #[serde(default)]
    pub example: Option<usize>,
}

pub async fn recommendations_page(
    State(state): State<AppState>,
    Query(params): Query<ExampleParams>,
) -> Html<String> {
    let view = AiRecommendations::new(state.chat.clone());
    if let Some(index) = params.example {
        view.fill_example(index).await;
    }
    Html(render::render_recommendations(&view.snapshot().await))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationForm {
    #[serde(default)]
    pub preferences: String,
}

pub async fn recommendations_submit(
    State(state): State<AppState>,
    Form(form): Form<RecommendationForm>,
) -> Html<String> {
    let view = AiRecommendations::new(state.chat.clone());
    view.set_preferences(&form.preferences).await;
    view.submit().await;
    Html(render::render_recommendations(&view.snapshot().await))
}

pub async fn page_not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render::render_page_not_found())).into_response()
}
