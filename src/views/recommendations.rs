use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::provider::ChatProvider;

pub const TEMPERATURE: f32 = 0.7;
pub const FALLBACK_MESSAGE: &str = "Failed to get recommendations. Please try again.";

/// One-click fill-ins for the preferences box.
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "Mind-bending sci-fi movies like Inception",
    "Oscar-winning dramas from the 2000s",
    "Underrated comedy films with female leads",
];

pub fn build_prompt(preferences: &str) -> String {
    format!(
        "Recommend 3 movies based on these preferences: {}. For each movie, provide the title, year, a brief description, and why it matches the preferences.",
        preferences
    )
}

/// The answer is free text; each line becomes its own paragraph.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationsState {
    pub preferences: String,
    pub recommendations: Option<String>,
    pub loading: bool,
}

pub struct AiRecommendations {
    provider: Arc<dyn ChatProvider>,
    state: RwLock<RecommendationsState>,
}

impl AiRecommendations {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(RecommendationsState::default()),
        }
    }

    pub async fn snapshot(&self) -> RecommendationsState {
        self.state.read().await.clone()
    }

    pub async fn set_preferences(&self, preferences: &str) {
        self.state.write().await.preferences = preferences.to_string();
    }

    /// Copy an example prompt into the preferences box. Does not submit.
    pub async fn fill_example(&self, index: usize) -> bool {
        match EXAMPLE_PROMPTS.get(index) {
            Some(prompt) => {
                self.set_preferences(prompt).await;
                true
            }
            None => false,
        }
    }

    /// Ask the chat provider. Blank preferences do nothing and return false.
    pub async fn submit(&self) -> bool {
        let prompt = {
            let mut state = self.state.write().await;
            if state.preferences.trim().is_empty() {
                return false;
            }
            state.loading = true;
            build_prompt(&state.preferences)
        };

        info!("requesting AI recommendations");
        let result = self.provider.complete(&prompt, TEMPERATURE).await;

        let mut state = self.state.write().await;
        state.recommendations = Some(match result {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "error getting recommendations");
                FALLBACK_MESSAGE.to_string()
            }
        });
        state.loading = false;
        true
    }
}
