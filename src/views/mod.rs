pub mod card;
pub mod details;
pub mod finder;
pub mod nav;
pub mod recommendations;

#[cfg(test)]
pub(crate) mod fake;

pub use card::MovieCard;
pub use details::{DetailsState, LoadOutcome, MovieDetails};
pub use finder::{Category, FinderAction, FinderRequest, FinderState, MovieFinder};
pub use nav::{Route, NAV_LINKS};
pub use recommendations::{AiRecommendations, RecommendationsState};
