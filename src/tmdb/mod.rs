pub mod client;
pub mod types;

pub use client::TmdbClient;
pub use types::*;
