pub mod client;
pub mod types;

pub use client::OpenAiClient;
pub use types::*;
