pub mod handlers;
pub mod render;

pub use handlers::*;
