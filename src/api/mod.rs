pub mod api_key;
pub mod exercise_class_handlers;
pub mod exercise_handlers;
pub mod handlers;
pub mod routes;
pub mod session_handlers;
pub mod user_extractor;
pub mod workout_handlers;

pub use api_key::*;
pub use routes::*;
