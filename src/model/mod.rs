pub mod common;
pub mod document;
pub mod exercise;
pub mod exercise_class;
pub mod session;
pub mod user_context;
pub mod workout;

pub use common::*;
pub use document::*;
pub use exercise::*;
pub use exercise_class::*;
pub use session::*;
pub use user_context::*;
pub use workout::*;
