pub mod loader;
pub mod rating;

pub use loader::load_reviews;
pub use rating::RatingDisplay;
