pub mod review;

pub use review::{Author, Review};
