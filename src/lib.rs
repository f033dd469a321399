// Core modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod infrastructure;
pub mod models;

pub mod notification;
pub mod review;

pub use infrastructure::error::{NotifierError, Result};
