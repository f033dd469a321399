pub mod error;
pub mod logging;

pub use error::NotifierError;
pub use logging::setup_logging;
