pub mod dry_run;
pub mod slack;

pub use dry_run::DryRunProvider;
pub use slack::{SlackConfig, SlackProvider};
