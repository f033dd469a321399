pub mod message;
pub mod providers;
pub mod service;

pub use message::{SlackAttachment, SlackMessage};
pub use service::{
    DeliveryReceipt, DispatchMode, DispatchSummary, NotificationProvider, ReviewDispatcher,
    ReviewOutcome,
};
