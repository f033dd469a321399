use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::infrastructure::error::{NotifierError, Result};
use crate::notification::{DeliveryReceipt, NotificationProvider, SlackMessage};

/// 只记录消息内容、不调用 Slack 的提供商
#[derive(Debug, Default)]
pub struct DryRunProvider {
    counter: AtomicU64,
}

impl DryRunProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationProvider for DryRunProvider {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, message: &SlackMessage, review_id: &str) -> Result<DeliveryReceipt> {
        let payload = serde_json::to_string_pretty(message)
            .map_err(|e| NotifierError::delivery(format!("failed to render payload: {}", e)))?;
        let seq = self.counter.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(review_id, "dry run, would post:\n{}", payload);

        Ok(DeliveryReceipt::new(
            review_id,
            message.channel.clone(),
            format!("dry-run.{:06}", seq),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::SlackAttachment;

    #[tokio::test]
    async fn test_dry_run_receipts() {
        let provider = DryRunProvider::new();
        let message = SlackMessage {
            channel: "C1".to_string(),
            text: "h".to_string(),
            attachments: vec![SlackAttachment {
                color: "#FFFF00".to_string(),
                text: "★★★✩✩".to_string(),
            }],
            as_user: true,
        };

        let first = provider.send(&message, "a").await.unwrap();
        let second = provider.send(&message, "b").await.unwrap();

        assert_eq!(first.channel, "C1");
        assert_eq!(first.ts, "dry-run.000001");
        assert_eq!(second.ts, "dry-run.000002");
        assert_eq!(provider.sent_count(), 2);
    }
}
