use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infrastructure::error::{NotifierError, Result};
use crate::models::Review;
use crate::notification::SlackMessage;

/// 一次成功投递的回执
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub review_id: String,
    pub channel: String,
    pub ts: String,
    pub sent_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    pub fn new(review_id: impl Into<String>, channel: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            review_id: review_id.into(),
            channel: channel.into(),
            ts: ts.into(),
            sent_at: Utc::now(),
        }
    }
}

/// 通知提供商 trait
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn is_configured(&self) -> bool;
    async fn send(&self, message: &SlackMessage, review_id: &str) -> Result<DeliveryReceipt>;
}

/// 批次中遇到失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// 继续处理剩余评论，最后汇总
    #[default]
    ContinueOnError,
    /// 第一条失败后立即停止
    FailFast,
}

/// 单条评论的处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub review_id: String,
    pub position: i64,
    pub stage: Option<String>,
    pub result: std::result::Result<DeliveryReceipt, String>,
}

impl ReviewOutcome {
    fn delivered(review: &Review, receipt: DeliveryReceipt) -> Self {
        Self {
            review_id: review.id.clone(),
            position: review.position,
            stage: None,
            result: Ok(receipt),
        }
    }

    fn failed(review: &Review, error: &NotifierError) -> Self {
        Self {
            review_id: review.id.clone(),
            position: review.position,
            stage: Some(error.stage().to_string()),
            result: Err(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 批次汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub delivered: usize,
    pub failed: usize,
    /// fail-fast 模式下提前停止时为 true，剩余评论未尝试
    pub aborted: bool,
    pub outcomes: Vec<ReviewOutcome>,
}

impl DispatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.aborted
    }

    pub fn skipped(&self) -> usize {
        self.total.saturating_sub(self.outcomes.len())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReviewOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    fn record(&mut self, outcome: ReviewOutcome) {
        if outcome.is_success() {
            self.delivered += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// 逐条发送评论的驱动循环
pub struct ReviewDispatcher {
    provider: Arc<dyn NotificationProvider>,
    channel: String,
    headline: String,
    mode: DispatchMode,
}

impl ReviewDispatcher {
    pub fn new(
        provider: Arc<dyn NotificationProvider>,
        channel: impl Into<String>,
        headline: impl Into<String>,
        mode: DispatchMode,
    ) -> Self {
        Self {
            provider,
            channel: channel.into(),
            headline: headline.into(),
            mode,
        }
    }

    /// 按文件顺序发送，每条发送完成后才处理下一条
    ///
    /// 格式和投递错误记入汇总；其他错误（如提供商未配置）与单条评论无关，
    /// 会终止整个批次并返回 `Err`。
    pub async fn dispatch(&self, reviews: &[Review]) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary {
            total: reviews.len(),
            ..Default::default()
        };

        for review in reviews {
            match self.dispatch_one(review).await {
                Ok(receipt) => {
                    tracing::info!(
                        review_id = %review.id,
                        channel = %receipt.channel,
                        ts = %receipt.ts,
                        "Message successfully sent"
                    );
                    summary.record(ReviewOutcome::delivered(review, receipt));
                }
                Err(err) if !err.is_per_review() => return Err(err),
                Err(err) => {
                    tracing::error!(
                        review_id = %review.id,
                        position = review.position,
                        stage = err.stage(),
                        error = %err,
                        "Failed to post review"
                    );
                    summary.record(ReviewOutcome::failed(review, &err));

                    if self.mode == DispatchMode::FailFast {
                        summary.aborted = true;
                        break;
                    }
                }
            }
        }

        Ok(summary)
    }

    async fn dispatch_one(&self, review: &Review) -> Result<DeliveryReceipt> {
        let message = SlackMessage::from_review(review, &self.channel, &self.headline)?;
        self.provider.send(&message, &review.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;
    use std::sync::Mutex;

    /// 记录收到的消息，对指定评论返回失败
    struct RecordingProvider {
        sent: Mutex<Vec<SlackMessage>>,
        fail_ids: Vec<String>,
        configured: bool,
    }

    impl RecordingProvider {
        fn new(fail_ids: &[&str]) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_ids: fail_ids.iter().map(|s| s.to_string()).collect(),
                configured: true,
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(&[])
            }
        }

        fn sent(&self) -> Vec<SlackMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn send(&self, message: &SlackMessage, review_id: &str) -> Result<DeliveryReceipt> {
            if !self.configured {
                return Err(NotifierError::config("provider is not configured"));
            }
            self.sent.lock().unwrap().push(message.clone());
            if self.fail_ids.iter().any(|id| id == review_id) {
                return Err(NotifierError::delivery("channel_not_found"));
            }
            Ok(DeliveryReceipt::new(review_id, &message.channel, "1700000000.000100"))
        }
    }

    fn create_review(id: &str, rating: i64) -> Review {
        Review {
            position: 0,
            id: id.to_string(),
            title: format!("title {}", id),
            text: format!("text {}", id),
            rating,
            review_date: "2024-03-01".to_string(),
            reviewed_version: "1.0".to_string(),
            author: Author {
                name: format!("author {}", id),
                author_id: id.to_string(),
            },
        }
    }

    fn dispatcher(provider: Arc<RecordingProvider>, mode: DispatchMode) -> ReviewDispatcher {
        ReviewDispatcher::new(provider, "C0123456", "headline", mode)
    }

    #[tokio::test]
    async fn test_dispatch_all_delivered_in_order() {
        let provider = Arc::new(RecordingProvider::new(&[]));
        let reviews = vec![create_review("a", 5), create_review("b", 1), create_review("c", 3)];

        let summary = dispatcher(provider.clone(), DispatchMode::default())
            .dispatch(&reviews)
            .await
            .unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.delivered, 3);
        let ids: Vec<&str> = summary.outcomes.iter().map(|o| o.review_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let colors: Vec<String> = provider
            .sent()
            .iter()
            .map(|m| m.attachments[0].color.clone())
            .collect();
        assert_eq!(colors, vec!["#008000", "#FF0000", "#FFFF00"]);
    }

    #[tokio::test]
    async fn test_dispatch_empty() {
        let provider = Arc::new(RecordingProvider::new(&[]));
        let summary = dispatcher(provider.clone(), DispatchMode::FailFast)
            .dispatch(&[])
            .await
            .unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.total, 0);
        assert!(provider.sent().is_empty());
    }

    #[tokio::test]
    async fn test_continue_on_error_attempts_all() {
        let provider = Arc::new(RecordingProvider::new(&["b"]));
        let reviews = vec![create_review("a", 5), create_review("b", 4), create_review("c", 2)];

        let summary = dispatcher(provider.clone(), DispatchMode::ContinueOnError)
            .dispatch(&reviews)
            .await
            .unwrap();

        assert!(!summary.is_success());
        assert!(!summary.aborted);
        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped(), 0);
        assert_eq!(provider.sent().len(), 3);

        let failure = summary.failures().next().unwrap();
        assert_eq!(failure.review_id, "b");
        assert_eq!(failure.stage.as_deref(), Some("delivery"));
    }

    #[tokio::test]
    async fn test_fail_fast_stops_at_first_failure() {
        let provider = Arc::new(RecordingProvider::new(&["b"]));
        let reviews = vec![create_review("a", 5), create_review("b", 4), create_review("c", 2)];

        let summary = dispatcher(provider.clone(), DispatchMode::FailFast)
            .dispatch(&reviews)
            .await
            .unwrap();

        assert!(summary.aborted);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(provider.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_rating_is_not_sent() {
        let provider = Arc::new(RecordingProvider::new(&[]));
        let reviews = vec![create_review("a", 6), create_review("b", 5)];

        let summary = dispatcher(provider.clone(), DispatchMode::ContinueOnError)
            .dispatch(&reviews)
            .await
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.outcomes[0].stage.as_deref(), Some("format"));
        assert_eq!(provider.sent().len(), 1);
        assert_eq!(provider.sent()[0].attachments[0].color, "#008000");
    }

    #[tokio::test]
    async fn test_config_error_aborts_batch() {
        let provider = Arc::new(RecordingProvider::unconfigured());
        let reviews = vec![create_review("a", 5), create_review("b", 4)];

        let err = dispatcher(provider.clone(), DispatchMode::ContinueOnError)
            .dispatch(&reviews)
            .await
            .unwrap_err();

        assert_eq!(err.stage(), "config");
        assert!(provider.sent().is_empty());
    }

    #[test]
    fn test_skipped_never_underflows() {
        let summary = DispatchSummary {
            total: 0,
            delivered: 1,
            outcomes: vec![ReviewOutcome {
                review_id: "a".to_string(),
                position: 1,
                stage: None,
                result: Ok(DeliveryReceipt::new("a", "C1", "1.0")),
            }],
            ..Default::default()
        };
        assert_eq!(summary.skipped(), 0);
    }
}
