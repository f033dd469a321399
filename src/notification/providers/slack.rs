use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{Config, DEFAULT_SLACK_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::infrastructure::error::{NotifierError, Result};
use crate::notification::{DeliveryReceipt, NotificationProvider, SlackMessage};

/// Slack 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    pub bot_token: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: DEFAULT_SLACK_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl From<&Config> for SlackConfig {
    fn from(config: &Config) -> Self {
        Self {
            bot_token: config.slack_bot_token.clone(),
            api_base_url: config.slack_api_base_url.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }
}

/// `chat.postMessage` 响应
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Slack Web API 通知提供商
pub struct SlackProvider {
    config: SlackConfig,
    client: Arc<reqwest::Client>,
}

impl SlackProvider {
    pub fn new(config: SlackConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(
                    error = %err,
                    timeout_seconds = config.timeout_seconds,
                    "failed to build HTTP client, falling back to a client without timeout"
                );
                reqwest::Client::new()
            });

        Self {
            config,
            client: Arc::new(client),
        }
    }

    fn post_message_url(&self) -> String {
        format!(
            "{}/chat.postMessage",
            self.config.api_base_url.trim_end_matches('/')
        )
    }

    /// 检查 Slack 返回的业务结果
    fn interpret_response(
        &self,
        response: PostMessageResponse,
        message: &SlackMessage,
        review_id: &str,
    ) -> Result<DeliveryReceipt> {
        if !response.ok {
            let error = response.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(NotifierError::delivery(format!("Slack API error: {}", error)));
        }

        let ts = response
            .ts
            .ok_or_else(|| NotifierError::delivery("Slack response is missing the message timestamp"))?;
        let channel = response.channel.unwrap_or_else(|| message.channel.clone());

        Ok(DeliveryReceipt::new(review_id, channel, ts))
    }
}

#[async_trait]
impl NotificationProvider for SlackProvider {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn is_configured(&self) -> bool {
        !self.config.bot_token.is_empty() && !self.config.api_base_url.is_empty()
    }

    async fn send(&self, message: &SlackMessage, review_id: &str) -> Result<DeliveryReceipt> {
        if !self.is_configured() {
            return Err(NotifierError::config("Slack bot token is not configured"));
        }

        tracing::debug!(review_id, channel = %message.channel, "posting review to Slack");

        let response = self
            .client
            .post(self.post_message_url())
            .bearer_auth(&self.config.bot_token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotifierError::delivery(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: PostMessageResponse = response.json().await.map_err(|e| {
            NotifierError::delivery(format!("invalid Slack response body: {}", e))
        })?;

        self.interpret_response(body, message, review_id)
    }
}
