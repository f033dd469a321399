use std::sync::Arc;

use crate::cli::args::Args;
use crate::config::Config;
use crate::infrastructure::error::Result;
use crate::notification::providers::{DryRunProvider, SlackConfig, SlackProvider};
use crate::notification::{DispatchMode, DispatchSummary, NotificationProvider, ReviewDispatcher};
use crate::review::load_reviews;

/// 根据参数选择提供商并运行整个批次
pub async fn handle_notify(args: &Args, config: &Config) -> Result<DispatchSummary> {
    let provider: Arc<dyn NotificationProvider> = if args.dry_run {
        Arc::new(DryRunProvider::new())
    } else {
        Arc::new(SlackProvider::new(SlackConfig::from(config)))
    };

    run_notify(config, provider).await
}

/// 读取评论文件后逐条发送；读取或解析失败时不会发送任何消息，
/// 与单条评论无关的错误（如提供商未配置）同样作为致命错误返回
pub async fn run_notify(
    config: &Config,
    provider: Arc<dyn NotificationProvider>,
) -> Result<DispatchSummary> {
    let reviews = load_reviews(&config.review_file)?;
    tracing::info!(
        file = %config.review_file.display(),
        count = reviews.len(),
        provider = provider.name(),
        "posting reviews"
    );

    let mode = if config.fail_fast {
        DispatchMode::FailFast
    } else {
        DispatchMode::ContinueOnError
    };

    let dispatcher = ReviewDispatcher::new(
        provider,
        config.slack_channel_id.clone(),
        config.headline.clone(),
        mode,
    );

    dispatcher.dispatch(&reviews).await
}
