use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "review-notifier",
    version,
    about = "Post app-store reviews from a JSON file to a Slack channel",
    long_about = "review-notifier 读取本地的 App Store 评论 JSON 文件，将每条评论格式化为带星级和颜色的 Slack 消息，并以机器人身份逐条发送到指定频道。凭据从环境变量或 .env 文件读取。"
)]
pub struct Args {
    /// Review file to read (default: ./review.json)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// 遇到第一条失败的评论即停止
    #[arg(long = "fail-fast", default_value_t = false)]
    pub fail_fast: bool,

    /// 只打印将要发送的消息，不调用 Slack
    #[arg(long = "dry-run", default_value_t = false)]
    pub dry_run: bool,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// 输出调试日志
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
