use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::error::{NotifierError, Result};

pub const DEFAULT_REVIEW_FILE: &str = "./review.json";
pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";
pub const DEFAULT_HEADLINE: &str = "My Awesome App Name has a new iOS review";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 运行配置，启动时构建一次后传入各组件
#[derive(Debug, Clone)]
pub struct Config {
    pub slack_bot_token: String,
    pub slack_channel_id: String,
    pub slack_api_base_url: String,
    pub timeout_seconds: u64,
    pub review_file: PathBuf,
    pub headline: String,
    pub fail_fast: bool,
}

impl Config {
    /// 只从进程环境变量构建配置，.env 需先由 `load_env_file` 加载
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let slack_bot_token = get("SLACK_BOT_TOKEN").ok_or_else(|| {
            NotifierError::config(
                "SLACK_BOT_TOKEN is required but not set. Please set it in the environment or in .env file",
            )
        })?;
        let slack_channel_id = get("SLACK_CHANNEL_ID").ok_or_else(|| {
            NotifierError::config(
                "SLACK_CHANNEL_ID is required but not set. Please set it in the environment or in .env file",
            )
        })?;

        let timeout_seconds = match get("SLACK_TIMEOUT_SECONDS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                NotifierError::config(format!(
                    "SLACK_TIMEOUT_SECONDS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let fail_fast = match get("REVIEW_NOTIFIER_FAIL_FAST") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                NotifierError::config(format!(
                    "REVIEW_NOTIFIER_FAIL_FAST must be a boolean, got '{}'",
                    raw
                ))
            })?,
            None => false,
        };

        let config = Config {
            slack_bot_token,
            slack_channel_id,
            slack_api_base_url: get("SLACK_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SLACK_API_BASE_URL.to_string()),
            timeout_seconds,
            review_file: get("REVIEW_NOTIFIER_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REVIEW_FILE)),
            headline: get("REVIEW_NOTIFIER_HEADLINE")
                .unwrap_or_else(|| DEFAULT_HEADLINE.to_string()),
            fail_fast,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // 命令行参数优先级最高
        if let Some(file) = &args.file {
            self.review_file = file.clone();
        }
        if args.fail_fast {
            self.fail_fast = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.slack_api_base_url.starts_with("https://")
            && !self.slack_api_base_url.starts_with("http://")
        {
            return Err(NotifierError::config(format!(
                "SLACK_API_BASE_URL must be an http(s) URL, got '{}'",
                self.slack_api_base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(NotifierError::config(
                "SLACK_TIMEOUT_SECONDS must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

pub type EnvFileResult = std::result::Result<Option<PathBuf>, dotenvy::Error>;

/// 加载 .env 文件，已存在的环境变量不会被覆盖；没有文件时返回 `Ok(None)`
///
/// 不在这里写日志，调用方可以在日志系统初始化之前调用，
/// 这样 .env 里的 RUST_LOG 也能生效。
pub fn load_env_file() -> EnvFileResult {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

pub fn log_env_file(result: &EnvFileResult) {
    match result {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Ok(None) => tracing::debug!("no .env file found"),
        Err(err) => tracing::warn!(error = %err, "failed to load .env file"),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
