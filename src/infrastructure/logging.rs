use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            filter: None,
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// 人类可读的格式
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式
    Json,
}

impl LoggingConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 构建过滤器：显式 filter 优先，其次 RUST_LOG，最后是本 crate 的默认级别
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        self.env_filter_from(std::env::var("RUST_LOG").ok().as_deref())
    }

    fn env_filter_from(&self, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
        if let Some(filter) = &self.filter {
            return Ok(EnvFilter::try_new(filter)?);
        }

        // RUST_LOG 为空或无法解析时回退到默认级别
        if let Some(directives) = rust_log.filter(|value| !value.trim().is_empty()) {
            if let Ok(filter) = EnvFilter::try_new(directives) {
                return Ok(filter);
            }
        }

        Ok(EnvFilter::try_new(format!(
            "review_notifier={}",
            self.level.as_str().to_ascii_lowercase()
        ))?)
    }
}

/// 设置日志系统，输出到标准错误
pub fn setup_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = config.env_filter()?;
    let fmt_layer = create_fmt_layer(&config, io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn create_fmt_layer<W>(
    config: &LoggingConfig,
    make_writer: W,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(make_writer)
        .with_target(true)
        .with_level(true);

    match config.format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
