use std::path::PathBuf;
use thiserror::Error;

/// 通知流程中的错误类型
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to read review file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse review file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rating {rating}: expected a value between 0 and 5")]
    InvalidRating { rating: i64 },

    #[error("delivery failed: {message}")]
    Delivery { message: String },
}

impl NotifierError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        NotifierError::Config {
            message: message.into(),
        }
    }

    /// 创建投递错误
    pub fn delivery(message: impl Into<String>) -> Self {
        NotifierError::Delivery {
            message: message.into(),
        }
    }

    /// 出错的处理阶段，用于日志上下文
    pub fn stage(&self) -> &'static str {
        match self {
            NotifierError::Config { .. } => "config",
            NotifierError::Io { .. } => "read",
            NotifierError::Parse { .. } => "parse",
            NotifierError::InvalidRating { .. } => "format",
            NotifierError::Delivery { .. } => "delivery",
        }
    }

    /// 是否只影响单条评论而不影响整个批次
    pub fn is_per_review(&self) -> bool {
        matches!(
            self,
            NotifierError::InvalidRating { .. } | NotifierError::Delivery { .. }
        )
    }
}

impl From<reqwest::Error> for NotifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NotifierError::delivery(format!("request timed out: {}", err))
        } else if err.is_connect() {
            NotifierError::delivery(format!("connection failed: {}", err))
        } else {
            NotifierError::delivery(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
