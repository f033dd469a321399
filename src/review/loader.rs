use std::path::Path;

use crate::infrastructure::error::{NotifierError, Result};
use crate::models::Review;

/// 读取评论文件并解码为评论列表，保持文件中的顺序
///
/// 文件不可读时返回 `Io`，内容不是符合结构的 JSON 数组时返回 `Parse`，
/// 不会返回部分结果。
pub fn load_reviews(path: impl AsRef<Path>) -> Result<Vec<Review>> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|source| NotifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reviews = parse_reviews(&content).map_err(|source| NotifierError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), count = reviews.len(), "loaded reviews");
    Ok(reviews)
}

fn parse_reviews(content: &str) -> serde_json::Result<Vec<Review>> {
    serde_json::from_str(content)
}
