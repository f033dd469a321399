use serde::{Deserialize, Serialize};

/// App Store 评论记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub position: i64,
    pub id: String,
    pub title: String,
    pub text: String,
    pub rating: i64,
    /// 原样透传，不解析为日期
    pub review_date: String,
    pub reviewed_version: String,
    pub author: Author,
}

/// 评论作者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub author_id: String,
}
