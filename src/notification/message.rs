use serde::{Deserialize, Serialize};

use crate::infrastructure::error::Result;
use crate::models::Review;
use crate::review::RatingDisplay;

/// `chat.postMessage` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub channel: String,
    pub text: String,
    pub attachments: Vec<SlackAttachment>,
    /// 以机器人用户身份发送
    pub as_user: bool,
}

/// 带颜色侧边栏的附件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub color: String,
    pub text: String,
}

impl SlackMessage {
    /// 由评论构建消息，评分超出范围时返回 `InvalidRating`
    pub fn from_review(review: &Review, channel: &str, headline: &str) -> Result<Self> {
        let display = RatingDisplay::try_for_rating(review.rating)?;

        Ok(Self {
            channel: channel.to_string(),
            text: headline.to_string(),
            attachments: vec![SlackAttachment {
                color: display.color.to_string(),
                text: attachment_body(&display.stars, review),
            }],
            as_user: true,
        })
    }

    pub fn attachment(&self) -> Option<&SlackAttachment> {
        self.attachments.first()
    }
}

/// 星级、加粗标题、正文、作者各占一行
fn attachment_body(stars: &str, review: &Review) -> String {
    format!(
        "{}\n*{}*\n{}\n{}",
        stars, review.title, review.text, review.author.name
    )
}
