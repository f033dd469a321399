use crate::infrastructure::error::{NotifierError, Result};

pub const MAX_RATING: i64 = 5;
pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '✩';
pub const INVALID_MARKER: &str = "Invalid number";

/// 评分对应的星级字符串和附件颜色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDisplay {
    pub stars: String,
    pub color: &'static str,
}

impl RatingDisplay {
    /// 超出 0..=5 时返回无效标记和空颜色，不报错
    pub fn for_rating(rating: i64) -> Self {
        Self::try_for_rating(rating).unwrap_or_else(|_| Self::invalid())
    }

    /// 超出 0..=5 时返回 `InvalidRating`
    pub fn try_for_rating(rating: i64) -> Result<Self> {
        if !(0..=MAX_RATING).contains(&rating) {
            return Err(NotifierError::InvalidRating { rating });
        }

        let filled = rating as usize;
        let empty = (MAX_RATING - rating) as usize;
        let stars = std::iter::repeat(FILLED_STAR)
            .take(filled)
            .chain(std::iter::repeat(EMPTY_STAR).take(empty))
            .collect();

        Ok(Self {
            stars,
            color: rating_color(rating),
        })
    }

    pub fn invalid() -> Self {
        Self {
            stars: INVALID_MARKER.to_string(),
            color: "",
        }
    }
}

/// 获取评分对应的颜色
fn rating_color(rating: i64) -> &'static str {
    match rating {
        0..=2 => "#FF0000",
        3 => "#FFFF00",
        4 => "#90EE90",
        5 => "#008000",
        _ => "",
    }
}
