use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::ExamType;

/// 题目数量，表单边界上保证为正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCount(NonZeroU32);

/// 表单中题目数量的默认值
pub const DEFAULT_NUM_CARDS: CardCount = match NonZeroU32::new(10) {
    Some(count) => CardCount(count),
    None => CardCount(NonZeroU32::MIN),
};

impl CardCount {
    pub fn new(count: u32) -> Option<Self> {
        NonZeroU32::new(count).map(CardCount)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for CardCount {
    fn default() -> Self {
        DEFAULT_NUM_CARDS
    }
}

impl FromStr for CardCount {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(CardCount::new)
            .ok_or_else(|| FormError::InvalidCardCount {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for CardCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 表单状态
///
/// 生成时取一次快照，之后的编辑不影响正在进行的请求
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudyForm {
    pub subject: String,
    pub exam_type: ExamType,
    pub focus_area: String,
    pub num_cards: CardCount,
}

impl StudyForm {
    pub fn with_num_cards(num_cards: CardCount) -> Self {
        Self {
            num_cards,
            ..Self::default()
        }
    }
}
