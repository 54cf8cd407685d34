pub mod exam_type;
pub mod form;
pub mod item;

pub use exam_type::ExamType;
pub use form::{CardCount, StudyForm, DEFAULT_NUM_CARDS};
pub use item::{AnswerValue, Item};

/// 一次生成的结果
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    /// structured 模式：解析后的题目列表
    Items(Vec<Item>),
    /// markdown 模式：原样保存的 markdown 文本
    Markdown(String),
}

impl GeneratedContent {
    /// 空结果视为"尚未生成"
    pub fn is_empty(&self) -> bool {
        match self {
            GeneratedContent::Items(items) => items.is_empty(),
            GeneratedContent::Markdown(text) => text.trim().is_empty(),
        }
    }

    pub fn items(&self) -> Option<&[Item]> {
        match self {
            GeneratedContent::Items(items) => Some(items),
            GeneratedContent::Markdown(_) => None,
        }
    }
}
