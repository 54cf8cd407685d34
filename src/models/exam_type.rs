use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// 考试类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExamType {
    /// 问答卡片
    #[default]
    Flashcards,
    /// 单选题
    MultipleChoice,
    /// 判断题
    TrueFalse,
}

/// 输入文本到考试类型的映射（含简写）
static EXAM_TYPE_ALIASES: phf::Map<&'static str, ExamType> = phf_map! {
    "flashcards" => ExamType::Flashcards,
    "flashcard" => ExamType::Flashcards,
    "fc" => ExamType::Flashcards,
    "multiple-choice" => ExamType::MultipleChoice,
    "mc" => ExamType::MultipleChoice,
    "true-false" => ExamType::TrueFalse,
    "tf" => ExamType::TrueFalse,
};

impl ExamType {
    pub const ALL: [ExamType; 3] = [
        ExamType::Flashcards,
        ExamType::MultipleChoice,
        ExamType::TrueFalse,
    ];

    /// 写入提示词和表单的取值
    pub fn slug(self) -> &'static str {
        match self {
            ExamType::Flashcards => "flashcards",
            ExamType::MultipleChoice => "multiple-choice",
            ExamType::TrueFalse => "true-false",
        }
    }

    /// 表单下拉框中显示的名称
    pub fn label(self) -> &'static str {
        match self {
            ExamType::Flashcards => "Flashcards",
            ExamType::MultipleChoice => "Multiple Choice",
            ExamType::TrueFalse => "True/False",
        }
    }

    /// 单选题和判断题共用同一套可点选的渲染
    pub fn is_choice(self) -> bool {
        matches!(self, ExamType::MultipleChoice | ExamType::TrueFalse)
    }

    pub fn from_slug(input: &str) -> Option<Self> {
        EXAM_TYPE_ALIASES
            .get(input.trim().to_ascii_lowercase().as_str())
            .copied()
    }
}

impl FromStr for ExamType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| FormError::UnknownExamType {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slugs_and_aliases() {
        assert_eq!("flashcards".parse::<ExamType>().unwrap(), ExamType::Flashcards);
        assert_eq!("Multiple-Choice".parse::<ExamType>().unwrap(), ExamType::MultipleChoice);
        assert_eq!(" tf ".parse::<ExamType>().unwrap(), ExamType::TrueFalse);
    }

    #[test]
    fn test_unknown_exam_type() {
        let err = "essay".parse::<ExamType>().unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownExamType {
                input: "essay".to_string()
            }
        );
    }

    #[test]
    fn test_slug_roundtrip_for_all() {
        for exam_type in ExamType::ALL {
            assert_eq!(ExamType::from_slug(exam_type.slug()), Some(exam_type));
        }
        assert!(!ExamType::Flashcards.is_choice());
        assert!(ExamType::TrueFalse.is_choice());
    }
}
