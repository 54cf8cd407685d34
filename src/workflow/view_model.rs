//! 视图模型 - 流程层
//!
//! 把界面状态收敛到一个对象里，所有变化都经过 [`ViewModel::apply`]：
//!
//! ```text
//! idle ──GenerationStarted──▶ loading ──Succeeded──▶ success(content)
//!                                │
//!                                └──────Failed─────▶ error(message)
//! ```
//!
//! 请求带有编号，只有当前在途请求的结果会被提交。

use std::collections::BTreeMap;

use crate::models::{AnswerValue, CardCount, ExamType, GeneratedContent, StudyForm};

/// 结果区所处阶段
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// 尚无结果
    #[default]
    Idle,
    /// 请求进行中
    Loading { request_id: u64 },
    /// 最近一次生成成功
    Success(GeneratedContent),
    /// 最近一次生成失败
    Error(String),
}

/// 选项的高亮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// 未选中
    Neutral,
    /// 选中且正确（绿色）
    Correct,
    /// 选中但错误（红色）
    Incorrect,
}

/// 视图模型的状态转移
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSubject(String),
    SetExamType(ExamType),
    SetFocusArea(String),
    SetNumCards(CardCount),
    GenerationStarted { request_id: u64 },
    GenerationSucceeded {
        request_id: u64,
        content: GeneratedContent,
    },
    GenerationFailed { request_id: u64, message: String },
    /// 点击某道题的某个选项
    SelectOption { item: usize, choice: AnswerValue },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    form: StudyForm,
    phase: Phase,
    selections: BTreeMap<usize, AnswerValue>,
}

impl ViewModel {
    pub fn new(form: StudyForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// 应用一次状态转移
    ///
    /// 返回 `false` 表示该动作被忽略（过期请求的结果、越界的选择等）
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetSubject(subject) => self.form.subject = subject,
            Action::SetExamType(exam_type) => self.form.exam_type = exam_type,
            Action::SetFocusArea(focus_area) => self.form.focus_area = focus_area,
            Action::SetNumCards(num_cards) => self.form.num_cards = num_cards,
            Action::GenerationStarted { request_id } => {
                // 新一轮生成开始时清空旧结果和旧的选择
                self.phase = Phase::Loading { request_id };
                self.selections.clear();
            }
            Action::GenerationSucceeded {
                request_id,
                content,
            } => {
                if self.in_flight() != Some(request_id) {
                    return false;
                }
                self.phase = if content.is_empty() {
                    Phase::Idle
                } else {
                    Phase::Success(content)
                };
            }
            Action::GenerationFailed {
                request_id,
                message,
            } => {
                if self.in_flight() != Some(request_id) {
                    return false;
                }
                self.phase = Phase::Error(message);
            }
            Action::SelectOption { item, choice } => {
                let item_count = self.items().map_or(0, |items| items.len());
                if item >= item_count {
                    return false;
                }
                self.selections.insert(item, choice);
            }
        }
        true
    }

    pub fn form(&self) -> &StudyForm {
        &self.form
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// 当前在途请求的编号
    pub fn in_flight(&self) -> Option<u64> {
        match self.phase {
            Phase::Loading { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&GeneratedContent> {
        match &self.phase {
            Phase::Success(content) => Some(content),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[crate::models::Item]> {
        self.content().and_then(GeneratedContent::items)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn selection(&self, item: usize) -> Option<&AnswerValue> {
        self.selections.get(&item)
    }

    /// 每次渲染都根据当前选择重新计算，切换选择后旧选项自然恢复为未选中
    pub fn option_state(&self, item: usize, option: &AnswerValue) -> OptionState {
        let Some(selected) = self.selections.get(&item) else {
            return OptionState::Neutral;
        };
        if selected != option {
            return OptionState::Neutral;
        }
        match self.items().and_then(|items| items.get(item)) {
            Some(it) if it.is_correct(option) => OptionState::Correct,
            _ => OptionState::Incorrect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn choice_item(question: &str, options: &[&str], answer: &str) -> Item {
        Item {
            question: question.to_string(),
            answer: AnswerValue::from(answer),
            options: Some(serde_json::json!(options)),
        }
    }

    fn loaded_view() -> ViewModel {
        let mut view = ViewModel::default();
        view.apply(Action::GenerationStarted { request_id: 1 });
        view.apply(Action::GenerationSucceeded {
            request_id: 1,
            content: GeneratedContent::Items(vec![
                choice_item("Biggest planet?", &["Mars", "Jupiter", "Venus"], "Jupiter"),
                choice_item("Closest star?", &["Sun", "Sirius"], "Sun"),
            ]),
        });
        view
    }

    #[test]
    fn test_idle_to_loading_to_success() {
        let mut view = ViewModel::default();
        assert_eq!(view.phase(), &Phase::Idle);

        view.apply(Action::GenerationStarted { request_id: 1 });
        assert!(view.is_loading());
        assert_eq!(view.in_flight(), Some(1));

        let view = loaded_view();
        assert!(!view.is_loading());
        assert_eq!(view.items().unwrap().len(), 2);
    }

    #[test]
    fn test_failure_keeps_result_empty() {
        let mut view = loaded_view();
        view.apply(Action::GenerationStarted { request_id: 2 });
        view.apply(Action::GenerationFailed {
            request_id: 2,
            message: "Failed to generate".to_string(),
        });

        assert!(view.items().is_none());
        assert_eq!(view.error(), Some("Failed to generate"));
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut view = ViewModel::default();
        view.apply(Action::GenerationStarted { request_id: 1 });
        view.apply(Action::GenerationStarted { request_id: 2 });

        let committed = view.apply(Action::GenerationSucceeded {
            request_id: 1,
            content: GeneratedContent::Markdown("| a |".to_string()),
        });
        assert!(!committed);
        assert_eq!(view.in_flight(), Some(2));

        let committed = view.apply(Action::GenerationFailed {
            request_id: 1,
            message: "late".to_string(),
        });
        assert!(!committed);
        assert!(view.error().is_none());
    }

    #[test]
    fn test_empty_markdown_returns_to_idle() {
        let mut view = ViewModel::default();
        view.apply(Action::GenerationStarted { request_id: 5 });
        view.apply(Action::GenerationSucceeded {
            request_id: 5,
            content: GeneratedContent::Markdown(String::new()),
        });
        assert_eq!(view.phase(), &Phase::Idle);
    }

    #[test]
    fn test_selection_highlights_and_replaces() {
        let mut view = loaded_view();
        let mars = AnswerValue::from("Mars");
        let jupiter = AnswerValue::from("Jupiter");

        assert_eq!(view.option_state(0, &mars), OptionState::Neutral);

        view.apply(Action::SelectOption {
            item: 0,
            choice: mars.clone(),
        });
        assert_eq!(view.option_state(0, &mars), OptionState::Incorrect);
        assert_eq!(view.option_state(0, &jupiter), OptionState::Neutral);

        view.apply(Action::SelectOption {
            item: 0,
            choice: jupiter.clone(),
        });
        assert_eq!(view.option_state(0, &jupiter), OptionState::Correct);
        assert_eq!(view.option_state(0, &mars), OptionState::Neutral);

        // 其他题目不受影响
        assert_eq!(view.option_state(1, &AnswerValue::from("Sun")), OptionState::Neutral);
    }

    #[test]
    fn test_selection_out_of_range_is_ignored() {
        let mut view = loaded_view();
        assert!(!view.apply(Action::SelectOption {
            item: 9,
            choice: AnswerValue::from("x"),
        }));
        assert!(view.selection(9).is_none());
    }

    #[test]
    fn test_new_generation_clears_selection() {
        let mut view = loaded_view();
        view.apply(Action::SelectOption {
            item: 1,
            choice: AnswerValue::from("Sun"),
        });
        assert!(view.selection(1).is_some());

        view.apply(Action::GenerationStarted { request_id: 2 });
        assert!(view.selection(1).is_none());
    }

    #[test]
    fn test_form_edits_do_not_touch_phase() {
        let mut view = loaded_view();
        view.apply(Action::SetExamType(ExamType::TrueFalse));
        view.apply(Action::SetSubject("Astronomy".to_string()));

        assert_eq!(view.form().exam_type, ExamType::TrueFalse);
        assert_eq!(view.form().subject, "Astronomy");
        assert_eq!(view.items().unwrap().len(), 2);
    }
}
